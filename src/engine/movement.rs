use super::*;

impl GameEngine {
    pub(super) fn move_player(&mut self, dir: Direction) {
        let next = offset(self.player, dir);
        if self.maze.is_passable(next.x, next.y) {
            self.player = next;
        }
        assert!(
            self.maze.in_bounds(self.player.x, self.player.y),
            "player left the maze at {:?}",
            self.player
        );
    }

    /// Random walk: each adversary lifts off its cell, tries one random step,
    /// and is stamped back wherever it ends up.
    pub(super) fn update_adversaries(&mut self) {
        for idx in 0..self.adversaries.len() {
            let current = self.adversaries[idx];
            if !self.maze.in_bounds(current.x, current.y) {
                continue;
            }
            self.restamp(current, Some(idx));

            let dir = random_direction(&mut self.rng);
            let next = offset(current, dir);
            if self.maze.is_passable(next.x, next.y) {
                self.adversaries[idx] = next;
            }
            let landed = self.adversaries[idx];
            self.maze.set_cell(landed.x, landed.y, ADVERSARY);
        }
    }

    pub(super) fn collect_coins(&mut self) {
        let player = self.player;
        let mut collected = false;
        for coin in &mut self.coins {
            if *coin == COLLECTED || *coin != player {
                continue;
            }
            *coin = COLLECTED;
            self.score += COIN_REWARD;
            collected = true;
            self.events.push(GameEvent::CoinCollected {
                x: player.x,
                y: player.y,
                score: self.score,
            });
        }
        if collected {
            self.restamp(player, None);
        }
        debug_assert!(self.score <= self.max_score);
    }

    pub(super) fn open_gates_if_complete(&mut self) {
        if self.gates_open || self.score != self.max_score {
            return;
        }
        self.gates_open = true;
        let gate_count = self.maze.clear_gates();
        if gate_count > 0 {
            self.events.push(GameEvent::GatesOpened { gate_count });
        }
    }

    pub(super) fn report_adversary_contact(&mut self) {
        for (idx, pos) in self.adversaries.iter().enumerate() {
            if *pos == self.player {
                self.events.push(GameEvent::AdversaryContact {
                    adversary_index: idx,
                    x: pos.x,
                    y: pos.y,
                });
            }
        }
    }

    pub(super) fn check_win(&mut self) {
        if !self.gates_open || !self.maze.is_treasure(self.player.x, self.player.y) {
            return;
        }
        self.won = true;
        self.events.push(GameEvent::Won { score: self.score });
    }

    /// Rewrites a cell from what still occupies it: another adversary, else an
    /// uncollected coin, else the floor it was loaded with.
    fn restamp(&mut self, pos: Vec2, skip_adversary: Option<usize>) {
        let adversary_here = self
            .adversaries
            .iter()
            .enumerate()
            .any(|(idx, other)| Some(idx) != skip_adversary && *other == pos);
        let symbol = if adversary_here {
            ADVERSARY
        } else if self.coins.iter().any(|coin| *coin == pos) {
            COIN
        } else {
            self.maze.floor_symbol(pos.x, pos.y)
        };
        self.maze.set_cell(pos.x, pos.y, symbol);
    }
}
