use crate::constants::{
    max_score, ADVERSARY, COIN, COIN_REWARD, DEFAULT_ADVERSARY_COUNT, DEFAULT_COIN_COUNT, PLAYER,
};
use crate::error::MazeFormatError;
use crate::maze::Maze;
use crate::rng::Rng;
use crate::types::{Direction, GameEvent, Vec2};

mod movement;
mod placement;
mod utils;

use self::placement::place_entities;
use self::utils::{offset, random_direction};

/// Position marking a coin that has already been collected.
const COLLECTED: Vec2 = Vec2::new(-1, -1);

#[derive(Clone, Debug)]
pub struct GameEngineOptions {
    pub adversary_count: usize,
    pub coin_count: usize,
    pub player_start: Vec2,
}

impl Default for GameEngineOptions {
    fn default() -> Self {
        Self {
            adversary_count: DEFAULT_ADVERSARY_COUNT,
            coin_count: DEFAULT_COIN_COUNT,
            player_start: Vec2::new(0, 0),
        }
    }
}

/// Whole game state. Grid symbols and entity records are only mutated
/// together, through `step`.
#[derive(Clone, Debug)]
pub struct GameEngine {
    seed: u32,
    maze: Maze,
    rng: Rng,
    player: Vec2,
    adversaries: Vec<Vec2>,
    coins: Vec<Vec2>,
    score: u32,
    max_score: u32,
    gates_open: bool,
    won: bool,
    tick_counter: u64,
    events: Vec<GameEvent>,
}

impl GameEngine {
    pub fn new(
        mut maze: Maze,
        seed: u32,
        options: GameEngineOptions,
    ) -> Result<Self, MazeFormatError> {
        check_start(&maze, options.player_start)?;
        let mut rng = Rng::new(seed);
        let placement = place_entities(
            &mut maze,
            options.adversary_count,
            options.coin_count,
            &mut rng,
        )?;
        Ok(Self::assemble(
            maze,
            rng,
            seed,
            options.player_start,
            placement.adversaries,
            placement.coins,
        ))
    }

    /// Builds a game with entities at fixed positions instead of a random scatter.
    #[cfg(test)]
    pub(crate) fn from_layout(
        mut maze: Maze,
        seed: u32,
        player_start: Vec2,
        adversaries: Vec<Vec2>,
        coins: Vec<Vec2>,
    ) -> Self {
        for pos in &coins {
            maze.set_cell(pos.x, pos.y, COIN);
        }
        for pos in &adversaries {
            maze.set_cell(pos.x, pos.y, ADVERSARY);
        }
        Self::assemble(maze, Rng::new(seed), seed, player_start, adversaries, coins)
    }

    fn assemble(
        maze: Maze,
        rng: Rng,
        seed: u32,
        player: Vec2,
        adversaries: Vec<Vec2>,
        coins: Vec<Vec2>,
    ) -> Self {
        let mut engine = Self {
            seed,
            max_score: max_score(coins.len()),
            maze,
            rng,
            player,
            adversaries,
            coins,
            score: 0,
            gates_open: false,
            won: false,
            tick_counter: 0,
            events: Vec::new(),
        };
        // A coinless game starts with the treasure already unlocked.
        engine.open_gates_if_complete();
        engine
    }

    /// Runs one tick: player move, adversary moves, coin pickup, gate unlock, win check.
    pub fn step(&mut self, player_dir: Option<Direction>) {
        if self.won {
            return;
        }
        self.tick_counter += 1;

        if let Some(dir) = player_dir {
            self.move_player(dir);
        }
        self.update_adversaries();
        self.collect_coins();
        self.open_gates_if_complete();
        self.report_adversary_contact();
        self.check_win();
    }

    /// Grid rows with the player overlaid, a blank line, then the score line.
    pub fn build_frame(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.maze.height() as usize + 2);
        for y in 0..self.maze.height() {
            let Some(row) = self.maze.row_string(y) else {
                continue;
            };
            if y != self.player.y || !self.maze.in_bounds(self.player.x, self.player.y) {
                lines.push(row);
                continue;
            }
            lines.push(
                row.chars()
                    .enumerate()
                    .map(|(x, symbol)| {
                        if x as i32 == self.player.x {
                            PLAYER
                        } else {
                            symbol
                        }
                    })
                    .collect(),
            );
        }
        lines.push(String::new());
        lines.push(format!("Score: {}", self.score));
        lines
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> Vec2 {
        self.player
    }

    pub fn adversaries(&self) -> &[Vec2] {
        &self.adversaries
    }

    pub fn active_coins(&self) -> Vec<Vec2> {
        self.coins
            .iter()
            .copied()
            .filter(|coin| *coin != COLLECTED)
            .collect()
    }

    pub fn coins_collected(&self) -> usize {
        self.coins.iter().filter(|coin| **coin == COLLECTED).count()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn gates_open(&self) -> bool {
        self.gates_open
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_counter
    }
}

fn check_start(maze: &Maze, start: Vec2) -> Result<(), MazeFormatError> {
    if !maze.in_bounds(start.x, start.y) {
        return Err(MazeFormatError::StartOutOfBounds {
            x: start.x,
            y: start.y,
            width: maze.width(),
            height: maze.height(),
        });
    }
    if !maze.is_passable(start.x, start.y) {
        return Err(MazeFormatError::StartBlocked {
            x: start.x,
            y: start.y,
        });
    }
    Ok(())
}
