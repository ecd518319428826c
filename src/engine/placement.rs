use crate::constants::{ADVERSARY, COIN, EMPTY};
use crate::error::MazeFormatError;
use crate::maze::Maze;
use crate::rng::Rng;
use crate::types::Vec2;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Placement {
    pub adversaries: Vec<Vec2>,
    pub coins: Vec<Vec2>,
}

/// Scatters adversaries, then coins, over shuffled candidate cells.
///
/// Adversaries accept empty or coin-marked cells; coins accept strictly empty
/// cells, so they never land under an adversary. Capacity is checked up front
/// instead of retrying forever on a crowded maze.
pub(crate) fn place_entities(
    maze: &mut Maze,
    adversary_count: usize,
    coin_count: usize,
    rng: &mut Rng,
) -> Result<Placement, MazeFormatError> {
    let required = adversary_count + coin_count;
    let available = maze.cells_where(|symbol| symbol == EMPTY).len();
    if available < required {
        return Err(MazeFormatError::InsufficientCapacity {
            required,
            available,
        });
    }

    let mut placement = Placement::default();

    let mut candidates = maze.cells_where(|symbol| symbol == EMPTY || symbol == COIN);
    rng.shuffle(&mut candidates);
    for pos in candidates.into_iter().take(adversary_count) {
        maze.set_cell(pos.x, pos.y, ADVERSARY);
        placement.adversaries.push(pos);
    }

    let mut candidates = maze.cells_where(|symbol| symbol == EMPTY);
    rng.shuffle(&mut candidates);
    for pos in candidates.into_iter().take(coin_count) {
        maze.set_cell(pos.x, pos.y, COIN);
        placement.coins.push(pos);
    }

    Ok(placement)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::place_entities;
    use crate::constants::{ADVERSARY, COIN, WALL};
    use crate::error::MazeFormatError;
    use crate::maze::Maze;
    use crate::rng::Rng;

    fn open_maze() -> Maze {
        Maze::parse(&[
            "**********",
            "*        *",
            "*        *",
            "*        *",
            "*        #",
            "**********",
        ])
        .expect("valid maze")
    }

    #[test]
    fn places_requested_counts_on_distinct_free_cells() {
        for seed in 0..50u32 {
            let mut maze = open_maze();
            let mut rng = Rng::new(seed);
            let placement = place_entities(&mut maze, 6, 8, &mut rng).expect("room to place");
            assert_eq!(placement.adversaries.len(), 6);
            assert_eq!(placement.coins.len(), 8);

            let mut seen = HashSet::new();
            for pos in placement.adversaries.iter().chain(placement.coins.iter()) {
                assert!(seen.insert(*pos), "seed={seed} reused cell {pos:?}");
                assert_ne!(maze.cell(pos.x, pos.y), Some(WALL));
            }
            for pos in &placement.adversaries {
                assert_eq!(maze.cell(pos.x, pos.y), Some(ADVERSARY));
            }
            for pos in &placement.coins {
                assert_eq!(maze.cell(pos.x, pos.y), Some(COIN));
            }
            assert_eq!(maze.count_symbol(ADVERSARY), 6);
            assert_eq!(maze.count_symbol(COIN), 8);
        }
    }

    #[test]
    fn same_seed_places_identically() {
        let mut a = open_maze();
        let mut b = open_maze();
        let pa = place_entities(&mut a, 5, 5, &mut Rng::new(42)).expect("room to place");
        let pb = place_entities(&mut b, 5, 5, &mut Rng::new(42)).expect("room to place");
        assert_eq!(pa, pb);
        assert_eq!(a, b);
    }

    #[test]
    fn exact_capacity_fills_every_free_cell() {
        let mut maze = Maze::parse(&["*****", "*   *", "*****"]).expect("valid maze");
        let placement = place_entities(&mut maze, 1, 2, &mut Rng::new(5)).expect("exact fit");
        assert_eq!(placement.adversaries.len() + placement.coins.len(), 3);
        assert_eq!(maze.row_string(1).map(|row| row.contains(' ')), Some(false));
    }

    #[test]
    fn insufficient_capacity_is_reported_instead_of_hanging() {
        let mut maze = Maze::parse(&["*****", "*   *", "*****"]).expect("valid maze");
        let before = maze.clone();
        let err = place_entities(&mut maze, 2, 2, &mut Rng::new(1)).unwrap_err();
        assert_eq!(
            err,
            MazeFormatError::InsufficientCapacity {
                required: 4,
                available: 3
            }
        );
        assert_eq!(maze, before, "failed placement leaves the grid untouched");
    }
}
