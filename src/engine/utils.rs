use crate::rng::Rng;
use crate::types::{Direction, Vec2};

pub(super) fn offset(pos: Vec2, dir: Direction) -> Vec2 {
    match dir {
        Direction::Up => Vec2::new(pos.x, pos.y - 1),
        Direction::Down => Vec2::new(pos.x, pos.y + 1),
        Direction::Left => Vec2::new(pos.x - 1, pos.y),
        Direction::Right => Vec2::new(pos.x + 1, pos.y),
    }
}

pub(super) fn random_direction(rng: &mut Rng) -> Direction {
    Direction::ALL[rng.pick_index(Direction::ALL.len())]
}
