pub const WALL: char = '*';
pub const GATE: char = '#';
pub const COIN: char = '^';
pub const ADVERSARY: char = '%';
pub const EMPTY: char = ' ';
pub const PLAYER: char = 'P';

pub const DEFAULT_MAZE_PATH: &str = "maze.txt";
pub const DEFAULT_ADVERSARY_COUNT: usize = 20;
pub const DEFAULT_COIN_COUNT: usize = 20;
pub const MAX_ENTITY_COUNT: usize = 200;

pub const COIN_REWARD: u32 = 100;

pub const BANNER_LINES: [&str; 6] = [
    "Welcome to the Maze Game!",
    "Navigate the maze using the arrow keys.",
    "Collect all the '^' coins to unlock the treasure.",
    "Avoid the bad guys '%'.",
    "Press Escape to exit the game.",
    "Press any key to start.",
];

pub fn max_score(coin_count: usize) -> u32 {
    coin_count as u32 * COIN_REWARD
}
