use std::path::PathBuf;

use crate::constants::{
    DEFAULT_ADVERSARY_COUNT, DEFAULT_COIN_COUNT, DEFAULT_MAZE_PATH, MAX_ENTITY_COUNT,
};
use crate::engine::GameEngineOptions;
use crate::logging::LogLevel;
use crate::types::Vec2;

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub maze_path: PathBuf,
    pub seed: u32,
    pub engine: GameEngineOptions,
    pub log_level: LogLevel,
    pub log_out: Option<PathBuf>,
    pub summary_out: Option<PathBuf>,
}

/// CLI flag wins, then the environment, then `maze.txt`.
pub fn resolve_maze_path(flag: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    env_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MAZE_PATH))
}

pub fn normalize_adversary_count(value: Option<i64>) -> usize {
    normalize_count(value, DEFAULT_ADVERSARY_COUNT)
}

pub fn normalize_coin_count(value: Option<i64>) -> usize {
    normalize_count(value, DEFAULT_COIN_COUNT)
}

fn normalize_count(value: Option<i64>, default: usize) -> usize {
    match value {
        Some(count) => count.clamp(0, MAX_ENTITY_COUNT as i64) as usize,
        None => default,
    }
}

pub fn normalize_seed(seed: u64) -> u32 {
    seed as u32
}

/// Parses `X,Y`. Whitespace around either number is ignored.
pub fn parse_start(raw: &str) -> Option<Vec2> {
    let (x, y) = raw.split_once(',')?;
    let x = x.trim().parse::<i32>().ok()?;
    let y = y.trim().parse::<i32>().ok()?;
    Some(Vec2::new(x, y))
}

pub fn resolve_log_level(flag: Option<&str>, env_value: Option<String>) -> LogLevel {
    flag.and_then(LogLevel::parse)
        .or_else(|| env_value.as_deref().and_then(LogLevel::parse))
        .unwrap_or(LogLevel::Info)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn maze_path_prefers_flag_then_env_then_default() {
        assert_eq!(
            resolve_maze_path(Some(PathBuf::from("a.txt")), Some("b.txt".to_string())),
            PathBuf::from("a.txt")
        );
        assert_eq!(
            resolve_maze_path(None, Some(" b.txt ".to_string())),
            PathBuf::from("b.txt")
        );
        assert_eq!(
            resolve_maze_path(None, Some("   ".to_string())),
            PathBuf::from("maze.txt")
        );
        assert_eq!(resolve_maze_path(None, None), PathBuf::from("maze.txt"));
    }

    #[test]
    fn entity_counts_clamp_range() {
        assert_eq!(normalize_adversary_count(None), 20);
        assert_eq!(normalize_coin_count(None), 20);
        assert_eq!(normalize_coin_count(Some(-4)), 0);
        assert_eq!(normalize_adversary_count(Some(7)), 7);
        assert_eq!(normalize_adversary_count(Some(10_000)), 200);
    }

    #[test]
    fn start_parsing_accepts_pairs_only() {
        assert_eq!(parse_start("3,4"), Some(Vec2::new(3, 4)));
        assert_eq!(parse_start(" 0 , 12 "), Some(Vec2::new(0, 12)));
        assert_eq!(parse_start("-1,2"), Some(Vec2::new(-1, 2)));
        assert_eq!(parse_start("3"), None);
        assert_eq!(parse_start("a,b"), None);
        assert_eq!(parse_start("1,2,3"), None);
    }

    #[test]
    fn log_level_falls_back_to_info() {
        assert_eq!(resolve_log_level(Some("debug"), None), LogLevel::Debug);
        assert_eq!(
            resolve_log_level(Some("nope"), Some("warn".to_string())),
            LogLevel::Warn
        );
        assert_eq!(resolve_log_level(None, None), LogLevel::Info);
    }
}
