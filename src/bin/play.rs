use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use maze_dash::config::{
    normalize_adversary_count, normalize_coin_count, normalize_seed, parse_start,
    resolve_log_level, resolve_maze_path, GameConfig,
};
use maze_dash::engine::{GameEngine, GameEngineOptions};
use maze_dash::error::GameError;
use maze_dash::logging::{default_game_id, LogLevel, Logger};
use maze_dash::maze::Maze;
use maze_dash::session::{GameSession, SessionReport};
use maze_dash::terminal::{KeyboardInput, TerminalDisplay, TerminalGuard};
use maze_dash::timer::format_elapsed;
use maze_dash::types::{GameOutcome, GameSummary, Vec2};
use serde_json::json;

const EXIT_MAZE_ERROR: i32 = 1;
const EXIT_TERMINAL_ERROR: i32 = 2;
const EXIT_SUMMARY_ERROR: i32 = 3;
const EXIT_LOG_ERROR: i32 = 4;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Maze layout file (falls back to MAZE_PATH, then maze.txt).
    #[arg(long)]
    maze: Option<PathBuf>,
    #[arg(long)]
    adversaries: Option<i64>,
    #[arg(long)]
    coins: Option<i64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Player start as X,Y.
    #[arg(long)]
    start: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
    #[arg(long)]
    log_out: Option<PathBuf>,
    #[arg(long)]
    log_level: Option<String>,
    #[arg(long)]
    game_id: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(EXIT_MAZE_ERROR);
        }
    };
    let game_id = cli
        .game_id
        .clone()
        .unwrap_or_else(|| default_game_id(config.seed, now_ms()));
    let mut logger = match open_logger(&game_id, &config) {
        Ok(logger) => logger,
        Err(error) => {
            eprintln!("could not open log file: {error}");
            std::process::exit(EXIT_LOG_ERROR);
        }
    };

    let engine = match Maze::load(&config.maze_path).and_then(|maze| {
        GameEngine::new(maze, config.seed, config.engine.clone()).map_err(GameError::from)
    }) {
        Ok(engine) => engine,
        Err(error) => {
            logger.log(
                LogLevel::Error,
                "maze_load_failed",
                None,
                json!({
                    "path": config.maze_path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            eprintln!("{error}");
            std::process::exit(EXIT_MAZE_ERROR);
        }
    };

    logger.log(
        LogLevel::Info,
        "game_started",
        None,
        json!({
            "maze": config.maze_path.to_string_lossy(),
            "width": engine.maze().width(),
            "height": engine.maze().height(),
            "adversaries": engine.adversaries().len(),
            "coins": engine.active_coins().len(),
            "seed": engine.seed(),
        }),
    );

    let report = match play(engine, &mut logger) {
        Ok(report) => report,
        Err(error) => {
            logger.release();
            logger.log(
                LogLevel::Error,
                "terminal_failed",
                None,
                json!({ "error": error.to_string() }),
            );
            eprintln!("{error}");
            std::process::exit(EXIT_TERMINAL_ERROR);
        }
    };

    let summary = report.to_summary(logger.game_id());
    logger.log(
        LogLevel::Info,
        "game_finished",
        Some(report.ticks),
        json!({
            "outcome": summary.outcome,
            "score": summary.score,
            "elapsedMs": summary.elapsed_ms,
        }),
    );
    if report.outcome == GameOutcome::Won {
        print_win_report(&report);
    }

    if let Some(path) = config.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            logger.log(
                LogLevel::Error,
                "summary_write_failed",
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(EXIT_SUMMARY_ERROR);
        }
    }
}

/// Owns the terminal for the length of the session and always hands it back.
fn play(engine: GameEngine, logger: &mut Logger) -> Result<SessionReport, GameError> {
    let mut guard = TerminalGuard::enter()?;
    logger.hold();
    let mut session = GameSession::new(engine);
    let result = session.run(&mut KeyboardInput, &mut TerminalDisplay::stdout(), logger);
    let restored = guard.restore();
    logger.release();
    let report = result?;
    restored?;
    Ok(report)
}

fn build_config(cli: &Cli) -> Result<GameConfig, String> {
    let player_start = match cli.start.as_deref() {
        Some(raw) => {
            parse_start(raw).ok_or_else(|| format!("invalid --start {raw:?}, expected X,Y"))?
        }
        None => Vec2::new(0, 0),
    };
    Ok(GameConfig {
        maze_path: resolve_maze_path(cli.maze.clone(), std::env::var("MAZE_PATH").ok()),
        seed: normalize_seed(cli.seed.unwrap_or_else(rand::random::<u64>)),
        engine: GameEngineOptions {
            adversary_count: normalize_adversary_count(cli.adversaries),
            coin_count: normalize_coin_count(cli.coins),
            player_start,
        },
        log_level: resolve_log_level(cli.log_level.as_deref(), std::env::var("MAZE_LOG").ok()),
        log_out: cli.log_out.clone(),
        summary_out: cli.summary_out.clone(),
    })
}

fn open_logger(game_id: &str, config: &GameConfig) -> io::Result<Logger> {
    match config.log_out.as_ref() {
        Some(path) => Logger::to_file(game_id, config.log_level, path),
        None => Ok(Logger::stderr(game_id, config.log_level)),
    }
}

fn print_win_report(report: &SessionReport) {
    println!("Congratulations, you won!");
    println!("Your time: {}", format_elapsed(report.elapsed));
    println!("Your score: {}", report.score);
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn write_summary(path: &Path, summary: &GameSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary).expect("summary should serialize");
    std::fs::write(path, summary_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_summary() -> GameSummary {
        GameSummary {
            game_id: "maze-1-1".to_string(),
            outcome: GameOutcome::Won,
            score: 2_000,
            max_score: 2_000,
            coins_collected: 20,
            ticks: 311,
            elapsed_ms: 95_000,
            finished_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("play").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn defaults_match_the_classic_game() {
        let config = build_config(&parse(&["--seed", "7", "--maze", "m.txt"])).expect("config");
        assert_eq!(config.seed, 7);
        assert_eq!(config.maze_path, PathBuf::from("m.txt"));
        assert_eq!(config.engine.adversary_count, 20);
        assert_eq!(config.engine.coin_count, 20);
        assert_eq!(config.engine.player_start, Vec2::new(0, 0));
    }

    #[test]
    fn flags_override_counts_and_start() {
        let config = build_config(&parse(&[
            "--adversaries",
            "3",
            "--coins",
            "999",
            "--start",
            "2,5",
        ]))
        .expect("config");
        assert_eq!(config.engine.adversary_count, 3);
        assert_eq!(config.engine.coin_count, 200);
        assert_eq!(config.engine.player_start, Vec2::new(2, 5));
    }

    #[test]
    fn malformed_start_is_rejected() {
        assert!(build_config(&parse(&["--start", "two,five"])).is_err());
    }

    #[test]
    fn unwritable_log_file_fails_with_its_own_exit_code() {
        let mut config = build_config(&parse(&["--seed", "1"])).expect("config");
        config.log_out = Some(
            std::env::temp_dir()
                .join(format!("maze-dash-missing-{}", now_ms()))
                .join("game.log"),
        );
        assert!(open_logger("g", &config).is_err());
        let codes = [
            EXIT_MAZE_ERROR,
            EXIT_TERMINAL_ERROR,
            EXIT_SUMMARY_ERROR,
            EXIT_LOG_ERROR,
        ];
        for (i, code) in codes.iter().enumerate() {
            assert!(!codes[i + 1..].contains(code), "exit code {code} reused");
        }
    }

    #[test]
    fn write_summary_returns_error_when_parent_does_not_exist() {
        let target = std::env::temp_dir()
            .join(format!("maze-dash-missing-{}", now_ms()))
            .join("summary.json");
        assert!(write_summary(&target, &make_summary()).is_err());
    }

    #[test]
    fn write_summary_emits_camel_case_json() {
        let target = std::env::temp_dir().join(format!("maze-dash-summary-{}.json", now_ms()));
        write_summary(&target, &make_summary()).expect("summary written");
        let text = std::fs::read_to_string(&target).expect("summary readable");
        let value: serde_json::Value = serde_json::from_str(&text).expect("summary is json");
        assert_eq!(value["outcome"], "won");
        assert_eq!(value["coinsCollected"], 20);
        assert_eq!(value["elapsedMs"], 95_000);
        let _ = std::fs::remove_file(&target);
    }
}
