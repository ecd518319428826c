use std::io;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::constants::BANNER_LINES;
use crate::engine::GameEngine;
use crate::logging::{LogLevel, Logger};
use crate::timer::Stopwatch;
use crate::types::{Command, GameOutcome, GameSummary};

/// Blocking source of decoded key presses.
pub trait InputSource {
    fn next_command(&mut self) -> io::Result<Command>;

    /// Blocks until any key is pressed.
    fn wait_for_key(&mut self) -> io::Result<()>;
}

/// Full-screen surface the game redraws every tick.
pub trait Display {
    fn show_banner(&mut self, lines: &[&str]) -> io::Result<()>;

    fn draw(&mut self, lines: &[String]) -> io::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated(GameOutcome),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionReport {
    pub outcome: GameOutcome,
    pub score: u32,
    pub max_score: u32,
    pub coins_collected: usize,
    pub ticks: u64,
    pub elapsed: Duration,
}

impl SessionReport {
    pub fn to_summary(&self, game_id: &str) -> GameSummary {
        GameSummary {
            game_id: game_id.to_string(),
            outcome: self.outcome,
            score: self.score,
            max_score: self.max_score,
            coins_collected: self.coins_collected,
            ticks: self.ticks,
            elapsed_ms: self.elapsed.as_millis() as u64,
            finished_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

pub struct GameSession {
    engine: GameEngine,
    stopwatch: Stopwatch,
    state: SessionState,
}

impl GameSession {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            stopwatch: Stopwatch::new(),
            state: SessionState::Running,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Banner, then one tick per key press until the player quits or wins.
    pub fn run(
        &mut self,
        input: &mut impl InputSource,
        display: &mut impl Display,
        logger: &mut Logger,
    ) -> io::Result<SessionReport> {
        display.show_banner(&BANNER_LINES)?;
        input.wait_for_key()?;

        self.stopwatch.start();
        display.draw(&self.engine.build_frame())?;

        while self.state == SessionState::Running {
            let player_dir = match input.next_command()? {
                Command::Quit => {
                    self.terminate(GameOutcome::Quit, logger);
                    break;
                }
                Command::Redraw => {
                    display.draw(&self.engine.build_frame())?;
                    continue;
                }
                Command::Move(dir) => Some(dir),
                Command::Idle => None,
            };

            self.engine.step(player_dir);
            let tick = self.engine.tick_count();
            for event in self.engine.drain_events() {
                logger.log_game_event(tick, &event);
            }
            if self.engine.is_won() {
                self.terminate(GameOutcome::Won, logger);
                break;
            }
            display.draw(&self.engine.build_frame())?;
        }

        Ok(self.report())
    }

    fn terminate(&mut self, outcome: GameOutcome, logger: &mut Logger) {
        let elapsed = self.stopwatch.stop();
        self.state = SessionState::Terminated(outcome);
        if outcome == GameOutcome::Quit {
            logger.log(
                LogLevel::Info,
                "game_quit",
                Some(self.engine.tick_count()),
                json!({
                    "score": self.engine.score(),
                    "elapsedMs": elapsed.as_millis() as u64,
                }),
            );
        }
    }

    fn report(&self) -> SessionReport {
        let outcome = match self.state {
            SessionState::Terminated(outcome) => outcome,
            SessionState::Running => GameOutcome::Quit,
        };
        SessionReport {
            outcome,
            score: self.engine.score(),
            max_score: self.engine.max_score(),
            coins_collected: self.engine.coins_collected(),
            ticks: self.engine.tick_count(),
            elapsed: self.stopwatch.elapsed(),
        }
    }
}
