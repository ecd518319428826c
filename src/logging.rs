use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{json, Value};

use crate::types::GameEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct StructuredLogLine {
    #[serde(rename = "timestampMs")]
    pub timestamp_ms: u64,
    pub level: LogLevel,
    pub event: String,
    #[serde(rename = "gameId")]
    pub game_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick: Option<u64>,
    pub details: Value,
}

enum Sink {
    Stderr,
    File(File),
    #[cfg(test)]
    Memory(Vec<String>),
}

/// JSON-lines logger. While the game owns the terminal, stderr lines are held
/// back and released once the screen is restored; file output is immediate.
pub struct Logger {
    game_id: String,
    min_level: LogLevel,
    sink: Sink,
    holding: bool,
    held: Vec<String>,
}

impl Logger {
    pub fn stderr(game_id: impl Into<String>, min_level: LogLevel) -> Self {
        Self::with_sink(game_id.into(), min_level, Sink::Stderr)
    }

    pub fn to_file(
        game_id: impl Into<String>,
        min_level: LogLevel,
        path: &Path,
    ) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_sink(game_id.into(), min_level, Sink::File(file)))
    }

    #[cfg(test)]
    pub(crate) fn memory(game_id: &str, min_level: LogLevel) -> Self {
        Self::with_sink(game_id.to_string(), min_level, Sink::Memory(Vec::new()))
    }

    fn with_sink(game_id: String, min_level: LogLevel, sink: Sink) -> Self {
        Self {
            game_id,
            min_level,
            sink,
            holding: false,
            held: Vec::new(),
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn hold(&mut self) {
        self.holding = true;
    }

    pub fn release(&mut self) {
        self.holding = false;
        for line in std::mem::take(&mut self.held) {
            self.write_line(line);
        }
    }

    pub fn log(&mut self, level: LogLevel, event: &str, tick: Option<u64>, details: Value) {
        if level < self.min_level {
            return;
        }
        let log_line = StructuredLogLine {
            timestamp_ms: now_ms(),
            level,
            event: event.to_string(),
            game_id: self.game_id.clone(),
            tick,
            details,
        };
        let text = serde_json::to_string(&log_line).expect("structured log should serialize");
        if self.holding && matches!(self.sink, Sink::Stderr) {
            self.held.push(text);
            return;
        }
        self.write_line(text);
    }

    pub fn log_game_event(&mut self, tick: u64, event: &GameEvent) {
        let (level, name, details) = match event {
            GameEvent::CoinCollected { x, y, score } => (
                LogLevel::Info,
                "coin_collected",
                json!({ "x": x, "y": y, "score": score }),
            ),
            GameEvent::GatesOpened { gate_count } => (
                LogLevel::Info,
                "gates_opened",
                json!({ "gateCount": gate_count }),
            ),
            GameEvent::AdversaryContact {
                adversary_index,
                x,
                y,
            } => (
                LogLevel::Debug,
                "adversary_contact",
                json!({ "adversaryIndex": adversary_index, "x": x, "y": y }),
            ),
            GameEvent::Won { score } => (LogLevel::Info, "game_won", json!({ "score": score })),
        };
        self.log(level, name, Some(tick), details);
    }

    fn write_line(&mut self, line: String) {
        match &mut self.sink {
            Sink::Stderr => eprintln!("{line}"),
            Sink::File(file) => {
                // A failing log file must not take the game down with it.
                let _ = writeln!(file, "{line}");
            }
            #[cfg(test)]
            Sink::Memory(lines) => lines.push(line),
        }
    }

    #[cfg(test)]
    pub(crate) fn lines(&self) -> Vec<Value> {
        match &self.sink {
            Sink::Memory(lines) => lines
                .iter()
                .map(|line| serde_json::from_str(line).expect("log line is json"))
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

pub fn default_game_id(seed: u32, timestamp_ms: u64) -> String {
    format!("maze-{seed}-{timestamp_ms}")
}
