use std::time::{Duration, Instant};

#[derive(Clone, Debug, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    stopped: Option<Duration>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.stopped = None;
    }

    /// Freezes the reading. Later calls keep the first stop.
    pub fn stop(&mut self) -> Duration {
        if let Some(stopped) = self.stopped {
            return stopped;
        }
        let elapsed = self.elapsed();
        if self.started_at.is_some() {
            self.stopped = Some(elapsed);
        }
        elapsed
    }

    pub fn elapsed(&self) -> Duration {
        if let Some(stopped) = self.stopped {
            return stopped;
        }
        self.started_at
            .map(|started| started.elapsed())
            .unwrap_or_default()
    }
}

/// `HH:MM:SS.mmm`; hours keep counting past 99.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1_000) % 60;
    let millis = total_ms % 1_000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}
