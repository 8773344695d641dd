use std::fmt;
use std::time::{Duration, Instant};

/// Stopwatch driven by the game's start and end signals.
#[derive(Clone, Copy, Debug, Default)]
pub struct Clock {
    started: Option<Instant>,
    stopped: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self { Self::default() }

    pub fn is_running(&self) -> bool { self.started.is_some() && self.stopped.is_none() }

    pub fn start(&mut self) {
        if self.is_running() { return; }
        self.started = Some(Instant::now());
        self.stopped = None;
    }

    pub fn stop(&mut self) {
        if !self.is_running() { return; }
        self.stopped = Some(Instant::now());
    }

    pub fn reset(&mut self) { *self = Self::default(); }

    pub fn elapsed(&self) -> Duration {
        match (self.started, self.stopped) {
            (None, _) => Duration::ZERO,
            (Some(start), None) => start.elapsed(),
            (Some(start), Some(end)) => end.duration_since(start),
        }
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_elapsed(self.elapsed()))
    }
}

/// `mm:ss`, with an `hh:` prefix once the first hour has passed.
pub fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
    if hours > 0 { format!("{:02}:{:02}:{:02}", hours, minutes, seconds) } else { format!("{:02}:{:02}", minutes, seconds) }
}
