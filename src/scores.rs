use std::fmt;
use std::time::Duration;

use crate::clock::format_elapsed;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
    pub elapsed: Duration,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}, {} mines, {}", self.width, self.height, self.mines, format_elapsed(self.elapsed))
    }
}

/// Won games of the current session, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ScoreBoard {
    scores: Vec<Score>,
}

impl ScoreBoard {
    pub fn new() -> Self { Self::default() }

    pub fn record(&mut self, score: Score) { self.scores.push(score); }

    pub fn scores(&self) -> &[Score] { &self.scores }

    pub fn latest(&self) -> Option<&Score> { self.scores.last() }

    pub fn is_empty(&self) -> bool { self.scores.is_empty() }
}
