//! Best score tracking
//!
//! Lives only in process memory; a page reload starts from zero again.

/// Best score reached across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: i64,
}

impl HighScore {
    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Check if a score would replace the current best
    pub fn qualifies(&self, score: i64) -> bool {
        score > self.best
    }

    /// Submit a finished session's score
    /// Returns true if it became the new best
    pub fn submit(&mut self, score: i64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        log::info!("New high score: {} (was {})", score, self.best);
        self.best = score;
        true
    }

    /// Current best (0 until something positive is submitted)
    pub fn best(&self) -> i64 {
        self.best
    }
}
