//! Score and high score bookkeeping.
//!
//! The high score lives for the whole process; it is never reset by a new
//! round, only raised when a run ends in a miss.

/// Current run score and process-lifetime high score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    score: u32,
    high_score: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// True while the running score beats the recorded high score.
    pub fn is_new_high(&self) -> bool {
        self.score != 0 && self.score > self.high_score
    }

    /// A goal was passed while playing.
    pub fn record_pass(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    /// The run ended: commit the high score, then zero the score.
    ///
    /// Returns true when the high score was raised.
    pub fn commit_miss(&mut self) -> bool {
        let raised = self.score > self.high_score;
        if raised {
            self.high_score = self.score;
        }
        self.score = 0;
        raised
    }

    /// Start-of-round reset; the high score survives.
    pub fn reset_round(&mut self) {
        self.score = 0;
    }
}
