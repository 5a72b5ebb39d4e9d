//! Trigger outcomes

use std::fmt;

/// What a trigger pull did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerResult {
    /// Target was in the gaze cone; score is the new total
    Found { score: u32 },
    /// Nothing in view, no state changed
    Missed,
}

impl TriggerResult {
    pub fn is_found(&self) -> bool {
        matches!(self, TriggerResult::Found { .. })
    }

    /// Overlay text shown for this outcome
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TriggerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerResult::Found { score } => write!(
                f,
                "Found it! Look around for another one.\nScore = {}",
                score
            ),
            TriggerResult::Missed => write!(f, "Look around to find the object!"),
        }
    }
}
