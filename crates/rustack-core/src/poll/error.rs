use std::time::Duration;
use thiserror::Error;

/// Reasons a [`PollClock`](super::PollClock) stops a wait.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// The cancellation token fired while sleeping.
    #[error("wait cancelled")]
    Cancelled,

    /// Total elapsed time went past the configured ceiling.
    #[error("wait exceeded {ceiling:?} (elapsed {elapsed:?})")]
    Exhausted {
        /// Time spent waiting when the ceiling was detected
        elapsed: Duration,
        /// The configured ceiling
        ceiling: Duration,
    },
}

impl PollError {
    /// True for [`PollError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PollError::Cancelled)
    }
}
