//! Fixed-interval polling.
//!
//! # Key Types
//!
//! - [`FixedInterval`] - interval between checks plus an optional ceiling
//! - [`PollClock`] - a started wait; call [`PollClock::tick`] between checks
//! - [`PollError`] - why a wait stopped early
//!
//! Every wait re-checks at a constant rate; there is no backoff.

mod clock;
mod error;
mod interval;
mod sleep;

pub use clock::PollClock;
pub use error::PollError;
pub use interval::FixedInterval;
pub use sleep::sleep_or_cancel;
