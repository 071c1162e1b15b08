#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core waiting primitives for the Rustack client.
//!
//! The control plane signals two kinds of "not yet": a resource locked by
//! another operation (HTTP 409) and an asynchronous task still running. Both
//! are handled by re-checking on a fixed interval until a condition holds or
//! a ceiling on the total wait is crossed. This crate owns that schedule so
//! every loop in the client measures time the same way:
//!
//! - [`poll::FixedInterval`] describes the interval and optional ceiling
//! - [`poll::PollClock`] tracks one running wait (ticks, elapsed time)
//! - [`poll::sleep_or_cancel`] races a sleep against a
//!   [`CancellationToken`](tokio_util::sync::CancellationToken)
//!
//! Time is read through `tokio::time`, so tests can pause and advance the
//! runtime clock instead of sleeping for real.
//!
//! # Examples
//!
//! ```rust
//! use rustack_core::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), PollError> {
//! let schedule = FixedInterval::new(Duration::from_millis(500))
//!     .with_ceiling(Duration::from_secs(600));
//!
//! let mut clock = schedule.start();
//! while !condition_met() {
//!     clock.tick(None).await?;
//! }
//! # Ok(())
//! # }
//! # fn condition_met() -> bool { true }
//! ```

pub mod poll;

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use rustack_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::poll::{FixedInterval, PollClock, PollError, sleep_or_cancel};
}
