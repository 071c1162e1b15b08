use super::{FixedInterval, PollError, sleep_or_cancel};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// One running wait on a [`FixedInterval`] schedule.
///
/// Loops use it as "check, then tick": perform the request, decide whether
/// the condition holds, and if not call [`PollClock::tick`], which sleeps one
/// interval and then enforces the ceiling.
#[derive(Debug)]
pub struct PollClock {
    schedule: FixedInterval,
    started: Instant,
    ticks: u32,
}

impl PollClock {
    pub(crate) fn new(schedule: FixedInterval) -> Self {
        Self {
            schedule,
            started: Instant::now(),
            ticks: 0,
        }
    }

    /// The schedule this clock runs on.
    pub fn schedule(&self) -> &FixedInterval {
        &self.schedule
    }

    /// Time since the wait started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Number of completed sleeps.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Fail with [`PollError::Exhausted`] if the elapsed time is past the ceiling.
    pub fn check(&self) -> Result<(), PollError> {
        match self.schedule.ceiling() {
            Some(ceiling) => {
                let elapsed = self.elapsed();
                if elapsed > ceiling {
                    Err(PollError::Exhausted { elapsed, ceiling })
                } else {
                    Ok(())
                }
            }
            None => Ok(()),
        }
    }

    /// Sleep one interval (or until `cancel` fires), then check the ceiling.
    pub async fn tick(&mut self, cancel: Option<&CancellationToken>) -> Result<(), PollError> {
        sleep_or_cancel(self.schedule.interval(), cancel).await?;
        self.ticks += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            tick = self.ticks,
            elapsed_ms = self.elapsed().as_millis() as u64,
            "poll tick"
        );

        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tick_counts_and_elapsed() {
        let mut clock = FixedInterval::new(Duration::from_millis(500)).start();

        for _ in 0..3 {
            clock.tick(None).await.unwrap();
        }

        assert_eq!(clock.ticks(), 3);
        assert!(clock.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_never_exhausts() {
        let mut clock = FixedInterval::new(Duration::from_secs(60)).start();

        for _ in 0..100 {
            clock.tick(None).await.unwrap();
        }

        assert_eq!(clock.ticks(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ceiling_exhausts_after_crossing() {
        let mut clock = FixedInterval::new(Duration::from_millis(500))
            .with_ceiling(Duration::from_millis(2100))
            .start();

        for _ in 0..4 {
            clock.tick(None).await.unwrap();
        }

        let err = clock.tick(None).await.unwrap_err();
        match err {
            PollError::Exhausted { elapsed, ceiling } => {
                assert_eq!(ceiling, Duration::from_millis(2100));
                assert!(elapsed > ceiling);
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
        assert_eq!(clock.ticks(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_tick_does_not_count() {
        let token = CancellationToken::new();
        token.cancel();

        let mut clock = FixedInterval::new(Duration::from_millis(500)).start();
        let err = clock.tick(Some(&token)).await.unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(clock.ticks(), 0);
    }
}
