use super::PollError;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Sleep for `duration`, returning early with [`PollError::Cancelled`] if
/// `cancel` fires first.
///
/// Without a token this is a plain `tokio::time::sleep`. A token that is
/// already cancelled returns immediately without sleeping.
///
/// # Examples
///
/// ```rust
/// use rustack_core::poll::{PollError, sleep_or_cancel};
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() {
/// let token = CancellationToken::new();
/// token.cancel();
///
/// let result = sleep_or_cancel(Duration::from_secs(3600), Some(&token)).await;
/// assert_eq!(result, Err(PollError::Cancelled));
/// # }
/// ```
pub async fn sleep_or_cancel(
    duration: Duration,
    cancel: Option<&CancellationToken>,
) -> Result<(), PollError> {
    match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(PollError::Cancelled),
                _ = tokio::time::sleep(duration) => Ok(()),
            }
        }
        None => {
            tokio::time::sleep(duration).await;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_without_token_completes() {
        let start = Instant::now();
        let result = sleep_or_cancel(Duration::from_millis(500), None).await;

        assert!(result.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_returns_immediately() {
        let token = CancellationToken::new();
        token.cancel();

        let start = Instant::now();
        let result = sleep_or_cancel(Duration::from_secs(60), Some(&token)).await;

        assert_eq!(result, Err(PollError::Cancelled));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_sleep() {
        let token = CancellationToken::new();
        let trigger = token.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let result = sleep_or_cancel(Duration::from_secs(60), Some(&token)).await;

        assert_eq!(result, Err(PollError::Cancelled));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
