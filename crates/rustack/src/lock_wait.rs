//! Waiting for a resource's `locked` flag to clear

use crate::Client;
use crate::args::Arguments;
use crate::error::{Error, Result};
use crate::observability::{log_wait_finished, log_wait_started};
use rustack_core::poll::FixedInterval;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Default, Deserialize)]
struct LockState {
    #[serde(default)]
    locked: bool,
}

impl Client {
    /// Poll `path` until the object it names reports `locked: false`.
    ///
    /// An empty body, or one without a `locked` field, counts as unlocked. Checks run every
    /// [`Timing::lock_wait_interval`](crate::Timing::lock_wait_interval) with
    /// no ceiling unless
    /// [`Timing::lock_wait_timeout`](crate::Timing::lock_wait_timeout) is set.
    /// A failed check is returned as is.
    pub async fn await_unlocked(&self, path: &str) -> Result<()> {
        let timing = self.timing();
        let mut clock = FixedInterval::new(timing.lock_wait_interval)
            .with_optional_ceiling(timing.lock_wait_timeout)
            .start();

        log_wait_started("lock", path);

        loop {
            let state: LockState = self
                .get_optional(path, Arguments::defaults())
                .await?
                .unwrap_or_default();
            if !state.locked {
                break;
            }
            debug!(path, checks = clock.ticks() + 1, "Resource still locked");

            clock.tick(self.cancellation_token()).await.map_err(|e| {
                Error::from_poll(e, |waited| {
                    warn!(path, waited_s = waited.as_secs(), "Lock wait timeout");
                    Error::LockWaitTimeout {
                        path: path.to_string(),
                        waited,
                    }
                })
            })?;
        }

        log_wait_finished("lock", path, clock.elapsed());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, Timing};
    use assert_matches::assert_matches;
    use rustack_transport::{HttpResponse, MockTransport};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    fn client(transport: Arc<MockTransport>, timing: Timing) -> Client {
        Client::with_transport(
            ClientConfig {
                base_url: Some("http://mock.test".to_string()),
                timing,
                ..ClientConfig::with_token("secret")
            },
            transport,
        )
        .unwrap()
    }

    fn locked(flag: bool) -> HttpResponse {
        HttpResponse::with_status(200).with_json(&serde_json::json!({"id": "r1", "locked": flag}))
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_until_unlocked() {
        let transport = Arc::new(
            MockTransport::new()
                .push(locked(true))
                .push(locked(true))
                .push(locked(false)),
        );
        let client = client(transport.clone(), Timing::default());

        let start = Instant::now();
        client.await_unlocked("v1/router/r1").await.unwrap();

        assert_eq!(transport.request_count(), 3);
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(transport.requests().iter().all(|r| r.url == "http://mock.test/v1/router/r1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_flag_means_unlocked() {
        let transport = Arc::new(
            MockTransport::new().push(HttpResponse::with_status(200).with_body(r#"{"id":"n1"}"#)),
        );
        let client = client(transport.clone(), Timing::default());

        client.await_unlocked("v1/network/n1").await.unwrap();
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_body_means_unlocked() {
        let after_lock = Arc::new(
            MockTransport::new()
                .push(locked(true))
                .push(HttpResponse::with_status(200)),
        );
        client(after_lock.clone(), Timing::default())
            .await_unlocked("v1/vm/1")
            .await
            .unwrap();
        assert_eq!(after_lock.request_count(), 2);

        let no_content = Arc::new(MockTransport::new().push(HttpResponse::with_status(204)));
        client(no_content.clone(), Timing::default())
            .await_unlocked("v1/vm/1")
            .await
            .unwrap();
        assert_eq!(no_content.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_propagates() {
        let transport = Arc::new(
            MockTransport::new()
                .push(locked(true))
                .push(HttpResponse::with_status(404).with_body("gone")),
        );
        let client = client(transport, Timing::default());

        let err = client.await_unlocked("v1/network/n1").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test(start_paused = true)]
    async fn test_optional_ceiling() {
        let transport = Arc::new(MockTransport::new().fallback(|_| Ok(locked(true))));
        let timing = Timing {
            lock_wait_timeout: Some(Duration::from_millis(4500)),
            ..Timing::default()
        };
        let client = client(transport.clone(), timing);

        let err = client.await_unlocked("v1/vm/1").await.unwrap_err();

        assert_matches!(err, Error::LockWaitTimeout { ref path, waited } => {
            assert_eq!(path, "v1/vm/1");
            assert!(waited > Duration::from_millis(4500));
        });
        assert_eq!(transport.request_count(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_while_locked() {
        let transport = Arc::new(MockTransport::new().fallback(|_| Ok(locked(true))));
        let token = tokio_util::sync::CancellationToken::new();
        let client = client(transport, Timing::default()).with_cancellation(token.clone());

        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            trigger.cancel();
        });

        let err = client.await_unlocked("v1/vm/1").await.unwrap_err();
        assert_matches!(err, Error::Cancelled);
    }
}
