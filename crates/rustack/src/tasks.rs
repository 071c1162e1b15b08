//! Asynchronous task tracking
//!
//! Mutating calls may answer before the work is done and list the
//! server-side task ids in the `X-Esu-Tasks` header. [`Client::await_tasks`]
//! polls each one at `v1/job/{id}` until it fails, disappears, or runs out
//! of time.

use crate::Client;
use crate::http::Request;
use crate::config::TaskFailurePolicy;
use crate::error::{Error, Result};
use crate::observability::{log_wait_finished, log_wait_started};
use rustack_core::poll::FixedInterval;
use serde::Deserialize;
use tracing::{debug, warn};

/// Raw `X-Esu-Tasks` header value: comma-separated task ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskReferences {
    raw: String,
}

impl TaskReferences {
    /// Wrap a raw header value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The header value as received.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Task ids in order, trimmed, empty entries skipped.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.raw.split(',').map(str::trim).filter(|id| !id.is_empty())
    }

    /// True when there is nothing to wait for.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Server-side task state from `v1/job/{id}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TaskStatus {
    /// `"error"` is terminal; anything else means still running
    #[serde(default)]
    pub status: String,
    /// Name of the step the task is on
    #[serde(default)]
    pub name: String,
}

impl TaskStatus {
    /// True for the recognized failure state.
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

impl Client {
    /// Wait for every task in `tasks`, one after another. The first failure
    /// stops the sequence.
    pub async fn await_tasks(&self, tasks: &TaskReferences) -> Result<()> {
        for task_id in tasks.iter() {
            self.await_task(task_id).await?;
        }
        Ok(())
    }

    /// Poll one task until it reports `error`, its status can no longer be
    /// fetched, or the task timeout passes.
    ///
    /// What a failed fetch means depends on the configured
    /// [`TaskFailurePolicy`].
    pub async fn await_task(&self, task_id: &str) -> Result<()> {
        let request = Request::get("v1/job").segment(task_id);
        let timing = self.timing();
        let mut clock = FixedInterval::new(timing.task_poll_interval)
            .with_ceiling(timing.task_timeout)
            .start();

        log_wait_started("task", task_id);

        loop {
            // An empty body carries no status, so the task is still running
            let fetched = self.fetch_optional::<TaskStatus>(&request).await;
            match fetched.map(Option::unwrap_or_default) {
                Ok(status) if status.is_error() => {
                    warn!(task_id, step = %status.name, "Task in error status");
                    return Err(Error::TaskFailed {
                        task_id: task_id.to_string(),
                        step: status.name,
                    });
                }
                Ok(status) => {
                    debug!(task_id, status = %status.status, step = %status.name, "Task running");
                }
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(err) => match self.task_failure_policy() {
                    TaskFailurePolicy::Complete => {
                        debug!(task_id, error = %err, "Task status unavailable, treating as finished");
                        break;
                    }
                    TaskFailurePolicy::Propagate if err.status() == Some(404) => break,
                    TaskFailurePolicy::Propagate => return Err(err),
                },
            }

            clock.tick(self.cancellation_token()).await.map_err(|e| {
                Error::from_poll(e, |waited| {
                    warn!(task_id, waited_s = waited.as_secs(), "Task timeout");
                    Error::TaskTimeout {
                        task_id: task_id.to_string(),
                        waited,
                    }
                })
            })?;
        }

        log_wait_finished("task", task_id, clock.elapsed());
        Ok(())
    }
}
