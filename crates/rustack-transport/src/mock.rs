//! Scripted in-memory transport
//!
//! Responses are served in the order they were queued. When the queue is
//! empty the fallback responder (if any) answers; otherwise the call fails
//! with [`TransportError::Other`]. Every request is recorded so tests can
//! assert on attempt counts, URLs, headers, and bodies.

use crate::error::{Result, TransportError};
use crate::traits::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync>;

/// In-memory [`Transport`] with scripted responses.
///
/// ```rust
/// use rustack_transport::{HttpRequest, HttpResponse, MockTransport, Transport};
///
/// # async fn example() {
/// let transport = MockTransport::new()
///     .push(HttpResponse::with_status(409))
///     .push(HttpResponse::with_status(200).with_body("{}"));
///
/// let first = transport.send_http(HttpRequest::new("GET", "http://x/v1/vm")).await.unwrap();
/// assert_eq!(first.status, 409);
/// assert_eq!(transport.request_count(), 1);
/// # }
/// ```
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<HttpResponse>>>,
    fallback: Option<Responder>,
    latency: Option<Duration>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Create a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn push(self, response: HttpResponse) -> Self {
        lock(&self.script).push_back(Ok(response));
        self
    }

    /// Queue a transport failure.
    pub fn push_error(self, error: TransportError) -> Self {
        lock(&self.script).push_back(Err(error));
        self
    }

    /// Answer with `responder` once the script is exhausted.
    pub fn fallback<F>(mut self, responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(responder));
        self
    }

    /// Sleep this long (on the tokio clock) before answering each request.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Snapshot of every request received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Requests whose URL contains `fragment`.
    pub fn requests_matching(&self, fragment: &str) -> Vec<HttpRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.url.contains(fragment))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse> {
        lock(&self.requests).push(request.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let next = lock(&self.script).pop_front();
        match next {
            Some(result) => result,
            None => match &self.fallback {
                Some(responder) => responder(&request),
                None => Err(TransportError::Other(format!(
                    "no scripted response for {} {}",
                    request.method, request.url
                ))),
            },
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_order_then_fallback() {
        let transport = MockTransport::new()
            .push(HttpResponse::with_status(409))
            .push_error(TransportError::Timeout)
            .fallback(|_| Ok(HttpResponse::with_status(204)));

        let request = HttpRequest::new("GET", "http://mock/v1/vm");
        assert_eq!(transport.send_http(request.clone()).await.unwrap().status, 409);
        assert!(transport.send_http(request.clone()).await.is_err());
        assert_eq!(transport.send_http(request.clone()).await.unwrap().status, 204);
        assert_eq!(transport.send_http(request).await.unwrap().status, 204);
        assert_eq!(transport.request_count(), 4);
    }

    #[tokio::test]
    async fn test_empty_script_fails() {
        let transport = MockTransport::new();
        let result = transport
            .send_http(HttpRequest::new("DELETE", "http://mock/v1/disk/1"))
            .await;

        match result {
            Err(TransportError::Other(msg)) => assert!(msg.contains("DELETE http://mock/v1/disk/1")),
            other => panic!("expected Other error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_requests_matching() {
        let transport = MockTransport::new().fallback(|_| Ok(HttpResponse::with_status(200)));
        for url in ["http://mock/v1/job/a", "http://mock/v1/vm", "http://mock/v1/job/b"] {
            transport.send_http(HttpRequest::new("GET", url)).await.unwrap();
        }

        assert_eq!(transport.requests_matching("v1/job/").len(), 2);
    }
}
