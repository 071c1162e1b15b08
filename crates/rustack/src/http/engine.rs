//! Request engine
//!
//! One logical call becomes one or more HTTP round-trips: a 409 without a
//! permanent alias is retried on a fixed interval until it clears or the
//! lock timeout passes. Any other status ends the loop. Successful bodies
//! are decoded into the caller's type, and the `X-Esu-Tasks` header is
//! handed back so mutating calls can wait for the server-side work.

use super::Request;
use super::lock::LockConflict;
use crate::Client;
use crate::args::Arguments;
use crate::error::{ApiError, Error, Result};
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata, log_tasks_found};
use crate::tasks::TaskReferences;
use http::Method;
use rustack_core::poll::FixedInterval;
use rustack_transport::{HttpRequest, HttpResponse};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

const TASKS_HEADER: &str = "X-Esu-Tasks";

/// Outcome of [`Client::execute`].
#[derive(Debug)]
pub struct Executed<T> {
    /// Decoded body; `None` when the response body was empty
    pub value: Option<T>,
    /// Task ids from the final response
    pub tasks: TaskReferences,
}

/// A successful response and the URL it came from.
struct Sent {
    url: String,
    response: HttpResponse,
}

impl Client {
    /// Send `request`, retrying lock conflicts, and decode the body into `T`.
    ///
    /// An empty body yields `value: None` without attempting to decode.
    ///
    /// # Errors
    ///
    /// - [`Error::PermanentLock`] on a 409 carrying `limit_exceeded` or `object_protected`
    /// - [`Error::LockTimeout`] when conflicts persist past the lock timeout
    /// - [`Error::Api`] on any other non-2xx status
    /// - [`Error::Transport`] when no response was received
    /// - [`Error::Decode`] when the body does not match `T`
    /// - [`Error::Cancelled`] when the client's token fires
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<Executed<T>> {
        let sent = self.send(&request).await?;
        let tasks = task_references(&sent);
        let value = decode_optional(&sent)?;
        Ok(Executed { value, tasks })
    }

    /// Send `request` without decoding the body.
    pub async fn execute_unit(&self, request: Request) -> Result<TaskReferences> {
        let sent = self.send(&request).await?;
        Ok(task_references(&sent))
    }

    /// [`execute`](Self::execute), then wait for every returned task.
    pub async fn execute_and_wait<T: DeserializeOwned>(&self, request: Request) -> Result<Option<T>> {
        let executed = self.execute(request).await?;
        self.await_tasks(&executed.tasks).await?;
        Ok(executed.value)
    }

    /// [`execute_unit`](Self::execute_unit), then wait for every returned task.
    pub async fn execute_unit_and_wait(&self, request: Request) -> Result<()> {
        let tasks = self.execute_unit(request).await?;
        self.await_tasks(&tasks).await
    }

    /// Read-only GET with query arguments. Same lock handling as
    /// [`execute`](Self::execute); task references are ignored and the body
    /// is required.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, args: Arguments) -> Result<T> {
        self.fetch(&Request::get(path).args(args)).await
    }

    /// Send a prepared GET and decode the required body.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: &Request) -> Result<T> {
        let sent = self.send(request).await?;
        decode(&sent.url, &sent.response.body)
    }

    /// [`get`](Self::get) for endpoints that may answer 2xx with no body.
    /// An empty body yields `None` without attempting to decode.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str, args: Arguments) -> Result<Option<T>> {
        self.fetch_optional(&Request::get(path).args(args)).await
    }

    /// [`fetch`](Self::fetch) with an optional body.
    pub(crate) async fn fetch_optional<T: DeserializeOwned>(&self, request: &Request) -> Result<Option<T>> {
        let sent = self.send(request).await?;
        decode_optional(&sent)
    }

    /// The lock-retry loop.
    async fn send(&self, request: &Request) -> Result<Sent> {
        let url = self.build_url(request)?;
        let http_request = self.build_http_request(request, &url);

        let mut metadata = RequestMetadata::new(request.method().as_str(), url.as_str());
        if let Some(body) = request.body() {
            metadata = metadata.with_body_size(body.len());
        }

        let timing = self.timing();
        let mut clock = FixedInterval::new(timing.lock_retry_interval)
            .with_ceiling(timing.lock_timeout)
            .start();
        let timer = RequestTimer::start();

        loop {
            metadata.log_attempt(clock.ticks() + 1);

            let response = match self.send_once(http_request.clone()).await {
                Ok(response) => response,
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(err) => {
                    warn!(url = %url, error = %err, "HTTP request failed before a response");
                    return Err(err);
                }
            };

            if response.status == 409 {
                if let Some(err) = LockConflict::parse(&response.body).into_permanent_error(url.as_str()) {
                    ResponseMetadata::new(409, timer.elapsed())
                        .with_retries(clock.ticks())
                        .log_error(&metadata, &err.to_string());
                    return Err(err);
                }

                metadata.log_lock_conflict(timing.lock_retry_interval);
                clock.tick(self.cancellation_token()).await.map_err(|e| {
                    Error::from_poll(e, |waited| {
                        warn!(url = %url, waited_s = waited.as_secs(), "Lock timeout");
                        Error::LockTimeout {
                            url: url.to_string(),
                            waited,
                        }
                    })
                })?;
                continue;
            }

            let outcome = ResponseMetadata::new(response.status, timer.elapsed())
                .with_body_size(response.body.len())
                .with_retries(clock.ticks());

            if !response.is_success() {
                let err = ApiError::from_response(url.as_str(), response.status, &response.body);
                outcome.log_error(&metadata, &err.to_string());
                return Err(err.into());
            }

            outcome.log_success(&metadata);
            return Ok(Sent {
                url: url.to_string(),
                response,
            });
        }
    }

    /// One round-trip, raced against the cancellation token.
    async fn send_once(&self, request: HttpRequest) -> Result<HttpResponse> {
        let transport = &self.inner.transport;
        match self.cancellation_token() {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(Error::Cancelled),
                    result = transport.send_http(request) => result.map_err(Error::from),
                }
            }
            None => transport.send_http(request).await.map_err(Error::from),
        }
    }

    fn build_url(&self, request: &Request) -> Result<Url> {
        let path = request.path().trim_start_matches('/');
        let mut url = self.inner.base_url.join(path).map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from path '{}': {}",
                request.path(),
                e
            ))
        })?;
        if !request.segments().is_empty() {
            url.path_segments_mut()
                .map_err(|()| {
                    Error::InvalidUrl(format!("Cannot append path segments to '{}'", request.path()))
                })?
                .pop_if_empty()
                .extend(request.segments());
        }
        request.arguments().apply_to(&mut url);
        Ok(url)
    }

    fn build_http_request(&self, request: &Request, url: &Url) -> HttpRequest {
        let inner = &self.inner;
        let mut http_request = HttpRequest::new(request.method().as_str(), url.as_str())
            .with_header(
                "Authorization",
                format!("Bearer {}", inner.token.expose_secret()),
            )
            .with_header("Accept-Language", "ru-ru")
            .with_header("User-Agent", inner.user_agent.as_str());

        for (key, value) in &inner.default_headers {
            if let Ok(value) = value.to_str() {
                http_request = http_request.with_header(key.as_str(), value);
            }
        }

        let mutating = !matches!(*request.method(), Method::GET | Method::HEAD);
        if mutating || request.body().is_some() {
            http_request = http_request.with_header("Content-Type", "application/json");
        }
        if let Some(body) = request.body() {
            http_request = http_request.with_body(body.to_vec());
        }

        http_request
    }
}

fn task_references(sent: &Sent) -> TaskReferences {
    let raw = sent.response.get_header(TASKS_HEADER).unwrap_or_default();
    if !raw.trim().is_empty() {
        log_tasks_found(&sent.url, raw);
    }
    TaskReferences::new(raw)
}

fn decode_optional<T: DeserializeOwned>(sent: &Sent) -> Result<Option<T>> {
    if sent.response.body.is_empty() {
        return Ok(None);
    }
    decode(&sent.url, &sent.response.body).map(Some)
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| Error::Decode {
        url: url.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
        source,
    })
}
