//! Configuration for the Rustack client

use http::HeaderMap;
use secrecy::SecretString;
use std::time::Duration;

/// Configuration for the Rustack client.
///
/// Holds the credentials, endpoint, HTTP settings, and the wait constants the
/// engine uses for lock retries and task polling.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token for authentication
    pub token: Option<SecretString>,

    /// Base URL for the API
    pub base_url: Option<String>,

    /// Timeout for a single HTTP attempt
    pub timeout: Duration,

    /// `User-Agent` header value
    pub user_agent: Option<String>,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,

    /// Connection pool configuration
    pub connection_pool: ConnectionPoolConfig,

    /// Intervals and ceilings for lock retries, task polling, and lock waits
    pub timing: Timing,

    /// What to do when a task status fetch fails
    pub task_failure_policy: TaskFailurePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: None,
            timeout: Duration::from_secs(60),
            user_agent: None,
            default_headers: HeaderMap::new(),
            connection_pool: ConnectionPoolConfig::default(),
            timing: Timing::default(),
            task_failure_policy: TaskFailurePolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with a bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::new(token.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// This will look for:
    /// - `RUSTACK_TOKEN` for authentication
    /// - `RUSTACK_BASE_URL` for the API base URL
    /// - `RUSTACK_TIMEOUT` for the per-request timeout (in seconds)
    /// - `RUSTACK_LOCK_TIMEOUT` for the lock retry ceiling (in seconds)
    /// - `RUSTACK_TASK_TIMEOUT` for the task polling ceiling (in seconds)
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(token) = env::var("RUSTACK_TOKEN") {
            config.token = Some(SecretString::new(token.into_boxed_str()));
        }

        if let Ok(base_url) = env::var("RUSTACK_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Some(timeout) = env_secs("RUSTACK_TIMEOUT") {
            config.timeout = timeout;
        }

        if let Some(lock_timeout) = env_secs("RUSTACK_LOCK_TIMEOUT") {
            config.timing.lock_timeout = lock_timeout;
        }

        if let Some(task_timeout) = env_secs("RUSTACK_TASK_TIMEOUT") {
            config.timing.task_timeout = task_timeout;
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    ///
    /// Scalar fields are taken from `other` only when they differ from the
    /// defaults; headers are combined.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        let defaults = ClientConfig::default();

        if other.token.is_some() {
            self.token = other.token;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout != defaults.timeout {
            self.timeout = other.timeout;
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }
        if other.timing != defaults.timing {
            self.timing = other.timing;
        }
        if other.task_failure_policy != defaults.task_failure_policy {
            self.task_failure_policy = other.task_failure_policy;
        }

        self
    }
}

#[cfg(feature = "env")]
fn env_secs(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Intervals and ceilings for every wait the client performs.
///
/// The lock-wait loop has no ceiling unless `lock_wait_timeout` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Sleep between attempts after a 409 (default 500ms)
    pub lock_retry_interval: Duration,

    /// Give up retrying a locked resource after this long (default 1200s)
    pub lock_timeout: Duration,

    /// Sleep between task status polls (default 500ms)
    pub task_poll_interval: Duration,

    /// Give up waiting for one task after this long (default 600s)
    pub task_timeout: Duration,

    /// Sleep between `locked` checks in [`Client::await_unlocked`](crate::Client::await_unlocked) (default 1s)
    pub lock_wait_interval: Duration,

    /// Optional ceiling for the lock-wait loop (default none)
    pub lock_wait_timeout: Option<Duration>,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            lock_retry_interval: Duration::from_millis(500),
            lock_timeout: Duration::from_secs(1200),
            task_poll_interval: Duration::from_millis(500),
            task_timeout: Duration::from_secs(600),
            lock_wait_interval: Duration::from_secs(1),
            lock_wait_timeout: None,
        }
    }
}

/// How the task poller treats a failed status fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFailurePolicy {
    /// Any fetch failure ends the wait for that task as if it had finished.
    /// Cancellation still propagates.
    #[default]
    Complete,

    /// A 404 ends the wait (the task record is gone); any other failure is
    /// returned to the caller.
    Propagate,
}

/// Configuration for HTTP connection pooling.
#[derive(Debug, Clone)]
pub struct ConnectionPoolConfig {
    /// Maximum number of idle connections per host
    pub max_idle_per_host: usize,

    /// Idle connection timeout
    pub idle_timeout: Duration,

    /// TCP keep-alive interval
    pub tcp_keepalive: Option<Duration>,

    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 10,
            idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Some(Duration::from_secs(60)),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(SecretString::new(token.into().into_boxed_str()));
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> crate::Result<Self> {
        let (key, value) = parse_header(key.into(), value.into())?;
        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Set all wait intervals and ceilings.
    pub fn timing(mut self, timing: Timing) -> Self {
        self.config.timing = timing;
        self
    }

    /// Set the task fetch-failure policy.
    pub fn task_failure_policy(mut self, policy: TaskFailurePolicy) -> Self {
        self.config.task_failure_policy = policy;
        self
    }

    /// Set connection pool configuration.
    pub fn connection_pool(mut self, config: ConnectionPoolConfig) -> Self {
        self.config.connection_pool = config;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

pub(crate) fn parse_header(
    key: String,
    value: String,
) -> crate::Result<(http::HeaderName, http::HeaderValue)> {
    let name: http::HeaderName = key
        .parse()
        .map_err(|_| crate::Error::InvalidHeaderName(key.clone()))?;
    let value: http::HeaderValue = value
        .parse()
        .map_err(|_| crate::Error::InvalidHeaderValue(value.clone()))?;
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.token.is_none());
        assert_eq!(config.task_failure_policy, TaskFailurePolicy::Complete);
    }

    #[test]
    fn test_default_timing() {
        let timing = Timing::default();
        assert_eq!(timing.lock_retry_interval, Duration::from_millis(500));
        assert_eq!(timing.lock_timeout, Duration::from_secs(1200));
        assert_eq!(timing.task_poll_interval, Duration::from_millis(500));
        assert_eq!(timing.task_timeout, Duration::from_secs(600));
        assert_eq!(timing.lock_wait_interval, Duration::from_secs(1));
        assert_eq!(timing.lock_wait_timeout, None);
    }

    #[test]
    fn test_config_with_token() {
        let config = ClientConfig::with_token("secret");
        assert_eq!(config.token.unwrap().expose_secret(), "secret");
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfigBuilder::new()
            .token("test-token")
            .base_url("https://example.com")
            .timeout(Duration::from_secs(30))
            .task_failure_policy(TaskFailurePolicy::Propagate)
            .default_header("X-Trace", "1")
            .unwrap()
            .build();

        assert!(config.token.is_some());
        assert_eq!(config.base_url, Some("https://example.com".to_string()));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.task_failure_policy, TaskFailurePolicy::Propagate);
        assert!(config.default_headers.contains_key("x-trace"));
    }

    #[test]
    fn test_builder_rejects_bad_header() {
        let result = ClientConfigBuilder::new().default_header("bad header", "v");
        assert!(matches!(result, Err(crate::Error::InvalidHeaderName(_))));
    }

    #[test]
    fn test_config_merge() {
        let config1 = ClientConfig::with_token("token1");
        let config2 = ClientConfigBuilder::new()
            .base_url("https://example.com")
            .timeout(Duration::from_secs(30))
            .timing(Timing {
                lock_timeout: Duration::from_secs(5),
                ..Timing::default()
            })
            .build();

        let merged = config1.merge(config2);
        assert_eq!(merged.token.unwrap().expose_secret(), "token1");
        assert_eq!(merged.base_url, Some("https://example.com".to_string()));
        assert_eq!(merged.timeout, Duration::from_secs(30));
        assert_eq!(merged.timing.lock_timeout, Duration::from_secs(5));
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_config_from_env_variables() {
        temp_env::with_vars(
            [
                ("RUSTACK_TOKEN", Some("env-token")),
                ("RUSTACK_BASE_URL", Some("https://env-base.example")),
                ("RUSTACK_TIMEOUT", Some("120")),
                ("RUSTACK_LOCK_TIMEOUT", Some("30")),
                ("RUSTACK_TASK_TIMEOUT", Some("not-a-number")),
            ],
            || {
                let config = ClientConfig::from_env().unwrap();
                assert_eq!(config.token.unwrap().expose_secret(), "env-token");
                assert_eq!(
                    config.base_url,
                    Some("https://env-base.example".to_string())
                );
                assert_eq!(config.timeout, Duration::from_secs(120));
                assert_eq!(config.timing.lock_timeout, Duration::from_secs(30));
                assert_eq!(config.timing.task_timeout, Duration::from_secs(600));
            },
        );
    }
}
