//! Main client implementation for the Rustack API

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use rustack_transport::{HttpTransport, HttpTransportConfig, Transport};
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    config::{ClientConfig, TaskFailurePolicy, Timing, parse_header},
    error::{Error, Result},
    resources::{
        Accounts, Clients, Disks, DnsRecords, DnsZones, FirewallRules, FirewallTemplates,
        Floatings, KubernetesClusters, LoadBalancers, Networks, Paas, Ports, Projects,
        RouterFirewallRules, Routers, Routes, S3Buckets, S3Storages, StorageProfiles, Subnets,
        Templates, Vdcs, Vms,
    },
};

/// Main client for interacting with the Rustack API.
///
/// Cloning is cheap: clones share the transport (and its connection pool)
/// and configuration. A clone made with [`Client::with_cancellation`] also
/// carries a cancellation token that every send and every wait observes.
///
/// # Example
///
/// ```rust,no_run
/// use rustack::Client;
///
/// # async fn example() -> rustack::Result<()> {
/// let client = Client::new("token")?;
/// let account = client.accounts().me().await?;
/// println!("{}", account.email);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    pub(crate) inner: Arc<ClientInner>,
    pub(crate) cancel: Option<CancellationToken>,
}

pub(crate) struct ClientInner {
    /// Transport performing single HTTP round-trips
    pub(crate) transport: Arc<dyn Transport>,
    /// Base URL, always ending in `/`
    pub(crate) base_url: Url,
    /// Bearer token
    pub(crate) token: SecretString,
    /// `User-Agent` header value
    pub(crate) user_agent: String,
    /// Custom headers to include with every request
    pub(crate) default_headers: HeaderMap,
    /// Wait intervals and ceilings
    pub(crate) timing: Timing,
    /// Task status fetch-failure policy
    pub(crate) task_failure_policy: TaskFailurePolicy,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timing", &self.inner.timing)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client with a bearer token and default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rustack::Client;
    ///
    /// let client = Client::new("token").expect("Failed to create client");
    /// ```
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from `RUSTACK_*` environment variables.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client from a configuration object, using the default
    /// `reqwest`-backed transport.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(HttpTransportConfig {
            timeout: config.timeout,
            connect_timeout: config.connection_pool.connect_timeout,
            pool_max_idle_per_host: config.connection_pool.max_idle_per_host,
            pool_idle_timeout: config.connection_pool.idle_timeout,
            tcp_keepalive: config.connection_pool.tcp_keepalive,
            user_agent: None,
        })
        .map_err(|e| Error::HttpClient(e.to_string()))?;

        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends through `transport`.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is configured or the base URL is invalid.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let token = config.token.ok_or_else(|| {
            Error::Authentication(
                "No token provided. Set RUSTACK_TOKEN or provide a token explicitly.".to_string(),
            )
        })?;

        let base_url = parse_base_url(
            config
                .base_url
                .as_deref()
                .unwrap_or(crate::DEFAULT_BASE_URL),
        )?;

        let inner = Arc::new(ClientInner {
            transport,
            base_url,
            token,
            user_agent: config
                .user_agent
                .unwrap_or_else(|| format!("rustack-rust/{}", crate::VERSION)),
            default_headers: config.default_headers,
            timing: config.timing,
            task_failure_policy: config.task_failure_policy,
        });

        Ok(Self {
            inner,
            cancel: None,
        })
    }

    /// A client sharing this one's transport and configuration whose
    /// requests and waits stop with [`Error::Cancelled`] once `token` fires.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: Some(token),
        }
    }

    /// The cancellation token, if any.
    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// Base URL for the API.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Wait intervals and ceilings.
    pub fn timing(&self) -> &Timing {
        &self.inner.timing
    }

    /// Task status fetch-failure policy.
    pub fn task_failure_policy(&self) -> TaskFailurePolicy {
        self.inner.task_failure_policy
    }

    /// Current account and its SSH / public keys.
    pub fn accounts(&self) -> Accounts {
        Accounts::new(self.clone())
    }

    /// Billing clients.
    pub fn clients(&self) -> Clients {
        Clients::new(self.clone())
    }

    /// Projects.
    pub fn projects(&self) -> Projects {
        Projects::new(self.clone())
    }

    /// Virtual data centers.
    pub fn vdcs(&self) -> Vdcs {
        Vdcs::new(self.clone())
    }

    /// VM templates.
    pub fn templates(&self) -> Templates {
        Templates::new(self.clone())
    }

    /// Storage profiles.
    pub fn storage_profiles(&self) -> StorageProfiles {
        StorageProfiles::new(self.clone())
    }

    /// Networks.
    pub fn networks(&self) -> Networks {
        Networks::new(self.clone())
    }

    /// Subnets of one network.
    pub fn subnets(&self, network_id: impl Into<String>) -> Subnets {
        Subnets::new(self.clone(), network_id.into())
    }

    /// Ports.
    pub fn ports(&self) -> Ports {
        Ports::new(self.clone())
    }

    /// Routers.
    pub fn routers(&self) -> Routers {
        Routers::new(self.clone())
    }

    /// Static routes of one router.
    pub fn routes(&self, router_id: impl Into<String>) -> Routes {
        Routes::new(self.clone(), router_id.into())
    }

    /// Firewall rules of one router.
    pub fn router_firewall_rules(&self, router_id: impl Into<String>) -> RouterFirewallRules {
        RouterFirewallRules::new(self.clone(), router_id.into())
    }

    /// Virtual machines.
    pub fn vms(&self) -> Vms {
        Vms::new(self.clone())
    }

    /// Disks.
    pub fn disks(&self) -> Disks {
        Disks::new(self.clone())
    }

    /// Firewall templates.
    pub fn firewall_templates(&self) -> FirewallTemplates {
        FirewallTemplates::new(self.clone())
    }

    /// Rules of one firewall template.
    pub fn firewall_rules(&self, template_id: impl Into<String>) -> FirewallRules {
        FirewallRules::new(self.clone(), template_id.into())
    }

    /// Floating IPs.
    pub fn floatings(&self) -> Floatings {
        Floatings::new(self.clone())
    }

    /// Platform service templates and deployed services.
    pub fn paas(&self) -> Paas {
        Paas::new(self.clone())
    }

    /// Kubernetes clusters, templates, and platforms.
    pub fn kubernetes(&self) -> KubernetesClusters {
        KubernetesClusters::new(self.clone())
    }

    /// Load balancers and their pools.
    pub fn load_balancers(&self) -> LoadBalancers {
        LoadBalancers::new(self.clone())
    }

    /// S3 storages.
    pub fn s3_storages(&self) -> S3Storages {
        S3Storages::new(self.clone())
    }

    /// Buckets of one S3 storage.
    pub fn s3_buckets(&self, storage_id: impl Into<String>) -> S3Buckets {
        S3Buckets::new(self.clone(), storage_id.into())
    }

    /// DNS zones.
    pub fn dns(&self) -> DnsZones {
        DnsZones::new(self.clone())
    }

    /// Records of one DNS zone.
    pub fn dns_records(&self, dns_id: impl Into<String>) -> DnsRecords {
        DnsRecords::new(self.clone(), dns_id.into())
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    if raw.trim().is_empty() {
        return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
    }

    let mut base_url: Url = raw
        .trim()
        .parse()
        .map_err(|e| Error::InvalidUrl(format!("{}", e)))?;

    match base_url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(Error::InvalidUrl(format!(
                "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                scheme
            )));
        }
    }

    // Relative paths are joined onto the base, so it must end in '/'
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }

    Ok(base_url)
}

/// Builder for creating a configured Client.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(SecretString::new(token.into().into_boxed_str()));
        self
    }

    /// Set the base URL for the API.
    ///
    /// Defaults to `https://cp.sbcloud.ru`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the timeout for a single HTTP attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Add a custom default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let (key, value) = parse_header(key.into(), value.into())?;
        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Set all wait intervals and ceilings.
    pub fn timing(mut self, timing: Timing) -> Self {
        self.config.timing = timing;
        self
    }

    /// Set the task status fetch-failure policy.
    pub fn task_failure_policy(mut self, policy: TaskFailurePolicy) -> Self {
        self.config.task_failure_policy = policy;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Send through a custom transport instead of the default HTTP one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        match self.transport {
            Some(transport) => Client::with_transport(self.config, transport),
            None => Client::from_config(self.config),
        }
    }
}
