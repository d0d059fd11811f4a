//! Client configuration.

use std::time::Duration;

/// Default base URL of the GroundControl API.
pub const DEFAULT_BASE_URL: &str = "https://api.groundcontrol.sh";

/// GroundControl client configuration.
#[derive(Debug, Clone)]
pub struct GroundControlConfig {
    /// Project identifier, part of every check URL.
    pub project_id: String,
    /// API key, sent as a bearer token.
    pub api_key: String,
    /// Base URL of the flag service.
    pub base_url: String,
    /// Cache TTL in seconds. `Some` enables the local check cache and is also
    /// forwarded to the server as a `cache` query hint. Negative values
    /// produce entries that are already expired, so every check refetches.
    pub cache_ttl: Option<i64>,
    /// Request timeout for the default transport.
    pub timeout: Duration,
    /// Connection timeout for the default transport.
    pub connect_timeout: Duration,
    /// User agent string for the default transport.
    pub user_agent: String,
}

impl GroundControlConfig {
    /// Create a configuration with defaults for everything but the
    /// credentials.
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("groundcontrol-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Create a configuration builder.
    pub fn builder(
        project_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> GroundControlConfigBuilder {
        GroundControlConfigBuilder {
            config: Self::new(project_id, api_key),
        }
    }
}

/// Builder for [`GroundControlConfig`].
#[derive(Debug)]
pub struct GroundControlConfigBuilder {
    config: GroundControlConfig,
}

impl GroundControlConfigBuilder {
    /// Set the base URL of the flag service.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Enable the local check cache with the given TTL in seconds.
    pub fn cache_ttl(mut self, seconds: i64) -> Self {
        self.config.cache_ttl = Some(seconds);
        self
    }

    /// Set the request timeout for the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout for the default transport.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the user agent string for the default transport.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GroundControlConfig {
        self.config
    }
}
