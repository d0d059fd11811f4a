//! The GroundControl client: the override/cache resolution engine and the
//! public check API.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CheckCache, epoch_seconds};
use crate::error::{ErrorHandler, GroundControlError, default_error_handler};
use crate::fetch::RemoteFetcher;
use crate::overrides::OverrideStore;
use crate::transport::{HttpTransport, Transport};
use crate::GroundControlConfig;

/// Per-check options: the ordered set of actors the flag is checked for.
///
/// Actor order matters: when several supplied actors carry overrides, the
/// first one in this list wins.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    actors: Vec<String>,
}

impl CheckOptions {
    /// Create empty options (a global check).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options from an ordered list of actor ids.
    pub fn actors<I, S>(actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            actors: actors.into_iter().map(Into::into).collect(),
        }
    }

    /// Append an actor id.
    pub fn with_actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actors.push(actor_id.into());
        self
    }

    /// The actor ids in caller-supplied order.
    pub fn actor_ids(&self) -> &[String] {
        &self.actors
    }
}

/// Client for the GroundControl feature-flag service.
///
/// Each check resolves through the layers in strict precedence order:
/// actor override, flag override, full override, cache, remote fetch. The
/// check API never fails: any remote error is passed to the error handler
/// and the flag reports as disabled.
///
/// The client is cheap to clone; clones share the same override and cache
/// state.
#[derive(Clone)]
pub struct GroundControlClient {
    config: Arc<GroundControlConfig>,
    fetcher: Arc<RemoteFetcher>,
    overrides: Arc<Mutex<OverrideStore>>,
    cache: Arc<Mutex<CheckCache>>,
    on_error: ErrorHandler,
}

impl GroundControlClient {
    /// Create a client with the default HTTP transport.
    pub fn new(config: GroundControlConfig) -> Self {
        let transport = Arc::new(HttpTransport::new(&config));
        Self::with_transport(config, transport)
    }

    /// Create a client with an injected transport.
    pub fn with_transport(config: GroundControlConfig, transport: Arc<dyn Transport>) -> Self {
        let config = Arc::new(config);
        Self {
            fetcher: Arc::new(RemoteFetcher::new(config.clone(), transport)),
            config,
            overrides: Arc::new(Mutex::new(OverrideStore::default())),
            cache: Arc::new(Mutex::new(CheckCache::default())),
            on_error: default_error_handler(),
        }
    }

    /// Replace the error handler. The handler is invoked exactly once per
    /// failed remote check; the default logs via `tracing::error!`.
    pub fn on_error(mut self, handler: impl Fn(&GroundControlError) + Send + Sync + 'static) -> Self {
        self.on_error = Arc::new(handler);
        self
    }

    /// Get the client configuration.
    pub fn config(&self) -> &GroundControlConfig {
        &self.config
    }

    /// Check a flag globally (no actors).
    pub async fn is_feature_flag_enabled(&self, flag_name: &str) -> bool {
        self.is_feature_flag_enabled_for(flag_name, &CheckOptions::new())
            .await
    }

    /// Check a flag for an ordered set of actors.
    ///
    /// Suspends at most once, at the network round-trip, and only when no
    /// override and no live cache entry short-circuits it.
    pub async fn is_feature_flag_enabled_for(
        &self,
        flag_name: &str,
        options: &CheckOptions,
    ) -> bool {
        // Locks are scoped so none is held across the await below.
        if let Some(enabled) = self.overrides.lock().lookup(flag_name, options.actor_ids()) {
            debug!(flag = flag_name, enabled, "resolved from local override");
            return enabled;
        }

        let url = match self.fetcher.check_url(flag_name, options.actor_ids()) {
            Ok(url) => url,
            Err(err) => {
                (self.on_error)(&err);
                return false;
            }
        };
        let cache_key = url.to_string();

        if self.config.cache_ttl.is_some()
            && let Some(enabled) = self.cache.lock().get(&cache_key, epoch_seconds())
        {
            debug!(flag = flag_name, enabled, "resolved from cache");
            return enabled;
        }

        match self.fetcher.fetch_enabled(url).await {
            Ok(enabled) => {
                if let Some(ttl) = self.config.cache_ttl {
                    self.cache
                        .lock()
                        .insert(cache_key, enabled, ttl, epoch_seconds());
                }
                enabled
            }
            Err(err) => {
                (self.on_error)(&err);
                false
            }
        }
    }

    /// Force a flag's value for one actor. Beats every other layer when the
    /// actor appears in a check.
    pub fn set_actor_override(&self, flag_name: &str, actor_id: &str, enabled: bool) {
        self.overrides.lock().set_actor(flag_name, actor_id, enabled);
    }

    /// Force a flag's value for all actors. Actor overrides for the flag
    /// still win.
    pub fn set_flag_override(&self, flag_name: &str, enabled: bool) {
        self.overrides.lock().set_flag(flag_name, enabled);
    }

    /// Force every flag, for every actor.
    pub fn set_full_override(&self, enabled: bool) {
        self.overrides.lock().set_full(enabled);
    }

    /// Remove the full override.
    pub fn clear_full_override(&self) {
        self.overrides.lock().clear_full();
    }

    /// Locally enable a flag for all actors.
    pub fn enable_feature_flag(&self, flag_name: &str) {
        self.set_flag_override(flag_name, true);
    }

    /// Locally disable a flag for all actors.
    pub fn disable_feature_flag(&self, flag_name: &str) {
        self.set_flag_override(flag_name, false);
    }

    /// Locally enable a flag for the given actors.
    pub fn enable_feature_flag_for<I, S>(&self, flag_name: &str, actors: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = self.overrides.lock();
        for actor_id in actors {
            overrides.set_actor(flag_name, actor_id.as_ref(), true);
        }
    }

    /// Locally disable a flag for the given actors.
    pub fn disable_feature_flag_for<I, S>(&self, flag_name: &str, actors: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = self.overrides.lock();
        for actor_id in actors {
            overrides.set_actor(flag_name, actor_id.as_ref(), false);
        }
    }

    /// Locally enable every flag.
    pub fn enable_all_feature_flags(&self) {
        self.set_full_override(true);
    }

    /// Locally disable every flag.
    pub fn disable_all_feature_flags(&self) {
        self.set_full_override(false);
    }

    /// Clear all three override layers atomically. The cache is untouched:
    /// a previously cached flag keeps resolving from cache after a reset.
    pub fn reset(&self) {
        self.overrides.lock().reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use http::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::transport::{TransportRequest, TransportResponse};

    /// Transport that serves a canned body and counts requests.
    struct FakeTransport {
        status: StatusCode,
        body: String,
        requests: AtomicUsize,
    }

    impl FakeTransport {
        fn ok(body: &str) -> Arc<Self> {
            Arc::new(Self {
                status: StatusCode::OK,
                body: body.to_string(),
                requests: AtomicUsize::new(0),
            })
        }

        fn count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn execute(&self, _request: TransportRequest) -> crate::Result<TransportResponse> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(TransportResponse::new(self.status, self.body.clone()))
        }
    }

    fn client_with(transport: Arc<FakeTransport>, config: GroundControlConfig) -> GroundControlClient {
        GroundControlClient::with_transport(config, transport)
    }

    #[tokio::test]
    async fn test_remote_result_flows_through() {
        let transport = FakeTransport::ok(r#"{"enabled":true}"#);
        let client = client_with(transport.clone(), GroundControlConfig::new("P1", "key"));

        assert!(client.is_feature_flag_enabled("f1").await);
        assert_eq!(transport.count(), 1);
    }

    #[tokio::test]
    async fn test_overrides_short_circuit_network() {
        let transport = FakeTransport::ok(r#"{"enabled":true}"#);
        let client = client_with(transport.clone(), GroundControlConfig::new("P1", "key"));

        client.disable_feature_flag("f1");
        assert!(!client.is_feature_flag_enabled("f1").await);

        client.set_actor_override("f1", "a", true);
        assert!(
            client
                .is_feature_flag_enabled_for("f1", &CheckOptions::actors(["a"]))
                .await
        );

        assert_eq!(transport.count(), 0);
    }

    #[tokio::test]
    async fn test_full_override_applies_to_unknown_flags() {
        let transport = FakeTransport::ok(r#"{"enabled":false}"#);
        let client = client_with(transport.clone(), GroundControlConfig::new("P1", "key"));

        client.enable_all_feature_flags();
        assert!(client.is_feature_flag_enabled("never-seen").await);

        client.clear_full_override();
        assert!(!client.is_feature_flag_enabled("never-seen").await);
        assert_eq!(transport.count(), 1);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_second_request() {
        let transport = FakeTransport::ok(r#"{"enabled":true}"#);
        let config = GroundControlConfig::builder("P1", "key").cache_ttl(60).build();
        let client = client_with(transport.clone(), config);

        assert!(client.is_feature_flag_enabled("f1").await);
        assert!(client.is_feature_flag_enabled("f1").await);
        assert_eq!(transport.count(), 1);
    }

    #[tokio::test]
    async fn test_negative_ttl_refetches_every_time() {
        let transport = FakeTransport::ok(r#"{"enabled":true}"#);
        let config = GroundControlConfig::builder("P1", "key").cache_ttl(-1).build();
        let client = client_with(transport.clone(), config);

        assert!(client.is_feature_flag_enabled("f1").await);
        assert!(client.is_feature_flag_enabled("f1").await);
        assert_eq!(transport.count(), 2);
    }

    #[tokio::test]
    async fn test_reset_clears_overrides_not_cache() {
        let transport = FakeTransport::ok(r#"{"enabled":true}"#);
        let config = GroundControlConfig::builder("P1", "key").cache_ttl(60).build();
        let client = client_with(transport.clone(), config);

        // Prime the cache.
        assert!(client.is_feature_flag_enabled("f1").await);
        assert_eq!(transport.count(), 1);

        client.disable_feature_flag("f1");
        client.reset();

        // Overrides are gone, the cached value is not.
        assert!(client.is_feature_flag_enabled("f1").await);
        assert_eq!(transport.count(), 1);
    }

    #[tokio::test]
    async fn test_distinct_actor_sets_cached_separately() {
        let transport = FakeTransport::ok(r#"{"enabled":true}"#);
        let config = GroundControlConfig::builder("P1", "key").cache_ttl(60).build();
        let client = client_with(transport.clone(), config);

        client
            .is_feature_flag_enabled_for("f1", &CheckOptions::actors(["a"]))
            .await;
        client
            .is_feature_flag_enabled_for("f1", &CheckOptions::actors(["b"]))
            .await;
        client
            .is_feature_flag_enabled_for("f1", &CheckOptions::actors(["a"]))
            .await;

        assert_eq!(transport.count(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let transport = FakeTransport::ok(r#"{"enabled":true}"#);
        let client = client_with(transport.clone(), GroundControlConfig::new("P1", "key"));
        let clone = client.clone();

        client.disable_feature_flag("f1");
        assert!(!clone.is_feature_flag_enabled("f1").await);
        assert_eq!(transport.count(), 0);
    }
}
