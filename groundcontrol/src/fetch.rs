//! Remote fetcher: builds the check request and maps the response to a
//! boolean or an error.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::transport::{Transport, TransportRequest};
use crate::{GroundControlConfig, GroundControlError, Result};

/// Success body: `{"enabled": <bool>}`.
#[derive(Debug, Deserialize)]
struct CheckResponse {
    enabled: bool,
}

/// Error body the service may return: `{"message": "<string>"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Builds check requests and dispatches them through the transport.
pub(crate) struct RemoteFetcher {
    config: Arc<GroundControlConfig>,
    transport: Arc<dyn Transport>,
}

impl RemoteFetcher {
    pub fn new(config: Arc<GroundControlConfig>, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Build the full check URL for a flag and actor set.
    ///
    /// Path: `{base_url}/projects/{project_id}/flags/{flag_name}/check`.
    /// Query: one `actorIds` pair per actor in caller-supplied order, then
    /// `cache=<ttl>` when a TTL is configured (a hint to the server's own
    /// cache). The string form of this URL doubles as the local cache key.
    pub fn check_url(&self, flag_name: &str, actors: &[String]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| GroundControlError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| GroundControlError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(["projects", &self.config.project_id, "flags", flag_name, "check"]);

        if !actors.is_empty() || self.config.cache_ttl.is_some() {
            let mut pairs = url.query_pairs_mut();
            for actor_id in actors {
                pairs.append_pair("actorIds", actor_id);
            }
            if let Some(ttl) = self.config.cache_ttl {
                pairs.append_pair("cache", &ttl.to_string());
            }
        }

        Ok(url)
    }

    /// Fetch the flag state from the service. Exactly one attempt, no
    /// retries; timeouts are whatever the transport enforces.
    pub async fn fetch_enabled(&self, url: Url) -> Result<bool> {
        debug!(url = %url, "checking flag against remote service");

        let request = TransportRequest::get(url.clone()).bearer_auth(&self.config.api_key);
        let response = self.transport.execute(request).await?;

        if !response.is_success() {
            let message = response
                .json::<ErrorBody>()
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| response.status_text().to_string());
            return Err(GroundControlError::Status {
                status: response.status().as_u16(),
                message,
            });
        }

        // Two-step decode so a non-JSON body and a wrong-shaped one report
        // differently.
        let body: serde_json::Value =
            response.json().map_err(|_| GroundControlError::Parse {
                url: url.to_string(),
            })?;

        match serde_json::from_value::<CheckResponse>(body) {
            Ok(check) => Ok(check.enabled),
            Err(_) => Err(GroundControlError::InvalidResponse),
        }
    }
}
