//! # GroundControl
//!
//! Client SDK for the [GroundControl](https://groundcontrol.sh) feature-flag
//! service: remote boolean checks with local override controls for testing
//! and an optional in-memory TTL cache.
//!
//! ## Features
//!
//! - **Remote checks**: `GET /projects/{project}/flags/{flag}/check` with
//!   per-actor targeting
//! - **Local overrides**: force a flag per actor, per flag, or globally,
//!   with strict precedence (actor > flag > full)
//! - **TTL cache**: opt-in per-client cache with lazy expiry
//! - **Fail closed**: every remote failure reports the flag as disabled and
//!   notifies a configurable error handler
//! - **Injectable transport**: swap the HTTP layer out in tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use groundcontrol::{CheckOptions, GroundControlClient, GroundControlConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GroundControlConfig::builder("my-project", "my-api-key")
//!         .cache_ttl(300)
//!         .build();
//!     let client = GroundControlClient::new(config);
//!
//!     if client.is_feature_flag_enabled("new-ui").await {
//!         // Show new UI
//!     }
//!
//!     let options = CheckOptions::actors(["user-123"]);
//!     let enabled = client.is_feature_flag_enabled_for("new-ui", &options).await;
//!     println!("new-ui for user-123: {enabled}");
//! }
//! ```
//!
//! ## Overrides in tests
//!
//! ```rust
//! use groundcontrol::{GroundControlClient, GroundControlConfig};
//!
//! let client = GroundControlClient::new(GroundControlConfig::new("p", "k"));
//!
//! // Never touches the network.
//! client.enable_feature_flag("new-ui");
//! client.disable_feature_flag_for("new-ui", ["qa-bot"]);
//!
//! // Back to remote resolution.
//! client.reset();
//! ```

mod cache;
mod client;
mod config;
mod error;
mod fetch;
mod overrides;
mod transport;

pub use client::{CheckOptions, GroundControlClient};
pub use config::{DEFAULT_BASE_URL, GroundControlConfig, GroundControlConfigBuilder};
pub use error::{ErrorHandler, GroundControlError, Result};
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};

// Re-export common types
pub use http::{Method, StatusCode};
pub use url::Url;
