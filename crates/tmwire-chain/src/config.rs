//! Transport configuration.
//!
//! Resolving these values from files or the environment is the embedding
//! application's job; the transport only ever consumes this explicit struct.

use serde::Deserialize;
use std::time::Duration;

/// Node used when no URL is configured.
pub const DEFAULT_NODE_URL: &str = "localhost:26657";

/// Query deadline used when none is configured.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;

/// Connection settings for [`crate::Transport`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Chain identifier that scopes signed transactions.
    pub chain_id: String,
    /// Node RPC endpoint; falls back to [`DEFAULT_NODE_URL`] when unset.
    pub node_url: Option<String>,
    /// Deadline applied to every query (not to broadcasts).
    pub query_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            chain_id: String::new(),
            node_url: None,
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }
}

impl TransportConfig {
    pub fn node_url(&self) -> &str {
        self.node_url.as_deref().unwrap_or(DEFAULT_NODE_URL)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}
