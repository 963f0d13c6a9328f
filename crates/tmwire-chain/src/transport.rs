//! Store queries and transaction broadcast against a single node.
//!
//! One [`Transport`] is built per client session and reused across calls.
//! Every query is a single future raced against the configured deadline;
//! losing the race drops the future, which cancels the in-flight request, so
//! no state is shared between calls and a late answer can never be
//! misattributed to a later one. Broadcasts block until commit and carry no
//! deadline, since a legitimate commit can outlast any query timeout.

use crate::codec::KvPair;
use crate::config::TransportConfig;
use crate::error::ChainError;
use crate::node::{
    AbciQueryOptions, Block, HttpNode, NodeClient, NodeStatus, TxCommitResponse,
};
use std::sync::Arc;
use std::time::Duration;
use tmwire_core::Height;

#[derive(Debug, Clone, Copy)]
enum StoreEndpoint {
    Key,
    Subspace,
}

impl StoreEndpoint {
    fn as_str(self) -> &'static str {
        match self {
            StoreEndpoint::Key => "key",
            StoreEndpoint::Subspace => "subspace",
        }
    }
}

/// The node's routing contract for store queries.
fn store_path(store: &str, endpoint: StoreEndpoint) -> String {
    format!("/store/{}/{}", store, endpoint.as_str())
}

/// Client-side transport bound to one chain and one node.
pub struct Transport {
    chain_id: String,
    node_url: String,
    node: Option<Arc<dyn NodeClient>>,
    query_timeout: Duration,
}

impl Transport {
    /// Transport over HTTP JSON-RPC, settings from an explicit config.
    pub fn new(config: &TransportConfig) -> Self {
        let node_url = config.node_url().to_string();
        tracing::info!(
            "transport for chain {:?} via {}",
            config.chain_id,
            node_url
        );
        Self {
            chain_id: config.chain_id.clone(),
            node: Some(Arc::new(HttpNode::new(&node_url))),
            node_url,
            query_timeout: config.query_timeout(),
        }
    }

    /// Transport over HTTP JSON-RPC from explicit arguments.
    pub fn from_args(
        chain_id: impl Into<String>,
        node_url: impl Into<String>,
        query_timeout: Duration,
    ) -> Self {
        let node_url = node_url.into();
        Self {
            chain_id: chain_id.into(),
            node: Some(Arc::new(HttpNode::new(&node_url))),
            node_url,
            query_timeout,
        }
    }

    /// Transport over an injected node implementation.
    pub fn with_node(
        chain_id: impl Into<String>,
        node: Arc<dyn NodeClient>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            node_url: String::new(),
            node: Some(node),
            query_timeout,
        }
    }

    /// Transport without a node; every operation fails with
    /// [`ChainError::MissingNode`] until one is attached.
    pub fn detached(chain_id: impl Into<String>, query_timeout: Duration) -> Self {
        Self {
            chain_id: chain_id.into(),
            node_url: String::new(),
            node: None,
            query_timeout,
        }
    }

    pub fn set_node(&mut self, node: Arc<dyn NodeClient>) {
        self.node = Some(node);
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// The sole configuration gate guarding every operation.
    fn node(&self) -> Result<&Arc<dyn NodeClient>, ChainError> {
        self.node.as_ref().ok_or(ChainError::MissingNode)
    }

    /// Point query against a named store at the latest height.
    pub async fn query(&self, key: &[u8], store: &str) -> Result<Vec<u8>, ChainError> {
        self.timed_query(key, store, StoreEndpoint::Key, 0, "query".to_string())
            .await
    }

    /// Point query pinned to an explicit height.
    pub async fn query_at_height(
        &self,
        key: &[u8],
        store: &str,
        height: Height,
    ) -> Result<Vec<u8>, ChainError> {
        self.timed_query(
            key,
            store,
            StoreEndpoint::Key,
            height,
            format!("query at height {height}"),
        )
        .await
    }

    /// Range query over all keys sharing `prefix`, decoded as ordered
    /// key/value pairs.
    pub async fn query_subspace(
        &self,
        prefix: &[u8],
        store: &str,
    ) -> Result<Vec<KvPair>, ChainError> {
        let raw = self
            .timed_query(
                prefix,
                store,
                StoreEndpoint::Subspace,
                0,
                "subspace query".to_string(),
            )
            .await?;
        let pairs = serde_json::from_slice(&raw)?;
        Ok(pairs)
    }

    async fn timed_query(
        &self,
        key: &[u8],
        store: &str,
        endpoint: StoreEndpoint,
        height: Height,
        what: String,
    ) -> Result<Vec<u8>, ChainError> {
        match tokio::time::timeout(
            self.query_timeout,
            self.raw_query(key, store, endpoint, height),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    "{} against store {} timed out after {:?}",
                    what,
                    store,
                    self.query_timeout
                );
                Err(ChainError::Timeout {
                    what,
                    timeout: self.query_timeout,
                })
            }
        }
    }

    async fn raw_query(
        &self,
        key: &[u8],
        store: &str,
        endpoint: StoreEndpoint,
        height: Height,
    ) -> Result<Vec<u8>, ChainError> {
        let node = self.node()?;
        let path = store_path(store, endpoint);
        tracing::debug!("querying {} at height {}", path, height);

        let response = node
            .abci_query(&path, key, AbciQueryOptions { height, trusted: true })
            .await?;
        if response.code != 0 {
            return Err(ChainError::QueryFailed {
                code: response.code,
                log: response.log,
            });
        }
        if response.value.is_empty() {
            return Err(ChainError::EmptyResponse);
        }
        Ok(response.value)
    }

    /// Fetch a block; `None` means the latest.
    pub async fn query_block(&self, height: Option<Height>) -> Result<Block, ChainError> {
        self.node()?.block(height).await
    }

    /// Fetch the node's identity and sync state.
    pub async fn query_status(&self) -> Result<NodeStatus, ChainError> {
        self.node()?.status().await
    }

    /// Submit a transaction and block until the node reports commit.
    /// Node-level errors come back untouched; there is no retry.
    pub async fn broadcast_tx_commit(&self, tx: &[u8]) -> Result<TxCommitResponse, ChainError> {
        let node = self.node()?;
        tracing::debug!("broadcasting {} byte transaction", tx.len());
        let result = node.broadcast_tx_commit(tx).await?;
        tracing::info!(
            "transaction {} landed at height {} (check code {}, deliver code {})",
            result.hash,
            result.height,
            result.check_tx.code,
            result.deliver_tx.code
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_path_format() {
        assert_eq!(store_path("acc", StoreEndpoint::Key), "/store/acc/key");
        assert_eq!(
            store_path("acc", StoreEndpoint::Subspace),
            "/store/acc/subspace"
        );
    }
}
