//! Node RPC interface and its HTTP JSON-RPC implementation.
//!
//! [`NodeClient`] is the narrow seam the transport depends on; [`HttpNode`]
//! implements it against a Tendermint-style JSON-RPC endpoint. Byte fields on
//! this wire are base64, query data is hex, and heights travel as decimal
//! strings.

use crate::codec::base64_bytes;
use crate::error::ChainError;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tmwire_core::Height;

/// Options for an ABCI store query.
#[derive(Debug, Clone, Copy)]
pub struct AbciQueryOptions {
    /// Block height to query at; zero means latest.
    pub height: Height,
    /// Skip proof verification (the node is trusted).
    pub trusted: bool,
}

/// Application-level response to an ABCI query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AbciQueryResponse {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub log: String,
    #[serde(default, with = "base64_bytes")]
    pub value: Vec<u8>,
    #[serde(default, deserialize_with = "de_string_i64")]
    pub height: Height,
}

/// Result of one execution phase (CheckTx or DeliverTx).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxResult {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub log: String,
    #[serde(default, with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Commit confirmation for a broadcast transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxCommitResponse {
    #[serde(default)]
    pub check_tx: TxResult,
    #[serde(default)]
    pub deliver_tx: TxResult,
    #[serde(default)]
    pub hash: String,
    #[serde(default, deserialize_with = "de_string_i64")]
    pub height: Height,
}

impl TxCommitResponse {
    /// Whether both execution phases succeeded.
    pub fn is_ok(&self) -> bool {
        self.check_tx.code == 0 && self.deliver_tx.code == 0
    }
}

/// A committed block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub header: BlockHeader,
    #[serde(default)]
    pub data: BlockData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockHeader {
    #[serde(default)]
    pub chain_id: String,
    #[serde(default, deserialize_with = "de_string_i64")]
    pub height: Height,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockData {
    /// Raw transactions, base64 as delivered by the node.
    #[serde(default)]
    pub txs: Vec<String>,
}

/// Node identity and sync state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeStatus {
    #[serde(default)]
    pub node_info: NodeInfo,
    #[serde(default)]
    pub sync_info: SyncInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub moniker: String,
    /// Chain id the node is serving.
    #[serde(default)]
    pub network: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncInfo {
    #[serde(default)]
    pub latest_block_hash: String,
    #[serde(default, deserialize_with = "de_string_i64")]
    pub latest_block_height: Height,
    #[serde(default)]
    pub catching_up: bool,
}

/// Remote node operations the transport consumes.
#[async_trait]
pub trait NodeClient: Send + Sync {
    async fn abci_query(
        &self,
        path: &str,
        data: &[u8],
        options: AbciQueryOptions,
    ) -> Result<AbciQueryResponse, ChainError>;

    async fn broadcast_tx_commit(&self, tx: &[u8]) -> Result<TxCommitResponse, ChainError>;

    async fn block(&self, height: Option<Height>) -> Result<Block, ChainError>;

    async fn status(&self) -> Result<NodeStatus, ChainError>;
}

/// JSON-RPC client for a Tendermint-style node over HTTP.
pub struct HttpNode {
    url: String,
    http: reqwest::Client,
}

impl HttpNode {
    pub fn new(node_url: &str) -> Self {
        Self {
            url: normalize_url(node_url),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, ChainError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 0,
            "method": method,
            "params": params,
        });
        tracing::debug!("rpc {} to {}", method, self.url);

        let response: JsonRpcResponse<T> = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(ChainError::Rpc(format!(
                "{method}: {} (code {})",
                err.message, err.code
            )));
        }
        response
            .result
            .ok_or_else(|| ChainError::Rpc(format!("{method}: response carried no result")))
    }
}

#[async_trait]
impl NodeClient for HttpNode {
    async fn abci_query(
        &self,
        path: &str,
        data: &[u8],
        options: AbciQueryOptions,
    ) -> Result<AbciQueryResponse, ChainError> {
        let params = serde_json::json!({
            "path": path,
            "data": hex::encode_upper(data),
            "height": options.height.to_string(),
            "prove": !options.trusted,
        });
        let envelope: AbciQueryEnvelope = self.call("abci_query", params).await?;
        Ok(envelope.response)
    }

    async fn broadcast_tx_commit(&self, tx: &[u8]) -> Result<TxCommitResponse, ChainError> {
        let params = serde_json::json!({ "tx": STANDARD.encode(tx) });
        self.call("broadcast_tx_commit", params).await
    }

    async fn block(&self, height: Option<Height>) -> Result<Block, ChainError> {
        let params = match height {
            Some(height) => serde_json::json!({ "height": height.to_string() }),
            None => serde_json::json!({}),
        };
        let envelope: BlockEnvelope = self.call("block", params).await?;
        Ok(envelope.block)
    }

    async fn status(&self) -> Result<NodeStatus, ChainError> {
        self.call("status", serde_json::json!({})).await
    }
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize)]
struct AbciQueryEnvelope {
    response: AbciQueryResponse,
}

#[derive(Deserialize)]
struct BlockEnvelope {
    block: Block,
}

/// Tendermint encodes 64-bit integers as decimal strings in JSON.
fn de_string_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

fn normalize_url(node_url: &str) -> String {
    if node_url.contains("://") {
        node_url.to_string()
    } else {
        format!("http://{node_url}")
    }
}
