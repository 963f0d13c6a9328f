//! Error types for transport operations.
//!
//! The transport never retries: every failure surfaces immediately with
//! enough structure (code, log, deadline) for the caller to diagnose it.
//! `QueryFailed` and `EmptyResponse` mean the node answered; `Timeout` means
//! it did not answer in time and any late answer was discarded.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("must define node URL")]
    MissingNode,

    #[error("{what} timed out after {timeout:?}")]
    Timeout { what: String, timeout: Duration },

    #[error("query failed with code {code}: {log}")]
    QueryFailed { code: u32, log: String },

    #[error("empty response")]
    EmptyResponse,

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid private key: {0}")]
    Key(String),

    #[error("signing failed: {0}")]
    Sign(String),

    #[error("transaction encoding failed: {0}")]
    Encode(String),
}
