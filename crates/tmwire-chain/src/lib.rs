//! Client-side transport for a Tendermint-style blockchain node.
//!
//! [`Transport`] turns logical store queries and transaction broadcasts into
//! RPC calls against a single node, with a per-call timeout on queries.
//! [`TxSubmitter`] composes the transport with injected signing and encoding
//! capabilities to build and broadcast fully signed transactions.

pub mod codec;
pub mod config;
pub mod error;
pub mod node;
pub mod transactions;
pub mod transport;

pub use codec::{Keyring, KvPair, PublicKey, Signature, SigningKey, TxEncoder};
pub use config::TransportConfig;
pub use error::ChainError;
pub use node::{
    AbciQueryOptions, AbciQueryResponse, Block, BlockData, BlockHeader, HttpNode, NodeClient,
    NodeInfo, NodeStatus, SyncInfo, TxCommitResponse, TxResult,
};
pub use transactions::TxSubmitter;
pub use transport::Transport;
