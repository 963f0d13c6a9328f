//! Seams for the external wire-format and key capabilities.
//!
//! Transaction encoding and private-key handling are chain-specific and live
//! outside this crate; the transport only needs the narrow contracts below.

use crate::error::ChainError;
use serde::{Deserialize, Serialize};
use tmwire_core::Sequence;

/// A raw public key, opaque to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// A raw signature, opaque to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// One entry of a subspace query result. Ordering follows the node's payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvPair {
    #[serde(with = "base64_bytes")]
    pub key: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
}

/// Canonical transaction encoding for one message type family.
pub trait TxEncoder: Send + Sync {
    type Msg;

    /// Bytes the sender signs: messages scoped to a chain id and sequence.
    fn sign_bytes(
        &self,
        msgs: &[Self::Msg],
        chain_id: &str,
        sequence: Sequence,
    ) -> Result<Vec<u8>, ChainError>;

    /// Final broadcastable transaction bytes.
    fn tx_bytes(
        &self,
        msgs: &[Self::Msg],
        public_key: &PublicKey,
        signature: &Signature,
        sequence: Sequence,
        memo: &str,
    ) -> Result<Vec<u8>, ChainError>;
}

/// A parsed private key that can sign and expose its public half.
pub trait SigningKey {
    fn sign(&self, msg: &[u8]) -> Result<Signature, ChainError>;

    fn public_key(&self) -> PublicKey;
}

/// Parses private keys from their hex representation.
pub trait Keyring: Send + Sync {
    type Key: SigningKey;

    fn parse_private_key(&self, hex_key: &str) -> Result<Self::Key, ChainError>;
}

/// Serde adapter for byte fields carried as base64 strings on the wire.
/// A JSON `null` or missing field decodes to an empty vector.
pub mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => STANDARD.decode(encoded).map_err(serde::de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}
