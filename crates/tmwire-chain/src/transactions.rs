//! Signed transaction assembly and submission.

use crate::codec::{Keyring, SigningKey, TxEncoder};
use crate::error::ChainError;
use crate::node::TxCommitResponse;
use crate::transport::Transport;
use tmwire_core::Sequence;

/// Builds fully signed transactions from logical messages and broadcasts
/// them through a [`Transport`].
pub struct TxSubmitter<E, K> {
    transport: Transport,
    encoder: E,
    keyring: K,
}

impl<E, K> TxSubmitter<E, K>
where
    E: TxEncoder,
    K: Keyring,
{
    pub fn new(transport: Transport, encoder: E, keyring: K) -> Self {
        Self {
            transport,
            encoder,
            keyring,
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Sign and broadcast a transaction carrying one message.
    ///
    /// Key parsing, sign-bytes encoding, signing, and final encoding all
    /// happen before any network contact; a failure in any of them
    /// short-circuits without touching the node.
    pub async fn submit(
        &self,
        msg: E::Msg,
        private_key_hex: &str,
        sequence: Sequence,
        memo: &str,
    ) -> Result<TxCommitResponse, ChainError> {
        let key = self.keyring.parse_private_key(private_key_hex)?;

        let msgs = [msg];
        let sign_bytes = self
            .encoder
            .sign_bytes(&msgs, self.transport.chain_id(), sequence)?;
        let signature = key.sign(&sign_bytes)?;
        let tx = self
            .encoder
            .tx_bytes(&msgs, &key.public_key(), &signature, sequence, memo)?;

        tracing::debug!("submitting transaction with sequence {}", sequence);
        self.transport.broadcast_tx_commit(&tx).await
    }
}
