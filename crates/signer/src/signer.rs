use crate::Result;
use async_trait::async_trait;
use ingot_consensus::SignableTransaction;
use ingot_primitives::{eip191_hash_message, Address, ChainId, Signature, B256};

/// Asynchronous signer.
///
/// All provided implementations rely on [`sign_hash`](Signer::sign_hash).
/// If the signer cannot implement this method, it must implement all the
/// other methods directly, or they will return
/// [`UnsupportedOperation`](crate::Error::UnsupportedOperation).
#[async_trait]
pub trait Signer: Send + Sync {
    /// Signs the given hash.
    async fn sign_hash(&self, hash: &B256) -> Result<Signature>;

    /// Signs the hash of the provided message after prefixing it, as
    /// specified in [EIP-191].
    ///
    /// [EIP-191]: https://eips.ethereum.org/EIPS/eip-191
    #[inline]
    async fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        self.sign_hash(&eip191_hash_message(message)).await
    }

    /// Returns the signer's address.
    fn address(&self) -> Address;

    /// Returns the signer's chain ID.
    fn chain_id(&self) -> Option<ChainId>;

    /// Sets the signer's chain ID.
    fn set_chain_id(&mut self, chain_id: Option<ChainId>);

    /// Sets the signer's chain ID and returns `self`.
    #[inline]
    #[must_use]
    fn with_chain_id(mut self, chain_id: Option<ChainId>) -> Self
    where
        Self: Sized,
    {
        self.set_chain_id(chain_id);
        self
    }
}

/// Synchronous signer.
pub trait SignerSync {
    /// Signs the given hash.
    fn sign_hash_sync(&self, hash: &B256) -> Result<Signature>;

    /// Signs the hash of the provided message after prefixing it, as
    /// specified in [EIP-191].
    ///
    /// [EIP-191]: https://eips.ethereum.org/EIPS/eip-191
    #[inline]
    fn sign_message_sync(&self, message: &[u8]) -> Result<Signature> {
        self.sign_hash_sync(&eip191_hash_message(message))
    }

    /// Returns the signer's chain ID.
    fn chain_id_sync(&self) -> Option<ChainId>;
}

/// Asynchronous transaction signer, possibly network-backed.
#[async_trait]
pub trait TxSigner {
    /// The signer's address.
    fn address(&self) -> Address;

    /// Signs the transaction's signing image, reconciling chain ids and
    /// encoding the recovery bit for the transaction's variant.
    async fn sign_transaction(&self, tx: &mut dyn SignableTransaction) -> Result<Signature>;
}

/// Synchronous transaction signer.
pub trait TxSignerSync {
    /// The signer's address.
    fn address(&self) -> Address;

    /// Signs the transaction's signing image.
    fn sign_transaction_sync(&self, tx: &mut dyn SignableTransaction) -> Result<Signature>;
}
