use crate::SignableTransaction;
use ingot_crypto::VerifyingKey;
use ingot_primitives::{Address, ParityError, Signature, B256};
use ingot_rlp::BufMut;

/// Failure to recover a transaction's signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecoveryError {
    /// The signature's `v` does not decode in the transaction's context.
    #[error(transparent)]
    Parity(#[from] ParityError),
    /// The curve math rejected the signature.
    #[error(transparent)]
    Crypto(#[from] ingot_crypto::Error),
}

/// A transaction sealed with its signature and wire hash.
///
/// The inner transaction is immutable once sealed; the hash is the digest
/// of the canonical wire bytes, type prefix included.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signed<T> {
    tx: T,
    signature: Signature,
    hash: B256,
}

impl<T> Signed<T> {
    /// Instantiates from parts. Does not verify the signature or the hash.
    pub const fn new_unchecked(tx: T, signature: Signature, hash: B256) -> Self {
        Self { tx, signature, hash }
    }

    /// The inner transaction.
    pub const fn tx(&self) -> &T {
        &self.tx
    }

    /// The attached signature.
    pub const fn signature(&self) -> Signature {
        self.signature
    }

    /// The transaction hash.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Splits into the transaction, signature, and hash.
    pub fn into_parts(self) -> (T, Signature, B256) {
        (self.tx, self.signature, self.hash)
    }
}

impl<T> std::ops::Deref for Signed<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

impl<T: SignableTransaction> Signed<T> {
    /// Writes the canonical on-wire form, type prefix included.
    pub fn encode_wire(&self, out: &mut dyn BufMut) {
        self.tx.encode_signed(&self.signature, out);
    }

    /// The canonical on-wire bytes.
    pub fn wire_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_wire(&mut out);
        out
    }

    /// Recovers the address that signed this transaction.
    pub fn recover_signer(&self) -> Result<Address, RecoveryError> {
        let recovery_id = self.signature.recovery_id(self.tx.chain_id())?;
        let key = VerifyingKey::recover_from_prehash(
            &self.tx.signature_hash(),
            &self.signature,
            recovery_id,
        )?;
        Ok(key.to_address())
    }
}
