mod access_list;
pub use access_list::{AccessList, AccessListItem};

mod eip1559;
pub use eip1559::TxEip1559;

mod envelope;
pub use envelope::{TxEnvelope, TxType};

mod legacy;
pub use legacy::TxLegacy;

mod typed;
pub use typed::TypedTransaction;

use crate::Signed;
use ingot_primitives::{keccak256, ChainId, Signature, TxKind, B256, U256};
use ingot_rlp::BufMut;

/// Field accessors common to every transaction shape.
pub trait Transaction {
    /// The chain this transaction is bound to, when one is set. Zero is
    /// treated as unset.
    fn chain_id(&self) -> Option<ChainId>;

    /// The sender's sequence number.
    fn nonce(&self) -> u64;

    /// The gas ceiling for execution.
    fn gas_limit(&self) -> u64;

    /// The legacy gas price in wei, for variants that carry one.
    fn gas_price(&self) -> Option<u128>;

    /// The recipient, or [`TxKind::Create`] for contract creation.
    fn to(&self) -> TxKind;

    /// The wei value transferred.
    fn value(&self) -> U256;

    /// Call data, or initcode for contract creation.
    fn input(&self) -> &[u8];

    /// Whether this transaction deploys a contract. An absent recipient and
    /// the all-zero address both count.
    fn is_contract_creation(&self) -> bool {
        match self.to() {
            TxKind::Create => true,
            TxKind::Call(to) => to.is_zero(),
        }
    }
}

/// A transaction that can produce its signing image and accept a signature.
///
/// Signing is always two steps: hash [`encoded_for_signing`][a], sign the
/// digest elsewhere, then [`into_signed`][b]. Attaching a signature
/// consumes the value and returns a new one; nothing is mutated.
///
/// [a]: SignableTransaction::encoded_for_signing
/// [b]: SignableTransaction::into_signed
pub trait SignableTransaction: Transaction + Send + Sync {
    /// Binds the transaction to a chain.
    fn set_chain_id(&mut self, chain_id: ChainId);

    /// Binds the transaction to a chain, unless it is already bound to a
    /// different one. Returns whether the ids agree.
    fn set_chain_id_checked(&mut self, chain_id: ChainId) -> bool {
        match self.chain_id() {
            Some(existing) => existing == chain_id,
            None => {
                self.set_chain_id(chain_id);
                true
            }
        }
    }

    /// Whether this variant refuses to sign without a chain id.
    fn requires_chain_id(&self) -> bool {
        false
    }

    /// Writes the exact bytes whose digest is signed.
    fn encode_for_signing(&self, out: &mut dyn BufMut);

    /// Length of the signing image.
    fn payload_len_for_signature(&self) -> usize;

    /// The signing image as a fresh buffer.
    fn encoded_for_signing(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload_len_for_signature());
        self.encode_for_signing(&mut out);
        out
    }

    /// The digest that is signed.
    fn signature_hash(&self) -> B256 {
        keccak256(self.encoded_for_signing())
    }

    /// Writes the canonical on-wire form with the signature attached,
    /// including the type byte for typed variants.
    fn encode_signed(&self, signature: &Signature, out: &mut dyn BufMut);

    /// Attaches the signature, returning the signed transaction and its
    /// hash. `self` is consumed; the unsigned value is never mutated.
    fn into_signed(self, signature: Signature) -> Signed<Self>
    where
        Self: Sized,
    {
        let mut buf = Vec::new();
        self.encode_signed(&signature, &mut buf);
        let hash = keccak256(&buf);
        Signed::new_unchecked(self, signature, hash)
    }
}
