use crate::{SignableTransaction, Transaction, TxEip1559, TxEnvelope, TxLegacy, TxType};
use ingot_primitives::{ChainId, Signature, TxKind, U256};
use ingot_rlp::BufMut;

/// An unsigned transaction of either variant.
///
/// Legacy and fee-market transactions are a sum type, not a hierarchy:
/// their signing images and wire forms differ structurally, and the
/// submission path dispatches on the variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypedTransaction {
    /// Legacy transaction.
    Legacy(TxLegacy),
    /// Fee-market (type 2) transaction.
    Eip1559(TxEip1559),
}

impl From<TxLegacy> for TypedTransaction {
    fn from(tx: TxLegacy) -> Self {
        Self::Legacy(tx)
    }
}

impl From<TxEip1559> for TypedTransaction {
    fn from(tx: TxEip1559) -> Self {
        Self::Eip1559(tx)
    }
}

impl TypedTransaction {
    /// The variant's type.
    pub const fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy(_) => TxType::Legacy,
            Self::Eip1559(_) => TxType::Eip1559,
        }
    }

    /// The inner legacy transaction, if that is the variant.
    pub const fn legacy(&self) -> Option<&TxLegacy> {
        match self {
            Self::Legacy(tx) => Some(tx),
            _ => None,
        }
    }

    /// The inner fee-market transaction, if that is the variant.
    pub const fn eip1559(&self) -> Option<&TxEip1559> {
        match self {
            Self::Eip1559(tx) => Some(tx),
            _ => None,
        }
    }

    /// Attaches a signature and wraps the result in the wire envelope.
    pub fn into_envelope(self, signature: Signature) -> TxEnvelope {
        match self {
            Self::Legacy(tx) => TxEnvelope::Legacy(tx.into_signed(signature)),
            Self::Eip1559(tx) => TxEnvelope::Eip1559(tx.into_signed(signature)),
        }
    }
}

impl Transaction for TypedTransaction {
    fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Legacy(tx) => tx.chain_id(),
            Self::Eip1559(tx) => tx.chain_id(),
        }
    }

    fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce(),
            Self::Eip1559(tx) => tx.nonce(),
        }
    }

    fn gas_limit(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.gas_limit(),
            Self::Eip1559(tx) => tx.gas_limit(),
        }
    }

    fn gas_price(&self) -> Option<u128> {
        match self {
            Self::Legacy(tx) => tx.gas_price(),
            Self::Eip1559(tx) => tx.gas_price(),
        }
    }

    fn to(&self) -> TxKind {
        match self {
            Self::Legacy(tx) => tx.to(),
            Self::Eip1559(tx) => tx.to(),
        }
    }

    fn value(&self) -> U256 {
        match self {
            Self::Legacy(tx) => tx.value(),
            Self::Eip1559(tx) => tx.value(),
        }
    }

    fn input(&self) -> &[u8] {
        match self {
            Self::Legacy(tx) => tx.input(),
            Self::Eip1559(tx) => tx.input(),
        }
    }
}

impl SignableTransaction for TypedTransaction {
    fn set_chain_id(&mut self, chain_id: ChainId) {
        match self {
            Self::Legacy(tx) => tx.set_chain_id(chain_id),
            Self::Eip1559(tx) => tx.set_chain_id(chain_id),
        }
    }

    fn requires_chain_id(&self) -> bool {
        match self {
            Self::Legacy(tx) => tx.requires_chain_id(),
            Self::Eip1559(tx) => tx.requires_chain_id(),
        }
    }

    fn encode_for_signing(&self, out: &mut dyn BufMut) {
        match self {
            Self::Legacy(tx) => tx.encode_for_signing(out),
            Self::Eip1559(tx) => tx.encode_for_signing(out),
        }
    }

    fn payload_len_for_signature(&self) -> usize {
        match self {
            Self::Legacy(tx) => tx.payload_len_for_signature(),
            Self::Eip1559(tx) => tx.payload_len_for_signature(),
        }
    }

    fn encode_signed(&self, signature: &Signature, out: &mut dyn BufMut) {
        match self {
            Self::Legacy(tx) => tx.encode_signed(signature, out),
            Self::Eip1559(tx) => tx.encode_signed(signature, out),
        }
    }
}
