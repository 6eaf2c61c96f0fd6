use crate::{
    Decodable2718, Eip2718Error, Encodable2718, RecoveryError, SignableTransaction, Signed,
    Transaction, TxEip1559, TxLegacy,
};
use ingot_primitives::{Address, Signature, B256};
use ingot_rlp::BufMut;

/// Transaction type discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TxType {
    /// Untyped legacy transaction.
    Legacy = 0,
    /// Fee-market transaction, flag `0x02`.
    Eip1559 = 2,
}

impl TryFrom<u8> for TxType {
    type Error = Eip2718Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Legacy),
            2 => Ok(Self::Eip1559),
            ty => Err(Eip2718Error::UnexpectedType(ty)),
        }
    }
}

/// A signed transaction in its wire envelope, ready for submission.
///
/// The sum of the signed variants; the runner and the RPC layer dispatch
/// on it without caring which shape is inside.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TxEnvelope {
    /// An untyped legacy transaction.
    Legacy(Signed<TxLegacy>),
    /// A fee-market transaction.
    Eip1559(Signed<TxEip1559>),
}

impl From<Signed<TxLegacy>> for TxEnvelope {
    fn from(signed: Signed<TxLegacy>) -> Self {
        Self::Legacy(signed)
    }
}

impl From<Signed<TxEip1559>> for TxEnvelope {
    fn from(signed: Signed<TxEip1559>) -> Self {
        Self::Eip1559(signed)
    }
}

impl TxEnvelope {
    /// The variant's type.
    pub const fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy(_) => TxType::Legacy,
            Self::Eip1559(_) => TxType::Eip1559,
        }
    }

    /// The transaction hash, as computed when the signature was attached.
    pub const fn tx_hash(&self) -> B256 {
        match self {
            Self::Legacy(tx) => tx.hash(),
            Self::Eip1559(tx) => tx.hash(),
        }
    }

    /// The sender's sequence number.
    pub fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.tx().nonce(),
            Self::Eip1559(tx) => tx.tx().nonce(),
        }
    }

    /// The attached signature.
    pub const fn signature(&self) -> Signature {
        match self {
            Self::Legacy(tx) => tx.signature(),
            Self::Eip1559(tx) => tx.signature(),
        }
    }

    /// Recovers the signing address.
    pub fn recover_signer(&self) -> Result<Address, RecoveryError> {
        match self {
            Self::Legacy(tx) => tx.recover_signer(),
            Self::Eip1559(tx) => tx.recover_signer(),
        }
    }
}

impl Encodable2718 for TxEnvelope {
    fn type_flag(&self) -> Option<u8> {
        match self {
            Self::Legacy(_) => None,
            Self::Eip1559(_) => Some(TxEip1559::TX_TYPE),
        }
    }

    fn encode_2718_len(&self) -> usize {
        // encode_signed already includes the type byte for typed variants
        self.encoded_2718().len()
    }

    fn encode_2718(&self, out: &mut dyn BufMut) {
        match self {
            Self::Legacy(tx) => tx.encode_wire(out),
            Self::Eip1559(tx) => tx.encode_wire(out),
        }
    }

    fn encoded_2718(&self) -> Vec<u8> {
        match self {
            Self::Legacy(tx) => tx.wire_bytes(),
            Self::Eip1559(tx) => tx.wire_bytes(),
        }
    }
}

impl Decodable2718 for TxEnvelope {
    fn typed_decode(ty: u8, buf: &mut &[u8]) -> Result<Self, Eip2718Error> {
        match TxType::try_from(ty)? {
            TxType::Eip1559 => Ok(Self::Eip1559(TxEip1559::decode_signed_fields(buf)?)),
            TxType::Legacy => Err(Eip2718Error::UnexpectedType(ty)),
        }
    }

    fn fallback_decode(buf: &mut &[u8]) -> Result<Self, Eip2718Error> {
        Ok(Self::Legacy(TxLegacy::decode_signed_fields(buf)?))
    }
}
