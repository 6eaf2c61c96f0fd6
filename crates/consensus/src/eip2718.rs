//! [EIP-2718] typed-envelope traits.
//!
//! A typed transaction travels as a one-byte type flag followed by its
//! payload; the flag is a literal prefix, not RLP. Legacy transactions
//! have no flag and remain bare RLP lists.
//!
//! [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718

use ingot_primitives::{keccak256, B256};
use ingot_rlp::BufMut;

// type flags only go up to 0x7f; anything above is an RLP list header
const TX_TYPE_BYTE_MAX: u8 = 0x7f;

/// [EIP-2718] decoding errors.
///
/// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Eip2718Error {
    /// RLP error from the payload decoder.
    #[error(transparent)]
    RlpError(#[from] ingot_rlp::Error),
    /// Got an unexpected type flag while decoding.
    #[error("unexpected type flag {0:#04x}")]
    UnexpectedType(u8),
}

/// Decoding trait for [EIP-2718] envelopes.
///
/// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
pub trait Decodable2718: Sized {
    /// Extracts the type byte from the buffer, if any. The type byte is
    /// the first byte, provided it is `0x7f` or lower.
    fn extract_type_byte(buf: &[u8]) -> Option<u8> {
        buf.first().copied().filter(|b| *b <= TX_TYPE_BYTE_MAX)
    }

    /// Decodes the variant selected by the type flag from the payload
    /// after it.
    fn typed_decode(ty: u8, buf: &mut &[u8]) -> Result<Self, Eip2718Error>;

    /// Decodes the default (legacy) variant.
    fn fallback_decode(buf: &mut &[u8]) -> Result<Self, Eip2718Error>;

    /// Decodes an envelope, dispatching on the presence of a type byte.
    fn decode_2718(buf: &mut &[u8]) -> Result<Self, Eip2718Error> {
        match Self::extract_type_byte(buf) {
            Some(ty) => {
                *buf = &buf[1..];
                Self::typed_decode(ty, buf)
            }
            None => Self::fallback_decode(buf),
        }
    }
}

/// Encoding trait for [EIP-2718] envelopes.
///
/// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
pub trait Encodable2718: Sized {
    /// The type flag, or `None` for the legacy variant.
    fn type_flag(&self) -> Option<u8>;

    /// Length of the envelope: type flag plus payload.
    fn encode_2718_len(&self) -> usize;

    /// Writes the envelope: a type flag in `0x00..=0x7f` when present,
    /// then the payload.
    fn encode_2718(&self, out: &mut dyn BufMut);

    /// The envelope as a fresh buffer.
    fn encoded_2718(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encode_2718_len());
        self.encode_2718(&mut out);
        out
    }

    /// The envelope hash, the transaction's canonical identifier.
    fn tx_hash_2718(&self) -> B256 {
        keccak256(self.encoded_2718())
    }
}
