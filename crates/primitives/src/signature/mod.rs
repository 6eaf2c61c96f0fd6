use crate::U256;
use core::{fmt, str::FromStr};

pub mod parity;
pub use parity::ParityError;

/// Error constructing or interpreting a [`Signature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// Input was not 65 bytes of `r || s || v`.
    #[error("signature must be 65 bytes")]
    InvalidLength,
    /// A non-hex character.
    #[error("invalid hex character in signature")]
    InvalidHex,
    /// The recovery information could not be decoded.
    #[error(transparent)]
    Parity(#[from] ParityError),
}

/// An ECDSA signature as three unsigned integers.
///
/// `r` and `s` are raw curve scalars. `v` is the *encoded* recovery bit in
/// whichever of the three wire encodings the producer chose (see
/// [`parity`]); it is interpreted, never reinterpreted in place. Values of
/// this type are immutable: the `with_*` methods return new signatures.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    r: U256,
    s: U256,
    v: u64,
}

impl Signature {
    /// Assembles a signature from its parts.
    pub const fn new(r: U256, s: U256, v: u64) -> Self {
        Self { r, s, v }
    }

    /// The `r` scalar.
    pub const fn r(&self) -> U256 {
        self.r
    }

    /// The `s` scalar.
    pub const fn s(&self) -> U256 {
        self.s
    }

    /// The encoded recovery bit, as produced.
    pub const fn v(&self) -> u64 {
        self.v
    }

    /// Decodes the recovery id from `v`, using the chain id when the
    /// encoding requires one.
    pub fn recovery_id(&self, chain_id: Option<u64>) -> Result<u8, ParityError> {
        parity::recovery_id(self.v, chain_id)
    }

    /// The y-parity bit via the chain-id-free heuristic. Prefer
    /// [`recovery_id`](Self::recovery_id) whenever the chain id is known.
    pub const fn y_parity_heuristic(&self) -> Option<u8> {
        parity::parity_heuristic(self.v)
    }

    /// Returns a copy whose `v` uses the EIP-155 encoding for `chain_id`.
    ///
    /// Signatures already in the replay-protected range are returned
    /// unchanged; decoding failures surface as [`ParityError`].
    pub fn with_chain_id(self, chain_id: u64) -> Result<Self, ParityError> {
        if parity::is_replay_protected(self.v, chain_id) {
            return Ok(self);
        }
        let recid = parity::recovery_id(self.v, None)?;
        Ok(Self { v: parity::eip155_v(recid, chain_id), ..self })
    }

    /// Returns a copy whose `v` is the bare y-parity bit, as typed
    /// transactions serialize it.
    pub fn with_y_parity(self, chain_id: Option<u64>) -> Result<Self, ParityError> {
        let recid = parity::recovery_id(self.v, chain_id)?;
        Ok(Self { v: parity::y_parity_v(recid), ..self })
    }

    /// The 65-byte `r || s || v` form. `v` is truncated to its low byte,
    /// which is exact for the legacy and y-parity encodings.
    pub fn as_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&self.r.to_be_bytes());
        bytes[32..64].copy_from_slice(&self.s.to_be_bytes());
        bytes[64] = self.v as u8;
        bytes
    }

    /// Parses the 65-byte `r || s || v` form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != 65 {
            return Err(SignatureError::InvalidLength);
        }
        Ok(Self {
            r: U256::from_be_slice(&bytes[..32]).expect("32 bytes"),
            s: U256::from_be_slice(&bytes[32..64]).expect("32 bytes"),
            v: bytes[64] as u64,
        })
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("r", &format_args!("{:#x}", self.r))
            .field("s", &format_args!("{:#x}", self.s))
            .field("v", &self.v)
            .finish()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.as_bytes()))
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|_| SignatureError::InvalidHex)?;
        Self::from_bytes(&bytes)
    }
}

/// Message digests sign deterministically, so equal transactions produce
/// equal signatures; ordering is required for use in sorted containers.
impl PartialOrd for Signature {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.as_bytes().cmp(&other.as_bytes()))
    }
}

impl Ord for Signature {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_bytes().cmp(&other.as_bytes())
    }
}
