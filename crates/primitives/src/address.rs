use crate::{keccak256, B256};
use core::{fmt, ops::Deref, str::FromStr};

/// Error parsing or validating an [`Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Not 40 hex digits.
    #[error("address must be 20 bytes")]
    InvalidLength,
    /// A non-hex character.
    #[error("invalid hex character in address")]
    InvalidCharacter,
    /// Mixed-case input whose casing does not match its own checksum.
    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

/// A 20-byte account identifier.
///
/// The all-zero address is an ordinary, meaningful value. The *absent*
/// recipient of a contract-creation transaction is a separate state and is
/// modeled by [`TxKind::Create`], not by a sentinel address.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address, twenty zero bytes.
    pub const ZERO: Self = Self([0; 20]);

    /// Borrows the underlying bytes.
    pub const fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Copies a 20-byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not exactly 20 bytes.
    #[track_caller]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.try_into().expect("Address requires exactly 20 bytes"))
    }

    /// Whether this is the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 20]
    }

    /// The [EIP-55] mixed-case checksum form, with `0x` prefix.
    ///
    /// The casing of each hex letter is taken from the corresponding nibble
    /// of the Keccak hash of the lowercase 40-character address.
    ///
    /// [EIP-55]: https://eips.ethereum.org/EIPS/eip-55
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());
        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = hash.0[i / 2] >> (if i % 2 == 0 { 4 } else { 0 }) & 0x0f;
            if nibble > 7 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Parses an address, enforcing the EIP-55 checksum for mixed-case
    /// input. Pure-lowercase and pure-uppercase inputs carry no checksum and
    /// are accepted as-is.
    pub fn parse_checksummed(s: &str) -> Result<Self, AddressError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let address = Self::parse_any_case(digits)?;
        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum()[2..] != *digits {
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(address)
    }

    fn parse_any_case(digits: &str) -> Result<Self, AddressError> {
        if digits.len() != 40 {
            return Err(AddressError::InvalidLength);
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits.to_ascii_lowercase(), &mut bytes)
            .map_err(|_| AddressError::InvalidCharacter)?;
        Ok(Self(bytes))
    }
}

impl Deref for Address {
    type Target = [u8; 20];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for B256 {
    fn from(address: Address) -> Self {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(&address.0);
        Self(word)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_checksummed(s)
    }
}

/// The recipient of a transaction.
///
/// A missing recipient denotes contract creation and serializes as the
/// empty byte string; it is distinct from a call to [`Address::ZERO`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TxKind {
    /// A contract-creation transaction.
    #[default]
    Create,
    /// A call to (or value transfer toward) an account.
    Call(Address),
}

impl TxKind {
    /// The callee, if any.
    pub const fn to(&self) -> Option<&Address> {
        match self {
            Self::Create => None,
            Self::Call(to) => Some(to),
        }
    }

    /// Whether this is a contract creation.
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::Create)
    }
}

impl From<Address> for TxKind {
    fn from(address: Address) -> Self {
        Self::Call(address)
    }
}

impl From<Option<Address>> for TxKind {
    fn from(address: Option<Address>) -> Self {
        match address {
            None => Self::Create,
            Some(to) => Self::Call(to),
        }
    }
}
