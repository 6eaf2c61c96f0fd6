use crate::U256;
use core::{fmt, ops::Deref, str::FromStr};

/// Error parsing a fixed-width hex value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    /// Wrong number of hex digits for the target width.
    #[error("invalid length for fixed-width hex value")]
    InvalidLength,
    /// A non-hex character.
    #[error("invalid hex character")]
    InvalidCharacter,
}

impl From<hex::FromHexError> for HexError {
    fn from(err: hex::FromHexError) -> Self {
        match err {
            hex::FromHexError::InvalidHexCharacter { .. } => Self::InvalidCharacter,
            _ => Self::InvalidLength,
        }
    }
}

/// A 32-byte digest or storage word.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct B256(pub [u8; 32]);

impl B256 {
    /// The all-zero word.
    pub const ZERO: Self = Self([0; 32]);

    /// Borrows the underlying bytes.
    pub const fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Copies a 32-byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not exactly 32 bytes.
    #[track_caller]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.try_into().expect("B256 requires exactly 32 bytes"))
    }
}

impl Deref for B256 {
    type Target = [u8; 32];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for B256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for B256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<U256> for B256 {
    fn from(value: U256) -> Self {
        Self(value.to_be_bytes())
    }
}

impl From<B256> for U256 {
    fn from(value: B256) -> Self {
        Self::from_be_bytes(value.0)
    }
}

impl fmt::Display for B256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for B256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for B256 {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 64 {
            return Err(HexError::InvalidLength);
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        let s = "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53";
        let word: B256 = s.parse().unwrap();
        assert_eq!(word, format!("0x{s}").parse().unwrap());
        assert_eq!(word.to_string(), format!("0x{s}"));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("0x1234".parse::<B256>(), Err(HexError::InvalidLength));
        assert_eq!(
            "zz".repeat(32).parse::<B256>(),
            Err(HexError::InvalidCharacter)
        );
    }
}
