/// RLP result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors produced while decoding RLP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Numeric overflow while decoding an integer.
    #[error("overflow")]
    Overflow,
    /// An integer payload with a leading zero byte.
    #[error("leading zero")]
    LeadingZero,
    /// The input ended before the announced payload.
    #[error("input too short")]
    InputTooShort,
    /// A single byte below 0x80 was wrapped in a string header.
    #[error("non-canonical single byte")]
    NonCanonicalSingleByte,
    /// A length that should have used the short form, or whose bytes carry
    /// a leading zero.
    #[error("non-canonical size")]
    NonCanonicalSize,
    /// A payload whose width does not match the decoded type.
    #[error("unexpected length")]
    UnexpectedLength,
    /// Expected a list, found a string.
    #[error("unexpected string")]
    UnexpectedString,
    /// Expected a string, found a list.
    #[error("unexpected list")]
    UnexpectedList,
    /// A list whose items do not fill its announced payload.
    #[error("list length mismatch: expected {expected}, got {got}")]
    ListLengthMismatch {
        /// The payload length announced by the list header.
        expected: usize,
        /// The number of payload bytes actually consumed.
        got: usize,
    },
    /// Decoder-specific error.
    #[error("{0}")]
    Custom(&'static str),
}
