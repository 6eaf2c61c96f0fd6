use ingot_primitives::ChainId;

/// Signer result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// An operation a given signer cannot perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedSignerOperation {
    /// Signing a raw hash.
    SignHash,
    /// Signing a prefixed message.
    SignMessage,
    /// Signing a transaction.
    SignTransaction,
}

impl UnsupportedSignerOperation {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::SignHash => "sign hash",
            Self::SignMessage => "sign message",
            Self::SignTransaction => "sign transaction",
        }
    }
}

/// Signer errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The signer does not support this operation.
    #[error("operation `{}` is not supported by the signer", .0.as_str())]
    UnsupportedOperation(UnsupportedSignerOperation),
    /// The transaction is bound to a different chain than the signer.
    #[error("transaction-provided chain ID ({tx}) does not match the signer's ({signer})")]
    TransactionChainIdMismatch {
        /// The signer's chain ID.
        signer: ChainId,
        /// The transaction's chain ID.
        tx: ChainId,
    },
    /// The transaction variant requires a chain id and none is available.
    #[error("transaction requires a chain ID and neither the transaction nor the signer has one")]
    MissingChainId,
    /// ECDSA failure.
    #[error(transparent)]
    Ecdsa(#[from] ingot_crypto::Error),
    /// The signature's recovery bit could not be re-encoded.
    #[error(transparent)]
    Parity(#[from] ingot_primitives::ParityError),
    /// A different signer backend error.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Wraps an arbitrary backend error.
    pub fn other<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Self::Other(Box::new(error))
    }
}
