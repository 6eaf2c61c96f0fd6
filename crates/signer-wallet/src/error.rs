use ingot_primitives::HexError;

/// Error thrown by [`Wallet`](crate::Wallet) construction.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// Underlying ECDSA error.
    #[error(transparent)]
    EcdsaError(#[from] ingot_crypto::Error),
    /// Invalid hex in a key literal.
    #[error(transparent)]
    HexError(#[from] HexError),
}

impl From<hex::FromHexError> for WalletError {
    fn from(error: hex::FromHexError) -> Self {
        Self::HexError(error.into())
    }
}
