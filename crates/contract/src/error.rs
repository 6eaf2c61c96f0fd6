use crate::AbiError;
use ingot_provider::{RpcError, SubmitError};
use thiserror::Error;

/// Dynamic contract result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Error when interacting with contracts.
#[derive(Debug, Error)]
pub enum Error {
    /// An error occurred ABI encoding or decoding.
    #[error(transparent)]
    AbiError(#[from] AbiError),
    /// Signing the transaction failed.
    #[error(transparent)]
    SignerError(#[from] ingot_signer::Error),
    /// An error occurred interacting with the contract over RPC.
    #[error(transparent)]
    TransportError(#[from] RpcError),
    /// The submission runner gave up.
    #[error(transparent)]
    SubmitError(#[from] SubmitError),
}
