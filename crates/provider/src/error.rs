use ingot_primitives::B256;

/// Result type for RPC operations.
pub type TransportResult<T> = core::result::Result<T, RpcError>;

/// A network or protocol failure below the RPC classification: the request
/// may or may not have reached the node.
#[derive(Debug, thiserror::Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl TransportError {
    /// A transport error from a bare message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: None }
    }

    /// A transport error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self { message: message.into(), source: Some(Box::new(source)) }
    }
}

/// A classified RPC outcome.
///
/// The first three variants are information-carrying terminations, not
/// faults to retry: the chain consumed work or a sequence number, and the
/// caller owns the policy decision. Only [`Transport`](Self::Transport)
/// failures are retried by the runner.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The sequence number was already consumed on chain.
    #[error("nonce too low")]
    NonceTooLow {
        /// The transaction hash, when the node reported one.
        hash: Option<B256>,
    },
    /// Execution exhausted the gas limit; gas was spent.
    #[error("out of gas")]
    OutOfGas {
        /// The transaction hash, when the node reported one.
        hash: Option<B256>,
    },
    /// Execution reverted; gas was spent.
    #[error("execution reverted{}", .reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default())]
    Reverted {
        /// The transaction hash, when the node reported one.
        hash: Option<B256>,
        /// The revert reason, when the node decoded one.
        reason: Option<String>,
    },
    /// A failure below the application layer.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl RpcError {
    /// The transaction hash attached to a classified outcome, if any.
    pub fn transaction_hash(&self) -> Option<B256> {
        match self {
            Self::NonceTooLow { hash } | Self::OutOfGas { hash } | Self::Reverted { hash, .. } => {
                *hash
            }
            Self::Transport(_) => None,
        }
    }

    /// Whether the runner may retry after this error.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
