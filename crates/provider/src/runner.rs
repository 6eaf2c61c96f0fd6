use crate::{
    NonceDisposition, NonceStore, Provider, RpcError, TransactionReceipt,
};
use ingot_primitives::{Address, B256};
use std::time::{Duration, Instant};
use tracing::debug;

/// Default overall submission deadline.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

/// Default pause between retries after a transport failure.
pub const DEFAULT_RETRY_WAIT: Duration = Duration::from_secs(3);

/// The runner's structured failure. Every variant carries the reservation
/// number it was operating on; `gap_created` reports whether the store
/// released the number below the committed frontier.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Building or signing the transaction failed; nothing was submitted.
    #[error("failed to prepare transaction for nonce {nonce}")]
    Prepare {
        /// The reserved sequence number.
        nonce: u64,
        /// The construction or signing failure.
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    /// Execution ran out of gas. Chain work was spent, the number is
    /// consumed, and the reservation is retained.
    #[error("transaction with nonce {nonce} ran out of gas")]
    OutOfGas {
        /// The reserved sequence number.
        nonce: u64,
        /// Whether the store reported a gap.
        gap_created: bool,
        /// The classified RPC outcome.
        #[source]
        cause: RpcError,
    },
    /// Execution reverted. Chain work was spent, the number is consumed,
    /// and the reservation is retained.
    #[error("transaction with nonce {nonce} reverted")]
    Reverted {
        /// The reserved sequence number.
        nonce: u64,
        /// Whether the store reported a gap.
        gap_created: bool,
        /// The classified RPC outcome.
        #[source]
        cause: RpcError,
    },
    /// Submission did not go through within the retry policy.
    #[error("submission with nonce {nonce} failed{}", if *.deadline_exceeded { " (deadline exceeded)" } else { "" })]
    Failed {
        /// The reserved sequence number.
        nonce: u64,
        /// Whether the store reported a gap when releasing the number.
        gap_created: bool,
        /// Whether the overall deadline elapsed.
        deadline_exceeded: bool,
        /// The last transport failure, when there was one.
        #[source]
        cause: Option<RpcError>,
    },
    /// The store answered a failure report with a disposition the runner
    /// does not understand. Never suppressed.
    #[error("sequence-number store returned an unexpected state for nonce {nonce}: {disposition:?}")]
    StoreInconsistent {
        /// The reserved sequence number.
        nonce: u64,
        /// What the store answered.
        disposition: NonceDisposition,
    },
}

impl SubmitError {
    /// The reservation number the runner was working with.
    pub const fn nonce(&self) -> u64 {
        match self {
            Self::Prepare { nonce, .. }
            | Self::OutOfGas { nonce, .. }
            | Self::Reverted { nonce, .. }
            | Self::Failed { nonce, .. }
            | Self::StoreInconsistent { nonce, .. } => *nonce,
        }
    }

    /// Whether the failure left a gap in the sender's sequence numbers.
    pub const fn gap_created(&self) -> bool {
        match self {
            Self::OutOfGas { gap_created, .. }
            | Self::Reverted { gap_created, .. }
            | Self::Failed { gap_created, .. } => *gap_created,
            Self::Prepare { .. } | Self::StoreInconsistent { .. } => false,
        }
    }
}

/// A successful submission: the reported hash and, when it arrived within
/// the deadline, the receipt.
#[derive(Debug)]
pub struct Submission {
    /// The sequence number the transaction committed with.
    pub nonce: u64,
    /// The transaction hash reported by the node.
    pub hash: B256,
    /// The receipt, when one was observed before the deadline.
    pub receipt: Option<TransactionReceipt>,
}

/// The serialized submission loop for one sender.
///
/// A per-runner mutex keeps submissions single-flight, so two transactions
/// for the same sender are never in flight at once; the store stays
/// correct under concurrent use regardless. The deadline bounds the whole
/// retry loop; the per-number failure cool-down belongs to the store.
#[derive(Debug)]
pub struct TxRunner<P> {
    provider: P,
    store: NonceStore,
    sender: Address,
    deadline: Duration,
    retry_wait: Duration,
    flight: tokio::sync::Mutex<()>,
}

impl<P: Provider> TxRunner<P> {
    /// A runner over `provider` for `sender`, sharing `store` with any
    /// other runners for the same process.
    pub fn new(provider: P, store: NonceStore, sender: Address) -> Self {
        Self {
            provider,
            store,
            sender,
            deadline: DEFAULT_DEADLINE,
            retry_wait: DEFAULT_RETRY_WAIT,
            flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Overrides the overall deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Overrides the pause between transport retries.
    pub fn with_retry_wait(mut self, retry_wait: Duration) -> Self {
        self.retry_wait = retry_wait;
        self
    }

    /// The store this runner reserves numbers from.
    pub const fn store(&self) -> &NonceStore {
        &self.store
    }

    /// The provider submissions go through.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Reserves a sequence number, submits the transaction `prepare`
    /// builds for it, and shepherds the outcome through the store.
    ///
    /// `prepare` is called once per attempt with the number to use, and
    /// must return the signed wire bytes. Cancelling the returned future
    /// during submission records a submission failure for the reserved
    /// number, like any other transport fault.
    pub async fn send<F>(&self, mut prepare: F) -> Result<Submission, SubmitError>
    where
        F: FnMut(u64) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync + 'static>>
            + Send,
    {
        let _flight = self.flight.lock().await;
        let started = Instant::now();
        let mut nonce = self.store.reserve(self.sender);

        loop {
            let Some(remaining) = self.deadline.checked_sub(started.elapsed()) else {
                let _ = self.store.on_submission_failure(self.sender, nonce);
                return Err(SubmitError::Failed {
                    nonce,
                    gap_created: false,
                    deadline_exceeded: true,
                    cause: None,
                });
            };

            let raw = match prepare(nonce) {
                Ok(raw) => raw,
                Err(cause) => {
                    // construction errors are never retried
                    let _ = self.store.on_submission_failure(self.sender, nonce);
                    return Err(SubmitError::Prepare { nonce, cause });
                }
            };

            let guard = FailureGuard::armed(&self.store, self.sender, nonce);
            let outcome =
                tokio::time::timeout(remaining, self.provider.send_raw_transaction(&raw)).await;
            match outcome {
                Err(_elapsed) => {
                    // the guard already recorded the failure on drop
                    drop(guard);
                    return Err(SubmitError::Failed {
                        nonce,
                        gap_created: false,
                        deadline_exceeded: true,
                        cause: None,
                    });
                }
                Ok(result) => {
                    guard.disarm();
                    match result {
                        Ok(hash) => {
                            self.store.on_success(self.sender, nonce);
                            debug!(%hash, nonce, "transaction accepted");
                            let receipt = self.await_receipt(hash, started).await;
                            return Ok(Submission { nonce, hash, receipt });
                        }
                        Err(err @ RpcError::NonceTooLow { .. }) => {
                            let next = self.store.on_nonce_too_low(self.sender, nonce);
                            debug!(nonce, next, %err, "sequence number already consumed, advancing");
                            nonce = next;
                        }
                        Err(err @ RpcError::OutOfGas { .. }) => {
                            let disposition = self.store.on_out_of_gas(self.sender, nonce);
                            return Err(SubmitError::OutOfGas {
                                nonce,
                                gap_created: disposition
                                    == NonceDisposition::RemovedGapDetected,
                                cause: err,
                            });
                        }
                        Err(err @ RpcError::Reverted { .. }) => {
                            let disposition = self.store.on_revert(self.sender, nonce);
                            return Err(SubmitError::Reverted {
                                nonce,
                                gap_created: disposition
                                    == NonceDisposition::RemovedGapDetected,
                                cause: err,
                            });
                        }
                        Err(err @ RpcError::Transport(_)) => {
                            match self.store.on_submission_failure(self.sender, nonce) {
                                NonceDisposition::RetryWithSame => {
                                    debug!(nonce, %err, "transport failure, retrying");
                                    tokio::time::sleep(self.retry_wait).await;
                                }
                                NonceDisposition::RemovedOk => {
                                    return Err(SubmitError::Failed {
                                        nonce,
                                        gap_created: false,
                                        deadline_exceeded: false,
                                        cause: Some(err),
                                    });
                                }
                                NonceDisposition::RemovedGapDetected => {
                                    return Err(SubmitError::Failed {
                                        nonce,
                                        gap_created: true,
                                        deadline_exceeded: false,
                                        cause: Some(err),
                                    });
                                }
                                disposition => {
                                    return Err(SubmitError::StoreInconsistent {
                                        nonce,
                                        disposition,
                                    });
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Polls for the receipt until the deadline runs out. Transport
    /// hiccups here are not failures; the transaction is already
    /// committed.
    async fn await_receipt(&self, hash: B256, started: Instant) -> Option<TransactionReceipt> {
        loop {
            match self.provider.get_receipt(hash).await {
                Ok(Some(receipt)) => return Some(receipt),
                Ok(None) | Err(_) => {}
            }
            let remaining = self.deadline.checked_sub(started.elapsed())?;
            tokio::time::sleep(self.retry_wait.min(remaining)).await;
        }
    }
}

/// Records a submission failure when dropped while armed; this is how a
/// cancelled submission still reaches the store.
struct FailureGuard<'a> {
    store: &'a NonceStore,
    sender: Address,
    nonce: u64,
    armed: std::cell::Cell<bool>,
}

impl<'a> FailureGuard<'a> {
    fn armed(store: &'a NonceStore, sender: Address, nonce: u64) -> Self {
        Self { store, sender, nonce, armed: std::cell::Cell::new(true) }
    }

    fn disarm(&self) {
        self.armed.set(false);
    }
}

impl Drop for FailureGuard<'_> {
    fn drop(&mut self) {
        if self.armed.get() {
            let _ = self.store.on_submission_failure(self.sender, self.nonce);
        }
    }
}
