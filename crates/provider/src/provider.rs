use crate::TransportResult;
use async_trait::async_trait;
use ingot_consensus::Receipt;
use ingot_primitives::{Address, Bytes, Log, B256, U256};

/// A transaction receipt as surfaced by the RPC endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// The hash of the transaction this receipt belongs to.
    pub transaction_hash: B256,
    /// The block that included the transaction, once mined.
    pub block_number: Option<u64>,
    /// Gas consumed by this transaction alone.
    pub gas_used: u64,
    /// The deployed contract address, for creation transactions.
    pub contract_address: Option<Address>,
    /// The execution result: status, cumulative gas, logs.
    pub inner: Receipt,
}

impl TransactionReceipt {
    /// Whether execution succeeded.
    pub fn status(&self) -> bool {
        self.inner.status
    }

    /// The logs emitted during execution.
    pub fn logs(&self) -> &[Log] {
        &self.inner.logs
    }
}

/// The RPC collaborator: the byte-oriented interface the core drives.
///
/// Implementations translate these four calls onto a concrete transport;
/// the core never sees transport types. Every method is a suspension
/// point and is safe to cancel by dropping the future; the runner layers
/// its deadline and failure bookkeeping on top.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Read-only contract evaluation. May fail [`Reverted`].
    ///
    /// [`Reverted`]: crate::RpcError::Reverted
    async fn call(&self, to: Address, from: Address, data: &[u8]) -> TransportResult<Bytes>;

    /// Estimates the gas a call would consume. May fail [`Reverted`].
    ///
    /// [`Reverted`]: crate::RpcError::Reverted
    async fn estimate_gas(
        &self,
        to: Address,
        from: Address,
        value: Option<U256>,
        data: &[u8],
    ) -> TransportResult<u64>;

    /// Submits signed wire bytes, returning the hash the node reports.
    async fn send_raw_transaction(&self, raw: &[u8]) -> TransportResult<B256>;

    /// Fetches the receipt for a hash, once available.
    async fn get_receipt(&self, hash: B256) -> TransportResult<Option<TransactionReceipt>>;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for &P {
    async fn call(&self, to: Address, from: Address, data: &[u8]) -> TransportResult<Bytes> {
        (**self).call(to, from, data).await
    }

    async fn estimate_gas(
        &self,
        to: Address,
        from: Address,
        value: Option<U256>,
        data: &[u8],
    ) -> TransportResult<u64> {
        (**self).estimate_gas(to, from, value, data).await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> TransportResult<B256> {
        (**self).send_raw_transaction(raw).await
    }

    async fn get_receipt(&self, hash: B256) -> TransportResult<Option<TransactionReceipt>> {
        (**self).get_receipt(hash).await
    }
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for std::sync::Arc<P> {
    async fn call(&self, to: Address, from: Address, data: &[u8]) -> TransportResult<Bytes> {
        (**self).call(to, from, data).await
    }

    async fn estimate_gas(
        &self,
        to: Address,
        from: Address,
        value: Option<U256>,
        data: &[u8],
    ) -> TransportResult<u64> {
        (**self).estimate_gas(to, from, value, data).await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> TransportResult<B256> {
        (**self).send_raw_transaction(raw).await
    }

    async fn get_receipt(&self, hash: B256) -> TransportResult<Option<TransactionReceipt>> {
        (**self).get_receipt(hash).await
    }
}
