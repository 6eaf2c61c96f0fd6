use crate::{AbiCodec, DecodedEvent, Error, Fees, Result};
use ingot_consensus::{
    AccessList, Encodable2718, TxEip1559, TxEnvelope, TxLegacy, TypedTransaction,
};
use ingot_primitives::{keccak256, Address, Bytes, TxKind, B256, U256};
use ingot_provider::{Provider, Submission, TransactionReceipt, TxRunner};
use ingot_signer::TxSignerSync;

/// A handle to one deployed contract: an address, an RPC provider, and an
/// ABI collaborator.
///
/// Reads go straight to the provider; writes are built here, signed by a
/// caller-supplied signer against an explicitly reserved sequence number,
/// and submitted either directly or through a [`TxRunner`].
#[derive(Clone, Debug)]
pub struct ContractInstance<P, C> {
    address: Address,
    provider: P,
    abi: C,
}

impl<P, C> ContractInstance<P, C> {
    /// Creates a handle for the contract at `address`.
    pub const fn new(address: Address, provider: P, abi: C) -> Self {
        Self { address, provider, abi }
    }

    /// The contract's address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The ABI collaborator.
    pub const fn abi(&self) -> &C {
        &self.abi
    }

    /// The RPC provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: Provider, C: AbiCodec> ContractInstance<P, C> {
    /// Evaluates `function` read-only via the node, without signing
    /// anything, and returns the raw return bytes.
    pub async fn call(
        &self,
        from: Address,
        function: &str,
        args: &[C::Value],
    ) -> Result<Bytes> {
        let data = self.abi.call_data(function, args)?;
        Ok(self.provider.call(self.address, from, &data).await?)
    }

    /// Asks the node how much gas `function` would consume.
    pub async fn estimate_gas(
        &self,
        from: Address,
        value: Option<U256>,
        function: &str,
        args: &[C::Value],
    ) -> Result<u64> {
        let data = self.abi.call_data(function, args)?;
        Ok(self.provider.estimate_gas(self.address, from, value, &data).await?)
    }

    /// Builds and signs the write transaction for `function` against the
    /// caller's reserved sequence number. The signer supplies the chain
    /// id.
    pub fn prepare<W: TxSignerSync>(
        &self,
        signer: &W,
        function: &str,
        args: &[C::Value],
        value: U256,
        fees: Fees,
        nonce: u64,
    ) -> Result<TxEnvelope> {
        let input = self.abi.call_data(function, args)?;
        let mut tx: TypedTransaction = match fees {
            Fees::Legacy { gas_price, gas_limit } => TxLegacy {
                chain_id: None,
                nonce,
                gas_price,
                gas_limit,
                to: TxKind::Call(self.address),
                value,
                input,
            }
            .into(),
            Fees::Eip1559 { max_fee_per_gas, max_priority_fee_per_gas, gas_limit } => {
                TxEip1559 {
                    chain_id: 0,
                    nonce,
                    max_priority_fee_per_gas,
                    max_fee_per_gas,
                    gas_limit,
                    to: TxKind::Call(self.address),
                    value,
                    input,
                    access_list: AccessList::default(),
                }
                .into()
            }
        };
        let signature = signer.sign_transaction_sync(&mut tx)?;
        Ok(tx.into_envelope(signature))
    }

    /// Signs and submits a write call with an explicitly reserved
    /// sequence number, returning the locally computed transaction hash.
    pub async fn invoke<W: TxSignerSync>(
        &self,
        signer: &W,
        function: &str,
        args: &[C::Value],
        value: U256,
        fees: Fees,
        nonce: u64,
    ) -> Result<B256> {
        let envelope = self.prepare(signer, function, args, value, fees, nonce)?;
        let hash = envelope.tx_hash();
        self.provider.send_raw_transaction(&envelope.encoded_2718()).await?;
        Ok(hash)
    }

    /// Submits a write call through `runner`, which owns sequence-number
    /// reservation and the retry policy. The transaction is rebuilt and
    /// re-signed for every number the runner hands out.
    pub async fn invoke_with_runner<Q: Provider, W: TxSignerSync + Sync>(
        &self,
        runner: &TxRunner<Q>,
        signer: &W,
        function: &str,
        args: &[C::Value],
        value: U256,
        fees: Fees,
    ) -> Result<Submission> {
        let submission = runner
            .send(|nonce| {
                self.prepare(signer, function, args, value, fees, nonce)
                    .map(|envelope| envelope.encoded_2718())
                    .map_err(Into::into)
            })
            .await?;
        Ok(submission)
    }

    /// Scans a receipt's logs for `event` and decodes the first match.
    ///
    /// A log is a candidate when its first topic equals the Keccak-256
    /// digest of the event's canonical signature. Candidates whose topic
    /// count does not match the declared indexed arity are skipped, not
    /// errors. Returns `None` when no log matches.
    pub fn try_decode_event(
        &self,
        receipt: &TransactionReceipt,
        event: &str,
    ) -> Result<Option<DecodedEvent<C::Value>>> {
        let signature = self.abi.event_signature(event)?;
        let topic0 = keccak256(signature.as_bytes());
        let indexed = self.abi.indexed_count(event)?;
        for log in receipt.logs() {
            let topics = log.topics();
            if topics.first() != Some(&topic0) {
                continue;
            }
            if topics.len() != 1 + indexed {
                continue;
            }
            let decoded = self.abi.decode_event(event, &topics[1..], &log.data.data)?;
            return Ok(Some(decoded));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AbiError;
    use async_trait::async_trait;
    use ingot_consensus::{Decodable2718, Receipt};
    use ingot_primitives::{Log, LogData};
    use ingot_provider::{NonceStore, RpcError, TransportResult};
    use ingot_signer_wallet::LocalWallet;
    use std::{
        collections::VecDeque,
        sync::Mutex,
        time::Duration,
    };

    /// A codec that understands one function, `store(uint256)`, and one
    /// event, `ValueSet(address,uint256)` with an indexed sender.
    struct MockAbi;

    impl AbiCodec for MockAbi {
        type Value = Bytes;

        fn call_data(&self, function: &str, args: &[Bytes]) -> Result<Bytes, AbiError> {
            if function != "store" {
                return Err(AbiError::UnknownFunction(function.into()));
            }
            let selector = keccak256(b"store(uint256)");
            let mut data = selector[..4].to_vec();
            for arg in args {
                data.extend_from_slice(arg);
            }
            Ok(Bytes::from(data))
        }

        fn event_signature(&self, event: &str) -> Result<String, AbiError> {
            match event {
                "ValueSet" => Ok("ValueSet(address,uint256)".into()),
                other => Err(AbiError::UnknownEvent(other.into())),
            }
        }

        fn indexed_count(&self, _event: &str) -> Result<usize, AbiError> {
            Ok(1)
        }

        fn decode_event(
            &self,
            _event: &str,
            indexed_topics: &[B256],
            data: &[u8],
        ) -> Result<DecodedEvent<Bytes>, AbiError> {
            Ok(DecodedEvent {
                indexed: vec![("setter".into(), Bytes::from(indexed_topics[0].as_slice()))],
                body: vec![("value".into(), Bytes::from(data))],
            })
        }
    }

    #[derive(Default)]
    struct CapturingProvider {
        calls: Mutex<Vec<(Address, Address, Vec<u8>)>>,
        raw: Mutex<Vec<Vec<u8>>>,
        send_results: Mutex<VecDeque<TransportResult<B256>>>,
    }

    #[async_trait]
    impl Provider for CapturingProvider {
        async fn call(
            &self,
            to: Address,
            from: Address,
            data: &[u8],
        ) -> TransportResult<Bytes> {
            self.calls.lock().unwrap().push((to, from, data.to_vec()));
            Ok(Bytes::from(vec![0xaa]))
        }

        async fn estimate_gas(
            &self,
            _to: Address,
            _from: Address,
            _value: Option<U256>,
            _data: &[u8],
        ) -> TransportResult<u64> {
            Ok(21_000)
        }

        async fn send_raw_transaction(&self, raw: &[u8]) -> TransportResult<B256> {
            self.raw.lock().unwrap().push(raw.to_vec());
            match self.send_results.lock().unwrap().pop_front() {
                Some(result) => result,
                None => Ok(keccak256(raw)),
            }
        }

        async fn get_receipt(
            &self,
            hash: B256,
        ) -> TransportResult<Option<TransactionReceipt>> {
            Ok(Some(TransactionReceipt {
                transaction_hash: hash,
                block_number: Some(1),
                gas_used: 21_000,
                contract_address: None,
                inner: Receipt { status: true, cumulative_gas_used: 21_000, logs: vec![] },
            }))
        }
    }

    fn contract_address() -> Address {
        "0x3535353535353535353535353535353535353535".parse().unwrap()
    }

    fn wallet() -> LocalWallet {
        let wallet: LocalWallet =
            "0x4646464646464646464646464646464646464646464646464646464646464646"
                .parse()
                .unwrap();
        ingot_signer::Signer::with_chain_id(wallet, Some(1))
    }

    fn fees() -> Fees {
        Fees::Eip1559 {
            max_fee_per_gas: 20_000_000_000,
            max_priority_fee_per_gas: 1_000_000_000,
            gas_limit: 50_000,
        }
    }

    #[tokio::test]
    async fn call_routes_encoded_data_through_the_provider() {
        let instance = ContractInstance::new(contract_address(), CapturingProvider::default(), MockAbi);
        let from = wallet().address();
        let out = instance.call(from, "store", &[Bytes::from(vec![0x01])]).await.unwrap();
        assert_eq!(out, Bytes::from(vec![0xaa]));

        let calls = instance.provider.calls.lock().unwrap();
        let (to, seen_from, data) = &calls[0];
        assert_eq!(*to, contract_address());
        assert_eq!(*seen_from, from);
        // selector then argument bytes
        assert_eq!(&data[..4], &keccak256(b"store(uint256)")[..4]);
        assert_eq!(&data[4..], &[0x01]);
    }

    #[tokio::test]
    async fn unknown_functions_fail_before_any_io() {
        let instance = ContractInstance::new(contract_address(), CapturingProvider::default(), MockAbi);
        let err = instance.call(wallet().address(), "missing", &[]).await.unwrap_err();
        assert!(matches!(err, Error::AbiError(AbiError::UnknownFunction(_))));
        assert!(instance.provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invoke_signs_and_returns_the_computed_hash() {
        let instance = ContractInstance::new(contract_address(), CapturingProvider::default(), MockAbi);
        let hash = instance
            .invoke(&wallet(), "store", &[], U256::ZERO, fees(), 7)
            .await
            .unwrap();

        let raw = instance.provider.raw.lock().unwrap();
        // the hash is computed locally over the submitted bytes
        assert_eq!(hash, keccak256(&raw[0]));
        // and the bytes are a well-formed signed envelope from our wallet
        let envelope =
            ingot_consensus::TxEnvelope::decode_2718(&mut raw[0].as_slice()).unwrap();
        assert_eq!(envelope.nonce(), 7);
        assert_eq!(envelope.recover_signer().unwrap(), wallet().address());
    }

    #[tokio::test]
    async fn runner_rebuilds_the_transaction_per_nonce() {
        let provider = CapturingProvider::default();
        provider
            .send_results
            .lock()
            .unwrap()
            .push_back(Err(RpcError::NonceTooLow { hash: None }));
        let instance = ContractInstance::new(contract_address(), CapturingProvider::default(), MockAbi);
        let runner = TxRunner::new(provider, NonceStore::new(), wallet().address())
            .with_deadline(Duration::from_secs(5))
            .with_retry_wait(Duration::from_millis(1));

        let submission = instance
            .invoke_with_runner(&runner, &wallet(), "store", &[], U256::ZERO, fees())
            .await
            .unwrap();
        assert_eq!(submission.nonce, 1);
        assert!(submission.receipt.is_some());
    }

    #[tokio::test]
    async fn decodes_the_first_matching_event() {
        let instance = ContractInstance::new(contract_address(), CapturingProvider::default(), MockAbi);
        let topic0 = keccak256(b"ValueSet(address,uint256)");
        let setter: B256 =
            "0x0000000000000000000000009d8a62f656a8d1615c1294fd71e9cfb3e4855a4f"
                .parse()
                .unwrap();

        let matching = Log {
            address: contract_address(),
            data: LogData::new_unchecked(vec![topic0, setter], Bytes::from(vec![0x2a])),
        };
        // same topic hash, wrong arity: skipped, not an error
        let wrong_arity = Log {
            address: contract_address(),
            data: LogData::new_unchecked(vec![topic0], Bytes::from(vec![0x00])),
        };
        // unrelated event
        let unrelated = Log {
            address: contract_address(),
            data: LogData::new_unchecked(vec![keccak256(b"Other()")], Bytes::new()),
        };
        let receipt = TransactionReceipt {
            transaction_hash: B256::ZERO,
            block_number: Some(1),
            gas_used: 30_000,
            contract_address: None,
            inner: Receipt {
                status: true,
                cumulative_gas_used: 30_000,
                logs: vec![unrelated, wrong_arity, matching],
            },
        };

        let decoded = instance.try_decode_event(&receipt, "ValueSet").unwrap().unwrap();
        assert_eq!(decoded.indexed[0].0, "setter");
        assert_eq!(decoded.indexed[0].1, Bytes::from(setter.as_slice()));
        assert_eq!(decoded.body[0], ("value".into(), Bytes::from(vec![0x2a])));

        // a receipt without a match is None, not an error
        let empty = TransactionReceipt {
            inner: Receipt { status: true, cumulative_gas_used: 0, logs: vec![] },
            ..receipt
        };
        assert!(instance.try_decode_event(&empty, "ValueSet").unwrap().is_none());
    }
}
