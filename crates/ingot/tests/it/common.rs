//! Shared mock collaborators for the end-to-end tests.

use async_trait::async_trait;
use ingot::{
    consensus::Receipt,
    contract::{AbiCodec, AbiError, DecodedEvent},
    primitives::{keccak256, Address, Bytes, B256, U256},
    providers::{Provider, RpcError, TransactionReceipt, TransportResult},
    signers::wallet::LocalWallet,
};
use std::{collections::VecDeque, sync::Mutex};

/// The EIP-155 example key; its address is
/// `0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F`.
pub fn wallet() -> LocalWallet {
    let wallet: LocalWallet =
        "0x4646464646464646464646464646464646464646464646464646464646464646"
            .parse()
            .unwrap();
    ingot::signers::Signer::with_chain_id(wallet, Some(1))
}

pub fn contract_address() -> Address {
    "0x3535353535353535353535353535353535353535".parse().unwrap()
}

/// A codec for a contract with `transfer(address,uint256)` and a
/// `Transfer(address,uint256)` event whose first parameter is indexed.
pub struct TransferAbi;

impl AbiCodec for TransferAbi {
    type Value = Bytes;

    fn call_data(&self, function: &str, args: &[Bytes]) -> Result<Bytes, AbiError> {
        if function != "transfer" {
            return Err(AbiError::UnknownFunction(function.into()));
        }
        let selector = keccak256(b"transfer(address,uint256)");
        let mut data = selector[..4].to_vec();
        for arg in args {
            let mut word = [0u8; 32];
            word[32 - arg.len()..].copy_from_slice(arg);
            data.extend_from_slice(&word);
        }
        Ok(Bytes::from(data))
    }

    fn event_signature(&self, event: &str) -> Result<String, AbiError> {
        match event {
            "Transfer" => Ok("Transfer(address,uint256)".into()),
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
            indexed: vec![("to".into(), Bytes::from(&indexed_topics[0].as_slice()[12..]))],
            body: vec![("amount".into(), Bytes::from(data))],
        })
    }
}

/// A node stub: scripted `send_raw_transaction` outcomes, canned call and
/// receipt responses, and a capture of every submitted payload.
#[derive(Default)]
pub struct MockNode {
    pub submitted: Mutex<Vec<Vec<u8>>>,
    pub send_script: Mutex<VecDeque<TransportResult<B256>>>,
    pub call_response: Mutex<Option<Bytes>>,
    pub receipt: Mutex<Option<TransactionReceipt>>,
}

impl MockNode {
    pub fn script_send(&self, outcome: TransportResult<B256>) {
        self.send_script.lock().unwrap().push_back(outcome);
    }

    pub fn with_receipt(self, receipt: TransactionReceipt) -> Self {
        *self.receipt.lock().unwrap() = Some(receipt);
        self
    }
}

#[async_trait]
impl Provider for MockNode {
    async fn call(&self, _to: Address, _from: Address, _data: &[u8]) -> TransportResult<Bytes> {
        Ok(self.call_response.lock().unwrap().clone().unwrap_or_default())
    }

    async fn estimate_gas(
        &self,
        _to: Address,
        _from: Address,
        _value: Option<U256>,
        _data: &[u8],
    ) -> TransportResult<u64> {
        Ok(34_000)
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> TransportResult<B256> {
        self.submitted.lock().unwrap().push(raw.to_vec());
        match self.send_script.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => Ok(keccak256(raw)),
        }
    }

    async fn get_receipt(&self, hash: B256) -> TransportResult<Option<TransactionReceipt>> {
        match self.receipt.lock().unwrap().clone() {
            Some(mut receipt) => {
                receipt.transaction_hash = hash;
                Ok(Some(receipt))
            }
            None => Ok(Some(TransactionReceipt {
                transaction_hash: hash,
                block_number: Some(1),
                gas_used: 30_000,
                contract_address: None,
                inner: Receipt { status: true, cumulative_gas_used: 30_000, logs: vec![] },
            })),
        }
    }
}

/// Convenience for scripted transport faults.
pub fn transport_error() -> RpcError {
    RpcError::Transport(ingot::providers::TransportError::new("connection reset"))
}
