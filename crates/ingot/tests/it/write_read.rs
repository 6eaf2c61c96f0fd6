//! The full write path: call data → transaction → signature → wire bytes,
//! and the read path back out of a receipt's logs.

use crate::common::{contract_address, wallet, MockNode, TransferAbi};
use ingot::{
    consensus::{Decodable2718, Receipt, TxEnvelope},
    contract::{ContractInstance, Fees},
    primitives::{keccak256, Bytes, LogData, Log, B256, U256},
    providers::TransactionReceipt,
};

fn fees() -> Fees {
    Fees::Eip1559 {
        max_fee_per_gas: 20_000_000_000,
        max_priority_fee_per_gas: 1_000_000_000,
        gas_limit: 60_000,
    }
}

fn recipient_word() -> B256 {
    "0x0000000000000000000000009d8a62f656a8d1615c1294fd71e9cfb3e4855a4f"
        .parse()
        .unwrap()
}

#[tokio::test]
async fn read_call_goes_through_the_abi_and_node() {
    let node = MockNode::default();
    *node.call_response.lock().unwrap() = Some(Bytes::from(vec![0x01]));
    let contract = ContractInstance::new(contract_address(), node, TransferAbi);

    let args = [Bytes::from(vec![0xaa; 20]), Bytes::from(vec![0x05])];
    let out = contract.call(wallet().address(), "transfer", &args).await.unwrap();
    assert_eq!(out, Bytes::from(vec![0x01]));

    let gas = contract
        .estimate_gas(wallet().address(), None, "transfer", &args)
        .await
        .unwrap();
    assert_eq!(gas, 34_000);
}

#[tokio::test]
async fn invoke_produces_a_recoverable_typed_transaction() {
    let contract = ContractInstance::new(contract_address(), MockNode::default(), TransferAbi);
    let args = [Bytes::from(vec![0xaa; 20]), Bytes::from(vec![0x05])];

    let hash = contract
        .invoke(&wallet(), "transfer", &args, U256::ZERO, fees(), 3)
        .await
        .unwrap();

    let submitted = contract.provider().submitted.lock().unwrap().clone();
    assert_eq!(submitted.len(), 1);
    let raw = &submitted[0];

    // the wire form is a type-2 envelope whose hash covers the type byte
    assert_eq!(raw[0], 0x02);
    assert_eq!(hash, keccak256(raw));

    let envelope = TxEnvelope::decode_2718(&mut raw.as_slice()).unwrap();
    assert_eq!(envelope.nonce(), 3);
    assert_eq!(envelope.recover_signer().unwrap(), wallet().address());

    // the call data embeds the selector and both argument words
    let tx = match &envelope {
        TxEnvelope::Eip1559(signed) => signed.tx(),
        other => panic!("unexpected variant: {other:?}"),
    };
    assert_eq!(&tx.input[..4], &keccak256(b"transfer(address,uint256)")[..4]);
    assert_eq!(tx.input.len(), 4 + 64);
}

#[tokio::test]
async fn legacy_fees_produce_a_legacy_wire_form() {
    let contract = ContractInstance::new(contract_address(), MockNode::default(), TransferAbi);
    let legacy = Fees::Legacy { gas_price: 20_000_000_000, gas_limit: 60_000 };

    contract
        .invoke(&wallet(), "transfer", &[], U256::ZERO, legacy, 0)
        .await
        .unwrap();

    let submitted = contract.provider().submitted.lock().unwrap().clone();
    let envelope = TxEnvelope::decode_2718(&mut submitted[0].as_slice()).unwrap();
    match envelope {
        TxEnvelope::Legacy(signed) => {
            // the wallet's chain id selected EIP-155 replay protection
            assert!(ingot::primitives::parity::is_replay_protected(
                signed.signature().v(),
                1
            ));
            assert_eq!(signed.recover_signer().unwrap(), wallet().address());
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[tokio::test]
async fn receipt_events_decode_back_to_fields() {
    let topic0 = keccak256(b"Transfer(address,uint256)");
    let transfer_log = Log {
        address: contract_address(),
        data: LogData::new_unchecked(
            vec![topic0, recipient_word()],
            Bytes::from(vec![0x05]),
        ),
    };
    let receipt = TransactionReceipt {
        transaction_hash: B256::ZERO,
        block_number: Some(7),
        gas_used: 40_000,
        contract_address: None,
        inner: Receipt {
            status: true,
            cumulative_gas_used: 40_000,
            logs: vec![transfer_log],
        },
    };
    let node = MockNode::default().with_receipt(receipt.clone());
    let contract = ContractInstance::new(contract_address(), node, TransferAbi);

    let decoded = contract.try_decode_event(&receipt, "Transfer").unwrap().unwrap();
    assert_eq!(decoded.indexed[0].0, "to");
    assert_eq!(
        decoded.indexed[0].1,
        Bytes::from(&recipient_word().as_slice()[12..])
    );
    assert_eq!(decoded.body[0], ("amount".into(), Bytes::from(vec![0x05])));

    // asking for an unknown event is an error; a known event with no
    // matching log is simply absent
    assert!(contract.try_decode_event(&receipt, "Unknown").is_err());
    let bare = TransactionReceipt {
        inner: Receipt { status: true, cumulative_gas_used: 0, logs: vec![] },
        ..receipt
    };
    assert!(contract.try_decode_event(&bare, "Transfer").unwrap().is_none());
}
