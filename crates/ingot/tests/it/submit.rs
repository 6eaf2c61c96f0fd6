//! The submission loop end to end: reservation, retries, classified
//! failures, and gap reporting across the runner and the store.

use crate::common::{contract_address, transport_error, wallet, MockNode, TransferAbi};
use ingot::{
    consensus::{Decodable2718, TxEnvelope},
    contract::{ContractInstance, Fees},
    primitives::{Bytes, U256},
    providers::{NonceStore, RpcError, SubmitError, TxRunner},
};
use std::time::Duration;

fn fees() -> Fees {
    Fees::Eip1559 {
        max_fee_per_gas: 20_000_000_000,
        max_priority_fee_per_gas: 1_000_000_000,
        gas_limit: 60_000,
    }
}

fn runner(node: MockNode, store: NonceStore) -> TxRunner<MockNode> {
    TxRunner::new(node, store, wallet().address())
        .with_deadline(Duration::from_secs(10))
        .with_retry_wait(Duration::from_millis(1))
}

#[tokio::test]
async fn sequential_submissions_use_consecutive_numbers() {
    let store = NonceStore::new();
    let contract = ContractInstance::new(contract_address(), MockNode::default(), TransferAbi);
    let runner = runner(MockNode::default(), store.clone());
    let args = [Bytes::from(vec![0xaa; 20]), Bytes::from(vec![0x01])];

    for expected in 0..3u64 {
        let submission = contract
            .invoke_with_runner(&runner, &wallet(), "transfer", &args, U256::ZERO, fees())
            .await
            .unwrap();
        assert_eq!(submission.nonce, expected);
        assert!(submission.receipt.unwrap().status());
    }

    // committed numbers stay reserved behind the frontier
    assert!(runner.store().is_reserved(wallet().address(), 2));
}

#[tokio::test]
async fn nonce_too_low_rebuilds_and_resigns() {
    let node = MockNode::default();
    node.script_send(Err(RpcError::NonceTooLow { hash: None }));
    node.script_send(Err(RpcError::NonceTooLow { hash: None }));

    let contract = ContractInstance::new(contract_address(), MockNode::default(), TransferAbi);
    let runner = runner(node, NonceStore::new());

    let submission = contract
        .invoke_with_runner(&runner, &wallet(), "transfer", &[], U256::ZERO, fees())
        .await
        .unwrap();
    assert_eq!(submission.nonce, 2);

    // each attempt was a distinct, correctly numbered, signed payload
    let submitted = runner.provider().submitted.lock().unwrap().clone();
    assert_eq!(submitted.len(), 3);
    for (i, raw) in submitted.iter().enumerate() {
        let envelope = TxEnvelope::decode_2718(&mut raw.as_slice()).unwrap();
        assert_eq!(envelope.nonce(), i as u64);
        assert_eq!(envelope.recover_signer().unwrap(), wallet().address());
    }
}

#[tokio::test]
async fn reverts_surface_with_context_and_consume_the_number() {
    let node = MockNode::default();
    let reported = ingot::primitives::keccak256(b"reverted tx");
    node.script_send(Err(RpcError::Reverted {
        hash: Some(reported),
        reason: Some("transfer amount exceeds balance".into()),
    }));

    let store = NonceStore::new();
    let contract = ContractInstance::new(contract_address(), MockNode::default(), TransferAbi);
    let runner = runner(node, store.clone());

    let error = contract
        .invoke_with_runner(&runner, &wallet(), "transfer", &[], U256::ZERO, fees())
        .await
        .unwrap_err();
    match error {
        ingot::contract::Error::SubmitError(SubmitError::Reverted {
            nonce,
            gap_created,
            cause,
        }) => {
            assert_eq!(nonce, 0);
            assert!(!gap_created);
            assert_eq!(cause.transaction_hash(), Some(reported));
        }
        other => panic!("unexpected error: {other}"),
    }

    // the number was consumed on chain; the next submission moves on
    assert_eq!(store.reserve(wallet().address()), 1);
}

#[tokio::test]
async fn released_numbers_between_reservations_report_gaps() {
    // 0, 1, and 3 are held elsewhere, so the runner works on 2; when the
    // transport keeps failing past the cool-down, releasing 2 leaves a
    // hole below the reservation at 3
    let store = NonceStore::with_cooldown(Duration::ZERO);
    let sender = wallet().address();
    for expected in 0..4 {
        assert_eq!(store.reserve(sender), expected);
    }
    // free the middle number again, leaving {0, 1, 3}
    let _ = store.on_submission_failure(sender, 2);
    let _ = store.on_submission_failure(sender, 2);
    assert!(!store.is_reserved(sender, 2));

    let node = MockNode::default();
    node.script_send(Err(transport_error()));
    node.script_send(Err(transport_error()));
    let runner = runner(node, store.clone());

    let error = runner.send(|_| Ok(vec![0x01])).await.unwrap_err();
    match error {
        SubmitError::Failed { nonce, gap_created, deadline_exceeded, .. } => {
            assert_eq!(nonce, 2);
            assert!(gap_created);
            assert!(!deadline_exceeded);
        }
        other => panic!("unexpected error: {other}"),
    }
    // the released number is free again, and taking it closes the gap
    assert!(!store.is_reserved(sender, 2));
    assert_eq!(store.reserve(sender), 2);
}

#[tokio::test]
async fn deadline_bounds_the_whole_loop() {
    let node = MockNode::default();
    // an endless supply of transport failures
    for _ in 0..64 {
        node.script_send(Err(transport_error()));
    }
    let runner = TxRunner::new(node, NonceStore::new(), wallet().address())
        .with_deadline(Duration::from_millis(50))
        .with_retry_wait(Duration::from_millis(5));

    let error = runner.send(|_| Ok(vec![0x00])).await.unwrap_err();
    match error {
        SubmitError::Failed { deadline_exceeded, .. } => assert!(deadline_exceeded),
        other => panic!("unexpected error: {other}"),
    }
}
