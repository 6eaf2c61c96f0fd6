#![doc = include_str!("../README.md")]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::{RpcError, TransportError, TransportResult};

mod nonce;
pub use nonce::{NonceDisposition, NonceStore, DEFAULT_COOLDOWN};

mod provider;
pub use provider::{Provider, TransactionReceipt};

mod runner;
pub use runner::{
    SubmitError, Submission, TxRunner, DEFAULT_DEADLINE, DEFAULT_RETRY_WAIT,
};
