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

mod eip2718;
pub use eip2718::{Decodable2718, Eip2718Error, Encodable2718};

mod receipt;
pub use receipt::Receipt;

mod signed;
pub use signed::{RecoveryError, Signed};

mod transaction;
pub use transaction::{
    AccessList, AccessListItem, SignableTransaction, Transaction, TxEip1559, TxEnvelope, TxLegacy,
    TxType, TypedTransaction,
};
