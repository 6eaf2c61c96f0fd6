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

mod address;
pub use address::{Address, AddressError, TxKind};

mod amount;
pub use amount::{Amount, Unit};

mod bits;
pub use bits::{B256, HexError};

mod bytes;
pub use bytes::Bytes;

mod keccak;
pub use keccak::{eip191_hash_message, keccak256};

mod log;
pub use log::{Log, LogData};

mod signature;
pub use signature::{parity, ParityError, Signature, SignatureError};

mod uint;
pub use uint::{UintError, U256};

#[cfg(feature = "serde")]
mod serde;

/// A chain identifier.
pub type ChainId = u64;

pub use hex;
