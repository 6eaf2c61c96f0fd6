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

mod arith;

pub mod curve;
pub use curve::{GROUP_ORDER, GROUP_ORDER_HALF};

mod ecdsa;
pub use ecdsa::{PrehashSigner, SigningKey, VerifyingKey};

mod rfc6979;

/// Signing and recovery failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The private scalar is zero or at least the group order.
    #[error("private key scalar out of range")]
    InvalidPrivateKey,
    /// `r` or `s` is zero or at least the group order.
    #[error("signature scalar out of range")]
    InvalidScalar,
    /// Recovery ids 2 and 3 (`r + n` nonce points) are not produced by the
    /// chain and not supported.
    #[error("recovery id {0} is not supported")]
    InvalidRecoveryId(u8),
    /// The recovered x coordinate is not on the curve.
    #[error("x coordinate is not on the curve")]
    NotOnCurve,
    /// Recovery produced the point at infinity.
    #[error("recovered the point at infinity")]
    RecoveredInfinity,
    /// No recovery id reproduces the signer's public key. This indicates a
    /// signer bug, never bad input.
    #[error("could not resolve a recovery id for the produced signature")]
    RecoveryIdUnresolved,
}
