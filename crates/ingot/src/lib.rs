#![doc = include_str!("../README.md")]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

/* --------------------------------------- Core re-exports -------------------------------------- */

#[doc(inline)]
pub use ingot_primitives as primitives;

#[doc(no_inline)]
pub use primitives::hex;

#[doc(inline)]
pub use ingot_rlp as rlp;

#[doc(inline)]
pub use ingot_crypto as crypto;

/* --------------------------------------- Main re-exports -------------------------------------- */

#[doc(inline)]
pub use ingot_consensus as consensus;

#[doc(inline)]
pub use ingot_contract as contract;

/// Interface with the chain: the RPC collaborator, the sequence-number
/// store, and the submission runner.
///
/// See [`ingot_provider`] for more details.
pub mod providers {
    #[doc(inline)]
    pub use ingot_provider::*;
}

/// Signer abstraction and implementations.
///
/// See [`ingot_signer`] for more details.
pub mod signers {
    #[doc(inline)]
    pub use ingot_signer::*;

    #[doc(inline)]
    pub use ingot_signer_wallet as wallet;
}
