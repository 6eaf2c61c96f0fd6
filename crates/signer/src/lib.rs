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
pub use error::{Error, Result, UnsupportedSignerOperation};

mod signer;
pub use signer::{Signer, SignerSync, TxSigner, TxSignerSync};

pub mod utils;

pub use ingot_primitives::Signature;

/// Reconciles the chain id between a signer and a transaction inside a
/// `sign_transaction` implementation, then applies the EIP-155 encoding to
/// the produced signature when the transaction is replay-protected.
///
/// Fee-market variants refuse to sign without a chain id; the wire
/// encoders re-derive the bare y-parity bit from the encoded value.
#[macro_export]
macro_rules! sign_transaction_with_chain_id {
    // $signer: impl Signer or SignerSync (anything with chain_id())
    // $tx: &mut dyn SignableTransaction
    // $sign: lazy Result<Signature>
    ($signer:expr, $tx:expr, $sign:expr) => {{
        if let Some(chain_id) = $signer.chain_id() {
            if !$tx.set_chain_id_checked(chain_id) {
                return Err($crate::Error::TransactionChainIdMismatch {
                    signer: chain_id,
                    // we can only end up here if the tx has a chain id
                    tx: $tx.chain_id().unwrap(),
                });
            }
        }
        if $tx.requires_chain_id() && $tx.chain_id().is_none() {
            return Err($crate::Error::MissingChainId);
        }

        let sig = $sign?;

        match $tx.chain_id() {
            Some(chain_id) => sig.with_chain_id(chain_id).map_err($crate::Error::from),
            None => Ok(sig),
        }
    }};
}
