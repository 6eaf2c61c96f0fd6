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

use async_trait::async_trait;
use ingot_consensus::SignableTransaction;
use ingot_crypto::{PrehashSigner, SigningKey};
use ingot_primitives::{Address, ChainId, Signature, B256};
use ingot_signer::{
    sign_transaction_with_chain_id, Result, Signer, SignerSync, TxSigner, TxSignerSync,
};
use std::fmt;

mod error;
pub use error::WalletError;

mod private_key;

/// A wallet instantiated with a locally stored private key.
pub type LocalWallet = Wallet<SigningKey>;

/// A private-public key pair that signs messages and transactions.
///
/// Generic over the prehash signer `D`, so the key material can live in
/// memory ([`LocalWallet`]) or behind other backends.
#[derive(Clone)]
pub struct Wallet<D> {
    /// The wallet's prehash signer.
    pub(crate) signer: D,
    /// The wallet's address.
    pub(crate) address: Address,
    /// The wallet's chain ID, used for EIP-155 replay protection.
    pub(crate) chain_id: Option<ChainId>,
}

impl<D: PrehashSigner> Wallet<D> {
    /// Constructs a wallet from an external prehash signer and its
    /// precomputed address.
    #[inline]
    pub const fn new_with_signer(signer: D, address: Address, chain_id: Option<ChainId>) -> Self {
        Wallet { signer, address, chain_id }
    }

    /// Returns this wallet's signer.
    #[inline]
    pub const fn signer(&self) -> &D {
        &self.signer
    }

    /// Consumes this wallet and returns its signer.
    #[inline]
    pub fn into_signer(self) -> D {
        self.signer
    }

    /// Returns this wallet's address.
    #[inline]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns this wallet's chain ID.
    #[inline]
    pub const fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }
}

#[async_trait]
impl<D: PrehashSigner + Send + Sync> Signer for Wallet<D> {
    #[inline]
    async fn sign_hash(&self, hash: &B256) -> Result<Signature> {
        self.sign_hash_sync(hash)
    }

    #[inline]
    fn address(&self) -> Address {
        self.address
    }

    #[inline]
    fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }

    #[inline]
    fn set_chain_id(&mut self, chain_id: Option<ChainId>) {
        self.chain_id = chain_id;
    }
}

impl<D: PrehashSigner> SignerSync for Wallet<D> {
    #[inline]
    fn sign_hash_sync(&self, hash: &B256) -> Result<Signature> {
        Ok(self.signer.sign_prehash(hash)?)
    }

    #[inline]
    fn chain_id_sync(&self) -> Option<ChainId> {
        self.chain_id
    }
}

#[async_trait]
impl<D: PrehashSigner + Send + Sync> TxSigner for Wallet<D> {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_transaction(&self, tx: &mut dyn SignableTransaction) -> Result<Signature> {
        self.sign_transaction_sync(tx)
    }
}

impl<D: PrehashSigner> TxSignerSync for Wallet<D> {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_transaction_sync(&self, tx: &mut dyn SignableTransaction) -> Result<Signature> {
        sign_transaction_with_chain_id!(self, tx, self.sign_hash_sync(&tx.signature_hash()))
    }
}

// do not log the signer
impl<D> fmt::Debug for Wallet<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingot_consensus::{Transaction, TxEip1559, TxLegacy};
    use ingot_primitives::{TxKind, U256};

    fn wallet() -> LocalWallet {
        "0x4646464646464646464646464646464646464646464646464646464646464646"
            .parse()
            .unwrap()
    }

    fn eip155_tx() -> TxLegacy {
        TxLegacy {
            chain_id: Some(1),
            nonce: 9,
            gas_price: 20_000_000_000,
            gas_limit: 21_000,
            to: TxKind::Call("0x3535353535353535353535353535353535353535".parse().unwrap()),
            value: U256::from(1_000_000_000_000_000_000u64),
            input: Default::default(),
        }
    }

    #[test]
    fn signs_the_eip155_example() {
        let mut tx = eip155_tx();
        let signature = wallet().sign_transaction_sync(&mut tx).unwrap();
        assert_eq!(signature.v(), 37);
        assert_eq!(
            format!("{:#x}", signature.r()),
            "0x28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276"
        );
        assert_eq!(
            format!("{:#x}", signature.s()),
            "0x67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
        );

        let signed = tx.into_signed(signature);
        assert_eq!(signed.recover_signer().unwrap(), wallet().address());
    }

    #[test]
    fn signer_chain_id_fills_the_transaction() {
        let mut tx = eip155_tx();
        tx.chain_id = None;
        let mut signer = wallet();
        Signer::set_chain_id(&mut signer, Some(1));
        let signature = signer.sign_transaction_sync(&mut tx).unwrap();
        assert_eq!(tx.chain_id, Some(1));
        assert_eq!(signature.v(), 37);
    }

    #[test]
    fn chain_id_mismatch_is_an_error() {
        let mut tx = eip155_tx();
        tx.chain_id = Some(2);
        let mut signer = wallet();
        Signer::set_chain_id(&mut signer, Some(1));
        let error = signer.sign_transaction_sync(&mut tx).unwrap_err();
        assert_eq!(
            error.to_string(),
            ingot_signer::Error::TransactionChainIdMismatch { signer: 1, tx: 2 }.to_string()
        );
    }

    #[test]
    fn fee_market_requires_a_chain_id() {
        let mut tx = TxEip1559 { chain_id: 0, gas_limit: 21_000, ..Default::default() };
        let error = wallet().sign_transaction_sync(&mut tx).unwrap_err();
        assert_eq!(error.to_string(), ingot_signer::Error::MissingChainId.to_string());
    }

    #[test]
    fn fee_market_signature_keeps_its_parity_recoverable() {
        let mut tx = TxEip1559 {
            chain_id: 1,
            max_priority_fee_per_gas: 1_000_000_000,
            max_fee_per_gas: 20_000_000_000,
            gas_limit: 21_000,
            to: TxKind::Call("0x3535353535353535353535353535353535353535".parse().unwrap()),
            ..Default::default()
        };
        let signature = wallet().sign_transaction_sync(&mut tx).unwrap();
        // the EIP-155-encoded v still decodes to the parity bit in context
        assert_eq!(signature.recovery_id(Transaction::chain_id(&tx)).unwrap(), 1);
        let signed = tx.into_signed(signature);
        assert_eq!(signed.recover_signer().unwrap(), wallet().address());
    }

    #[tokio::test]
    async fn async_signing_matches_sync() {
        let mut tx = eip155_tx();
        let sig_async = wallet().sign_transaction(&mut tx).await.unwrap();
        let sig_sync = wallet().sign_transaction_sync(&mut eip155_tx()).unwrap();
        assert_eq!(sig_async, sig_sync);
    }
}
