//! [`Wallet`] instantiated with a raw private key.

use crate::{Wallet, WalletError};
use ingot_crypto::SigningKey;
use ingot_primitives::B256;
use ingot_signer::utils::secret_key_to_address;
use rand::{CryptoRng, RngCore};
use std::str::FromStr;

impl Wallet<SigningKey> {
    /// Creates a wallet from a signing key, deriving its address.
    #[inline]
    pub fn from_signing_key(signer: SigningKey) -> Self {
        let address = secret_key_to_address(&signer);
        Self::new_with_signer(signer, address, None)
    }

    /// Creates a wallet from a 32-byte scalar.
    #[inline]
    pub fn from_bytes(bytes: &B256) -> Result<Self, WalletError> {
        Ok(Self::from_signing_key(SigningKey::from_bytes(&bytes.0)?))
    }

    /// Creates a wallet from a byte slice that must be 32 bytes.
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Result<Self, WalletError> {
        Ok(Self::from_signing_key(SigningKey::from_slice(bytes)?))
    }

    /// Creates a wallet with a random key from the given source.
    pub fn random_with<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            // rejection keeps the scalar in [1, n)
            if let Ok(signer) = SigningKey::from_bytes(&bytes) {
                return Self::from_signing_key(signer);
            }
        }
    }

    /// Creates a wallet with a random key from the thread RNG.
    #[inline]
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// The wallet's 32-byte private key.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signer.to_bytes()
    }
}

impl FromStr for Wallet<SigningKey> {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)?;
        Self::from_slice(&bytes)
    }
}
