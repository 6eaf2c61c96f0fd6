//! Utility functions for deriving addresses from keys.

use ingot_crypto::{SigningKey, VerifyingKey};
use ingot_primitives::{keccak256, Address};

/// Converts an ECDSA private key to its account address.
#[inline]
pub fn secret_key_to_address(secret_key: &SigningKey) -> Address {
    public_key_to_address(&secret_key.verifying_key())
}

/// Converts an ECDSA public key to its account address.
#[inline]
pub fn public_key_to_address(pubkey: &VerifyingKey) -> Address {
    pubkey.to_address()
}

/// Converts a raw, uncompressed public key to its account address.
///
/// ### Warning
///
/// This method **does not** verify that the bytes are a valid public key.
/// Passing invalid bytes produces an unspendable address.
///
/// # Panics
///
/// Panics if the input is not **exactly** 64 bytes.
#[inline]
#[track_caller]
pub fn raw_public_key_to_address(pubkey: &[u8]) -> Address {
    assert_eq!(pubkey.len(), 64, "raw public key must be 64 bytes");
    let hash = keccak256(pubkey);
    Address::from_slice(&hash[12..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn secret_key_address_matches_known_vector() {
        let key = SigningKey::from_str(
            "4646464646464646464646464646464646464646464646464646464646464646",
        )
        .unwrap();
        let expected: Address = "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F".parse().unwrap();
        assert_eq!(secret_key_to_address(&key), expected);
        assert_eq!(
            raw_public_key_to_address(&key.verifying_key().to_uncompressed()),
            expected
        );
    }

    #[test]
    #[should_panic]
    fn raw_public_key_must_be_64_bytes() {
        raw_public_key_to_address(&[]);
    }
}
