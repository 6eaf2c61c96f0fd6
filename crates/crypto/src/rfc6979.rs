//! Deterministic per-signature nonces per [RFC 6979], with HMAC-SHA-256
//! and full rejection sampling: candidates outside `[1, n)` advance the
//! generator instead of being reduced.
//!
//! [RFC 6979]: https://www.rfc-editor.org/rfc/rfc6979

use crate::curve::GROUP_ORDER;
use hmac::{Hmac, Mac};
use ingot_primitives::U256;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn hmac(key: &[u8; 32], parts: &[&[u8]]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("any key length is valid");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().into()
}

/// The `K`/`V` state machine of RFC 6979 §3.2.
///
/// Successive calls to [`next`](Self::next) yield the candidate stream; the
/// caller rejects candidates that fall outside `[1, n)` or fail the curve
/// equations (`r = 0`, `s = 0`) and simply asks for the next one.
pub(crate) struct NonceGenerator {
    key: [u8; 32],
    v: [u8; 32],
}

impl NonceGenerator {
    /// Seeds from the private scalar and the message digest.
    ///
    /// `digest` is pre-reduced modulo `n` by the caller (the
    /// `bits2octets` step; a no-op for almost every digest).
    pub(crate) fn new(secret: &[u8; 32], digest: &[u8; 32]) -> Self {
        let mut key = [0u8; 32];
        let mut v = [0x01u8; 32];
        key = hmac(&key, &[&v, &[0x00], secret, digest]);
        v = hmac(&key, &[&v]);
        key = hmac(&key, &[&v, &[0x01], secret, digest]);
        v = hmac(&key, &[&v]);
        Self { key, v }
    }

    /// Produces the next nonce candidate in `[1, n)`.
    pub(crate) fn next(&mut self) -> U256 {
        loop {
            self.v = hmac(&self.key, &[&self.v]);
            let candidate = U256::from_be_bytes(self.v);
            // retry preparation, whether or not the candidate is taken
            self.key = hmac(&self.key, &[&self.v, &[0x00]]);
            self.v = hmac(&self.key, &[&self.v]);
            if !candidate.is_zero() && candidate < GROUP_ORDER {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_and_distinct() {
        let secret = [0x46u8; 32];
        let digest = [0xabu8; 32];
        let mut a = NonceGenerator::new(&secret, &digest);
        let mut b = NonceGenerator::new(&secret, &digest);
        let first = a.next();
        assert_eq!(first, b.next());
        // the retry stream continues deterministically and does not repeat
        let second = a.next();
        assert_eq!(second, b.next());
        assert_ne!(first, second);
    }

    #[test]
    fn digest_changes_the_nonce() {
        let secret = [0x46u8; 32];
        let mut a = NonceGenerator::new(&secret, &[0x01u8; 32]);
        let mut b = NonceGenerator::new(&secret, &[0x02u8; 32]);
        assert_ne!(a.next(), b.next());
    }
}
