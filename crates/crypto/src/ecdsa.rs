use crate::{
    arith::{add_mod, inv_mod, mul_mod, reduce, sub_mod},
    curve::{
        double_scalar_mul, scalar_mul, AffinePoint, JacobianPoint, GENERATOR, GROUP_ORDER,
        GROUP_ORDER_HALF,
    },
    rfc6979::NonceGenerator,
    Error,
};
use core::{fmt, str::FromStr};
use ingot_primitives::{keccak256, Address, Signature, B256, U256};

/// A secp256k1 private scalar in `[1, n)`.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    secret: U256,
}

impl SigningKey {
    /// Validates and wraps a 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        let secret = U256::from_be_bytes(*bytes);
        if secret.is_zero() || secret >= GROUP_ORDER {
            return Err(Error::InvalidPrivateKey);
        }
        Ok(Self { secret })
    }

    /// Validates a 32-byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: &[u8; 32] = bytes.try_into().map_err(|_| Error::InvalidPrivateKey)?;
        Self::from_bytes(bytes)
    }

    /// The big-endian scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret.to_be_bytes()
    }

    /// The corresponding public key.
    pub fn verifying_key(&self) -> VerifyingKey {
        let point = scalar_mul(self.secret, &GENERATOR.into())
            .to_affine()
            .expect("secret is in [1, n)");
        VerifyingKey { point }
    }

    /// Signs a 32-byte digest, producing `(r, s)` with canonical low `s`
    /// and the resolved recovery id in the signature's `v` slot.
    ///
    /// The per-message nonce is deterministic (RFC 6979), so signing the
    /// same digest with the same key is bit-identical across runs.
    pub fn sign_prehash(&self, prehash: &B256) -> Result<Signature, Error> {
        let z = reduce(U256::from_be_bytes(prehash.0), GROUP_ORDER);
        let mut nonces = NonceGenerator::new(&self.to_bytes(), &z.to_be_bytes());
        loop {
            let k = nonces.next();
            let r_point = scalar_mul(k, &GENERATOR.into())
                .to_affine()
                .expect("nonce is in [1, n)");
            let r = reduce(r_point.x, GROUP_ORDER);
            if r.is_zero() {
                continue;
            }
            let k_inv = inv_mod(k, GROUP_ORDER);
            let s = mul_mod(
                k_inv,
                add_mod(z, mul_mod(self.secret, r, GROUP_ORDER), GROUP_ORDER),
                GROUP_ORDER,
            );
            if s.is_zero() {
                continue;
            }
            // canonical low s; the y parity of the nonce point flips with it
            let s = if s > GROUP_ORDER_HALF { GROUP_ORDER.wrapping_sub(s) } else { s };

            // resolve the recovery id by trial recovery against our own key
            let expected = self.verifying_key();
            for recovery_id in 0u8..=1 {
                let candidate = Signature::new(r, s, recovery_id as u64);
                if let Ok(recovered) =
                    VerifyingKey::recover_from_prehash(prehash, &candidate, recovery_id)
                {
                    if recovered == expected {
                        return Ok(candidate);
                    }
                }
            }
            // neither candidate matches our own public key
            return Err(Error::RecoveryIdUnresolved);
        }
    }
}

// never print the scalar
impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

impl FromStr for SigningKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 32];
        if digits.len() != 64 {
            return Err(Error::InvalidPrivateKey);
        }
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| Error::InvalidPrivateKey)?;
        Self::from_bytes(&bytes)
    }
}

/// A secp256k1 public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    point: AffinePoint,
}

impl VerifyingKey {
    /// The 64-byte uncompressed encoding, `x || y`, without the `0x04` tag.
    pub fn to_uncompressed(&self) -> [u8; 64] {
        self.point.to_uncompressed()
    }

    /// The account address: the last 20 bytes of the Keccak-256 digest of
    /// the uncompressed point.
    pub fn to_address(&self) -> Address {
        let hash = keccak256(self.to_uncompressed());
        Address::from_slice(&hash[12..])
    }

    /// Recovers the public key consistent with `(r, s)` over `prehash` and
    /// the given recovery id.
    ///
    /// Recovery ids 2 and 3 would place the nonce point at `r + n`; the
    /// chain never produces them and they are rejected.
    pub fn recover_from_prehash(
        prehash: &B256,
        signature: &Signature,
        recovery_id: u8,
    ) -> Result<Self, Error> {
        if recovery_id > 1 {
            return Err(Error::InvalidRecoveryId(recovery_id));
        }
        let r = signature.r();
        let s = signature.s();
        if r.is_zero() || r >= GROUP_ORDER || s.is_zero() || s >= GROUP_ORDER {
            return Err(Error::InvalidScalar);
        }
        let nonce_point =
            AffinePoint::lift_x(r, recovery_id & 1 == 1).ok_or(Error::NotOnCurve)?;
        let z = reduce(U256::from_be_bytes(prehash.0), GROUP_ORDER);
        let r_inv = inv_mod(r, GROUP_ORDER);
        let u1 = mul_mod(sub_mod(U256::ZERO, z, GROUP_ORDER), r_inv, GROUP_ORDER);
        let u2 = mul_mod(s, r_inv, GROUP_ORDER);
        let public = double_scalar_mul(u1, u2, &JacobianPoint::from(nonce_point))
            .to_affine()
            .ok_or(Error::RecoveredInfinity)?;
        Ok(Self { point: public })
    }
}

/// Signs precomputed 32-byte digests.
///
/// The wallet layer is generic over this, so hardware-backed or remote
/// signers can stand in for a local [`SigningKey`].
pub trait PrehashSigner {
    /// Signs the digest, returning `(r, s)` and the recovery id in `v`.
    fn sign_prehash(&self, prehash: &B256) -> Result<Signature, Error>;
}

impl PrehashSigner for SigningKey {
    fn sign_prehash(&self, prehash: &B256) -> Result<Signature, Error> {
        Self::sign_prehash(self, prehash)
    }
}
