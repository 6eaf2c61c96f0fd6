//! Modular arithmetic over 256-bit prime moduli.
//!
//! Both secp256k1 moduli (the field prime and the group order) occupy the
//! top bit of 256, which the reduction relies on: `2^256 ≡ c (mod m)` with
//! `c = 2^256 - m < 2^255`, so a 512-bit product folds into range in a few
//! multiply-accumulate steps.

use ingot_primitives::U256;

/// `(a + b) mod m`, for `a, b < m`.
pub(crate) fn add_mod(a: U256, b: U256, m: U256) -> U256 {
    let (sum, carry) = a.overflowing_add(b);
    if carry || sum >= m {
        sum.wrapping_sub(m)
    } else {
        sum
    }
}

/// `(a - b) mod m`, for `a, b < m`.
pub(crate) fn sub_mod(a: U256, b: U256, m: U256) -> U256 {
    if a >= b {
        a.wrapping_sub(b)
    } else {
        m.wrapping_sub(b).wrapping_add(a)
    }
}

/// `(a · b) mod m`, for `a, b < m` and `m` occupying bit 255.
pub(crate) fn mul_mod(a: U256, b: U256, m: U256) -> U256 {
    debug_assert!(m.bit(255), "modulus must occupy the top bit");
    reduce_wide(a.widening_mul(&b), m)
}

/// Reduces a value below `2^256` into `[0, m)`.
pub(crate) fn reduce(a: U256, m: U256) -> U256 {
    // m > 2^255, so a < 2m and one conditional subtraction suffices
    debug_assert!(m.bit(255), "modulus must occupy the top bit");
    if a >= m {
        a.wrapping_sub(m)
    } else {
        a
    }
}

fn reduce_wide(mut wide: [u64; 8], m: U256) -> U256 {
    let complement = U256::ZERO.wrapping_sub(m);
    loop {
        let hi = U256::from_limbs(wide[4..8].try_into().unwrap());
        let lo = U256::from_limbs(wide[0..4].try_into().unwrap());
        if hi.is_zero() {
            return reduce(lo, m);
        }
        wide = add_wide(hi.widening_mul(&complement), lo);
    }
}

fn add_wide(mut acc: [u64; 8], rhs: U256) -> [u64; 8] {
    let mut carry = 0u128;
    for (limb, &r) in acc.iter_mut().zip(rhs.as_limbs()) {
        let t = *limb as u128 + r as u128 + carry;
        *limb = t as u64;
        carry = t >> 64;
    }
    for limb in &mut acc[4..] {
        if carry == 0 {
            break;
        }
        let t = *limb as u128 + carry;
        *limb = t as u64;
        carry = t >> 64;
    }
    acc
}

/// `base^exp mod m` by square-and-multiply.
pub(crate) fn pow_mod(base: U256, exp: U256, m: U256) -> U256 {
    let mut result = U256::ONE;
    let base = reduce(base, m);
    for i in (0..exp.bit_len()).rev() {
        result = mul_mod(result, result, m);
        if exp.bit(i) {
            result = mul_mod(result, base, m);
        }
    }
    result
}

/// Multiplicative inverse modulo a prime, via Fermat's little theorem.
/// The caller guarantees `a != 0`.
pub(crate) fn inv_mod(a: U256, m: U256) -> U256 {
    pow_mod(a, m.wrapping_sub(U256::from(2u64)), m)
}
