//! secp256k1 group arithmetic: `y² = x³ + 7` over the 256-bit prime field,
//! points in Jacobian coordinates to defer field inversions.

use crate::arith::{add_mod, inv_mod, mul_mod, pow_mod, sub_mod};
use ingot_primitives::U256;

/// The field prime `p`.
pub const FIELD_PRIME: U256 = U256::from_limbs([
    0xfffffffefffffc2f,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
]);

/// The group order `n`.
pub const GROUP_ORDER: U256 = U256::from_limbs([
    0xbfd25e8cd0364141,
    0xbaaedce6af48a03b,
    0xfffffffffffffffe,
    0xffffffffffffffff,
]);

/// `n / 2`, the canonical upper bound for a signature's `s` scalar.
pub const GROUP_ORDER_HALF: U256 = U256::from_limbs([
    0xdfe92f46681b20a0,
    0x5d576e7357a4501d,
    0xffffffffffffffff,
    0x7fffffffffffffff,
]);

/// Exponent for the field square root, `(p + 1) / 4`; valid because
/// `p ≡ 3 (mod 4)`.
const SQRT_EXPONENT: U256 = U256::from_limbs([
    0xffffffffbfffff0c,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x3fffffffffffffff,
]);

/// The curve's `b` coefficient.
const COEFF_B: U256 = U256::from_limbs([7, 0, 0, 0]);

/// The generator point.
pub const GENERATOR: AffinePoint = AffinePoint {
    x: U256::from_limbs([
        0x59f2815b16f81798,
        0x029bfcdb2dce28d9,
        0x55a06295ce870b07,
        0x79be667ef9dcbbac,
    ]),
    y: U256::from_limbs([
        0x9c47d08ffb10d4b8,
        0xfd17b448a6855419,
        0x5da4fbfc0e1108a8,
        0x483ada7726a3c465,
    ]),
};

fn fp_add(a: U256, b: U256) -> U256 {
    add_mod(a, b, FIELD_PRIME)
}

fn fp_sub(a: U256, b: U256) -> U256 {
    sub_mod(a, b, FIELD_PRIME)
}

fn fp_mul(a: U256, b: U256) -> U256 {
    mul_mod(a, b, FIELD_PRIME)
}

fn fp_double(a: U256) -> U256 {
    fp_add(a, a)
}

/// A finite curve point in affine coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AffinePoint {
    /// Field x coordinate.
    pub x: U256,
    /// Field y coordinate.
    pub y: U256,
}

impl AffinePoint {
    /// Whether the y coordinate is odd.
    pub fn y_is_odd(&self) -> bool {
        self.y.bit(0)
    }

    /// Reconstructs the point with the given x coordinate and y parity.
    /// Returns `None` when `x³ + 7` is not a quadratic residue.
    pub fn lift_x(x: U256, y_odd: bool) -> Option<Self> {
        let x_cubed = fp_mul(fp_mul(x, x), x);
        let y_squared = fp_add(x_cubed, COEFF_B);
        let y = pow_mod(y_squared, SQRT_EXPONENT, FIELD_PRIME);
        if fp_mul(y, y) != y_squared {
            return None;
        }
        let y = if y.bit(0) == y_odd { y } else { fp_sub(U256::ZERO, y) };
        Some(Self { x, y })
    }

    /// The 64-byte uncompressed encoding, `x || y`, without the `0x04` tag.
    pub fn to_uncompressed(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.x.to_be_bytes());
        bytes[32..].copy_from_slice(&self.y.to_be_bytes());
        bytes
    }
}

/// A curve point in Jacobian coordinates; `z = 0` is the point at infinity.
#[derive(Clone, Copy, Debug)]
pub struct JacobianPoint {
    x: U256,
    y: U256,
    z: U256,
}

impl JacobianPoint {
    /// The point at infinity.
    pub const INFINITY: Self = Self { x: U256::ONE, y: U256::ONE, z: U256::ZERO };

    /// Whether this is the point at infinity.
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Doubles the point (`a = 0` shortcut applies).
    pub fn double(&self) -> Self {
        if self.is_infinity() || self.y.is_zero() {
            return Self::INFINITY;
        }
        let xx = fp_mul(self.x, self.x);
        let yy = fp_mul(self.y, self.y);
        let yyyy = fp_mul(yy, yy);
        let x_plus_yy = fp_add(self.x, yy);
        let d = fp_double(fp_sub(fp_sub(fp_mul(x_plus_yy, x_plus_yy), xx), yyyy));
        let e = fp_add(fp_double(xx), xx);
        let f = fp_mul(e, e);
        let x3 = fp_sub(f, fp_double(d));
        let eight_yyyy = fp_double(fp_double(fp_double(yyyy)));
        let y3 = fp_sub(fp_mul(e, fp_sub(d, x3)), eight_yyyy);
        let z3 = fp_double(fp_mul(self.y, self.z));
        Self { x: x3, y: y3, z: z3 }
    }

    /// Adds two points.
    pub fn add(&self, other: &Self) -> Self {
        if self.is_infinity() {
            return *other;
        }
        if other.is_infinity() {
            return *self;
        }
        let z1z1 = fp_mul(self.z, self.z);
        let z2z2 = fp_mul(other.z, other.z);
        let u1 = fp_mul(self.x, z2z2);
        let u2 = fp_mul(other.x, z1z1);
        let s1 = fp_mul(fp_mul(self.y, other.z), z2z2);
        let s2 = fp_mul(fp_mul(other.y, self.z), z1z1);
        if u1 == u2 {
            return if s1 == s2 { self.double() } else { Self::INFINITY };
        }
        let h = fp_sub(u2, u1);
        let two_h = fp_double(h);
        let i = fp_mul(two_h, two_h);
        let j = fp_mul(h, i);
        let r = fp_double(fp_sub(s2, s1));
        let v = fp_mul(u1, i);
        let x3 = fp_sub(fp_sub(fp_mul(r, r), j), fp_double(v));
        let y3 = fp_sub(fp_mul(r, fp_sub(v, x3)), fp_double(fp_mul(s1, j)));
        let z_sum = fp_add(self.z, other.z);
        let z3 = fp_mul(fp_sub(fp_sub(fp_mul(z_sum, z_sum), z1z1), z2z2), h);
        Self { x: x3, y: y3, z: z3 }
    }

    /// Projects back to affine coordinates; `None` at infinity.
    pub fn to_affine(&self) -> Option<AffinePoint> {
        if self.is_infinity() {
            return None;
        }
        let z_inv = inv_mod(self.z, FIELD_PRIME);
        let z_inv2 = fp_mul(z_inv, z_inv);
        let x = fp_mul(self.x, z_inv2);
        let y = fp_mul(self.y, fp_mul(z_inv2, z_inv));
        Some(AffinePoint { x, y })
    }
}

impl From<AffinePoint> for JacobianPoint {
    fn from(point: AffinePoint) -> Self {
        Self { x: point.x, y: point.y, z: U256::ONE }
    }
}

/// `scalar · point` by double-and-add. The scalar is taken modulo nothing;
/// callers pass scalars already below the group order.
pub fn scalar_mul(scalar: U256, point: &JacobianPoint) -> JacobianPoint {
    let mut acc = JacobianPoint::INFINITY;
    for i in (0..scalar.bit_len()).rev() {
        acc = acc.double();
        if scalar.bit(i) {
            acc = acc.add(point);
        }
    }
    acc
}

/// `a · G + b · P`, the shape public-key recovery evaluates.
pub fn double_scalar_mul(a: U256, b: U256, point: &JacobianPoint) -> JacobianPoint {
    scalar_mul(a, &GENERATOR.into()).add(&scalar_mul(b, point))
}
