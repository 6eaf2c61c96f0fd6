use crate::U256;
use core::fmt;

/// Denominations of the native currency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Unit {
    /// The smallest denomination, `10^0`.
    #[default]
    Wei,
    /// `10^9` wei.
    Gwei,
    /// The main denomination, `10^18` wei.
    Ether,
}

impl Unit {
    /// Wei per one of this unit.
    pub fn wei_factor(&self) -> U256 {
        match self {
            Self::Wei => U256::ONE,
            Self::Gwei => U256::from(1_000_000_000u64),
            Self::Ether => U256::from(1_000_000_000_000_000_000u64),
        }
    }

    const fn suffix(&self) -> &'static str {
        match self {
            Self::Wei => "wei",
            Self::Gwei => "gwei",
            Self::Ether => "ether",
        }
    }
}

/// Fixed scale used to route decimal scalars through integer arithmetic.
const DECIMAL_SCALE: u64 = 1_000_000_000;

/// A non-negative amount of the native currency, held in wei.
///
/// Arithmetic never goes negative and never rounds away from zero;
/// divisions truncate. Display formatting only changes the unit tag, never
/// the stored value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(U256);

impl Amount {
    /// Zero wei.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Wraps a wei quantity.
    pub const fn from_wei(wei: U256) -> Self {
        Self(wei)
    }

    /// `count` whole units of `unit`.
    pub fn from_units(count: u64, unit: Unit) -> Option<Self> {
        U256::from(count).checked_mul(unit.wei_factor()).map(Self)
    }

    /// The wei quantity.
    pub const fn wei(&self) -> U256 {
        self.0
    }

    /// Checked addition.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction; `None` on underflow.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Multiplies by an integer scalar.
    pub fn checked_mul(self, scalar: u64) -> Option<Self> {
        self.0.checked_mul(U256::from(scalar)).map(Self)
    }

    /// Divides by an integer scalar, truncating toward zero. `None` when
    /// `scalar` is zero.
    pub fn checked_div(self, scalar: u64) -> Option<Self> {
        self.0.checked_div(U256::from(scalar)).map(Self)
    }

    /// Multiplies by a non-negative decimal scalar with nine fractional
    /// digits of precision, truncating toward zero.
    pub fn checked_mul_f64(self, scalar: f64) -> Option<Self> {
        let scaled = to_scaled(scalar)?;
        self.0
            .checked_mul(U256::from(scaled))?
            .checked_div(U256::from(DECIMAL_SCALE))
            .map(Self)
    }

    /// Divides by a positive decimal scalar with nine fractional digits of
    /// precision, truncating toward zero. `None` for zero.
    pub fn checked_div_f64(self, scalar: f64) -> Option<Self> {
        let scaled = to_scaled(scalar)?;
        if scaled == 0 {
            return None;
        }
        self.0
            .checked_mul(U256::from(DECIMAL_SCALE))?
            .checked_div(U256::from(scaled))
            .map(Self)
    }

    /// Parses a decimal string denominated in `unit`, e.g. `"1.5"` in
    /// [`Unit::Ether`]. Fractional digits beyond the unit's resolution are
    /// rejected rather than rounded.
    pub fn parse_units(s: &str, unit: Unit) -> Option<Self> {
        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        let factor = unit.wei_factor();
        let scale = factor.to_string().len() - 1;
        if frac.len() > scale {
            return None;
        }
        let whole = U256::from_dec_str(whole).ok()?.checked_mul(factor)?;
        if frac.is_empty() {
            return Some(Self(whole));
        }
        let mut frac_wei = U256::from_dec_str(frac).ok()?;
        for _ in 0..scale - frac.len() {
            frac_wei = frac_wei.checked_mul(U256::from(10u64))?;
        }
        whole.checked_add(frac_wei).map(Self)
    }

    /// Renders the amount in `unit` as a decimal string with the unit tag,
    /// e.g. `"1.5 ether"`. Trailing fractional zeros are dropped.
    pub fn format_units(&self, unit: Unit) -> String {
        let factor = unit.wei_factor();
        let (whole, frac) = self.0.checked_div_rem(factor).expect("factor is non-zero");
        if frac.is_zero() {
            return format!("{whole} {}", unit.suffix());
        }
        let width = factor.to_string().len() - 1;
        let frac = format!("{frac:0>width$}");
        format!("{whole}.{} {}", frac.trim_end_matches('0'), unit.suffix())
    }
}

fn to_scaled(scalar: f64) -> Option<u128> {
    if !scalar.is_finite() || scalar < 0.0 {
        return None;
    }
    let scaled = scalar * DECIMAL_SCALE as f64;
    if scaled > u128::MAX as f64 {
        return None;
    }
    Some(scaled as u128)
}

impl From<U256> for Amount {
    fn from(wei: U256) -> Self {
        Self(wei)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wei", self.0)
    }
}
