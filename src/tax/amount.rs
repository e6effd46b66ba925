use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::ops::{Add, Sub};

use super::quantity::Quantity;

/// Number of fractional digits every monetary value is rounded to
pub const CENTS_SCALE: u32 = 2;

/// Monetary value always held rounded to cents
///
/// Every constructor and every arithmetic result goes through [`Amount::of`],
/// so intermediate values (like the weighted average cost) are rounded at the
/// point they are produced rather than only when printed.
///
/// `+` and `-` panic when the result leaves the decimal range, like integer
/// arithmetic; the `checked_*` forms return `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Round a decimal to cents (half away from zero) and fix its scale at 2
    pub fn of(value: Decimal) -> Self {
        let mut rounded =
            value.round_dp_with_strategy(CENTS_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(CENTS_SCALE);
        Amount(rounded)
    }

    pub fn zero() -> Self {
        Self::of(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Multiply by an arbitrary factor (e.g. a tax rate), re-rounding the
    /// result. `None` if the product leaves the decimal range.
    pub fn checked_scale_by(&self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Self::of)
    }

    /// Multiply a unit value by a unit count
    pub fn checked_times(&self, quantity: Quantity) -> Option<Self> {
        self.checked_scale_by(Decimal::from(quantity.value()))
    }

    pub fn checked_add(&self, other: Amount) -> Option<Self> {
        self.0.checked_add(other.0).map(Self::of)
    }

    pub fn checked_sub(&self, other: Amount) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self::of)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Self::of(self.0.abs())
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::of(value)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        Amount::of(self.0 + other.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, other: Amount) -> Amount {
        Amount::of(self.0 - other.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
