use std::fmt;

/// Integral count of units held or traded
///
/// Signed so that an unvalidated oversell stays representable instead of
/// wrapping or panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Quantity(i64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn new(value: i64) -> Self {
        Quantity(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// `None` when the sum leaves the `i64` range
    pub fn checked_add(&self, other: Quantity) -> Option<Self> {
        self.0.checked_add(other.0).map(Quantity)
    }

    pub fn checked_sub(&self, other: Quantity) -> Option<Self> {
        self.0.checked_sub(other.0).map(Quantity)
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Quantity(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_subtract() {
        let held = Quantity::new(100).checked_add(Quantity::new(50)).unwrap();
        assert_eq!(held, Quantity::new(150));
        assert_eq!(held.checked_sub(Quantity::new(150)), Some(Quantity::ZERO));
    }

    #[test]
    fn test_oversell_goes_negative() {
        let held = Quantity::new(10).checked_sub(Quantity::new(20)).unwrap();
        assert!(held.is_negative());
        assert_eq!(held.value(), -10);
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(Quantity::new(i64::MAX).checked_add(Quantity::new(1)), None);
        assert_eq!(Quantity::new(-2).checked_sub(Quantity::new(i64::MAX)), None);
    }
}
