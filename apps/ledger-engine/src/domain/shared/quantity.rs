//! Quantity value object for order and holding quantities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::domain::shared::DomainError;

/// A quantity of a security, in whole units.
///
/// Orders and holdings in this engine deal in integral units only;
/// fractional quantities are rejected at the boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    /// Zero quantity.
    pub const ZERO: Self = Self(0);

    /// Create a new Quantity.
    #[must_use]
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Get the inner unit count.
    #[must_use]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns true if this quantity is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checked addition; `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Validate quantity for order placement or amendment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if the quantity is not strictly
    /// positive.
    pub fn validate_for_order(&self) -> Result<(), DomainError> {
        if self.0 <= 0 {
            return Err(DomainError::InvalidValue {
                field: "quantity".to_string(),
                message: format!("must be a positive number of units, got {}", self.0),
            });
        }
        Ok(())
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Quantity {
    fn from(units: i64) -> Self {
        Self(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_new_and_units() {
        let q = Quantity::new(100);
        assert_eq!(q.units(), 100);
        assert_eq!(format!("{q}"), "100");
    }

    #[test]
    fn quantity_arithmetic() {
        let a = Quantity::new(60);
        let b = Quantity::new(40);
        assert_eq!(a + b, Quantity::new(100));
        assert_eq!(a - b, Quantity::new(20));
    }

    #[test]
    fn quantity_checked_add_overflow() {
        let a = Quantity::new(i64::MAX);
        assert!(a.checked_add(Quantity::new(1)).is_none());
        assert_eq!(
            Quantity::new(1).checked_add(Quantity::new(2)),
            Some(Quantity::new(3))
        );
    }

    #[test]
    fn validate_for_order_rejects_non_positive() {
        assert!(Quantity::new(0).validate_for_order().is_err());
        assert!(Quantity::new(-5).validate_for_order().is_err());
        assert!(Quantity::new(1).validate_for_order().is_ok());
    }

    #[test]
    fn serde_is_transparent() {
        let q = Quantity::new(42);
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, "42");

        let parsed: Quantity = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, q);
    }
}
