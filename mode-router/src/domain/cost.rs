//! Path cost type.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A finite, non-negative traversal cost.
///
/// The search relies on costs never being negative, so this type rejects
/// negative, NaN and infinite values at construction. Unlike a bare `f64`,
/// `Cost` is totally ordered and can key a priority queue directly.
///
/// # Examples
///
/// ```
/// use mode_router::domain::Cost;
///
/// let c = Cost::new(2.5).unwrap();
/// assert_eq!(c.value(), 2.5);
///
/// assert!(Cost::new(-1.0).is_err());
/// assert!(Cost::new(f64::NAN).is_err());
/// assert!(Cost::new(f64::INFINITY).is_err());
/// ```
#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Cost(f64);

impl Cost {
    /// Zero cost.
    pub const ZERO: Cost = Cost(0.0);

    /// Largest representable cost. Sums saturate here.
    pub const MAX: Cost = Cost(f64::MAX);

    /// Create a cost, rejecting negative and non-finite values.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidCost { value });
        }
        // Normalise -0.0 so equal costs compare equal under total ordering.
        Ok(Cost(value + 0.0))
    }

    /// Create a cost from a whole number of units.
    pub const fn from_units(units: u32) -> Self {
        Cost(units as f64)
    }

    /// Returns the cost as a float.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Cost {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Cost::new(value)
    }
}

impl From<Cost> for f64 {
    fn from(cost: Cost) -> Self {
        cost.0
    }
}

impl From<u32> for Cost {
    fn from(value: u32) -> Self {
        Cost::from_units(value)
    }
}

/// Saturating addition: a sum that would overflow to infinity is `Cost::MAX`.
impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost((self.0 + rhs.0).min(f64::MAX))
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Debug for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cost({})", self.0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_positive() {
        assert_eq!(Cost::new(0.0).unwrap(), Cost::ZERO);
        assert_eq!(Cost::new(12.0).unwrap().value(), 12.0);
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert_eq!(
            Cost::new(-0.5),
            Err(DomainError::InvalidCost { value: -0.5 })
        );
        assert!(Cost::new(f64::NAN).is_err());
        assert!(Cost::new(f64::INFINITY).is_err());
        assert!(Cost::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn negative_zero_equals_zero() {
        assert_eq!(Cost::new(-0.0).unwrap(), Cost::ZERO);
    }

    #[test]
    fn addition() {
        let sum = Cost::from(2) + Cost::from(3);
        assert_eq!(sum, Cost::from(5));
    }

    #[test]
    fn addition_saturates() {
        let big = Cost::new(1e308).unwrap();
        let sum = big + big;
        assert_eq!(sum, Cost::MAX);
        assert!(sum.value().is_finite());
        assert_eq!(Cost::MAX + Cost::MAX, Cost::MAX);
        assert_eq!(Cost::MAX + Cost::ZERO, Cost::MAX);
    }

    #[test]
    fn ordering() {
        assert!(Cost::from(1) < Cost::from(2));
        assert_eq!(Cost::from(4).max(Cost::from(3)), Cost::from(4));
    }

    #[test]
    fn display() {
        assert_eq!(Cost::new(1.5).unwrap().to_string(), "1.5");
        assert_eq!(format!("{:?}", Cost::from(7)), "Cost(7)");
    }

    #[test]
    fn deserialize_rejects_negative() {
        let ok: Cost = serde_json::from_str("3.5").unwrap();
        assert_eq!(ok.value(), 3.5);

        let err = serde_json::from_str::<Cost>("-1").unwrap_err();
        assert!(err.to_string().contains("invalid cost"));
    }
}
