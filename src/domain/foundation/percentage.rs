//! Percentage value object (0-100 scale) used for fit scores.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Rounds a raw value half away from zero and clamps it into `[0, 100]`.
    ///
    /// Non-finite input maps to zero.
    pub fn from_rounded(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self::ZERO;
        }
        Self(raw.round().clamp(0.0, 100.0) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u8> for Percentage {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(pct: Percentage) -> Self {
        pct.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_new_clamps_to_100() {
        assert_eq!(Percentage::new(50).value(), 50);
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(255).value(), 100);
    }

    #[test]
    fn from_rounded_rounds_half_away_from_zero() {
        assert_eq!(Percentage::from_rounded(59.5).value(), 60);
        assert_eq!(Percentage::from_rounded(59.49).value(), 59);
        assert_eq!(Percentage::from_rounded(66.666).value(), 67);
    }

    #[test]
    fn from_rounded_clamps_out_of_range_values() {
        assert_eq!(Percentage::from_rounded(-4.0), Percentage::ZERO);
        assert_eq!(Percentage::from_rounded(121.0), Percentage::HUNDRED);
        assert_eq!(Percentage::from_rounded(f64::NAN), Percentage::ZERO);
        assert_eq!(Percentage::from_rounded(f64::INFINITY), Percentage::ZERO);
    }

    #[test]
    fn percentage_displays_with_sign() {
        assert_eq!(format!("{}", Percentage::new(75)), "75%");
        assert_eq!(format!("{}", Percentage::default()), "0%");
    }

    #[test]
    fn percentage_serializes_transparently() {
        let json = serde_json::to_string(&Percentage::new(42)).unwrap();
        assert_eq!(json, "42");
        let pct: Percentage = serde_json::from_str("75").unwrap();
        assert_eq!(pct.value(), 75);
    }

    #[test]
    fn percentage_deserialization_clamps_to_100() {
        let pct: Percentage = serde_json::from_str("250").unwrap();
        assert_eq!(pct, Percentage::HUNDRED);
    }
}
