//! Integer Rupiah price representation.
//!
//! All prices in the marketplace are whole-Rupiah amounts (Rupiah has no
//! circulating fractional unit), so a price is an `i64` count of the minor
//! currency unit. Arithmetic is plain integer arithmetic; display formatting
//! follows the Indonesian convention of dot-separated thousands
//! (`Rp 129.000`).

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A price in Rupiah minor units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole-Rupiah amount.
    #[must_use]
    pub const fn idr(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Whether this price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * i64::from(rhs))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Price {
    /// Format as `Rp 1.234.567` with dot-separated thousands.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let negative = self.0 < 0;
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i).is_multiple_of(3) {
                grouped.push('.');
            }
            grouped.push(c);
        }
        if negative {
            write!(f, "-Rp {grouped}")
        } else {
            write!(f, "Rp {grouped}")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Price::idr(100_000);
        let b = Price::idr(50_000);
        assert_eq!(a + b, Price::idr(150_000));
        assert_eq!(a - b, Price::idr(50_000));
        assert_eq!(a * 2, Price::idr(200_000));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::idr(1), Price::idr(2), Price::idr(3)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::idr(6));
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(Price::idr(0).to_string(), "Rp 0");
        assert_eq!(Price::idr(500).to_string(), "Rp 500");
        assert_eq!(Price::idr(22_000).to_string(), "Rp 22.000");
        assert_eq!(Price::idr(1_234_567).to_string(), "Rp 1.234.567");
        assert_eq!(Price::idr(-50_000).to_string(), "-Rp 50.000");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Price::idr(22_000)).unwrap();
        assert_eq!(json, "22000");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Price::idr(22_000));
    }
}
