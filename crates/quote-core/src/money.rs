//! # Money Module
//!
//! Provides the `Yen` type for handling quote amounts safely.
//!
//! ## Why Integer Yen?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The yen has no minor unit in everyday pricing, so every amount in     │
//! │  the catalog is a whole number. Keeping it in i64 means:               │
//! │                                                                         │
//! │    base + extra pages × rate + options                                 │
//! │                                                                         │
//! │  is exact for every reachable estimate. No floats, no rounding.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quote_core::money::Yen;
//!
//! let base = Yen::from_yen(300_000);
//! let extra = Yen::from_yen(11_000).multiply_quantity(7);
//! let total = base + extra;
//!
//! assert_eq!(total.to_string(), "¥377,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Yen Type
// =============================================================================

/// A monetary amount in whole yen.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never wraps for realistic quotes, and the
///   sign is only ever non-negative for catalog-derived values
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Yen(i64);

impl Yen {
    /// Creates an amount from whole yen.
    #[inline]
    pub const fn from_yen(yen: i64) -> Self {
        Yen(yen)
    }

    /// Returns the amount in whole yen.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero yen.
    #[inline]
    pub const fn zero() -> Self {
        Yen(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the amount is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the amount is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit rate by a quantity (e.g., per-page rate × pages).
    /// Saturates at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use quote_core::money::Yen;
    ///
    /// let rate = Yen::from_yen(12_000);
    /// assert_eq!(rate.multiply_quantity(3).amount(), 36_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Yen(self.0.saturating_mul(qty as i64))
    }

    /// Formats the absolute amount with comma thousands separators,
    /// without the currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use quote_core::money::Yen;
    ///
    /// assert_eq!(Yen::from_yen(1_234_567).grouped(), "1,234,567");
    /// assert_eq!(Yen::from_yen(999).grouped(), "999");
    /// ```
    pub fn grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }

        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the amount the way the estimator shows it: `¥417,000`.
impl fmt::Display for Yen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}¥{}", sign, self.grouped())
    }
}

impl Default for Yen {
    fn default() -> Self {
        Yen::zero()
    }
}

/// Addition saturates at the `i64` bounds.
impl Add for Yen {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Yen(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Yen {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Multiplication by a page count.
impl Mul<u32> for Yen {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Yen {
    fn sum<I: Iterator<Item = Yen>>(iter: I) -> Self {
        iter.fold(Yen::zero(), |acc, yen| acc + yen)
    }
}

impl<'a> Sum<&'a Yen> for Yen {
    fn sum<I: Iterator<Item = &'a Yen>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
