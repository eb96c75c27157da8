//! # Money Module
//!
//! Provides the `Money` type and the price-string parser used for every
//! cart total.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:   249.99 + 0.01 = 250.00000000000003                      │
//! │                 → is that ≥ 250? Free delivery depends on it!           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    24999 paise + 1 paisa = 25000 paise  → exactly ₹250.00               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Prices Are Strings
//! Catalog prices arrive as display strings ("₹199"). The cart keeps the
//! string verbatim and converts on demand with [`Money::from_price_str`],
//! which never fails: an unreadable price is worth ₹0.
//!
//! ## Usage
//! ```rust
//! use lpi_core::money::Money;
//!
//! let price = Money::from_price_str("₹199");
//! assert_eq!(price.paise(), 19900);
//!
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.to_string(), "₹398.00");
//! assert_eq!(line_total.display_compact(), "₹398");
//!
//! assert_eq!(Money::from_price_str("N/A"), Money::zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount stored as paise (1/100 rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences such as "₹X more for free delivery" can
///   be computed without special cases
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees, saturating at the `i64`
    /// bounds.
    ///
    /// ## Example
    /// ```rust
    /// use lpi_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(250).paise(), 25000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(100))
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// Saturates instead of overflowing; no real cart gets near `i64::MAX`
    /// paise but the arithmetic must stay total.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Parses a catalog price string.
    ///
    /// ## Rules
    /// 1. Remove the first `₹`, then surrounding whitespace
    /// 2. Read the longest leading number: optional sign, digits, optional
    ///    fraction
    /// 3. Anything after the number is ignored ("120/plate" → 120,
    ///    "1,299" → 1)
    /// 4. Fractions finer than a paisa round half away from zero
    ///
    /// Returns `None` when there is no leading number at all.
    ///
    /// ## Example
    /// ```rust
    /// use lpi_core::money::Money;
    ///
    /// assert_eq!(Money::parse_price("₹199"), Some(Money::from_paise(19900)));
    /// assert_eq!(Money::parse_price(" ₹ 249.99 "), Some(Money::from_paise(24999)));
    /// assert_eq!(Money::parse_price("₹1,299"), Some(Money::from_rupees(1)));
    /// assert_eq!(Money::parse_price("N/A"), None);
    /// ```
    pub fn parse_price(price: &str) -> Option<Money> {
        let stripped = price.replacen(CURRENCY_SYMBOL, "", 1);
        let mut chars = stripped.trim().chars().peekable();

        let negative = match chars.peek() {
            Some('-') => {
                chars.next();
                true
            }
            Some('+') => {
                chars.next();
                false
            }
            _ => false,
        };

        let mut rupees: i64 = 0;
        let mut saw_digit = false;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            rupees = rupees.checked_mul(10)?.checked_add(i64::from(d))?;
            saw_digit = true;
            chars.next();
        }

        // Fraction: keep two digits, use the third for rounding.
        let mut fraction: i64 = 0;
        let mut fraction_digits = 0;
        let mut round_up = false;
        if chars.peek() == Some(&'.') {
            chars.next();
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                match fraction_digits {
                    0 | 1 => fraction = fraction * 10 + i64::from(d),
                    2 => round_up = d >= 5,
                    _ => {}
                }
                fraction_digits += 1;
                saw_digit = true;
                chars.next();
            }
        }

        if !saw_digit {
            return None;
        }

        if fraction_digits == 1 {
            fraction *= 10;
        }

        let mut paise = rupees.checked_mul(100)?.checked_add(fraction)?;
        if round_up {
            paise = paise.checked_add(1)?;
        }

        Some(Money(if negative { -paise } else { paise }))
    }

    /// Parses a catalog price string, treating anything unreadable as ₹0.
    ///
    /// This is the rule every subtotal uses.
    pub fn from_price_str(price: &str) -> Money {
        Money::parse_price(price).unwrap_or_default()
    }

    /// Rounds to the nearest whole rupee, halves away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use lpi_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(1).round_to_rupee(), Money::zero());
    /// assert_eq!(Money::from_paise(7050).round_to_rupee(), Money::from_rupees(71));
    /// ```
    pub const fn round_to_rupee(&self) -> Self {
        let whole = self.0 / 100;
        let rest = self.0 % 100;
        let rounded = if rest >= 50 {
            whole.saturating_add(1)
        } else if rest <= -50 {
            whole.saturating_sub(1)
        } else {
            whole
        };
        Money(rounded.saturating_mul(100))
    }

    /// Formats without trailing zero decimals: `₹398`, `₹12.5`, `₹12.55`.
    ///
    /// Used for per-line totals and the delivery charge in the order message.
    pub fn display_compact(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = self.rupees().abs();
        match self.paise_part() {
            0 => format!("{sign}{CURRENCY_SYMBOL}{whole}"),
            p if p % 10 == 0 => format!("{sign}{CURRENCY_SYMBOL}{whole}.{}", p / 10),
            p => format!("{sign}{CURRENCY_SYMBOL}{whole}.{p:02}"),
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal rupee display: `₹249.99`, `₹250.00`, `-₹5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            self.rupees().abs(),
            self.paise_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
