//! # Money Module
//!
//! Provides the `Money` type and the two-decimal rounding every pricing step
//! goes through.
//!
//! ## Why Decimal, Not Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TAX-INCLUSIVE PRICES NEED DIVISION                                     │
//! │                                                                         │
//! │  Entered price:   118.00 (includes 18% tax)                            │
//! │  Actual price:    118.00 / 1.18 = 100.00                               │
//! │                                                                         │
//! │  In f64:          118 / 1.18 = 100.00000000000001  ❌                   │
//! │  In cents (i64):  no exact way to divide by 1.18                        │
//! │  In Decimal:      118 / 1.18 = 100  ✅                                  │
//! │                                                                         │
//! │  Every intermediate result is then rounded with round2() so totals     │
//! │  drift exactly as the invoice screen shows them.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quire_core::money::{round2, Money};
//! use rust_decimal::Decimal;
//!
//! let price = Money::parse_lenient("118");
//! let actual = price.divide_out_tax(Decimal::from(18));
//! assert_eq!(actual.to_string(), "100.00");
//!
//! // Bad input coerces to zero instead of failing.
//! assert!(Money::parse_lenient("abc").is_zero());
//! assert_eq!(round2(Decimal::new(12345, 3)), Decimal::new(1235, 2));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::MAX_INPUT_MAGNITUDE;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds to 2 decimal places, half away from zero.
///
/// `1.005 → 1.01`, `2.345 → 2.35`, `-0.125 → -0.13`.
///
/// Applied after every derived value, not only at output time. Totals are
/// sums of already-rounded parts, so a document can differ by a cent from
/// the same numbers rounded once at the end.
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parses numeric form input the way the browser's `parseFloat(x) || 0` does.
///
/// - Leading/trailing whitespace is ignored
/// - The longest numeric prefix is used (`"12.5kg"` → `12.5`)
/// - Empty, non-numeric, `NaN`, `Infinity` → `0`
/// - Magnitudes above [`MAX_INPUT_MAGNITUDE`] → `0`
pub fn parse_decimal_lenient(raw: &str) -> Decimal {
    let prefix = numeric_prefix(raw.trim());
    if prefix.is_empty() {
        return Decimal::ZERO;
    }

    let (negative, body) = match prefix.as_bytes()[0] {
        b'-' => (true, &prefix[1..]),
        b'+' => (false, &prefix[1..]),
        _ => (false, prefix),
    };
    let body = if body.starts_with('.') {
        format!("0{body}")
    } else {
        body.to_string()
    };

    let magnitude = Decimal::from_str(&body)
        .or_else(|_| Decimal::from_scientific(&body))
        .unwrap_or(Decimal::ZERO);
    let parsed = if negative { -magnitude } else { magnitude };

    if parsed.abs() > MAX_INPUT_MAGNITUDE {
        return Decimal::ZERO;
    }
    parsed.normalize()
}

/// Returns the longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
/// A `.` with no digits after it is left out, so `"7."` yields `"7"`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts if at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the document's currency.
///
/// ## Design Decisions
/// - **Decimal, signed**: discounts can push a total below zero
/// - **Not auto-rounded**: user-entered prices keep their precision; every
///   derived amount is rounded explicitly with [`Money::round2`]
/// - **Serialized as a string**: `"118.00"`, so the browser never sees a float
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CatalogProduct.unit_price ──► LineItem.unit_price (tax-inclusive)     │
/// │                                     │                                   │
/// │                                     ├──► actual_unit_price (ex-tax)     │
/// │                                     ├──► tax_amount_per_unit            │
/// │                                     └──► line_total                     │
/// │                                                                         │
/// │  DocumentCharges.shipping_cost ──► DocumentTotals.total                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps a decimal amount as-is.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use quire_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(11800).to_string(), "118.00");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Parses form input, coercing anything unusable to zero.
    ///
    /// See [`parse_decimal_lenient`] for the exact rules.
    pub fn parse_lenient(raw: &str) -> Self {
        Money(parse_decimal_lenient(raw))
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns this amount rounded with [`round2`].
    #[inline]
    pub fn round2(self) -> Self {
        Money(round2(self.0))
    }

    /// Multiplies by a quantity or factor without rounding.
    ///
    /// A product too large for `Decimal` is unusable like any other bad
    /// input and comes out as 0.
    #[inline]
    pub fn times(self, factor: Decimal) -> Self {
        Money(self.0.checked_mul(factor).unwrap_or(Decimal::ZERO))
    }

    /// Returns `percent`% of this amount, unrounded. Overflow gives 0 as in
    /// [`Money::times`].
    ///
    /// ## Example
    /// ```rust
    /// use quire_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let shipping = Money::from_cents(5000);
    /// assert_eq!(shipping.percent(Decimal::from(10)).round2(), Money::from_cents(500));
    /// ```
    #[inline]
    pub fn percent(self, percent: Decimal) -> Self {
        Money(self.times(percent).0 / Decimal::ONE_HUNDRED)
    }

    /// Splits the tax out of a tax-inclusive amount, rounded to 2dp.
    ///
    /// `amount / (1 + percent / 100)`
    ///
    /// ## User Workflow
    /// ```text
    /// Price entered: 118.00, tax 18%
    ///      │
    ///      ▼
    /// divide_out_tax(18) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Actual unit price: 100.00
    /// ```
    pub fn divide_out_tax(self, percent: Decimal) -> Self {
        let divisor = Decimal::ONE + percent / Decimal::ONE_HUNDRED;
        if divisor.is_zero() {
            // Only reachable with a -100% rate, which the rate table refuses.
            return Money::zero();
        }
        Money(round2(self.0.checked_div(divisor).unwrap_or(Decimal::ZERO)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Always two decimals, e.g. `118.00`, `-3.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shown = round2(self.0);
        shown.rescale(2);
        write!(f, "{}", shown)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
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
