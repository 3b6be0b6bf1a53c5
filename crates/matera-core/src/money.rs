//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, plus the
//! storefront price formatter (es-AR).
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many storefronts:                                                   │
//! │    $ 10,00 / 3 = $ 3,33 (×3 = $ 9,99)  → Lost $ 0,01!                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    1000 centavos / 3 = 333 centavos (×3 = 999 centavos)                 │
//! │    We KNOW we lost 1 centavo, and handle it explicitly                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Display (es-AR)
//! Prices are shown the way Argentine shops write them: `.` groups thousands,
//! `,` separates centavos, and the symbol is followed by a space. Whole-peso
//! amounts omit the centavo part.
//! ```text
//! Money::from_pesos(45_000)        → "$ 45.000"
//! Money::from_centavos(4_500_050)  → "$ 45.000,50"
//! Money::from_centavos(-550)       → "-$ 5,50"
//! ```
//!
//! ## Usage
//! ```rust
//! use matera_core::money::Money;
//!
//! // Create from centavos (preferred) or whole pesos
//! let price = Money::from_pesos(45_000);
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // $ 90.000
//! let total = price + Money::from_pesos(500);    // $ 45.500
//!
//! // NEVER do this:
//! // let bad = Money::from_float(45000.50); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (centavos, ARS).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price ──┬──► CartLine.unit_price ──► line total               │
/// │                  │                                                      │
/// │                  └──► Displayed as "$ 45.000" in UI                     │
/// │                                                                         │
/// │  Cart.subtotal ──► Discount Resolution ──► Cart.total ──► Hand-off      │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use matera_core::money::Money;
    ///
    /// let price = Money::from_centavos(4_500_000); // Represents $ 45.000
    /// assert_eq!(price.centavos(), 4_500_000);
    /// ```
    ///
    /// ## Why Centavos?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// Storage, calculations, and the API all use centavos.
    /// Only display converts to pesos.
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Creates a Money value from whole pesos.
    ///
    /// Catalog prices are quoted in whole pesos, so this is the usual
    /// constructor at the catalog boundary.
    ///
    /// ## Example
    /// ```rust
    /// use matera_core::money::Money;
    ///
    /// let price = Money::from_pesos(45_000);
    /// assert_eq!(price.centavos(), 4_500_000);
    /// ```
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos * 100)
    }

    /// Returns the value in centavos (smallest currency unit).
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion.
    ///
    /// ## Example
    /// ```rust
    /// use matera_core::money::Money;
    ///
    /// let price = Money::from_centavos(4_500_050);
    /// assert_eq!(price.pesos(), 45_000);
    ///
    /// let negative = Money::from_centavos(-550);
    /// assert_eq!(negative.pesos(), -5);
    /// ```
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use matera_core::money::Money;
    ///
    /// let price = Money::from_centavos(4_500_050);
    /// assert_eq!(price.centavos_part(), 50);
    ///
    /// let negative = Money::from_centavos(-550);
    /// assert_eq!(negative.centavos_part(), 50); // Absolute value
    /// ```
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use matera_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert_eq!(zero.centavos(), 0);
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// Quantities carry no upper bound, so the product saturates at the
    /// `i64` limits instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use matera_core::money::Money;
    ///
    /// let unit_price = Money::from_pesos(12_500);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total, Money::from_pesos(37_500));
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Yerba Rosamonte 1kg  $ 12.500
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: $ 37.500
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Adds `other`, saturating at the `i64` limits.
    ///
    /// Used for cart totals: line quantities are unbounded, so sums clamp
    /// instead of wrapping.
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtracts `other`, flooring the result at zero.
    ///
    /// Used for discounted totals: a discount can consume the whole
    /// subtotal but never drive the total negative.
    ///
    /// ## Example
    /// ```rust
    /// use matera_core::money::Money;
    ///
    /// let subtotal = Money::from_pesos(45_000);
    /// let discount = Money::from_pesos(60_000);
    /// assert_eq!(subtotal.sub_to_zero(discount), Money::zero());
    /// ```
    #[inline]
    pub const fn sub_to_zero(&self, other: Money) -> Self {
        let diff = self.0.saturating_sub(other.0);
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }
}

// =============================================================================
// Price Formatter
// =============================================================================

/// Formats a price for display, es-AR style.
///
/// ## Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  es-AR PRICE FORMAT                                                 │
/// │                                                                     │
/// │  • "$" followed by a space                                          │
/// │  • "." groups thousands of the peso part                            │
/// │  • "," separates centavos, shown only when non-zero                 │
/// │  • sign precedes the symbol                                         │
/// │                                                                     │
/// │  45.000 pesos        → "$ 45.000"                                   │
/// │  45.000,50 pesos     → "$ 45.000,50"                                │
/// │  -5,50 pesos         → "-$ 5,50"                                    │
/// │  0 pesos             → "$ 0"                                        │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Example
/// ```rust
/// use matera_core::money::{format_price, Money};
///
/// assert_eq!(format_price(Money::from_pesos(45_000)), "$ 45.000");
/// assert_eq!(format_price(Money::from_centavos(4_500_050)), "$ 45.000,50");
/// ```
pub fn format_price(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let pesos = group_thousands(amount.pesos().abs());
    let centavos = amount.centavos_part();

    if centavos == 0 {
        format!("{sign}$ {pesos}")
    } else {
        format!("{sign}$ {pesos},{centavos:02}")
    }
}

/// Groups the digits of a non-negative number with `.` every three digits.
fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }

    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display delegates to [`format_price`].
///
/// ## Note
/// This IS the storefront price format, not a debug rendering. The order
/// hand-off message and API display fields all go through here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_price(*self))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_centavos() {
        let money = Money::from_centavos(4_500_050);
        assert_eq!(money.centavos(), 4_500_050);
        assert_eq!(money.pesos(), 45_000);
        assert_eq!(money.centavos_part(), 50);
    }

    #[test]
    fn test_from_pesos() {
        let money = Money::from_pesos(45_000);
        assert_eq!(money.centavos(), 4_500_000);
        assert_eq!(money.centavos_part(), 0);
    }

    #[test]
    fn formats_whole_pesos_es_ar() {
        assert_eq!(format_price(Money::from_pesos(45_000)), "$ 45.000");
        assert_eq!(format_price(Money::from_pesos(999)), "$ 999");
        assert_eq!(format_price(Money::from_pesos(1_000)), "$ 1.000");
        assert_eq!(format_price(Money::from_pesos(1_234_567)), "$ 1.234.567");
        assert_eq!(format_price(Money::zero()), "$ 0");
    }

    #[test]
    fn formats_centavos_when_present() {
        assert_eq!(format_price(Money::from_centavos(4_500_050)), "$ 45.000,50");
        assert_eq!(format_price(Money::from_centavos(105)), "$ 1,05");
        assert_eq!(format_price(Money::from_centavos(-550)), "-$ 5,50");
    }

    #[test]
    fn display_matches_format_price() {
        let price = Money::from_pesos(12_500);
        assert_eq!(price.to_string(), format_price(price));
        assert_eq!(format!("{}", price), "$ 12.500");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_centavos(1000);
        let b = Money::from_centavos(500);

        assert_eq!((a + b).centavos(), 1500);
        assert_eq!((a - b).centavos(), 500);
        let result: Money = a * 3;
        assert_eq!(result.centavos(), 3000);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_pesos(12_500);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total, Money::from_pesos(37_500));
    }

    #[test]
    fn multiply_quantity_saturates_at_the_rails() {
        let unit_price = Money::from_pesos(45_000);

        assert_eq!(
            unit_price.multiply_quantity(i64::MAX),
            Money::from_centavos(i64::MAX)
        );
        assert_eq!(
            Money::from_centavos(-2).multiply_quantity(i64::MAX),
            Money::from_centavos(i64::MIN)
        );
    }

    #[test]
    fn saturating_add_caps_at_max() {
        let near_max = Money::from_centavos(i64::MAX - 5);

        assert_eq!(
            near_max.saturating_add(Money::from_centavos(100)),
            Money::from_centavos(i64::MAX)
        );
        // Small sums are untouched
        assert_eq!(
            Money::from_centavos(1000).saturating_add(Money::from_centavos(500)),
            Money::from_centavos(1500)
        );
    }

    #[test]
    fn sub_to_zero_floors_at_zero() {
        let subtotal = Money::from_pesos(45_000);

        assert_eq!(
            subtotal.sub_to_zero(Money::from_pesos(40_000)),
            Money::from_pesos(5_000)
        );
        assert_eq!(subtotal.sub_to_zero(Money::from_pesos(60_000)), Money::zero());
        assert_eq!(subtotal.sub_to_zero(subtotal), Money::zero());
    }

    #[test]
    fn ordering_supports_clamping() {
        let subtotal = Money::from_pesos(45_000);
        let oversized = Money::from_pesos(60_000);

        // min() is how discount resolution clamps to the subtotal
        assert_eq!(oversized.min(subtotal), subtotal);
        assert_eq!(Money::from_pesos(1_000).min(subtotal), Money::from_pesos(1_000));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_centavos(100);
        assert!(positive.is_positive());

        let negative = Money::from_centavos(-100);
        assert!(negative.is_negative());
    }

    /// Documents the intentional precision loss when splitting amounts.
    #[test]
    fn test_division_precision_loss_documented() {
        let thousand = Money::from_centavos(1000);
        let one_third = Money::from_centavos(1000 / 3); // 333 centavos
        let reconstructed: Money = one_third * 3; // 999 centavos

        assert_eq!(reconstructed.centavos(), 999);
        let lost = thousand - reconstructed;
        assert_eq!(lost.centavos(), 1);
    }
}
