//! Decimal amounts to integer minor units.
//!
//! The provider expects every amount as an integer in the currency's minor
//! unit (cents for USD, pence for GBP, whole yen for JPY).

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

/// Currencies without a minor unit.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "VND", "VUV", "XAF",
    "XOF", "XPF",
];

/// Currencies with three decimal places.
const THREE_DECIMAL_CURRENCIES: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Returns the ISO 4217 minor unit exponent for a currency code.
///
/// Unknown codes use two decimal places.
///
/// # Examples
///
/// ```
/// use klarna_order_bridge::money::minor_unit_exponent;
///
/// assert_eq!(minor_unit_exponent("usd"), 2);
/// assert_eq!(minor_unit_exponent("JPY"), 0);
/// assert_eq!(minor_unit_exponent("KWD"), 3);
/// ```
#[must_use]
pub fn minor_unit_exponent(currency: &str) -> u32 {
    let code = currency.to_ascii_uppercase();
    if ZERO_DECIMAL_CURRENCIES.contains(&code.as_str()) {
        0
    } else if THREE_DECIMAL_CURRENCIES.contains(&code.as_str()) {
        3
    } else {
        2
    }
}

/// Converts a decimal amount into integer minor units, rounding half away from zero.
///
/// Amounts outside the `i64` range saturate.
///
/// # Examples
///
/// ```
/// use klarna_order_bridge::money::to_minor_units;
/// use rust_decimal::Decimal;
///
/// assert_eq!(to_minor_units(Decimal::new(1999, 2), "USD"), 1999);
/// assert_eq!(to_minor_units(Decimal::new(1005, 3), "EUR"), 101);
/// assert_eq!(to_minor_units(Decimal::new(1500, 0), "JPY"), 1500);
/// ```
#[must_use]
pub fn to_minor_units(amount: Decimal, currency: &str) -> i64 {
    let factor = Decimal::from(10_i64.pow(minor_unit_exponent(currency)));
    let saturated = if amount.is_sign_negative() { i64::MIN } else { i64::MAX };

    amount
        .checked_mul(factor)
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .unwrap_or(saturated)
}

/// A decimal amount tagged with its currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in major units.
    pub amount: Decimal,
    /// Currency code (ISO 4217).
    pub currency: String,
}

impl Money {
    /// Creates a new amount.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self { amount, currency: currency.into() }
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub fn cents(&self) -> i64 {
        to_minor_units(self.amount, &self.currency)
    }
}
