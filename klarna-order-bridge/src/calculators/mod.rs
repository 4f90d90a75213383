//! Region-specific amount calculation.
//!
//! A [`Region`] token selects one of two calculators: `"us"` selects
//! [`UsOrderCalculator`], every other token selects [`UkOrderCalculator`].
//! The catch-all is intentional; the UK calculator derives its locale from
//! the token, so European regions share it.
//!
//! ```text
//! Region ──► Strategy ─┬─ locale(region)
//!                      ├─ line_item_strategy() ──► LineCalculator
//!                      ├─ shipment_strategy()  ──► LineCalculator
//!                      └─ adjust_with(order, build)
//! ```

mod uk;
mod us;

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use tracing::debug;

pub use self::{
    uk::{UkLineCalculator, UkOrderCalculator},
    us::{UsLineCalculator, UsOrderCalculator},
};
use crate::{
    models::{LineItem, Order, Shipment},
    money::to_minor_units,
    serializer::payload::RequestPayload,
};

/// Normalized region token.
///
/// Tokens are trimmed and lower-cased, so `"US"`, `" us "` and `"Us"` are
/// the same region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region(String);

impl Region {
    /// Token of the United States region.
    pub const US: &'static str = "us";

    /// Creates a region from a token.
    ///
    /// # Examples
    ///
    /// ```
    /// use klarna_order_bridge::calculators::Region;
    ///
    /// assert!(Region::new("US").is_us());
    /// assert!(!Region::new("de").is_us());
    /// ```
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self(token.trim().to_ascii_lowercase())
    }

    /// Returns the normalized token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the United States region.
    #[must_use]
    pub fn is_us(&self) -> bool {
        self.0 == Self::US
    }

    /// Returns the ISO 3166-1 alpha-2 country code for the region.
    ///
    /// `uk` maps to `GB`; other tokens are upper-cased as-is.
    #[must_use]
    pub fn country_code(&self) -> String {
        match self.0.as_str() {
            "uk" => "GB".to_owned(),
            other => other.to_ascii_uppercase(),
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self(Self::US.to_owned())
    }
}

impl From<&str> for Region {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Amounts of one order line in major units, as read from the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAmounts {
    /// Quantity.
    pub quantity: u32,
    /// Unit price.
    pub unit_price: Decimal,
    /// Discount as a positive amount.
    pub discount: Decimal,
    /// Tax contained in the price.
    pub included_tax: Decimal,
    /// Tax charged on top of the price.
    pub additional_tax: Decimal,
}

impl LineAmounts {
    /// Reads the amounts of a line item.
    #[must_use]
    pub fn from_line_item(item: &LineItem) -> Self {
        Self {
            quantity: item.quantity,
            unit_price: item.price,
            discount: item.promo_total.abs(),
            included_tax: item.included_tax_total,
            additional_tax: item.additional_tax_total,
        }
    }

    /// Reads the amounts of a shipment, which always has quantity one.
    #[must_use]
    pub fn from_shipment(shipment: &Shipment) -> Self {
        Self {
            quantity: 1,
            unit_price: shipment.cost,
            discount: shipment.promo_total.abs(),
            included_tax: shipment.included_tax_total,
            additional_tax: shipment.additional_tax_total,
        }
    }
}

/// Calculated amounts of one order line in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTotals {
    /// Unit price.
    pub unit_price: i64,
    /// Tax rate in hundredths of a percent.
    pub tax_rate: i64,
    /// Line total.
    pub total_amount: i64,
    /// Discount.
    pub total_discount_amount: i64,
    /// Tax.
    pub total_tax_amount: i64,
}

/// Computes the minor-unit amounts of a single order line.
pub trait LineCalculator: fmt::Debug + Send + Sync {
    /// Calculates line totals in the given currency.
    fn calculate(&self, amounts: &LineAmounts, currency: &str) -> LineTotals;
}

/// Region policy for a whole order.
pub trait AmountCalculator {
    /// Returns the locale for the region (e.g., `en-US`).
    fn locale(&self, region: &Region) -> String;

    /// Returns the calculator applied to line items.
    fn line_item_strategy(&self) -> &dyn LineCalculator;

    /// Returns the calculator applied to shipments.
    fn shipment_strategy(&self) -> &dyn LineCalculator;

    /// Builds the payload with `build` and applies order-level adjustments to it.
    fn adjust_with<F>(&self, order: &Order, build: F) -> RequestPayload
    where
        F: FnOnce() -> RequestPayload;
}

/// Closed set of region calculators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// United States rules.
    Us(UsOrderCalculator),
    /// United Kingdom and European rules.
    Uk(UkOrderCalculator),
}

impl Strategy {
    /// Selects the calculator for a region.
    ///
    /// `skip_personal_data` only affects the UK calculator.
    #[must_use]
    pub fn for_region(region: &Region, skip_personal_data: bool) -> Self {
        let strategy = if region.is_us() {
            Self::Us(UsOrderCalculator::new())
        } else {
            Self::Uk(UkOrderCalculator::new(skip_personal_data))
        };
        debug!(region = %region, strategy = strategy.name(), "selected amount calculator");
        strategy
    }

    /// Returns a short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Us(_) => "us",
            Self::Uk(_) => "uk",
        }
    }
}

impl AmountCalculator for Strategy {
    fn locale(&self, region: &Region) -> String {
        match self {
            Self::Us(calculator) => calculator.locale(region),
            Self::Uk(calculator) => calculator.locale(region),
        }
    }

    fn line_item_strategy(&self) -> &dyn LineCalculator {
        match self {
            Self::Us(calculator) => calculator.line_item_strategy(),
            Self::Uk(calculator) => calculator.line_item_strategy(),
        }
    }

    fn shipment_strategy(&self) -> &dyn LineCalculator {
        match self {
            Self::Us(calculator) => calculator.shipment_strategy(),
            Self::Uk(calculator) => calculator.shipment_strategy(),
        }
    }

    fn adjust_with<F>(&self, order: &Order, build: F) -> RequestPayload
    where
        F: FnOnce() -> RequestPayload,
    {
        match self {
            Self::Us(calculator) => calculator.adjust_with(order, build),
            Self::Uk(calculator) => calculator.adjust_with(order, build),
        }
    }
}

/// Derives a tax rate in hundredths of a percent from tax and net amounts.
///
/// Returns zero when the net amount is not positive.
fn tax_rate(tax: i64, net: i64) -> i64 {
    if net <= 0 || tax <= 0 {
        return 0;
    }
    let rate = Decimal::from(tax) * Decimal::from(10_000) / Decimal::from(net);
    rate.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero).to_i64().unwrap_or(0)
}

/// Shared line arithmetic.
///
/// `surcharge` is tax charged on top of the price. It is spread over the
/// unit price so that `total_amount == quantity * unit_price - total_discount_amount`
/// holds for every line.
fn line_totals(amounts: &LineAmounts, currency: &str, tax: i64, surcharge: i64) -> LineTotals {
    let quantity = i64::from(amounts.quantity.max(1));
    let gross = to_minor_units(amounts.unit_price, currency)
        .saturating_mul(quantity)
        .saturating_add(surcharge);
    let unit_price = (Decimal::from(gross) / Decimal::from(quantity))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(gross);
    let total_discount_amount = to_minor_units(amounts.discount, currency);
    let total_amount =
        unit_price.saturating_mul(i64::from(amounts.quantity)).saturating_sub(total_discount_amount);

    LineTotals {
        unit_price,
        tax_rate: tax_rate(tax, total_amount.saturating_sub(tax)),
        total_amount,
        total_discount_amount,
        total_tax_amount: tax,
    }
}

/// Sums the tax of every order line.
fn order_tax_amount(payload: &RequestPayload) -> i64 {
    payload.order_lines.iter().fold(0_i64, |sum, line| sum.saturating_add(line.total_tax_amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_normalization() {
        assert_eq!(Region::new(" US ").as_str(), "us");
        assert_eq!(Region::from("Uk").as_str(), "uk");
        assert_eq!(Region::default().as_str(), "us");
    }

    #[test]
    fn test_region_country_code() {
        assert_eq!(Region::new("uk").country_code(), "GB");
        assert_eq!(Region::new("de").country_code(), "DE");
        assert_eq!(Region::new("us").country_code(), "US");
    }

    #[test]
    fn test_strategy_selection() {
        assert!(matches!(Strategy::for_region(&Region::new("US"), false), Strategy::Us(_)));
        assert!(matches!(Strategy::for_region(&Region::new("us"), true), Strategy::Us(_)));
        assert!(matches!(Strategy::for_region(&Region::new("uk"), false), Strategy::Uk(_)));
        assert!(matches!(Strategy::for_region(&Region::new("se"), false), Strategy::Uk(_)));
    }

    #[test]
    fn test_uk_strategy_carries_flag() {
        let Strategy::Uk(calculator) = Strategy::for_region(&Region::new("uk"), true) else {
            panic!("expected UK strategy");
        };
        assert!(calculator.skip_personal_data());
    }

    #[test]
    fn test_tax_rate() {
        assert_eq!(tax_rate(200, 1000), 2000);
        assert_eq!(tax_rate(725, 10_000), 725);
        assert_eq!(tax_rate(0, 1000), 0);
        assert_eq!(tax_rate(100, 0), 0);
    }

    #[test]
    fn test_surcharge_folded_into_unit_price() {
        let amounts = LineAmounts {
            quantity: 1,
            unit_price: Decimal::new(1000, 2),
            discount: Decimal::ZERO,
            included_tax: Decimal::ZERO,
            additional_tax: Decimal::new(73, 2),
        };

        let totals = line_totals(&amounts, "USD", 73, 73);

        assert_eq!(totals.unit_price, 1073);
        assert_eq!(totals.total_amount, 1073);
        assert_eq!(totals.total_tax_amount, 73);
    }

    #[test]
    fn test_surcharge_rounds_per_unit_and_keeps_line_rule() {
        let amounts = LineAmounts {
            quantity: 3,
            unit_price: Decimal::new(500, 2),
            discount: Decimal::new(100, 2),
            included_tax: Decimal::ZERO,
            additional_tax: Decimal::new(100, 2),
        };

        let totals = line_totals(&amounts, "USD", 100, 100);

        assert_eq!(totals.unit_price, 533);
        assert_eq!(totals.total_amount, 3 * 533 - 100);
    }

    #[test]
    fn test_zero_quantity_line() {
        let amounts = LineAmounts {
            quantity: 0,
            unit_price: Decimal::new(500, 2),
            discount: Decimal::ZERO,
            included_tax: Decimal::ZERO,
            additional_tax: Decimal::ZERO,
        };

        let totals = line_totals(&amounts, "USD", 0, 0);

        assert_eq!(totals.unit_price, 500);
        assert_eq!(totals.total_amount, 0);
    }

    #[test]
    fn test_line_amounts_from_shipment() {
        let shipment = Shipment {
            number: "H1".to_owned(),
            shipping_method: crate::models::ShippingMethod { name: "UPS".to_owned() },
            cost: Decimal::new(500, 2),
            promo_total: Decimal::new(-100, 2),
            included_tax_total: Decimal::ZERO,
            additional_tax_total: Decimal::ZERO,
            tracking: None,
            tracking_url: None,
        };

        let amounts = LineAmounts::from_shipment(&shipment);
        assert_eq!(amounts.quantity, 1);
        assert_eq!(amounts.discount, Decimal::new(100, 2));
    }
}
