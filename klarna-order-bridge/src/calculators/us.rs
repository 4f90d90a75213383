//! United States amount rules.
//!
//! Prices exclude sales tax. Tax charged on top of a line is folded into its
//! unit price and reported as the line's tax amount.

use tracing::debug;

use super::{
    AmountCalculator, LineAmounts, LineCalculator, LineTotals, Region, line_totals,
    order_tax_amount,
};
use crate::{money::to_minor_units, models::Order, serializer::payload::RequestPayload};

/// Line calculator for tax-exclusive prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsLineCalculator;

impl LineCalculator for UsLineCalculator {
    fn calculate(&self, amounts: &LineAmounts, currency: &str) -> LineTotals {
        let tax = to_minor_units(amounts.additional_tax, currency);
        line_totals(amounts, currency, tax, tax)
    }
}

/// Order calculator for the United States.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsOrderCalculator {
    lines: UsLineCalculator,
}

impl UsOrderCalculator {
    /// Creates a new calculator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AmountCalculator for UsOrderCalculator {
    fn locale(&self, _region: &Region) -> String {
        "en-US".to_owned()
    }

    fn line_item_strategy(&self) -> &dyn LineCalculator {
        &self.lines
    }

    fn shipment_strategy(&self) -> &dyn LineCalculator {
        &self.lines
    }

    fn adjust_with<F>(&self, order: &Order, build: F) -> RequestPayload
    where
        F: FnOnce() -> RequestPayload,
    {
        let mut payload = build();
        let tax = order_tax_amount(&payload);
        debug!(order = %order.number, order_tax_amount = tax, "applied sales tax");
        payload.order_tax_amount = Some(tax);
        payload
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn amounts(quantity: u32, price: i64, discount: i64, included: i64, additional: i64) -> LineAmounts {
        LineAmounts {
            quantity,
            unit_price: Decimal::new(price, 2),
            discount: Decimal::new(discount, 2),
            included_tax: Decimal::new(included, 2),
            additional_tax: Decimal::new(additional, 2),
        }
    }

    #[test]
    fn test_locale_ignores_region() {
        let calculator = UsOrderCalculator::new();
        assert_eq!(calculator.locale(&Region::new("us")), "en-US");
    }

    #[test]
    fn test_line_without_tax() {
        let totals = UsLineCalculator.calculate(&amounts(2, 1000, 0, 0, 0), "USD");

        assert_eq!(totals.unit_price, 1000);
        assert_eq!(totals.total_amount, 2000);
        assert_eq!(totals.total_tax_amount, 0);
        assert_eq!(totals.tax_rate, 0);
    }

    #[test]
    fn test_sales_tax_folded_into_unit_price() {
        let totals = UsLineCalculator.calculate(&amounts(2, 1000, 0, 0, 146), "USD");

        assert_eq!(totals.unit_price, 1073);
        assert_eq!(totals.total_amount, 2146);
        assert_eq!(totals.total_tax_amount, 146);
        assert_eq!(totals.tax_rate, 730);
    }

    #[test]
    fn test_taxed_line_total_matches_unit_price() {
        let totals = UsLineCalculator.calculate(&amounts(1, 1000, 0, 0, 73), "USD");

        assert_eq!(totals.unit_price, 1073);
        assert_eq!(totals.total_amount, totals.unit_price - totals.total_discount_amount);
    }

    #[test]
    fn test_discount_and_included_tax() {
        // Included tax is not a US concept and is ignored.
        let totals = UsLineCalculator.calculate(&amounts(1, 5000, 500, 300, 0), "USD");

        assert_eq!(totals.total_discount_amount, 500);
        assert_eq!(totals.total_amount, 4500);
        assert_eq!(totals.total_tax_amount, 0);
    }
}
