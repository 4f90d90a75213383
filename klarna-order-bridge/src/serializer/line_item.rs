//! Line item serialization.

use crate::{
    calculators::{LineAmounts, LineCalculator},
    models::LineItem,
    serializer::payload::{OrderLine, OrderLineType},
};

/// Maps a [`LineItem`] onto one order line using a region line calculator.
#[derive(Debug, Clone, Copy)]
pub struct LineItemSerializer<'a> {
    line_item: &'a LineItem,
    strategy: &'a dyn LineCalculator,
}

impl<'a> LineItemSerializer<'a> {
    /// Creates a serializer for `line_item`.
    #[must_use]
    pub fn new(line_item: &'a LineItem, strategy: &'a dyn LineCalculator) -> Self {
        Self { line_item, strategy }
    }

    /// Builds the order line; amounts are expressed in `currency` minor units.
    #[must_use]
    pub fn to_line(&self, currency: &str) -> OrderLine {
        let item = self.line_item;
        let totals = self.strategy.calculate(&LineAmounts::from_line_item(item), currency);

        OrderLine {
            line_type: OrderLineType::Physical,
            reference: item.sku.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: totals.unit_price,
            tax_rate: totals.tax_rate,
            total_amount: totals.total_amount,
            total_discount_amount: totals.total_discount_amount,
            total_tax_amount: totals.total_tax_amount,
            image_url: item.image_url.clone(),
            product_url: item.product_url.clone(),
        }
    }
}
