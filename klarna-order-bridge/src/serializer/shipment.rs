//! Shipment serialization.

use crate::{
    calculators::{LineAmounts, LineCalculator},
    models::Shipment,
    serializer::payload::{OrderLine, OrderLineType},
};

/// Maps a [`Shipment`] onto one shipping-fee order line.
#[derive(Debug, Clone, Copy)]
pub struct ShipmentSerializer<'a> {
    shipment: &'a Shipment,
    strategy: &'a dyn LineCalculator,
}

impl<'a> ShipmentSerializer<'a> {
    /// Creates a serializer for `shipment`.
    #[must_use]
    pub fn new(shipment: &'a Shipment, strategy: &'a dyn LineCalculator) -> Self {
        Self { shipment, strategy }
    }

    /// Builds the order line; amounts are expressed in `currency` minor units.
    #[must_use]
    pub fn to_line(&self, currency: &str) -> OrderLine {
        let shipment = self.shipment;
        let totals = self.strategy.calculate(&LineAmounts::from_shipment(shipment), currency);

        OrderLine {
            line_type: OrderLineType::ShippingFee,
            reference: shipment.number.clone(),
            name: shipment.shipping_method.name.clone(),
            quantity: 1,
            unit_price: totals.unit_price,
            tax_rate: totals.tax_rate,
            total_amount: totals.total_amount,
            total_discount_amount: totals.total_discount_amount,
            total_tax_amount: totals.total_tax_amount,
            image_url: None,
            product_url: None,
        }
    }
}
