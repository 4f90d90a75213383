//! United Kingdom and European amount rules.
//!
//! Prices include VAT. The included VAT is reported as the line's tax amount
//! without changing its total; any tax charged on top is folded into the
//! unit price and added to the tax amount.

use tracing::debug;

use super::{
    AmountCalculator, LineAmounts, LineCalculator, LineTotals, Region, line_totals,
    order_tax_amount,
};
use crate::{money::to_minor_units, models::Order, serializer::payload::RequestPayload};

/// Locale per region token; anything unlisted uses `en-GB`.
const LOCALES: &[(&str, &str)] = &[
    ("at", "de-AT"),
    ("be", "nl-BE"),
    ("ch", "de-CH"),
    ("de", "de-DE"),
    ("dk", "da-DK"),
    ("es", "es-ES"),
    ("fi", "fi-FI"),
    ("fr", "fr-FR"),
    ("gb", "en-GB"),
    ("it", "it-IT"),
    ("nl", "nl-NL"),
    ("no", "nb-NO"),
    ("pl", "pl-PL"),
    ("se", "sv-SE"),
    ("uk", "en-GB"),
];

const DEFAULT_LOCALE: &str = "en-GB";

/// Line calculator for tax-inclusive prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UkLineCalculator;

impl LineCalculator for UkLineCalculator {
    fn calculate(&self, amounts: &LineAmounts, currency: &str) -> LineTotals {
        let included = to_minor_units(amounts.included_tax, currency);
        let additional = to_minor_units(amounts.additional_tax, currency);
        line_totals(amounts, currency, included.saturating_add(additional), additional)
    }
}

/// Order calculator for the United Kingdom and other European regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UkOrderCalculator {
    lines: UkLineCalculator,
    skip_personal_data: bool,
}

impl UkOrderCalculator {
    /// Creates a new calculator.
    ///
    /// With `skip_personal_data` set, billing and shipping addresses are
    /// removed from the adjusted payload.
    #[must_use]
    pub fn new(skip_personal_data: bool) -> Self {
        Self { lines: UkLineCalculator, skip_personal_data }
    }

    /// Returns true if addresses are stripped from payloads.
    #[must_use]
    pub fn skip_personal_data(&self) -> bool {
        self.skip_personal_data
    }
}

impl AmountCalculator for UkOrderCalculator {
    fn locale(&self, region: &Region) -> String {
        LOCALES
            .iter()
            .find(|(token, _)| *token == region.as_str())
            .map_or(DEFAULT_LOCALE, |(_, locale)| *locale)
            .to_owned()
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
        debug!(
            order = %order.number,
            order_tax_amount = tax,
            skip_personal_data = self.skip_personal_data,
            "applied VAT"
        );
        payload.order_tax_amount = Some(tax);

        if self.skip_personal_data {
            payload.billing_address = None;
            payload.shipping_address = None;
        }

        payload
    }
}
