//! Request payload types in the provider's wire format.
//!
//! Unset top-level fields of [`RequestPayload`] are skipped during
//! serialization, so they are absent from the JSON rather than `null`.
//! Nested address and order line blocks keep their unset fields as `null`.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level order placement payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPayload {
    /// Purchase country (ISO 3166-1 alpha-2).
    pub purchase_country: String,
    /// Purchase currency (ISO 4217).
    pub purchase_currency: String,
    /// Locale such as `en-US`.
    pub locale: String,
    /// Order total in minor units, taxes and adjustments included.
    pub order_amount: i64,
    /// Total tax in minor units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_tax_amount: Option<i64>,
    /// Billing address block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<AddressPayload>,
    /// Shipping address block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<AddressPayload>,
    /// Line items followed by shipments.
    pub order_lines: Vec<OrderLine>,
    /// Merchant order number.
    pub merchant_reference1: String,
    /// Widget presentation options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<CheckoutOptions>,
    /// Widget design name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design: Option<String>,
    /// Merchant callback URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_urls: Option<MerchantUrls>,
    /// Purchase intent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

impl RequestPayload {
    /// Converts the payload into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns error if JSON encoding fails, which does not happen for payloads
    /// built by this crate.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Address block with the customer email merged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPayload {
    /// Customer email.
    pub email: Option<String>,
    /// First name.
    pub given_name: String,
    /// Last name.
    pub family_name: String,
    /// Company name.
    pub organization_name: Option<String>,
    /// First street line.
    pub street_address: String,
    /// Second street line.
    pub street_address2: Option<String>,
    /// Postal code.
    pub postal_code: String,
    /// City.
    pub city: String,
    /// State or province abbreviation.
    pub region: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Country (ISO 3166-1 alpha-2).
    pub country: String,
}

/// Kind of order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderLineType {
    /// Physical goods.
    Physical,
    /// Shipping charge.
    ShippingFee,
}

/// One line of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Line kind.
    #[serde(rename = "type")]
    pub line_type: OrderLineType,
    /// SKU or shipment number.
    pub reference: String,
    /// Display name.
    pub name: String,
    /// Quantity.
    pub quantity: u32,
    /// Unit price in minor units, including tax charged on top of the price.
    pub unit_price: i64,
    /// Tax rate in hundredths of a percent (`2000` is 20%).
    pub tax_rate: i64,
    /// Line total in minor units, discounts and taxes applied.
    pub total_amount: i64,
    /// Discount in minor units.
    pub total_discount_amount: i64,
    /// Tax in minor units.
    pub total_tax_amount: i64,
    /// Product image URL.
    pub image_url: Option<String>,
    /// Product page URL.
    pub product_url: Option<String>,
}

/// Widget presentation options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    /// Button color (`#rrggbb`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_button: Option<String>,
    /// Button text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_button_text: Option<String>,
    /// Checkbox color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_checkbox: Option<String>,
    /// Header color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_header: Option<String>,
    /// Link color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_link: Option<String>,
    /// Body text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_text: Option<String>,
    /// Border radius (e.g., `5px`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_border: Option<String>,
}

/// Merchant callback URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantUrls {
    /// Where the customer lands after a completed purchase.
    pub confirmation: String,
    /// Where the provider posts order notifications.
    pub notification: String,
}

/// Purchase intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// One-off purchase.
    Buy,
    /// Store the payment method without buying.
    Tokenize,
    /// Purchase and store the payment method.
    BuyAndTokenize,
}

/// Billing and shipping address blocks of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addresses {
    /// Billing address, falling back to the shipping address.
    pub billing_address: Option<AddressPayload>,
    /// Shipping address.
    pub shipping_address: Option<AddressPayload>,
}

/// Tracking details of one shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    /// Shipping method name.
    pub shipping_company: String,
    /// Carrier tracking number.
    pub tracking_number: Option<String>,
    /// Carrier tracking URL.
    pub tracking_uri: Option<String>,
}
