//! Shopping-cart domain models read by the serializers.
//!
//! These mirror the parts of a storefront's order model the payload needs.
//! They are plain data and deserialize from the storefront's JSON export.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Country of an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code (e.g., "US").
    pub iso: String,
}

/// State or province of an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Abbreviation (e.g., "CA").
    pub abbr: String,
    /// Full name.
    #[serde(default)]
    pub name: String,
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Recipient first name.
    pub first_name: String,
    /// Recipient last name.
    pub last_name: String,
    /// Company name.
    #[serde(default)]
    pub company: Option<String>,
    /// First street line.
    pub address1: String,
    /// Second street line.
    #[serde(default)]
    pub address2: Option<String>,
    /// City.
    pub city: String,
    /// Postal code.
    pub zipcode: String,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// State or province.
    #[serde(default)]
    pub state: Option<State>,
    /// Country.
    pub country: Country,
}

/// Line item of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Variant SKU.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Quantity ordered.
    pub quantity: u32,
    /// Unit price.
    pub price: Decimal,
    /// Promotion adjustments (zero or negative).
    #[serde(default)]
    pub promo_total: Decimal,
    /// Tax already contained in the price.
    #[serde(default)]
    pub included_tax_total: Decimal,
    /// Tax charged on top of the price.
    #[serde(default)]
    pub additional_tax_total: Decimal,
    /// Product image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Product page URL.
    #[serde(default)]
    pub product_url: Option<String>,
}

/// Shipping method of a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingMethod {
    /// Carrier or service name (e.g., "UPS Ground").
    pub name: String,
}

/// Shipment of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Shipment number.
    pub number: String,
    /// Selected shipping method.
    pub shipping_method: ShippingMethod,
    /// Shipping cost.
    pub cost: Decimal,
    /// Promotion adjustments (zero or negative).
    #[serde(default)]
    pub promo_total: Decimal,
    /// Tax already contained in the cost.
    #[serde(default)]
    pub included_tax_total: Decimal,
    /// Tax charged on top of the cost.
    #[serde(default)]
    pub additional_tax_total: Decimal,
    /// Carrier tracking number.
    #[serde(default)]
    pub tracking: Option<String>,
    /// Carrier tracking URL.
    #[serde(default)]
    pub tracking_url: Option<String>,
}

/// Storefront the order was placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Store name.
    pub name: String,
    /// Store host. May hold several newline separated hosts; the first one wins.
    pub url: String,
}

/// Order being submitted for payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Externally visible order number.
    pub number: String,
    /// Customer email.
    #[serde(default)]
    pub email: Option<String>,
    /// Currency code (ISO 4217).
    pub currency: String,
    /// Order total with taxes and adjustments.
    pub display_total: Money,
    /// Billing address.
    #[serde(default)]
    pub billing_address: Option<Address>,
    /// Shipping address.
    #[serde(default)]
    pub shipping_address: Option<Address>,
    /// Line items in cart order.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Shipments in creation order.
    #[serde(default)]
    pub shipments: Vec<Shipment>,
}
