//! Order to payload serialization.
//!
//! [`OrderSerializer`] composes the address, line item and shipment
//! serializers into one [`RequestPayload`]. The region strategy is selected
//! once, when the serializer is built, and applies its adjustments through
//! [`AmountCalculator::adjust_with`].
//!
//! # Address handling
//!
//! A missing billing address falls back to the shipping address. A missing
//! shipping address leaves `shipping_address` out of the payload. The
//! purchase country is the billing country, else the shipping country, else
//! the region's country code.
//!
//! # Examples
//!
//! ```
//! use klarna_order_bridge::{
//!     models::Order,
//!     money::Money,
//!     serializer::{OrderSerializer, payload::Intent},
//! };
//! use rust_decimal::Decimal;
//!
//! let order = Order {
//!     number: "R100".into(),
//!     email: Some("jane@example.com".into()),
//!     currency: "USD".into(),
//!     display_total: Money::new(Decimal::new(1999, 2), "USD"),
//!     billing_address: None,
//!     shipping_address: None,
//!     line_items: vec![],
//!     shipments: vec![],
//! };
//!
//! let payload = OrderSerializer::new(&order, "US").with_intent(Intent::Buy).to_hash();
//! assert_eq!(payload.order_amount, 1999);
//! assert_eq!(payload.merchant_reference1, "R100");
//! assert_eq!(payload.locale, "en-US");
//! ```

pub mod address;
pub mod line_item;
pub mod merchant_urls;
pub mod payload;
pub mod shipment;

use tracing::instrument;

pub use self::{
    address::AddressSerializer,
    line_item::LineItemSerializer,
    merchant_urls::ConfirmationUrlResolver,
    payload::{
        AddressPayload, Addresses, CheckoutOptions, Intent, MerchantUrls, OrderLine,
        RequestPayload, ShippingInfo,
    },
    shipment::ShipmentSerializer,
};
use crate::{
    calculators::{AmountCalculator, Region, Strategy},
    models::{Address, Order, Store},
};

/// Builds the order placement payload for one order.
///
/// Built per submission attempt with [`new`](Self::new), configured with the
/// `with_*` setters, then consumed through [`to_hash`](Self::to_hash).
#[derive(Debug, Clone)]
pub struct OrderSerializer<'a> {
    order: &'a Order,
    region: Region,
    strategy: Strategy,
    skip_personal_data: bool,
    options: Option<CheckoutOptions>,
    design: Option<String>,
    store: Option<&'a Store>,
    intent: Option<Intent>,
    confirmation_url: ConfirmationUrlResolver,
}

impl<'a> OrderSerializer<'a> {
    /// Creates a serializer for `order` in `region`.
    ///
    /// The region token is case-insensitive.
    #[must_use]
    pub fn new(order: &'a Order, region: impl Into<Region>) -> Self {
        let region = region.into();
        let strategy = Strategy::for_region(&region, false);
        Self {
            order,
            region,
            strategy,
            skip_personal_data: false,
            options: None,
            design: None,
            store: None,
            intent: None,
            confirmation_url: ConfirmationUrlResolver::default(),
        }
    }

    /// Creates a serializer for `order` in the default `us` region.
    #[must_use]
    pub fn us(order: &'a Order) -> Self {
        Self::new(order, Region::default())
    }

    /// Sets widget presentation options.
    #[must_use]
    pub fn with_options(mut self, options: CheckoutOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the widget design name.
    #[must_use]
    pub fn with_design(mut self, design: impl Into<String>) -> Self {
        self.design = Some(design.into());
        self
    }

    /// Sets whether addresses are withheld from the payload (UK calculator only).
    #[must_use]
    pub fn with_skip_personal_data(mut self, skip_personal_data: bool) -> Self {
        self.skip_personal_data = skip_personal_data;
        self.strategy = Strategy::for_region(&self.region, skip_personal_data);
        self
    }

    /// Sets the store; merchant URLs are only emitted when a store with a
    /// usable URL is set.
    #[must_use]
    pub fn with_store(mut self, store: &'a Store) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the purchase intent.
    #[must_use]
    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    /// Sets the confirmation URL resolver.
    #[must_use]
    pub fn with_confirmation_url(mut self, resolver: ConfirmationUrlResolver) -> Self {
        self.confirmation_url = resolver;
        self
    }

    /// Returns the order being serialized.
    #[must_use]
    pub fn order(&self) -> &Order {
        self.order
    }

    /// Returns the normalized region.
    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Returns the selected strategy.
    #[must_use]
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Returns true if addresses are withheld from the payload.
    #[must_use]
    pub fn skip_personal_data(&self) -> bool {
        self.skip_personal_data
    }

    /// Builds the payload and applies the region adjustments.
    #[instrument(skip(self), fields(order = %self.order.number, region = %self.region, strategy = self.strategy.name()))]
    #[must_use]
    pub fn to_hash(&self) -> RequestPayload {
        self.strategy.adjust_with(self.order, || self.order_information())
    }

    /// Returns the billing and shipping address blocks.
    #[must_use]
    pub fn addresses(&self) -> Addresses {
        Addresses { billing_address: self.billing_address(), shipping_address: self.shipping_address() }
    }

    /// Returns tracking details for every shipment, in shipment order.
    #[must_use]
    pub fn shipping_info(&self) -> Vec<ShippingInfo> {
        self.order
            .shipments
            .iter()
            .map(|shipment| ShippingInfo {
                shipping_company: shipment.shipping_method.name.clone(),
                tracking_number: shipment.tracking.clone(),
                tracking_uri: shipment.tracking_url.clone(),
            })
            .collect()
    }

    fn order_information(&self) -> RequestPayload {
        let order = self.order;
        RequestPayload {
            purchase_country: self.purchase_country(),
            purchase_currency: order.currency.clone(),
            locale: self.strategy.locale(&self.region),
            order_amount: order.display_total.cents(),
            order_tax_amount: None,
            billing_address: self.billing_address(),
            shipping_address: self.shipping_address(),
            order_lines: self.order_lines(),
            merchant_reference1: order.number.clone(),
            options: self.options.clone(),
            design: self.design.clone(),
            merchant_urls: self.store.and_then(|store| {
                merchant_urls::merchant_urls(store, order, &self.confirmation_url)
            }),
            intent: self.intent,
        }
    }

    fn purchase_country(&self) -> String {
        self.order
            .billing_address
            .as_ref()
            .or(self.order.shipping_address.as_ref())
            .map_or_else(|| self.region.country_code(), |address| address.country.iso.clone())
    }

    fn order_lines(&self) -> Vec<OrderLine> {
        let currency = self.order.currency.as_str();
        let line_items = self.order.line_items.iter().map(|item| {
            LineItemSerializer::new(item, self.strategy.line_item_strategy()).to_line(currency)
        });
        let shipments = self.order.shipments.iter().map(|shipment| {
            ShipmentSerializer::new(shipment, self.strategy.shipment_strategy()).to_line(currency)
        });
        line_items.chain(shipments).collect()
    }

    fn billing_address(&self) -> Option<AddressPayload> {
        match &self.order.billing_address {
            Some(address) => Some(self.address_payload(address)),
            None => self.shipping_address(),
        }
    }

    fn shipping_address(&self) -> Option<AddressPayload> {
        self.order.shipping_address.as_ref().map(|address| self.address_payload(address))
    }

    fn address_payload(&self, address: &Address) -> AddressPayload {
        AddressSerializer::new(address).to_payload(self.order.email.as_deref())
    }
}
