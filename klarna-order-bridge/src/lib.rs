//! Klarna Order Bridge: shopping-cart orders to Klarna Payments payloads
//!
//! A Rust library that turns a storefront order into the order placement
//! payload of the Klarna Payments API and submits it with the customer's
//! authorization token.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Storefront     │  Order, addresses, line items, shipments
//! └────────┬────────┘
//!          │
//! ┌────────▼────────────────────────────────────────┐
//! │        OrderSerializer (this crate)             │
//! │  ┌──────────────┐      ┌──────────────────┐    │
//! │  │ Address/Line │──────│ Region strategy  │    │
//! │  │ serializers  │      │ (US or UK)       │    │
//! │  └──────────────┘      └──────────────────┘    │
//! └────────┬───────────────────────────────────────┘
//!          │ RequestPayload (JSON)
//! ┌────────▼────────┐
//! │  KlarnaClient   │  POST /payments/v1/authorizations/{token}/order
//! └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## 1. Build a payload
//!
//! ```rust
//! use klarna_order_bridge::{
//!     models::{Order, Store},
//!     money::Money,
//!     serializer::{ConfirmationUrlResolver, OrderSerializer},
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
//! let store = Store { name: "Shop".into(), url: "shop.example.com".into() };
//!
//! let payload = OrderSerializer::new(&order, "us")
//!     .with_store(&store)
//!     .with_confirmation_url(
//!         ConfirmationUrlResolver::new()
//!             .with_callback(|store, order| format!("https://{}/thanks/{}", store.url, order.number)),
//!     )
//!     .to_hash();
//!
//! assert_eq!(payload.merchant_urls.unwrap().confirmation, "https://shop.example.com/thanks/R100");
//! ```
//!
//! ## 2. Place the order
//!
//! ```rust,no_run
//! use klarna_order_bridge::{
//!     HttpKlarnaClient, KlarnaConfig,
//!     models::Order,
//!     service::{PaymentSource, PlaceOrderService},
//! };
//!
//! # async fn example(order: Order) -> klarna_order_bridge::error::Result<()> {
//! let config = KlarnaConfig::from_file("klarna.toml")?;
//! let client = HttpKlarnaClient::from_config(&config)?;
//! let service = PlaceOrderService::from_config(client, &config);
//!
//! let placed = service.call(&order, None, &PaymentSource::new("AUTHORIZATION_TOKEN")).await?;
//! println!("Provider order: {}", placed.order_id);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`models`]: storefront order model
//! - [`money`]: minor-unit conversion
//! - [`calculators`]: region strategies (US, UK)
//! - [`serializer`]: order, address, line item and shipment serializers
//! - [`config`]: TOML configuration
//! - [`client`]: provider client trait and HTTP implementation
//! - [`service`]: order placement with an authorization token
//! - [`error`]: error types

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

pub mod calculators;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod money;
pub mod serializer;
pub mod service;

pub use client::{HttpKlarnaClient, KlarnaClient};
pub use config::KlarnaConfig;
pub use error::{KlarnaError, Result};
pub use serializer::{OrderSerializer, RequestPayload};
