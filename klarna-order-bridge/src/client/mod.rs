//! Payment provider client abstraction.
//!
//! [`KlarnaClient`] is the seam between payload building and the network.
//! [`HttpKlarnaClient`] talks to the real API; tests substitute an
//! in-memory implementation.

mod http;

use std::future::Future;

use serde::{Deserialize, Serialize};

pub use self::http::{HttpKlarnaClient, place_order_path};
use crate::{error::Result, serializer::RequestPayload};

/// Fraud screening outcome reported for a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FraudStatus {
    /// Order accepted.
    Accepted,
    /// Order held for review.
    Pending,
    /// Order rejected.
    Rejected,
}

/// Response to a successful order placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    /// Provider order identifier.
    pub order_id: String,
    /// Where to send the customer next.
    #[serde(default)]
    pub redirect_url: Option<String>,
    /// Fraud screening outcome.
    #[serde(default)]
    pub fraud_status: Option<FraudStatus>,
}

/// Submits order payloads to the payment provider.
pub trait KlarnaClient: Send + Sync {
    /// Places an order against a customer's authorization token.
    ///
    /// # Errors
    ///
    /// Returns the transport or provider error unchanged.
    fn place_order(
        &self,
        authorization_token: &str,
        payload: &RequestPayload,
    ) -> impl Future<Output = Result<PlaceOrderResponse>> + Send;
}
