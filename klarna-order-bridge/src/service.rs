//! Order placement with a customer authorization token.
//!
//! [`PlaceOrderService`] serializes an order with the configured region
//! settings and hands the payload to a [`KlarnaClient`]. Client errors are
//! returned unchanged.

use tracing::{info, instrument};

use crate::{
    calculators::Region,
    client::{KlarnaClient, PlaceOrderResponse},
    config::KlarnaConfig,
    error::Result,
    models::{Order, Store},
    serializer::{CheckoutOptions, ConfirmationUrlResolver, Intent, OrderSerializer},
};

/// Customer payment source holding the authorization token from the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSource {
    /// Authorization token returned by the payment widget.
    pub authorization_token: String,
}

impl PaymentSource {
    /// Creates a payment source.
    #[must_use]
    pub fn new(authorization_token: impl Into<String>) -> Self {
        Self { authorization_token: authorization_token.into() }
    }
}

/// Serializer settings shared by every order a service places.
#[derive(Debug, Clone, Default)]
pub struct SerializerSettings {
    /// Region selecting the amount calculator.
    pub region: Region,
    /// Withhold addresses from UK payloads.
    pub skip_personal_data: bool,
    /// Widget design name.
    pub design: Option<String>,
    /// Purchase intent.
    pub intent: Option<Intent>,
    /// Widget presentation options.
    pub options: Option<CheckoutOptions>,
    /// Confirmation URL resolution.
    pub confirmation_url: ConfirmationUrlResolver,
}

impl From<&KlarnaConfig> for SerializerSettings {
    fn from(config: &KlarnaConfig) -> Self {
        Self {
            region: config.region(),
            skip_personal_data: config.skip_personal_data,
            design: config.design.clone(),
            intent: config.intent,
            options: config.options.clone(),
            confirmation_url: config.confirmation_url_resolver(),
        }
    }
}

/// Places orders through a [`KlarnaClient`].
#[derive(Debug)]
pub struct PlaceOrderService<C> {
    client: C,
    settings: SerializerSettings,
}

impl<C: KlarnaClient> PlaceOrderService<C> {
    /// Creates a service with explicit settings.
    #[must_use]
    pub fn new(client: C, settings: SerializerSettings) -> Self {
        Self { client, settings }
    }

    /// Creates a service from configuration.
    #[must_use]
    pub fn from_config(client: C, config: &KlarnaConfig) -> Self {
        Self::new(client, SerializerSettings::from(config))
    }

    /// Returns the serializer settings.
    #[must_use]
    pub fn settings(&self) -> &SerializerSettings {
        &self.settings
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Builds the serializer the service would use for `order`.
    #[must_use]
    pub fn serializer<'a>(&'a self, order: &'a Order, store: Option<&'a Store>) -> OrderSerializer<'a> {
        let settings = &self.settings;
        let mut serializer = OrderSerializer::new(order, settings.region.clone())
            .with_skip_personal_data(settings.skip_personal_data)
            .with_confirmation_url(settings.confirmation_url.clone());

        if let Some(options) = &settings.options {
            serializer = serializer.with_options(options.clone());
        }
        if let Some(design) = &settings.design {
            serializer = serializer.with_design(design.clone());
        }
        if let Some(intent) = settings.intent {
            serializer = serializer.with_intent(intent);
        }
        if let Some(store) = store {
            serializer = serializer.with_store(store);
        }
        serializer
    }

    /// Serializes `order` and places it with the source's authorization token.
    ///
    /// # Errors
    ///
    /// Returns whatever error the client returns.
    #[instrument(skip_all, fields(order = %order.number, region = %self.settings.region))]
    pub async fn call(
        &self,
        order: &Order,
        store: Option<&Store>,
        payment_source: &PaymentSource,
    ) -> Result<PlaceOrderResponse> {
        let payload = self.serializer(order, store).to_hash();
        let response =
            self.client.place_order(&payment_source.authorization_token, &payload).await?;
        info!(provider_order_id = %response.order_id, "order placed with authorization token");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use super::*;
    use crate::{
        error::KlarnaError,
        money::Money,
        serializer::RequestPayload,
    };

    #[derive(Debug, Default)]
    struct RecordingClient {
        calls: Mutex<Vec<(String, RequestPayload)>>,
        fail_with_status: Option<u16>,
    }

    impl KlarnaClient for RecordingClient {
        async fn place_order(
            &self,
            authorization_token: &str,
            payload: &RequestPayload,
        ) -> Result<PlaceOrderResponse> {
            self.calls.lock().unwrap().push((authorization_token.to_owned(), payload.clone()));
            if let Some(status) = self.fail_with_status {
                return Err(KlarnaError::ProviderError { status, body: "rejected".to_owned() });
            }
            Ok(PlaceOrderResponse {
                order_id: "klarna-order-1".to_owned(),
                redirect_url: None,
                fraud_status: None,
            })
        }
    }

    fn order() -> Order {
        Order {
            number: "R200".to_owned(),
            email: None,
            currency: "GBP".to_owned(),
            display_total: Money::new(Decimal::new(4200, 2), "GBP"),
            billing_address: None,
            shipping_address: None,
            line_items: vec![],
            shipments: vec![],
        }
    }

    #[tokio::test]
    async fn test_call_passes_token_and_payload() {
        let service = PlaceOrderService::new(RecordingClient::default(), SerializerSettings::default());
        let order = order();

        let response =
            service.call(&order, None, &PaymentSource::new("AUTHORIZATION_TOKEN")).await.unwrap();

        assert_eq!(response.order_id, "klarna-order-1");
        let calls = service.client().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "AUTHORIZATION_TOKEN");
        assert_eq!(calls[0].1, service.serializer(&order, None).to_hash());
    }

    #[tokio::test]
    async fn test_client_errors_propagate_unchanged() {
        let client = RecordingClient { fail_with_status: Some(403), ..RecordingClient::default() };
        let service = PlaceOrderService::new(client, SerializerSettings::default());

        let result = service.call(&order(), None, &PaymentSource::new("token")).await;

        match result {
            Err(KlarnaError::ProviderError { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "rejected");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn test_serializer_uses_config_settings() {
        let config = KlarnaConfig::from_toml(
            r#"
            region = "uk"
            design = "classic"
            intent = "buy"
            skip_personal_data = true
            confirmation_url = "https://shop.example.com/done"
        "#,
        )
        .unwrap();
        let service = PlaceOrderService::from_config(RecordingClient::default(), &config);
        let order = order();
        let store = Store { name: "Shop".to_owned(), url: "shop.example.com".to_owned() };

        let serializer = service.serializer(&order, Some(&store));
        let payload = serializer.to_hash();

        assert!(serializer.skip_personal_data());
        assert_eq!(payload.locale, "en-GB");
        assert_eq!(payload.purchase_country, "GB");
        assert_eq!(payload.design.as_deref(), Some("classic"));
        assert_eq!(payload.intent, Some(Intent::Buy));
        assert_eq!(payload.merchant_urls.unwrap().confirmation, "https://shop.example.com/done");
    }
}
