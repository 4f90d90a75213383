//! reqwest-backed provider client.

use std::time::Duration;

use reqwest::Client;
use tracing::{info, instrument, warn};
use url::Url;

use super::{KlarnaClient, PlaceOrderResponse};
use crate::{
    config::{Credentials, KlarnaConfig},
    error::{KlarnaError, Result},
    serializer::RequestPayload,
};

/// Returns the order placement path for an authorization token.
///
/// # Examples
///
/// ```
/// use klarna_order_bridge::client::place_order_path;
///
/// assert_eq!(place_order_path("tok-1"), "/payments/v1/authorizations/tok-1/order");
/// ```
#[must_use]
pub fn place_order_path(authorization_token: &str) -> String {
    format!("/payments/v1/authorizations/{authorization_token}/order")
}

/// HTTP client for the provider's payments API.
///
/// Configuration:
/// - Connection timeout: 10 seconds
/// - Total timeout: 30 seconds
/// - Connection pool: max 10 idle connections per host
#[derive(Debug, Clone)]
pub struct HttpKlarnaClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl HttpKlarnaClient {
    /// Creates a client for `base_url` authenticating with `credentials`.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL does not parse or the HTTP client cannot be built.
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            KlarnaError::InvalidConfig(format!("invalid api_base_url '{base_url}': {e}"))
        })?;
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(KlarnaError::HttpError)?;

        Ok(Self { client, base_url, credentials })
    }

    /// Creates a client from validated configuration, reading credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns error if credentials are missing or the client cannot be built.
    pub fn from_config(config: &KlarnaConfig) -> Result<Self> {
        Self::new(&config.api_base_url, config.auth.credentials()?)
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| KlarnaError::InvalidInput(format!("cannot build URL for '{path}': {e}")))
    }
}

impl KlarnaClient for HttpKlarnaClient {
    #[instrument(skip(self, authorization_token, payload), fields(merchant_reference = %payload.merchant_reference1))]
    async fn place_order(
        &self,
        authorization_token: &str,
        payload: &RequestPayload,
    ) -> Result<PlaceOrderResponse> {
        if authorization_token.trim().is_empty() {
            return Err(KlarnaError::InvalidInput("authorization token is empty".to_owned()));
        }

        let url = self.endpoint(&place_order_path(authorization_token))?;
        info!("placing order");

        let response = self
            .client
            .post(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            warn!(status = status.as_u16(), "provider rejected order");
            return Err(KlarnaError::ProviderError { status: status.as_u16(), body });
        }

        let bytes = response.bytes().await?;
        let placed: PlaceOrderResponse = serde_json::from_slice(&bytes)?;
        info!(order_id = %placed.order_id, "order placed");
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials { username: "user".to_owned(), password: "pass".to_owned() }
    }

    #[test]
    fn test_endpoint_joins_path() {
        let client = HttpKlarnaClient::new("https://api.playground.klarna.com", credentials()).unwrap();
        let url = client.endpoint(&place_order_path("abc-123")).unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.playground.klarna.com/payments/v1/authorizations/abc-123/order"
        );
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let result = HttpKlarnaClient::new("not a url", credentials());
        assert!(matches!(result, Err(KlarnaError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected_before_sending() {
        let client = HttpKlarnaClient::new("https://api.playground.klarna.com", credentials()).unwrap();
        let payload = RequestPayload {
            purchase_country: "US".to_owned(),
            purchase_currency: "USD".to_owned(),
            locale: "en-US".to_owned(),
            order_amount: 0,
            order_tax_amount: None,
            billing_address: None,
            shipping_address: None,
            order_lines: vec![],
            merchant_reference1: "R1".to_owned(),
            options: None,
            design: None,
            merchant_urls: None,
            intent: None,
        };

        let result = client.place_order("  ", &payload).await;
        assert!(matches!(result, Err(KlarnaError::InvalidInput(_))));
    }
}
