//! Error types for the Klarna order bridge.
//!
//! Building a payload from an order never fails. Errors come from loading
//! configuration and from talking to the payment provider.
//!
//! # Error Categories
//!
//! - **Configuration Errors** ([`KlarnaError::InvalidConfig`],
//!   [`KlarnaError::MissingCredentials`]): bad or incomplete settings
//! - **Input Errors** ([`KlarnaError::InvalidInput`]): unusable caller input
//! - **Network Errors** ([`KlarnaError::HttpError`]): HTTP communication failures
//! - **Provider Errors** ([`KlarnaError::ProviderError`]): non-success responses
//!
//! # Examples
//!
//! ```
//! use klarna_order_bridge::error::{KlarnaError, Result};
//!
//! fn require_token(token: &str) -> Result<&str> {
//!     if token.is_empty() {
//!         return Err(KlarnaError::InvalidInput("authorization token is empty".to_owned()));
//!     }
//!     Ok(token)
//! }
//!
//! assert!(require_token("").is_err());
//! ```

use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, KlarnaError>;

/// Errors that can occur while configuring the bridge or placing an order.
///
/// # Error Recovery
///
/// - **Transient errors** ([`HttpError`](Self::HttpError)): the caller decides whether to
///   retry, this crate never retries on its own
/// - **Configuration errors** ([`InvalidConfig`](Self::InvalidConfig),
///   [`MissingCredentials`](Self::MissingCredentials)): fix settings and restart
/// - **Provider errors** ([`ProviderError`](Self::ProviderError)): inspect `body` for the
///   provider's error code
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum KlarnaError {
    /// Configuration failed validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use klarna_order_bridge::error::KlarnaError;
    ///
    /// let err = KlarnaError::InvalidConfig("api_base_url must use HTTPS".to_owned());
    /// assert!(err.to_string().contains("Invalid configuration"));
    /// ```
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Caller input was rejected before any request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// API credentials could not be read from the environment.
    #[error("Missing credentials: environment variable {0} is not set")]
    MissingCredentials(String),

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, refused connections, DNS and TLS
    /// failures end up here unchanged.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider returned status {status}: {body}")]
    ProviderError {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// JSON encoding or decoding failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let error = KlarnaError::InvalidConfig("bad url".into());
        assert_eq!(error.to_string(), "Invalid configuration: bad url");
    }

    #[test]
    fn test_missing_credentials_display() {
        let error = KlarnaError::MissingCredentials("KLARNA_API_USERNAME".to_owned());
        assert_eq!(
            error.to_string(),
            "Missing credentials: environment variable KLARNA_API_USERNAME is not set"
        );
    }

    #[test]
    fn test_provider_error_display() {
        let error = KlarnaError::ProviderError {
            status: 403,
            body: "{\"error_code\":\"NOT_FOUND\"}".to_owned(),
        };
        assert!(error.to_string().starts_with("Provider returned status 403"));
        assert!(error.to_string().contains("NOT_FOUND"));
    }

    #[test]
    fn test_serialization_error_from() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = KlarnaError::from(err);
        assert!(matches!(error, KlarnaError::Serialization(_)));
    }
}
