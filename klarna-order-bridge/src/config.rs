//! Bridge configuration.
//!
//! This module defines TOML-deserializable settings for the payment provider
//! connection and payload presentation.
//!
//! ```toml
//! api_base_url = "https://api.playground.klarna.com"
//! region = "uk"
//! design = "classic"
//! intent = "buy"
//! skip_personal_data = true
//! confirmation_url = "https://shop.example.com/checkout/done"
//!
//! [auth]
//! username_env = "KLARNA_API_USERNAME"
//! password_env = "KLARNA_API_PASSWORD"
//!
//! [options]
//! color_button = "#ff0000"
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::{
    calculators::Region,
    error::{KlarnaError, Result},
    serializer::{CheckoutOptions, ConfirmationUrlResolver, Intent},
};

/// Default API host (production, Europe).
pub const DEFAULT_API_BASE_URL: &str = "https://api.klarna.com";

/// Root bridge configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct KlarnaConfig {
    /// Base URL of the provider API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Region token selecting the amount calculator.
    #[serde(default = "default_region")]
    pub region: String,

    /// Credentials configuration.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Explicit confirmation URL.
    #[serde(default)]
    pub confirmation_url: Option<String>,

    /// Withhold addresses from UK payloads.
    #[serde(default)]
    pub skip_personal_data: bool,

    /// Widget design name.
    #[serde(default)]
    pub design: Option<String>,

    /// Purchase intent.
    #[serde(default)]
    pub intent: Option<Intent>,

    /// Widget presentation options.
    #[serde(default)]
    pub options: Option<CheckoutOptions>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_owned()
}

fn default_region() -> String {
    Region::US.to_owned()
}

impl Default for KlarnaConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            region: default_region(),
            auth: AuthConfig::default(),
            confirmation_url: None,
            skip_personal_data: false,
            design: None,
            intent: None,
            options: None,
        }
    }
}

impl KlarnaConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns error if TOML parsing fails or configuration validation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use klarna_order_bridge::config::KlarnaConfig;
    ///
    /// let config = KlarnaConfig::from_toml(r#"
    ///     api_base_url = "https://api-na.playground.klarna.com"
    ///     region = "US"
    /// "#).unwrap();
    ///
    /// assert!(config.region().is_us());
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| KlarnaError::InvalidConfig(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or its content is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| KlarnaError::InvalidConfig(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Validates the configuration.
    ///
    /// This method checks that:
    /// - `api_base_url` parses, uses HTTPS and is not a loopback host
    /// - `region` is a non-empty token of ASCII letters
    /// - `confirmation_url`, when set, parses as an absolute URL
    /// - credential environment variable names are well formed
    ///
    /// # Errors
    ///
    /// Returns `KlarnaError::InvalidConfig` if any check fails.
    pub fn validate(&self) -> Result<()> {
        validate_api_base_url(&self.api_base_url)?;
        validate_region(&self.region)?;

        if let Some(url) = &self.confirmation_url {
            Url::parse(url).map_err(|e| {
                KlarnaError::InvalidConfig(format!("invalid confirmation_url '{url}': {e}"))
            })?;
        }

        self.auth.validate()
    }

    /// Returns the normalized region.
    #[must_use]
    pub fn region(&self) -> Region {
        Region::new(&self.region)
    }

    /// Returns a confirmation URL resolver seeded with the configured literal.
    #[must_use]
    pub fn confirmation_url_resolver(&self) -> ConfirmationUrlResolver {
        match &self.confirmation_url {
            Some(url) => ConfirmationUrlResolver::new().with_literal(url.clone()),
            None => ConfirmationUrlResolver::new(),
        }
    }
}

/// Names of the environment variables holding API credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Variable holding the API username.
    #[serde(default = "default_username_env")]
    pub username_env: String,
    /// Variable holding the API password.
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

fn default_username_env() -> String {
    "KLARNA_API_USERNAME".to_owned()
}

fn default_password_env() -> String {
    "KLARNA_API_PASSWORD".to_owned()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { username_env: default_username_env(), password_env: default_password_env() }
    }
}

impl AuthConfig {
    /// Validates the environment variable names.
    ///
    /// # Errors
    ///
    /// Returns `KlarnaError::InvalidConfig` if a name is empty or malformed.
    pub fn validate(&self) -> Result<()> {
        validate_env_var_name(&self.username_env)?;
        validate_env_var_name(&self.password_env)
    }

    /// Reads the credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns `KlarnaError::MissingCredentials` naming the first unset variable.
    pub fn credentials(&self) -> Result<Credentials> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| KlarnaError::MissingCredentials(name.to_owned()))
        };
        Ok(Credentials { username: read(&self.username_env)?, password: read(&self.password_env)? })
    }
}

/// API credentials for HTTP basic auth.
#[derive(Clone)]
pub struct Credentials {
    /// API username.
    pub username: String,
    /// API password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn validate_api_base_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw)
        .map_err(|e| KlarnaError::InvalidConfig(format!("invalid api_base_url '{raw}': {e}")))?;

    if url.scheme() != "https" {
        return Err(KlarnaError::InvalidConfig(format!(
            "api_base_url must use HTTPS, got: {}",
            url.scheme()
        )));
    }

    if let Some(host) = url.host_str() {
        let host_lower = host.to_lowercase();
        if host_lower == "localhost"
            || host_lower == "[::1]"
            || host_lower == "::1"
            || host_lower.starts_with("127.")
        {
            return Err(KlarnaError::InvalidConfig(format!(
                "api_base_url must not be localhost or loopback: {host}"
            )));
        }
    }

    Ok(())
}

fn validate_region(region: &str) -> Result<()> {
    let token = region.trim();
    if token.is_empty() || !token.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(KlarnaError::InvalidConfig(format!(
            "region must be a non-empty token of ASCII letters: '{region}'"
        )));
    }
    Ok(())
}

fn validate_env_var_name(name: &str) -> Result<()> {
    let Some(first_char) = name.chars().next() else {
        return Err(KlarnaError::InvalidConfig(
            "environment variable name cannot be empty".to_owned(),
        ));
    };

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(KlarnaError::InvalidConfig(format!(
            "environment variable name must start with letter or underscore: {name}"
        )));
    }

    if let Some(ch) = name.chars().find(|ch| !ch.is_ascii_alphanumeric() && *ch != '_') {
        return Err(KlarnaError::InvalidConfig(format!(
            "environment variable name contains invalid character '{ch}': {name}"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unreachable,
    reason = "test code uses unreachable for expected-path assertions"
)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = KlarnaConfig::from_toml("").unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.region().is_us());
        assert_eq!(config.auth.username_env, "KLARNA_API_USERNAME");
        assert!(!config.skip_personal_data);
        assert!(config.options.is_none());
        assert!(config.intent.is_none());
    }

    #[test]
    fn test_full_config_from_toml() {
        let toml = r##"
            api_base_url = "https://api.playground.klarna.com"
            region = "UK"
            design = "classic"
            intent = "buy_and_tokenize"
            skip_personal_data = true
            confirmation_url = "https://shop.example.com/done"

            [auth]
            username_env = "SHOP_KLARNA_USER"
            password_env = "SHOP_KLARNA_PASS"

            [options]
            color_button = "#ff0000"
            radius_border = "5px"
        "##;

        let config = KlarnaConfig::from_toml(toml).unwrap();

        assert_eq!(config.region().as_str(), "uk");
        assert_eq!(config.design.as_deref(), Some("classic"));
        assert_eq!(config.intent, Some(Intent::BuyAndTokenize));
        assert!(config.skip_personal_data);
        assert_eq!(config.auth.password_env, "SHOP_KLARNA_PASS");

        let options = config.options.unwrap();
        assert_eq!(options.color_button.as_deref(), Some("#ff0000"));
        assert_eq!(options.radius_border.as_deref(), Some("5px"));
        assert!(options.color_text.is_none());
    }

    #[test]
    fn test_rejects_http_base_url() {
        let result = KlarnaConfig::from_toml(r#"api_base_url = "http://api.klarna.com""#);

        match result {
            Err(KlarnaError::InvalidConfig(msg)) => assert!(msg.contains("HTTPS")),
            _ => unreachable!("expected InvalidConfig"),
        }
    }

    #[test]
    fn test_rejects_loopback_base_url() {
        for url in ["https://localhost", "https://127.0.0.1:8443", "https://[::1]"] {
            let config = KlarnaConfig { api_base_url: url.to_owned(), ..KlarnaConfig::default() };
            assert!(config.validate().is_err(), "{url} should be rejected");
        }
    }

    #[test]
    fn test_rejects_bad_region() {
        for region in ["", "  ", "u-s", "us1"] {
            let config = KlarnaConfig { region: region.to_owned(), ..KlarnaConfig::default() };
            assert!(config.validate().is_err(), "'{region}' should be rejected");
        }
    }

    #[test]
    fn test_rejects_bad_confirmation_url() {
        let config = KlarnaConfig {
            confirmation_url: Some("not a url".to_owned()),
            ..KlarnaConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_env_var_names() {
        for name in ["", "1USER", "USER-NAME", "USER NAME"] {
            let auth = AuthConfig { username_env: name.to_owned(), ..AuthConfig::default() };
            assert!(auth.validate().is_err(), "'{name}' should be rejected");
        }
    }

    #[test]
    fn test_rejects_invalid_toml() {
        let result = KlarnaConfig::from_toml("region = ");
        assert!(matches!(result, Err(KlarnaError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_file_not_found() {
        let result = KlarnaConfig::from_file("/nonexistent/klarna.toml");
        match result {
            Err(KlarnaError::InvalidConfig(msg)) => assert!(msg.contains("cannot read config file")),
            _ => unreachable!("expected InvalidConfig"),
        }
    }

    #[test]
    fn test_confirmation_url_resolver_from_config() {
        let config = KlarnaConfig {
            confirmation_url: Some("https://shop.example.com/done".to_owned()),
            ..KlarnaConfig::default()
        };
        assert_eq!(config.confirmation_url_resolver().literal(), Some("https://shop.example.com/done"));
        assert!(KlarnaConfig::default().confirmation_url_resolver().literal().is_none());
    }

    #[test]
    fn test_missing_credentials() {
        let auth = AuthConfig {
            username_env: "KLARNA_BRIDGE_TEST_UNSET_USER".to_owned(),
            password_env: "KLARNA_BRIDGE_TEST_UNSET_PASS".to_owned(),
        };

        match auth.credentials() {
            Err(KlarnaError::MissingCredentials(name)) => {
                assert_eq!(name, "KLARNA_BRIDGE_TEST_UNSET_USER");
            }
            _ => unreachable!("expected MissingCredentials"),
        }
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials { username: "user".to_owned(), password: "secret".to_owned() };
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }
}
