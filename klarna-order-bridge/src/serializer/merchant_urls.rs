//! Merchant callback URL resolution.
//!
//! The confirmation URL is resolved in three tiers: an explicit literal wins,
//! then a callback of `(store, order)`, then the storefront's order page.
//! The notification URL always points at the store's notification endpoint.
//! A store without a usable URL gets no merchant URLs at all.

use std::{fmt, sync::Arc};

use tracing::warn;

use crate::{
    models::{Order, Store},
    serializer::payload::MerchantUrls,
};

/// Path of the provider notification endpoint on the storefront.
pub const NOTIFICATION_PATH: &str = "/klarna/notification";

/// Callback computing a confirmation URL for a store and order.
pub type ConfirmationUrlFn = dyn Fn(&Store, &Order) -> String + Send + Sync;

/// Resolves the confirmation URL for an order.
///
/// # Examples
///
/// ```
/// use klarna_order_bridge::serializer::ConfirmationUrlResolver;
///
/// let resolver = ConfirmationUrlResolver::new()
///     .with_callback(|store, order| format!("https://{}/thanks/{}", store.url, order.number));
/// assert!(resolver.has_callback());
/// ```
#[derive(Clone, Default)]
pub struct ConfirmationUrlResolver {
    literal: Option<String>,
    callback: Option<Arc<ConfirmationUrlFn>>,
}

impl ConfirmationUrlResolver {
    /// Creates a resolver that falls back to the computed default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit confirmation URL used for every order.
    #[must_use]
    pub fn with_literal(mut self, url: impl Into<String>) -> Self {
        self.literal = Some(url.into());
        self
    }

    /// Sets a callback used when no literal is configured.
    #[must_use]
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Store, &Order) -> String + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Returns the configured literal, if any.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    /// Returns true if a callback is configured.
    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Resolves the confirmation URL for `order` placed in `store`.
    ///
    /// Returns `None` only when the default tier applies and the store has
    /// no usable URL.
    #[must_use]
    pub fn resolve(&self, store: &Store, order: &Order) -> Option<String> {
        if let Some(literal) = &self.literal {
            return Some(literal.clone());
        }
        if let Some(callback) = &self.callback {
            return Some(callback(store, order));
        }
        store_url(store).map(|base| default_confirmation_url(&base, order))
    }
}

impl fmt::Debug for ConfirmationUrlResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmationUrlResolver")
            .field("literal", &self.literal)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Returns the store base URL: first line of the store URL, with a scheme.
///
/// Returns `None` when that line has no host.
///
/// # Examples
///
/// ```
/// use klarna_order_bridge::{models::Store, serializer::merchant_urls::store_url};
///
/// let store = Store { name: "Shop".into(), url: "shop.example.com\nwww.shop.example.com".into() };
/// assert_eq!(store_url(&store).as_deref(), Some("http://shop.example.com"));
///
/// let blank = Store { name: "Shop".into(), url: "  ".into() };
/// assert_eq!(store_url(&blank), None);
/// ```
#[must_use]
pub fn store_url(store: &Store) -> Option<String> {
    let host = store.url.lines().next().unwrap_or_default().trim().trim_end_matches('/');
    match host.split_once("://") {
        Some((_, rest)) if rest.is_empty() => None,
        Some(_) => Some(host.to_owned()),
        None if host.is_empty() => None,
        None => Some(format!("http://{host}")),
    }
}

/// Computes the storefront's order page URL from a store base URL.
#[must_use]
pub fn default_confirmation_url(base: &str, order: &Order) -> String {
    format!("{base}/orders/{}", order.number)
}

/// Computes the notification endpoint URL from a store base URL.
#[must_use]
pub fn notification_url(base: &str) -> String {
    format!("{base}{NOTIFICATION_PATH}")
}

/// Builds the merchant URL block, or `None` when the store has no usable URL.
#[must_use]
pub fn merchant_urls(
    store: &Store,
    order: &Order,
    resolver: &ConfirmationUrlResolver,
) -> Option<MerchantUrls> {
    let Some(base) = store_url(store) else {
        warn!(store = %store.name, order = %order.number, "store has no URL, omitting merchant URLs");
        return None;
    };
    let confirmation =
        resolver.resolve(store, order).unwrap_or_else(|| default_confirmation_url(&base, order));
    Some(MerchantUrls { confirmation, notification: notification_url(&base) })
}
