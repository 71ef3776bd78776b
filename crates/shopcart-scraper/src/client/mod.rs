//! HTTP client for a Shopify storefront's public product and cart endpoints.

mod cart;
mod store;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::theme::{find_embedded_product, ThemeMatch};
use crate::types::{ProductEnvelope, ShopifyProduct};

pub use cart::CartAddResponse;
pub use store::StoreReference;

/// HTTP client for a single storefront session.
///
/// Issues at most one request per call and never retries. The configured
/// `User-Agent` is sent on every request; storefronts commonly refuse the
/// `.json` endpoint to non-browser agents.
pub struct ShopifyClient {
    client: Client,
}

impl ShopifyClient {
    /// Creates a `ShopifyClient` sending `user_agent` on every request.
    ///
    /// `timeout_secs` bounds each whole request; `None` keeps reqwest's default.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(user_agent: &str, timeout_secs: Option<u64>) -> Result<Self, ScraperError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetches the product behind `store`, preferring the structured JSON
    /// endpoint and falling back to the theme markup of the product page only
    /// when the endpoint yields nothing.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`]: network or TLS failure on either request.
    /// - [`ScraperError::UnexpectedStatus`]: the product page returned non-2xx.
    /// - [`ScraperError::ProductNotEmbedded`]: no known theme layout matched.
    /// - [`ScraperError::Deserialize`]: the embedded object is not valid JSON.
    pub async fn fetch_product(
        &self,
        store: &StoreReference,
    ) -> Result<ShopifyProduct, ScraperError> {
        if let Some(product) = self.fetch_product_json(store).await? {
            tracing::info!(
                handle = %store.handle,
                variants = product.variants.len(),
                "product loaded from JSON endpoint"
            );
            return Ok(product);
        }

        tracing::debug!(handle = %store.handle, "falling back to product page markup");
        let product = self.fetch_product_page(store).await?;
        tracing::info!(
            handle = %store.handle,
            variants = product.variants.len(),
            "product loaded from theme markup"
        );
        Ok(product)
    }

    /// Fetches `GET {origin}/products/{handle}.json` and returns its `product`.
    ///
    /// Returns `Ok(None)` for any non-200 status, a body that does not parse,
    /// a `product` that is missing, `null` or `{}`, or a product whose fields
    /// do not have the expected shape.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] on network failure only.
    pub async fn fetch_product_json(
        &self,
        store: &StoreReference,
    ) -> Result<Option<ShopifyProduct>, ScraperError> {
        let url = store.product_json_url();
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::debug!(%url, status = status.as_u16(), "product JSON endpoint unavailable");
            return Ok(None);
        }

        let body = response.text().await?;
        let envelope = match serde_json::from_str::<ProductEnvelope>(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::debug!(%url, error = %e, "product JSON did not parse");
                return Ok(None);
            }
        };

        match envelope.into_product() {
            Some(Ok(product)) => Ok(Some(product)),
            Some(Err(e)) => {
                tracing::debug!(%url, error = %e, "product JSON has an unexpected shape");
                Ok(None)
            }
            None => {
                tracing::debug!(%url, "product JSON has no `product` object");
                Ok(None)
            }
        }
    }

    /// Fetches `GET {origin}/products/{handle}` and parses the product object
    /// embedded in the theme's inline scripts.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`]: network failure.
    /// - [`ScraperError::UnexpectedStatus`]: non-2xx status.
    /// - [`ScraperError::ProductNotEmbedded`]: no known theme layout matched.
    /// - [`ScraperError::Deserialize`]: the captured object is not a product.
    pub async fn fetch_product_page(
        &self,
        store: &StoreReference,
    ) -> Result<ShopifyProduct, ScraperError> {
        let url = store.product_page_url();
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let html = response.text().await?;
        match find_embedded_product(&html) {
            ThemeMatch::Found { layout, json } => {
                tracing::debug!(%url, ?layout, "found embedded product object");
                serde_json::from_str(json).map_err(|e| ScraperError::Deserialize {
                    context: format!("{layout:?} product object embedded in {url}"),
                    source: e,
                })
            }
            ThemeMatch::NoMatch => Err(ScraperError::ProductNotEmbedded { url }),
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
