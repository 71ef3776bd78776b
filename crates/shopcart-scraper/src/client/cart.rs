//! Form-encoded `POST /cart/add.js`.

use std::fmt;

use serde::Serialize;

use super::{ShopifyClient, StoreReference};
use crate::error::ScraperError;
use crate::types::VariantId;

/// Body returned by `/cart/add.js`.
///
/// Serializes untagged, so the unparsed case renders as
/// `{"error":"Bad response","raw":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CartAddResponse {
    /// The storefront answered with JSON (the added line item, or an error
    /// object such as `{"status":422,"description":"..."}`).
    Parsed(serde_json::Value),
    /// The body was not JSON; `raw` holds it verbatim.
    Unparsed { error: String, raw: String },
}

impl CartAddResponse {
    pub(super) fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => Self::Parsed(value),
            Err(e) => {
                tracing::warn!(error = %e, "cart response is not JSON; keeping raw body");
                Self::Unparsed {
                    error: "Bad response".to_owned(),
                    raw: body,
                }
            }
        }
    }
}

impl fmt::Display for CartAddResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl ShopifyClient {
    /// Adds `quantity` units of `variant_id` to a fresh cart session.
    ///
    /// Best effort: the status code is not inspected and nothing verifies
    /// that the item landed in the cart. A body that is not JSON is returned
    /// as [`CartAddResponse::Unparsed`] rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] on network failure.
    pub async fn add_to_cart(
        &self,
        store: &StoreReference,
        variant_id: &VariantId,
        quantity: u32,
    ) -> Result<CartAddResponse, ScraperError> {
        let url = store.cart_add_url();
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("id", variant_id.as_str()),
                ("quantity", quantity.to_string().as_str()),
            ])
            .send()
            .await?;

        tracing::debug!(%url, status = response.status().as_u16(), "cart add response");
        let body = response.text().await?;
        Ok(CartAddResponse::from_body(body))
    }
}
