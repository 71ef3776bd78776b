//! Store origin and product handle extraction from a product page URL.

use crate::error::ScraperError;

/// The storefront and product a product-page URL points at.
///
/// Given `"https://store.example/products/widget"`, `origin` is
/// `"https://store.example"` and `handle` is `"widget"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReference {
    pub origin: String,
    pub handle: String,
}

impl StoreReference {
    /// Splits a product page URL into its origin and final path segment.
    ///
    /// A trailing slash is ignored; query string and fragment never
    /// contribute to the handle. The origin keeps non-default ports.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidProductUrl`] if the URL does not parse
    /// or has no non-empty path segment.
    pub fn parse(product_url: &str) -> Result<Self, ScraperError> {
        let invalid = |reason: String| ScraperError::InvalidProductUrl {
            url: product_url.to_owned(),
            reason,
        };

        let url = reqwest::Url::parse(product_url.trim()).map_err(|e| invalid(e.to_string()))?;

        let handle = url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(str::to_owned)
            .ok_or_else(|| invalid("URL has no product handle in its path".to_owned()))?;

        Ok(Self {
            origin: url.origin().ascii_serialization(),
            handle,
        })
    }

    /// `{origin}/products/{handle}.json`
    #[must_use]
    pub fn product_json_url(&self) -> String {
        format!("{}/products/{}.json", self.origin, self.handle)
    }

    /// `{origin}/products/{handle}`
    #[must_use]
    pub fn product_page_url(&self) -> String {
        format!("{}/products/{}", self.origin, self.handle)
    }

    /// `{origin}/cart/add.js`
    #[must_use]
    pub fn cart_add_url(&self) -> String {
        format!("{}/cart/add.js", self.origin)
    }
}
