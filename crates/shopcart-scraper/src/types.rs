//! Product shapes served by a Shopify storefront.
//!
//! The same logical product reaches us in two encodings:
//!
//! ### `GET /products/{handle}.json`
//! Wrapped in a `{"product": {...}}` envelope. Variant `id` is a JSON number,
//! `price` is a decimal string (`"30.00"`).
//!
//! ### Theme-embedded objects (`var product = {...};`)
//! No envelope. Variant `price` is an integer number of cents (`3000`).
//! Some themes stringify ids.
//!
//! [`VariantId`] and [`Price`] absorb both encodings so the rest of the crate
//! only sees display-ready strings.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope returned by `GET /products/{handle}.json`.
///
/// `product` stays untyped until [`ProductEnvelope::into_product`] so that
/// `null` and `{}` can be told apart from a product that fails to parse.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductEnvelope {
    #[serde(default)]
    pub product: Option<serde_json::Value>,
}

impl ProductEnvelope {
    /// Returns `None` when `product` is missing, `null`, or an empty object.
    pub(crate) fn into_product(self) -> Option<Result<ShopifyProduct, serde_json::Error>> {
        self.product
            .filter(|value| match value {
                serde_json::Value::Null => false,
                serde_json::Value::Object(fields) => !fields.is_empty(),
                _ => true,
            })
            .map(serde_json::from_value)
    }
}

/// A product as exposed by the storefront.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShopifyProduct {
    /// Shopify numeric product ID.
    #[serde(default)]
    pub id: Option<u64>,

    /// Display name. Defaults to `"Product"` when the storefront omits it.
    #[serde(default = "default_title")]
    pub title: String,

    /// URL slug for the product page.
    #[serde(default)]
    pub handle: Option<String>,

    #[serde(default)]
    pub vendor: Option<String>,

    /// All purchasable variants. Empty when the field is absent; callers must
    /// check before offering a selection.
    #[serde(default)]
    pub variants: Vec<ShopifyVariant>,
}

/// A single purchasable variant of a [`ShopifyProduct`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShopifyVariant {
    pub id: VariantId,

    /// Size/colour string such as `"Large / Blue"`, or `"Default Title"`.
    pub title: String,

    #[serde(default)]
    pub price: Option<Price>,

    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub available: Option<bool>,
}

/// Opaque storefront identifier for a variant, kept exactly as rendered by
/// the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for VariantId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for VariantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) if n.is_u64() || n.is_i64() => Self(n.to_string()),
            NumberOrText::Number(n) => {
                return Err(D::Error::custom(format!(
                    "variant id must be an integer, got {n}"
                )))
            }
            NumberOrText::Text(s) => Self(s),
        })
    }
}

/// Display price of a variant.
///
/// Decimal strings are kept verbatim. Integer numbers are cents and render
/// with two decimal places (`3000` becomes `"30.00"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Price(String);

impl Price {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_cents(cents: i64) -> Self {
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        Self(format!("{sign}{}.{:02}", abs / 100, abs % 100))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Text(s) => Self(s),
            NumberOrText::Number(n) => match n.as_i64() {
                Some(cents) => Self::from_cents(cents),
                None => Self(format!("{:.2}", n.as_f64().unwrap_or_default())),
            },
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

fn default_title() -> String {
    "Product".to_string()
}
