//! Direct-to-cart permalinks.

use std::fmt;

use crate::types::VariantId;

/// A storefront cart permalink: `{origin}/cart/{variant_id}:{quantity}`.
///
/// Opening it in a browser creates a cart holding the variant and sends the
/// shopper on to checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink(String);

impl CheckoutLink {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CheckoutLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the cart permalink for `quantity` units of `variant_id`.
#[must_use]
pub fn build_checkout_link(origin: &str, variant_id: &VariantId, quantity: u32) -> CheckoutLink {
    CheckoutLink(format!("{origin}/cart/{variant_id}:{quantity}"))
}
