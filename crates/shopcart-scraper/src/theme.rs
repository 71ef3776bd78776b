//! Extraction of product JSON embedded in storefront theme markup.
//!
//! Only two theme layouts are recognised. Anything else reports
//! [`ThemeMatch::NoMatch`]; callers must not assume coverage of unseen themes.

use std::sync::LazyLock;

use regex::Regex;

static VAR_PRODUCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)var\s+product\s*=\s*(\{.*?\});").expect("valid var-product regex")
});
static PRODUCT_BEFORE_CURRENT_VARIANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)product:\s*(\{.*?\})\s*,\s*currentVariant")
        .expect("valid product/currentVariant regex")
});

/// Theme layout whose inline script held the product object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeLayout {
    /// `var product = {...};`
    VarProduct,
    /// `product: {...}, currentVariant` inside a theme config object.
    ProductBeforeCurrentVariant,
}

impl ThemeLayout {
    /// Layouts in the order they are tried.
    pub const ALL: [Self; 2] = [Self::VarProduct, Self::ProductBeforeCurrentVariant];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::VarProduct => &*VAR_PRODUCT_RE,
            Self::ProductBeforeCurrentVariant => &*PRODUCT_BEFORE_CURRENT_VARIANT_RE,
        }
    }
}

/// Result of searching a product page for an embedded product object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMatch<'a> {
    Found {
        layout: ThemeLayout,
        /// Captured object literal, braces included.
        json: &'a str,
    },
    NoMatch,
}

/// Searches `html` for a product object using each known [`ThemeLayout`].
#[must_use]
pub fn find_embedded_product(html: &str) -> ThemeMatch<'_> {
    ThemeLayout::ALL
        .into_iter()
        .find_map(|layout| {
            layout
                .pattern()
                .captures(html)
                .and_then(|caps| caps.get(1))
                .map(|m| ThemeMatch::Found {
                    layout,
                    json: m.as_str(),
                })
        })
        .unwrap_or(ThemeMatch::NoMatch)
}
