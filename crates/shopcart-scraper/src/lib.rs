pub mod checkout;
pub mod client;
pub mod error;
pub mod theme;
pub mod types;

pub use checkout::{build_checkout_link, CheckoutLink};
pub use client::{CartAddResponse, ShopifyClient, StoreReference};
pub use error::ScraperError;
pub use theme::{find_embedded_product, ThemeLayout, ThemeMatch};
pub use types::{Price, ShopifyProduct, ShopifyVariant, VariantId};
