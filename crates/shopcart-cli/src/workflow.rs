//! Product URL to checkout link: fetch, choose a variant, optionally cart it.

use std::io::{BufRead, Write};

use shopcart_scraper::{
    build_checkout_link, CheckoutLink, Price, ScraperError, ShopifyClient, ShopifyVariant,
    StoreReference,
};
use thiserror::Error;

use crate::browser::BrowserLauncher;

#[derive(Debug, Error)]
pub(crate) enum WorkflowError {
    #[error(transparent)]
    Scraper(#[from] ScraperError),

    #[error("no variants found for product \"{title}\"")]
    NoVariants { title: String },

    #[error("no variant chosen: input closed before a selection was made")]
    NoSelection,

    #[error("invalid variant choice \"{input}\": expected a number from 1 to {count}")]
    InvalidSelection { input: String, count: usize },

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not open browser: {0}")]
    Browser(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CartOptions {
    pub quantity: u32,
    pub open_browser: bool,
    pub use_post: bool,
    /// 1-based choice that replaces the interactive prompt.
    pub variant: Option<u32>,
}

/// Runs the whole carting flow for one product URL and returns the checkout
/// link.
///
/// The variant list is checked before anything is printed or read, so an
/// empty product never reaches the prompt.
pub(crate) async fn cart_from_product<R, W>(
    client: &ShopifyClient,
    product_url: &str,
    options: &CartOptions,
    input: &mut R,
    out: &mut W,
    browser: &dyn BrowserLauncher,
) -> Result<CheckoutLink, WorkflowError>
where
    R: BufRead,
    W: Write,
{
    let store = StoreReference::parse(product_url)?;
    tracing::debug!(origin = %store.origin, handle = %store.handle, "resolved product URL");

    let product = client.fetch_product(&store).await?;
    if product.variants.is_empty() {
        return Err(WorkflowError::NoVariants {
            title: product.title,
        });
    }

    writeln!(out, "\n=== {} ===\n", product.title)?;
    for (idx, variant) in product.variants.iter().enumerate() {
        writeln!(
            out,
            "{}. {}  |  ID: {}  | Price: {}",
            idx + 1,
            variant.title,
            variant.id,
            variant.price.as_ref().map_or("n/a", Price::as_str)
        )?;
    }

    let chosen = select_variant(&product.variants, options.variant, input, out)?;
    writeln!(out, "\nSelected: {} (ID {})", chosen.title, chosen.id)?;

    if options.use_post {
        writeln!(out, "\nSending POST cart request...")?;
        let response = client
            .add_to_cart(&store, &chosen.id, options.quantity)
            .await?;
        writeln!(out, "Response: {response}")?;
    }

    let link = build_checkout_link(&store.origin, &chosen.id, options.quantity);
    writeln!(out, "\nCheckout link:")?;
    writeln!(out, "{link}")?;

    if options.open_browser {
        writeln!(out, "\nOpening in browser...")?;
        out.flush()?;
        browser.open(link.as_str()).map_err(WorkflowError::Browser)?;
    }

    Ok(link)
}

fn select_variant<'a, R, W>(
    variants: &'a [ShopifyVariant],
    preselected: Option<u32>,
    input: &mut R,
    out: &mut W,
) -> Result<&'a ShopifyVariant, WorkflowError>
where
    R: BufRead,
    W: Write,
{
    let raw = if let Some(choice) = preselected {
        choice.to_string()
    } else {
        write!(out, "\nChoose a variant number: ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(WorkflowError::NoSelection);
        }
        line.trim().to_owned()
    };

    resolve_selection(variants, &raw)
}

/// Maps a 1-based choice onto `variants`.
fn resolve_selection<'a>(
    variants: &'a [ShopifyVariant],
    raw: &str,
) -> Result<&'a ShopifyVariant, WorkflowError> {
    let invalid = || WorkflowError::InvalidSelection {
        input: raw.to_owned(),
        count: variants.len(),
    };

    let choice: usize = raw.parse().map_err(|_| invalid())?;
    choice
        .checked_sub(1)
        .and_then(|idx| variants.get(idx))
        .ok_or_else(invalid)
}

#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;
