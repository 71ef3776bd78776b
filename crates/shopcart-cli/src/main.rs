mod browser;
mod workflow;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::browser::SystemBrowser;
use crate::workflow::CartOptions;

#[derive(Debug, Parser)]
#[command(name = "shopcart")]
#[command(about = "Pick a Shopify product variant and build its checkout link")]
struct Cli {
    /// Shopify product URL
    url: String,

    /// Quantity
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    qty: u32,

    /// Open checkout in browser
    #[arg(long)]
    open: bool,

    /// Use POST add-to-cart
    #[arg(long)]
    post: bool,

    /// Variant number to choose instead of prompting (1-based)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    variant: Option<u32>,
}

impl Cli {
    fn cart_options(&self) -> CartOptions {
        CartOptions {
            quantity: self.qty,
            open_browser: self.open,
            use_post: self.post,
            variant: self.variant,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shopcart_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "loaded configuration");

    let client =
        shopcart_scraper::ShopifyClient::new(&config.user_agent, config.request_timeout_secs)?;

    let mut input = std::io::stdin().lock();
    let mut output = std::io::stdout().lock();
    workflow::cart_from_product(
        &client,
        &cli.url,
        &cli.cart_options(),
        &mut input,
        &mut output,
        &SystemBrowser,
    )
    .await?;

    Ok(())
}

/// Logs go to stderr so stdout carries only the variant list and link.
/// `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
