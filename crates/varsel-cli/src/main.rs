mod feed;

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use varsel_core::catalog::ProductId;
use varsel_feed::{FeedCache, FeedClient, VariationProvider};

#[derive(Debug, Parser)]
#[command(name = "varsel-cli")]
#[command(about = "Varsel operator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the variation feed and summarize its products
    Fetch {
        /// Show the combination table for a single product
        #[arg(long)]
        product: Option<u64>,
    },
    /// Check a color/size pair of a product against the live feed
    Check {
        /// Product ID as keyed in the feed
        #[arg(long)]
        product: u64,
        /// Color name
        #[arg(long)]
        color: String,
        /// Size name
        #[arg(long)]
        size: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = varsel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = FeedClient::new(
        config.feed_url.clone(),
        config.feed_request_timeout_secs,
        &config.feed_user_agent,
    )?;
    let cache = FeedCache::new(Duration::from_secs(config.feed_cache_ttl_secs));
    let provider = VariationProvider::new(client, cache);

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch { product } => {
            feed::run_fetch(&provider, &config.currency_symbol, product.map(ProductId)).await
        }
        Commands::Check {
            product,
            color,
            size,
        } => {
            feed::run_check(
                &provider,
                &config.currency_symbol,
                ProductId(product),
                &color,
                &size,
            )
            .await
        }
    }
}
