mod browse;
mod suggest;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vitrina_client::{Catalog, CatalogLimits, ClientConfig, ProductClient};

#[derive(Debug, Parser)]
#[command(name = "vitrina")]
#[command(about = "Storefront product data from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one product, normalized, with fallbacks
    Product {
        id: String,
        /// Also load products of the same type
        #[arg(long)]
        with_related: bool,
    },
    /// Search summaries for a query
    Search {
        query: String,
        /// Full result view instead of the suggestion list
        #[arg(long)]
        full: bool,
    },
    /// One page of search results
    SearchPage {
        query: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Replay typing QUERY one character at a time through the debounced
    /// suggestion pipeline
    Suggest {
        query: String,
        /// Delay between simulated keystrokes
        #[arg(long, default_value_t = 80)]
        keystroke_ms: u64,
    },
    /// Products of a given type
    Related {
        product_type: String,
        /// Print one page envelope instead of the plain list
        #[arg(long)]
        page: Option<u32>,
        /// Page size; defaults to `VITRINA_RELATED_PAGE_SIZE`
        #[arg(long)]
        size: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = vitrina_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(env = %config.env, api = %config.api_base_url, "configuration loaded");

    let client = ProductClient::new(&ClientConfig::from_app_config(&config))
        .map_err(|e| anyhow::anyhow!("failed to build product client: {e}"))?;
    let catalog = Catalog::with_limits(client, CatalogLimits::from_app_config(&config));

    match cli.command {
        Commands::Product { id, with_related } => {
            browse::run_product(&catalog, &id, with_related).await
        }
        Commands::Search { query, full } => browse::run_search(&catalog, &query, full).await,
        Commands::SearchPage { query, page, size } => {
            browse::run_search_page(&catalog, &query, page, size).await
        }
        Commands::Suggest {
            query,
            keystroke_ms,
        } => suggest::run_suggest(catalog, &config, &query, keystroke_ms).await,
        Commands::Related {
            product_type,
            page,
            size,
        } => {
            let size = size.unwrap_or(config.related_page_size);
            browse::run_related(&catalog, &product_type, page, size).await
        }
    }
}
