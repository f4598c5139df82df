//! # Etalage Storefront
//!
//! Interactive storefront session on stdin/stdout. Logs go to stderr.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StorefrontConfig::load() ──► tracing ──► StorefrontCatalog::open      │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                          Session::run(stdin, stdout)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use etalage_storefront::{Session, StorefrontCatalog, StorefrontConfig};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::load()?;

    // RUST_LOG wins over ETALAGE_LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        database = ?config.database_path,
        seed_demo = config.seed_demo,
        list_limit = config.list_limit,
        "Configuration loaded"
    );

    let catalog = match StorefrontCatalog::open(&config).await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(error = %e, "Catalog database unavailable, continuing with demo assortment");
            StorefrontCatalog::demo()
        }
    };
    info!(catalog = catalog.describe(), "Catalog ready");

    let mut session = Session::new(catalog, config.list_limit);
    session
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    Ok(())
}
