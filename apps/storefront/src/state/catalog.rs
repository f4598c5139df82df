//! # Catalog State
//!
//! The catalog a session reads from, chosen once at startup.
//!
//! ```text
//! StorefrontConfig.database_path
//!        │
//!        ├── Some(path) ──► Database::new ──► ProductRepository
//!        │                     (seeds the demo assortment when empty
//!        │                      and ETALAGE_SEED_DEMO is on)
//!        │
//!        └── None ────────► InMemoryCatalog::demo()
//! ```

use etalage_core::catalog::demo_products;
use etalage_core::{CoreResult, InMemoryCatalog, Product, ProductCatalog};
use etalage_db::{Database, DbConfig, DbResult, ProductRepository};
use tracing::{info, warn};

use crate::config::StorefrontConfig;

/// Either catalog implementation behind one type.
#[derive(Debug, Clone)]
pub enum StorefrontCatalog {
    Database(ProductRepository),
    Demo(InMemoryCatalog),
}

impl StorefrontCatalog {
    /// Opens the catalog described by the configuration.
    pub async fn open(config: &StorefrontConfig) -> DbResult<Self> {
        let Some(path) = &config.database_path else {
            info!("No catalog database configured, serving demo assortment");
            return Ok(StorefrontCatalog::Demo(InMemoryCatalog::demo()));
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    etalage_db::DbError::ConnectionFailed(format!(
                        "cannot create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let db = Database::new(DbConfig::new(path)).await?;
        let repo = db.products();

        if config.seed_demo && repo.count().await? == 0 {
            seed_demo(&repo).await?;
        }

        Ok(StorefrontCatalog::Database(repo))
    }

    /// Catalog backed by the built-in demo assortment.
    pub fn demo() -> Self {
        StorefrontCatalog::Demo(InMemoryCatalog::demo())
    }

    pub fn describe(&self) -> &'static str {
        match self {
            StorefrontCatalog::Database(_) => "database",
            StorefrontCatalog::Demo(_) => "demo",
        }
    }
}

async fn seed_demo(repo: &ProductRepository) -> DbResult<()> {
    let products = demo_products();
    info!(count = products.len(), "Seeding empty catalog with demo assortment");

    for product in &products {
        if let Err(e) = repo.insert(product).await {
            warn!(id = %product.id, error = %e, "Skipping demo product");
        }
    }
    Ok(())
}

impl ProductCatalog for StorefrontCatalog {
    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Product>> {
        match self {
            StorefrontCatalog::Database(repo) => ProductCatalog::get_by_id(repo, id).await,
            StorefrontCatalog::Demo(demo) => demo.get_by_id(id).await,
        }
    }

    async fn get_by_slug(&self, slug: &str) -> CoreResult<Option<Product>> {
        match self {
            StorefrontCatalog::Database(repo) => ProductCatalog::get_by_slug(repo, slug).await,
            StorefrontCatalog::Demo(demo) => demo.get_by_slug(slug).await,
        }
    }

    async fn list(&self, product_type: Option<&str>, limit: u32) -> CoreResult<Vec<Product>> {
        match self {
            StorefrontCatalog::Database(repo) => {
                ProductCatalog::list(repo, product_type, limit).await
            }
            StorefrontCatalog::Demo(demo) => demo.list(product_type, limit).await,
        }
    }

    async fn search(&self, query: &str, limit: u32) -> CoreResult<Vec<Product>> {
        match self {
            StorefrontCatalog::Database(repo) => ProductCatalog::search(repo, query, limit).await,
            StorefrontCatalog::Demo(demo) => demo.search(query, limit).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_path_serves_demo() {
        let config = StorefrontConfig {
            database_path: None,
            ..StorefrontConfig::default()
        };
        let catalog = StorefrontCatalog::open(&config).await.unwrap();

        assert_eq!(catalog.describe(), "demo");
        assert!(catalog.get_by_id("fiets-001").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_database_catalog_is_seeded() {
        let path = std::env::temp_dir().join(format!(
            "etalage-test-{}/catalog.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let config = StorefrontConfig {
            database_path: Some(path.clone()),
            ..StorefrontConfig::default()
        };
        let catalog = StorefrontCatalog::open(&config).await.unwrap();

        assert_eq!(catalog.describe(), "database");
        let bikes = catalog.list(Some("fiets"), 10).await.unwrap();
        assert_eq!(bikes.len(), 3);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
