//! # Product Repository
//!
//! Catalog reads (and the seed tool's writes) against the `products` table.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Catalog Search Works                             │
//! │                                                                         │
//! │  Shopper types: "Fiets"                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pattern = "%fiets%"  (LIKE wildcards in the query are escaped)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  search_text LIKE pattern  (lowercased in Rust on insert)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results in publication order: [Stadsfiets Classic, Fietsbel, ...]     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use etalage_core::validation::{validate_price_cents, validate_product_id};
use etalage_core::{CoreResult, Money, Product, ProductCatalog};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str =
    "id, name, description, image, price_cents, slug, product_type, updated_at";

/// A `products` row as stored.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    image: Option<String>,
    price_cents: i64,
    slug: String,
    product_type: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Self> {
        validate_price_cents(row.price_cents).map_err(|e| DbError::InvalidRow {
            entity: "Product".to_string(),
            id: row.id.clone(),
            reason: e.to_string(),
        })?;

        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            image: row.image,
            price: Money::from_cents(row.price_cents),
            slug: row.slug,
            product_type: row.product_type,
            updated_at: row.updated_at,
        })
    }
}

fn into_products(rows: Vec<ProductRow>) -> DbResult<Vec<Product>> {
    rows.into_iter().map(Product::try_from).collect()
}

/// Lowercases the query the way [`Product::search_text`] is lowercased and
/// escapes `%`, `_` and `\` so it matches literally in LIKE.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let bikes = repo.list(Some("fiets"), 24).await?;
/// let bel = repo.get_by_slug("fietsbel-zilver").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its CMS id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Gets a product by its URL slug.
    pub async fn get_by_slug(&self, slug: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = ?1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Lists products in publication order, optionally of one type.
    pub async fn list(&self, product_type: Option<&str>, limit: u32) -> DbResult<Vec<Product>> {
        debug!(product_type = ?product_type, limit = %limit, "Listing products");

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE (?1 IS NULL OR product_type = ?1) \
             ORDER BY position, name \
             LIMIT ?2"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product_type)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        into_products(rows)
    }

    /// Finds products whose name, description or slug contains `query`.
    ///
    /// An empty query lists the assortment.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching products");

        if query.is_empty() {
            return self.list(None, limit).await;
        }

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE search_text LIKE ?1 ESCAPE '\\' \
             ORDER BY position, name \
             LIMIT ?2"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(like_pattern(query))
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        let products = into_products(rows)?;
        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Inserts a product at the end of the publication order.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - id or slug already exists
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, slug = %product.slug, "Inserting product");

        validate_product_id(&product.id).map_err(|e| DbError::InvalidRow {
            entity: "Product".to_string(),
            id: product.id.clone(),
            reason: e.to_string(),
        })?;

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, image, price_cents, slug, product_type,
                search_text, position, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8,
                (SELECT COALESCE(MAX(position), -1) + 1 FROM products),
                ?9, ?10
            )
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.price.cents())
        .bind(&product.slug)
        .bind(&product.product_type)
        .bind(product.search_text())
        .bind(now)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts products (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

impl ProductCatalog for ProductRepository {
    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Product>> {
        Ok(ProductRepository::get_by_id(self, id).await?)
    }

    async fn get_by_slug(&self, slug: &str) -> CoreResult<Option<Product>> {
        Ok(ProductRepository::get_by_slug(self, slug).await?)
    }

    async fn list(&self, product_type: Option<&str>, limit: u32) -> CoreResult<Vec<Product>> {
        Ok(ProductRepository::list(self, product_type, limit).await?)
    }

    async fn search(&self, query: &str, limit: u32) -> CoreResult<Vec<Product>> {
        Ok(ProductRepository::search(self, query, limit).await?)
    }
}

/// Generates an id for a product authored locally rather than in the CMS.
pub fn generate_product_id() -> String {
    Uuid::new_v4().simple().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use etalage_core::catalog::demo_products;
    use etalage_core::{CoreError, InMemoryCatalog};

    async fn seeded() -> (Database, ProductRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        for product in demo_products() {
            repo.insert(&product).await.unwrap();
        }
        (db, repo)
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Fiets"), "%fiets%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[tokio::test]
    async fn test_get_by_id_and_slug() {
        let (_db, repo) = seeded().await;

        let bel = repo.get_by_id("acc-001").await.unwrap().unwrap();
        assert_eq!(bel.name, "Fietsbel Zilver");
        assert_eq!(bel.price, Money::from_cents(795));
        assert_eq!(bel.product_type, "accessoire");

        let by_slug = repo.get_by_slug("fietsbel-zilver").await.unwrap().unwrap();
        assert_eq!(by_slug, bel);

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_keeps_publication_order() {
        let (_db, repo) = seeded().await;

        let all = repo.list(None, 100).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|p| p.id.as_str()).collect();
        let expected: Vec<String> = demo_products().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);

        let bikes = repo.list(Some("fiets"), 2).await.unwrap();
        assert_eq!(bikes.len(), 2);
        assert!(bikes.iter().all(|p| p.product_type == "fiets"));
    }

    #[tokio::test]
    async fn test_search() {
        let (_db, repo) = seeded().await;

        let results = repo.search("FIETS", 50).await.unwrap();
        assert!(results.iter().any(|p| p.id == "fiets-001"));
        assert!(results.iter().any(|p| p.id == "acc-001"));

        assert!(repo.search("100%", 50).await.unwrap().is_empty());
        assert_eq!(repo.search("", 50).await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_search_matches_in_memory_catalog_beyond_ascii() {
        let (_db, repo) = seeded().await;
        let elan = Product::new("acc-777", "ÉLAN Fietsbel", Money::from_cents(1495))
            .with_description("Bel van messing met Öko-lak");
        repo.insert(&elan).await.unwrap();

        let mut products = demo_products();
        products.push(elan);
        let memory = InMemoryCatalog::new(products);

        for query in ["élan", "ÉLAN", "öko", "fiets", "zilver"] {
            let from_db: Vec<String> = ProductCatalog::search(&repo, query, 50)
                .await
                .unwrap()
                .into_iter()
                .map(|p| p.id)
                .collect();
            let from_memory: Vec<String> = memory
                .search(query, 50)
                .await
                .unwrap()
                .into_iter()
                .map(|p| p.id)
                .collect();
            assert_eq!(from_db, from_memory, "query {query:?}");
        }

        let hits = repo.search("élan", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "acc-777");
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let (_db, repo) = seeded().await;

        let copy = Product::new("acc-999", "Fietsbel Zilver", Money::from_cents(100));
        let err = repo.insert(&copy).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_catalog_trait_maps_errors() {
        let (db, repo) = seeded().await;
        db.close().await;

        let err = ProductCatalog::get_by_id(&repo, "acc-001").await.unwrap_err();
        assert!(matches!(err, CoreError::CatalogUnavailable(_)));
    }

    #[test]
    fn test_generate_product_id_is_valid() {
        let id = generate_product_id();
        assert!(validate_product_id(&id).is_ok());
        assert_ne!(id, generate_product_id());
    }
}
