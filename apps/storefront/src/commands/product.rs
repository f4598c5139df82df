//! # Product Commands
//!
//! Assortment listing, search and product lookup.

use etalage_core::validation::validate_search_query;
use etalage_core::{Product, ProductCatalog};
use tracing::debug;

use crate::error::ApiError;

/// Lists the assortment, optionally of one product type.
pub async fn list_products<C: ProductCatalog>(
    catalog: &C,
    product_type: Option<&str>,
    limit: u32,
) -> Result<Vec<Product>, ApiError> {
    debug!(product_type = ?product_type, limit, "list_products command");
    Ok(catalog.list(product_type, limit).await?)
}

/// Searches the assortment. The query is trimmed and at most 100 characters.
pub async fn search_products<C: ProductCatalog>(
    catalog: &C,
    query: &str,
    limit: u32,
) -> Result<Vec<Product>, ApiError> {
    let query = validate_search_query(query).map_err(etalage_core::CoreError::from)?;
    debug!(query = %query, limit, "search_products command");
    Ok(catalog.search(&query, limit).await?)
}

/// Gets one product by id or slug.
pub async fn get_product<C: ProductCatalog>(
    catalog: &C,
    reference: &str,
) -> Result<Product, ApiError> {
    debug!(reference = %reference, "get_product command");
    find_product(catalog, reference)
        .await?
        .ok_or_else(|| ApiError::product_not_found(reference))
}

/// Resolves what a shopper typed: a product id first, then a slug.
pub(crate) async fn find_product<C: ProductCatalog>(
    catalog: &C,
    reference: &str,
) -> Result<Option<Product>, ApiError> {
    let reference = reference.trim();
    if let Some(product) = catalog.get_by_id(reference).await? {
        return Ok(Some(product));
    }
    Ok(catalog.get_by_slug(&reference.to_lowercase()).await?)
}
