//! # Catalog Commands
//!
//! Browsing, the product page and the promotions page.

use bazaar_core::validation::validate_search_query;
use bazaar_core::{CatalogQuery, Category, Product};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::CatalogState;

/// Products matching a query, with the heading to show above them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogResponse {
    /// Category name, "Популярные товары" or "Все товары".
    pub title: String,
    pub products: Vec<Product>,
    /// Lets the page tell "nothing matches" apart from "nothing selected".
    pub has_active_filters: bool,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PromotionsResponse {
    pub sale: Vec<Product>,
    pub hits: Vec<Product>,
}

/// Lists products matching `query`, in catalog order.
///
/// The search text is trimmed before matching; an unknown category simply
/// matches nothing.
///
/// ## Errors
/// `VALIDATION_ERROR` when the search text is too long.
pub fn browse_catalog(catalog: &CatalogState, mut query: CatalogQuery) -> Result<CatalogResponse, ApiError> {
    debug!(
        category = ?query.category,
        search = %query.search_query,
        hits_only = query.hits_only,
        "browse_catalog command"
    );

    query.search_query = validate_search_query(&query.search_query)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let catalog = catalog.catalog();
    let products: Vec<Product> = catalog.query(&query).into_iter().cloned().collect();

    Ok(CatalogResponse {
        title: catalog.category_title(&query),
        total: products.len(),
        has_active_filters: query.has_active_filters(),
        products,
    })
}

/// Gets a single product for the product page.
pub fn get_product(catalog: &CatalogState, product_id: &str) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, "get_product command");
    catalog
        .catalog()
        .product(product_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", product_id))
}

pub fn get_categories(catalog: &CatalogState) -> Vec<Category> {
    debug!("get_categories command");
    catalog.catalog().categories().to_vec()
}

/// Sale items and hits for the promotions page.
pub fn get_promotions(catalog: &CatalogState) -> PromotionsResponse {
    debug!("get_promotions command");
    let catalog = catalog.catalog();
    PromotionsResponse {
        sale: catalog.sale_products().into_iter().cloned().collect(),
        hits: catalog.hit_products().into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::seed::demo_catalog;

    #[test]
    fn test_browse() {
        let catalog = CatalogState::new(demo_catalog());

        let all = browse_catalog(&catalog, CatalogQuery::new()).unwrap();
        assert_eq!(all.total, 18);
        assert_eq!(all.title, "Все товары");
        assert!(!all.has_active_filters);

        let bread = browse_catalog(&catalog, CatalogQuery::new().search("  ХЛЕБ ")).unwrap();
        assert_eq!(bread.total, 2);
        assert!(bread.has_active_filters);

        let bakery = browse_catalog(&catalog, CatalogQuery::new().category("bakery")).unwrap();
        assert_eq!(bakery.title, "Выпечка");
        assert_eq!(bakery.total, 4);

        let none = browse_catalog(&catalog, CatalogQuery::new().category("frozen")).unwrap();
        assert_eq!(none.total, 0);
    }

    #[test]
    fn test_search_too_long() {
        let catalog = CatalogState::new(demo_catalog());
        let err = browse_catalog(&catalog, CatalogQuery::new().search("х".repeat(101))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_product_and_promotions() {
        let catalog = CatalogState::new(demo_catalog());

        assert_eq!(get_product(&catalog, "13").unwrap().name, "Яблоки Голден");
        assert_eq!(get_product(&catalog, "99").unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(get_categories(&catalog).len(), 5);

        let promotions = get_promotions(&catalog);
        assert_eq!(promotions.sale.len(), 4);
        assert!(promotions.hits.iter().all(|p| p.is_hit));
    }
}
