//! # Catalog State
//!
//! Read-only after startup, so it is shared through an `Arc` with no lock.

use std::sync::Arc;

use bazaar_core::{Catalog, CoreError, CoreResult, Product};

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Looks up a product that may be put in the cart.
    ///
    /// ## Errors
    /// - `ProductNotFound` for unknown ids
    /// - `OutOfStock` when the product is listed but sold out
    pub fn purchasable(&self, product_id: &str) -> CoreResult<&Product> {
        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        if !product.in_stock {
            return Err(CoreError::OutOfStock {
                product_id: product.id.clone(),
                name: product.name.clone(),
            });
        }

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_catalog;

    #[test]
    fn test_purchasable() {
        let state = CatalogState::new(demo_catalog());

        assert_eq!(state.purchasable("5").unwrap().name, "Молоко 2.5%");
        assert!(matches!(
            state.purchasable("6"),
            Err(CoreError::OutOfStock { .. })
        ));
        assert!(matches!(
            state.purchasable("404"),
            Err(CoreError::ProductNotFound(_))
        ));
    }
}
