//! # Catalog
//!
//! The immutable product collection and the query that narrows it.
//!
//! ## Filter Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  products ──► hits_only? ──► category? ──► search? ──► result           │
//! │                  │              │             │                         │
//! │            is_hit || is_sale  exact id   name / nameKz contains         │
//! │                                          (case-insensitive)             │
//! │                                                                         │
//! │  plus the filter panel toggles: in stock, sale only, price range        │
//! │                                                                         │
//! │  All predicates are ANDed. Input order is kept. Input is never touched. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, Product};

// =============================================================================
// Query
// =============================================================================

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    pub fn new(min: Money, max: Money) -> Self {
        PriceRange { min, max }
    }

    #[inline]
    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Catalog query. The default value applies no filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CatalogQuery {
    /// Exact category id.
    pub category: Option<String>,
    /// Free-text name search; empty means no search.
    pub search_query: String,
    /// Keep only hits and sale items.
    pub hits_only: bool,
    pub in_stock_only: bool,
    pub sale_only: bool,
    pub price_range: Option<PriceRange>,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn hits_only(mut self, on: bool) -> Self {
        self.hits_only = on;
        self
    }

    pub fn in_stock_only(mut self, on: bool) -> Self {
        self.in_stock_only = on;
        self
    }

    pub fn sale_only(mut self, on: bool) -> Self {
        self.sale_only = on;
        self
    }

    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// True if any predicate would be applied.
    ///
    /// Lets callers tell "no filters" apart from "filters matched nothing".
    pub fn has_active_filters(&self) -> bool {
        self.category.is_some()
            || !self.search_query.is_empty()
            || self.hits_only
            || self.in_stock_only
            || self.sale_only
            || self.price_range.is_some()
    }

    /// Tests a single product against every active predicate.
    ///
    /// `needle` is the lowercased search query, computed once per filter call.
    fn matches(&self, product: &Product, needle: Option<&str>) -> bool {
        if self.hits_only && !product.is_promoted() {
            return false;
        }
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(needle) = needle {
            if !product.name_contains(needle) {
                return false;
            }
        }
        if self.in_stock_only && !product.in_stock {
            return false;
        }
        if self.sale_only && !product.is_sale {
            return false;
        }
        if let Some(range) = &self.price_range {
            if !range.contains(product.price) {
                return false;
            }
        }
        true
    }
}

/// Narrows `products` by `query`, preserving order.
///
/// ## Example
/// ```rust
/// use bazaar_core::{filter, CatalogQuery, Money, Product};
///
/// let products = vec![
///     Product::new("1", "Хлеб белый", Money::from_tenge(320), "bakery"),
///     Product::new("2", "Молоко 2.5%", Money::from_tenge(650), "dairy"),
/// ];
///
/// let found = filter(&products, &CatalogQuery::new().search("ХЛЕБ"));
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].id, "1");
/// ```
pub fn filter<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    let needle = if query.search_query.is_empty() {
        None
    } else {
        Some(query.search_query.to_lowercase())
    };

    products
        .iter()
        .filter(|p| query.matches(p, needle.as_deref()))
        .collect()
}

// =============================================================================
// Catalog
// =============================================================================

/// Immutable product and category collection supplied by the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Catalog {
            products,
            categories,
        }
    }

    /// Parses a catalog from JSON of the form
    /// `{ "products": [...], "categories": [...] }`.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::InvalidCatalog(e.to_string()))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Runs [`filter`] over this catalog.
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        filter(&self.products, query)
    }

    /// Heading for a product grid showing `query`'s results.
    pub fn category_title(&self, query: &CatalogQuery) -> String {
        if query.hits_only {
            return "Популярные товары".to_string();
        }
        query
            .category
            .as_deref()
            .and_then(|id| self.category(id))
            .map_or_else(|| "Все товары".to_string(), |c| c.name.clone())
    }

    /// Products currently on sale.
    pub fn sale_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_sale).collect()
    }

    /// Products marked as hits.
    pub fn hit_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_hit).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
