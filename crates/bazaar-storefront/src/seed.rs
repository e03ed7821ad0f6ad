//! # Demo Catalog
//!
//! The in-memory product list the storefront runs on when no catalog JSON
//! is supplied.
//!
//! ## Contents
//! - Выпечка (bread, croissants)
//! - Молочные продукты (milk, kefir, cheese)
//! - Бакалея (pasta, rice, oil)
//! - Фрукты и овощи
//! - Напитки (juice, water)
//!
//! Some products are deliberately out of stock, on sale, or marked as hits
//! so every catalog filter has something to bite on.

use std::path::Path;

use bazaar_core::{Catalog, Category, CoreError, Money, Product};
use tracing::info;

use crate::error::{StorefrontError, StorefrontResult};

/// `(id, name, name_kz, icon)`
const CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("bakery", "Выпечка", "Нан өнімдері", "🍞"),
    ("dairy", "Молочные продукты", "Сүт өнімдері", "🥛"),
    ("grocery", "Бакалея", "Бакалея", "🍝"),
    ("fruits", "Фрукты и овощи", "Жемістер мен көкөністер", "🍎"),
    ("drinks", "Напитки", "Сусындар", "🧃"),
];

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    name_kz: &'static str,
    price: i64,
    old_price: Option<i64>,
    category: &'static str,
    weight: &'static str,
    unit: &'static str,
    in_stock: bool,
    is_hit: bool,
    is_sale: bool,
    is_new: bool,
}

const fn item(
    id: &'static str,
    name: &'static str,
    name_kz: &'static str,
    price: i64,
    category: &'static str,
    weight: &'static str,
    unit: &'static str,
) -> SeedProduct {
    SeedProduct {
        id,
        name,
        name_kz,
        price,
        old_price: None,
        category,
        weight,
        unit,
        in_stock: true,
        is_hit: false,
        is_sale: false,
        is_new: false,
    }
}

impl SeedProduct {
    const fn hit(mut self) -> Self {
        self.is_hit = true;
        self
    }

    const fn sale(mut self, old_price: i64) -> Self {
        self.is_sale = true;
        self.old_price = Some(old_price);
        self
    }

    const fn new_arrival(mut self) -> Self {
        self.is_new = true;
        self
    }

    const fn sold_out(mut self) -> Self {
        self.in_stock = false;
        self
    }

    fn to_product(&self) -> Product {
        Product {
            id: self.id.to_string(),
            name: self.name.to_string(),
            name_kz: Some(self.name_kz.to_string()),
            price: Money::from_tenge(self.price),
            old_price: self.old_price.map(Money::from_tenge),
            category: self.category.to_string(),
            weight: Some(self.weight.to_string()),
            unit: Some(self.unit.to_string()),
            in_stock: self.in_stock,
            is_hit: self.is_hit,
            is_sale: self.is_sale,
            is_new: self.is_new,
            description: None,
            image: None,
        }
    }
}

const PRODUCTS: &[SeedProduct] = &[
    item("1", "Хлеб белый нарезной", "Ақ нан кесілген", 320, "bakery", "500 г", "шт").hit(),
    item("2", "Хлеб ржаной", "Қара нан", 290, "bakery", "400 г", "шт"),
    item("3", "Батон нарезной", "Батон", 260, "bakery", "350 г", "шт").new_arrival(),
    item("4", "Круассан с шоколадом", "Шоколадты круассан", 380, "bakery", "80 г", "шт").sale(450),
    item("5", "Молоко 2.5%", "Сүт 2.5%", 650, "dairy", "1 л", "шт").hit(),
    item("6", "Кефир 1%", "Айран 1%", 580, "dairy", "1 л", "шт").sold_out(),
    item("7", "Сметана 20%", "Қаймақ 20%", 720, "dairy", "400 г", "шт").sale(850),
    item("8", "Сыр Российский", "Ресей ірімшігі", 2890, "dairy", "1 кг", "кг"),
    item("9", "Творог 5%", "Сүзбе 5%", 990, "dairy", "400 г", "шт").new_arrival(),
    item("10", "Макароны спагетти", "Спагетти макароны", 420, "grocery", "450 г", "шт"),
    item("11", "Рис длиннозерный", "Ұзын дәнді күріш", 780, "grocery", "900 г", "шт"),
    item("12", "Масло подсолнечное", "Күнбағыс майы", 1150, "grocery", "1 л", "шт").sale(1350),
    item("13", "Яблоки Голден", "Голден алмалары", 890, "fruits", "1 кг", "кг").hit(),
    item("14", "Бананы", "Банандар", 990, "fruits", "1 кг", "кг"),
    item("15", "Помидоры", "Қызанақ", 1290, "fruits", "1 кг", "кг").sold_out(),
    item("16", "Огурцы", "Қияр", 890, "fruits", "1 кг", "кг").sale(1090),
    item("17", "Вода минеральная", "Минералды су", 280, "drinks", "1.5 л", "шт"),
    item("18", "Сок яблочный", "Алма шырыны", 590, "drinks", "1 л", "шт").hit(),
];

/// Builds the demo catalog with category counts filled in.
pub fn demo_catalog() -> Catalog {
    let products: Vec<Product> = PRODUCTS.iter().map(SeedProduct::to_product).collect();

    let categories = CATEGORIES
        .iter()
        .map(|(id, name, name_kz, icon)| Category {
            id: id.to_string(),
            name: name.to_string(),
            name_kz: Some(name_kz.to_string()),
            icon: icon.to_string(),
            product_count: products.iter().filter(|p| p.category == *id).count() as u32,
        })
        .collect();

    Catalog::new(products, categories)
}

/// Loads a catalog from a JSON file and checks it for consistency.
pub fn load_catalog(path: &Path) -> StorefrontResult<Catalog> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| StorefrontError::CatalogLoadFailed(e.to_string()))?;
    let catalog = Catalog::from_json(&json)?;

    bazaar_core::validation::validate_catalog(catalog.products(), catalog.categories())
        .map_err(CoreError::from)?;

    info!(?path, products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::validation::validate_catalog;
    use bazaar_core::CatalogQuery;

    #[test]
    fn test_demo_catalog_is_consistent() {
        let catalog = demo_catalog();
        assert_eq!(catalog.len(), PRODUCTS.len());
        assert!(validate_catalog(catalog.products(), catalog.categories()).is_ok());

        let bakery = catalog.category("bakery").unwrap();
        assert_eq!(bakery.product_count, 4);
    }

    #[test]
    fn test_demo_catalog_exercises_filters() {
        let catalog = demo_catalog();

        assert!(!catalog.sale_products().is_empty());
        assert!(!catalog.hit_products().is_empty());
        assert!(catalog.products().iter().any(|p| !p.in_stock));

        let found = catalog.query(&CatalogQuery::new().search("ХЛЕБ"));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let json = serde_json::to_string(&demo_catalog()).unwrap();
        std::fs::write(&path, json).unwrap();
        assert_eq!(load_catalog(&path).unwrap(), demo_catalog());

        // Product pointing at a category that does not exist.
        std::fs::write(
            &path,
            r#"{"products":[{"id":"1","name":"Хлеб","price":320,"category":"x","inStock":true}],"categories":[]}"#,
        )
        .unwrap();
        assert!(load_catalog(&path).is_err());
    }
}
