//! # Storefront Demo
//!
//! Walks one scripted shopper through the storefront: browse, fill the
//! cart, check out, repeat the order.
//!
//! ## Usage
//! ```bash
//! # Demo catalog, config from the platform config dir (or defaults)
//! cargo run -p bazaar-storefront
//!
//! # Explicit files
//! cargo run -p bazaar-storefront -- --config ./storefront.toml --catalog ./catalog.json
//!
//! # Write the effective config and exit
//! cargo run -p bazaar-storefront -- --write-config ./storefront.toml
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use bazaar_core::checkout::CheckoutForm;
use bazaar_core::{CatalogQuery, DeliveryAddress};
use bazaar_storefront::{init_tracing, seed, SimulatedSubmitter, Storefront, StorefrontConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut catalog_path: Option<PathBuf> = None;
    let mut write_config: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--catalog" => {
                if i + 1 < args.len() {
                    catalog_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--write-config" => {
                if i + 1 < args.len() {
                    write_config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bazaar Storefront Demo");
                println!();
                println!("Usage: bazaar-storefront [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>        Config file (default: platform config dir)");
                println!("      --catalog <PATH>       Catalog JSON (default: built-in demo catalog)");
                println!("      --write-config <PATH>  Save the effective config and exit");
                println!("  -h, --help                 Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = StorefrontConfig::load_or_default(config_path);

    if let Some(path) = write_config {
        config.save(Some(path.clone()))?;
        println!("✓ Config written to {}", path.display());
        return Ok(());
    }

    let catalog = match catalog_path.as_deref() {
        Some(path) => seed::load_catalog(path)?,
        None => seed::demo_catalog(),
    };

    let submitter = SimulatedSubmitter::new(config.checkout.submit_delay());
    let storefront = Storefront::new(config, catalog, Arc::new(submitter));
    let info = storefront.get_store_info();

    println!("🛒 {} ({})", info.name, info.working_hours);
    println!("================================");

    let hits = storefront.browse_catalog(CatalogQuery::new().hits_only(true))?;
    println!("{}: {}", hits.title, hits.total);
    for product in &hits.products {
        println!("  • {} {}", product.name, storefront.config().format_price(product.price));
    }

    for product in hits.products.iter().filter(|p| p.in_stock) {
        storefront.add_to_cart(&product.id, Some(2))?;
    }

    let cart = storefront.get_cart();
    println!();
    println!("Корзина: {} шт, {}", cart.totals.item_count, storefront.config().format_price(cart.totals.total));
    if let Some(hint) = &cart.free_delivery_hint {
        println!("  {}", hint);
    }

    let form = CheckoutForm {
        address: Some(DeliveryAddress::new("Астана, ул. Кенесары 40", true)),
        phone: "+7 701 555 12 34".to_string(),
        ..CheckoutForm::default()
    };

    println!();
    println!("Оформляем заказ...");
    let confirmation = storefront.place_order(form).await?;
    println!("✓ {}", confirmation.message);
    println!("  Итого: {}", storefront.config().format_price(confirmation.order.total));

    let repeat = storefront.reorder(&confirmation.order_number)?;
    println!();
    println!("Повтор заказа: {} шт в корзине", repeat.cart.totals.item_count);
    for name in &repeat.skipped {
        println!("  ⚠ {} недоступен", name);
    }

    println!();
    println!("{}", serde_json::to_string_pretty(&confirmation.order)?);

    Ok(())
}
