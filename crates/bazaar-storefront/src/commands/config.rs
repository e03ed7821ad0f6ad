//! # Config Commands
//!
//! Store details for the header, footer and contacts page.

use bazaar_core::Money;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::StorefrontConfig;

/// Read-only view of the store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoreInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub working_hours: String,
    pub currency_symbol: String,
    pub delivery_radius_km: u32,
    pub free_delivery_from: Money,
    pub delivery_fee: Money,
    pub min_order_amount: Money,
}

/// Gets the store details.
///
/// ## When Used
/// - App startup (header, footer)
/// - Contacts page
/// - Delivery terms ("Бесплатная доставка от 5 000₸")
pub fn get_store_info(config: &StorefrontConfig) -> StoreInfo {
    debug!("get_store_info command");
    let store = &config.store;
    StoreInfo {
        name: store.name.clone(),
        address: store.address.clone(),
        phone: store.phone.clone(),
        email: store.email.clone(),
        working_hours: store.working_hours.clone(),
        currency_symbol: store.currency_symbol.clone(),
        delivery_radius_km: store.delivery_radius_km,
        free_delivery_from: config.delivery.free_delivery_from,
        delivery_fee: config.delivery.delivery_fee,
        min_order_amount: config.delivery.min_order_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_info_serializes_camel_case() {
        let info = get_store_info(&StorefrontConfig::default());
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["workingHours"], "08:00 - 23:00");
        assert_eq!(json["minOrderAmount"], 2000);
    }
}
