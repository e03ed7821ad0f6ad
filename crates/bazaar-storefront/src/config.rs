//! # Storefront Configuration
//!
//! Store details, delivery pricing and checkout timing.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BAZAAR_FREE_DELIVERY_FROM=7000                                     │
//! │     BAZAAR_SUBMIT_DELAY_MS=0                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bazaar/storefront.toml (Linux)                           │
//! │     ~/Library/Application Support/kz.bazaar.storefront/... (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     free delivery from 5000₸, fee 500₸, minimum order 2000₸            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [store]
//! name = "Bazaar"
//! address = "Астана, пр. Мангилик Ел 55"
//! phone = "+7 (7172) 55-55-55"
//!
//! [delivery]
//! free_delivery_from = 5000
//! delivery_fee = 500
//! min_order_amount = 2000
//!
//! [[delivery.time_slots]]
//! id = "asap"
//! label = "Как можно быстрее"
//! description = "30-60 мин"
//!
//! [checkout]
//! submit_delay_ms = 1500
//! ```

use std::path::PathBuf;
use std::time::Duration;

use bazaar_core::{DeliveryPolicy, Money};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::{StorefrontError, StorefrontResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Store Details
// =============================================================================

/// Contact details shown in the footer and on the contacts page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub working_hours: String,
    pub currency_symbol: String,
    /// Informational only; zone membership is decided by the map widget.
    pub delivery_radius_km: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: "Bazaar".to_string(),
            address: "Астана, пр. Мангилик Ел 55".to_string(),
            phone: "+7 (7172) 55-55-55".to_string(),
            email: "hello@bazaar.kz".to_string(),
            working_hours: "08:00 - 23:00".to_string(),
            currency_symbol: "₸".to_string(),
            delivery_radius_km: 5,
        }
    }
}

// =============================================================================
// Delivery Settings
// =============================================================================

/// A delivery window offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TimeSlot {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl TimeSlot {
    fn new(id: &str, label: &str, description: &str) -> Self {
        TimeSlot {
            id: id.to_string(),
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

fn default_time_slots() -> Vec<TimeSlot> {
    vec![
        TimeSlot::new("asap", "Как можно быстрее", "30-60 мин"),
        TimeSlot::new("12-14", "12:00 - 14:00", "Сегодня"),
        TimeSlot::new("14-16", "14:00 - 16:00", "Сегодня"),
        TimeSlot::new("16-18", "16:00 - 18:00", "Сегодня"),
        TimeSlot::new("18-20", "18:00 - 20:00", "Сегодня"),
    ]
}

/// Delivery pricing and the offered time slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverySettings {
    #[serde(default = "default_free_delivery_from")]
    pub free_delivery_from: Money,

    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: Money,

    #[serde(default = "default_min_order_amount")]
    pub min_order_amount: Money,

    #[serde(default = "default_time_slots")]
    pub time_slots: Vec<TimeSlot>,
}

fn default_free_delivery_from() -> Money {
    bazaar_core::pricing::DEFAULT_FREE_DELIVERY_FROM
}

fn default_delivery_fee() -> Money {
    bazaar_core::pricing::DEFAULT_DELIVERY_FEE
}

fn default_min_order_amount() -> Money {
    bazaar_core::pricing::DEFAULT_MIN_ORDER_AMOUNT
}

impl Default for DeliverySettings {
    fn default() -> Self {
        DeliverySettings {
            free_delivery_from: default_free_delivery_from(),
            delivery_fee: default_delivery_fee(),
            min_order_amount: default_min_order_amount(),
            time_slots: default_time_slots(),
        }
    }
}

impl DeliverySettings {
    pub fn policy(&self) -> DeliveryPolicy {
        DeliveryPolicy {
            free_delivery_from: self.free_delivery_from,
            delivery_fee: self.delivery_fee,
            min_order_amount: self.min_order_amount,
        }
    }

    pub fn slot_ids(&self) -> Vec<String> {
        self.time_slots.iter().map(|s| s.id.clone()).collect()
    }
}

// =============================================================================
// Checkout Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Simulated network round trip for order submission.
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

fn default_submit_delay_ms() -> u64 {
    1500
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

impl CheckoutSettings {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub delivery: DeliverySettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl StorefrontConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StorefrontResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StorefrontResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StorefrontError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorefrontError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| StorefrontError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StorefrontResult<()> {
        let delivery = &self.delivery;

        if delivery.delivery_fee.is_negative()
            || delivery.free_delivery_from.is_negative()
            || delivery.min_order_amount.is_negative()
        {
            return Err(StorefrontError::InvalidConfig(
                "delivery amounts must not be negative".into(),
            ));
        }

        if delivery.time_slots.is_empty() {
            return Err(StorefrontError::InvalidConfig(
                "at least one delivery time slot is required".into(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for slot in &delivery.time_slots {
            if slot.id.trim().is_empty() {
                return Err(StorefrontError::InvalidConfig(
                    "time slot id must not be empty".into(),
                ));
            }
            if !seen.insert(slot.id.as_str()) {
                return Err(StorefrontError::InvalidConfig(format!(
                    "duplicate time slot id: {}",
                    slot.id
                )));
            }
        }

        if self.store.name.trim().is_empty() {
            return Err(StorefrontError::InvalidConfig(
                "store name must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `BAZAAR_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("BAZAAR_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(phone) = lookup("BAZAAR_STORE_PHONE") {
            self.store.phone = phone;
        }

        let amounts = [
            ("BAZAAR_FREE_DELIVERY_FROM", &mut self.delivery.free_delivery_from),
            ("BAZAAR_DELIVERY_FEE", &mut self.delivery.delivery_fee),
            ("BAZAAR_MIN_ORDER_AMOUNT", &mut self.delivery.min_order_amount),
        ];
        for (key, target) in amounts {
            if let Some(raw) = lookup(key) {
                match raw.trim().parse::<i64>() {
                    Ok(value) => {
                        debug!(key, value, "Overriding delivery amount from environment");
                        *target = Money::from_tenge(value);
                    }
                    Err(_) => warn!(key, value = %raw, "Ignoring non-numeric amount in environment"),
                }
            }
        }

        if let Some(raw) = lookup("BAZAAR_SUBMIT_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => {
                    debug!(ms, "Overriding submit delay from environment");
                    self.checkout.submit_delay_ms = ms;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid BAZAAR_SUBMIT_DELAY_MS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("kz", "bazaar", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn delivery_policy(&self) -> DeliveryPolicy {
        self.delivery.policy()
    }

    /// Formats an amount with the configured currency symbol.
    pub fn format_price(&self, amount: Money) -> String {
        amount.format_with(&self.store.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert!(config.validate().is_ok());

        let policy = config.delivery_policy();
        assert_eq!(policy.free_delivery_from, Money::from_tenge(5000));
        assert_eq!(policy.delivery_fee, Money::from_tenge(500));
        assert_eq!(policy.min_order_amount, Money::from_tenge(2000));

        assert_eq!(config.delivery.slot_ids()[0], "asap");
        assert_eq!(config.delivery.time_slots.len(), 5);
        assert_eq!(config.checkout.submit_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();

        config.delivery.delivery_fee = Money::from_tenge(-1);
        assert!(config.validate().is_err());

        config.delivery.delivery_fee = Money::from_tenge(500);
        config.delivery.time_slots.clear();
        assert!(config.validate().is_err());

        config.delivery.time_slots = vec![
            TimeSlot::new("asap", "Как можно быстрее", ""),
            TimeSlot::new("asap", "Дубль", ""),
        ];
        assert!(config.validate().is_err());

        config.delivery.time_slots.pop();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [delivery]
            free_delivery_from = 7000

            [checkout]
            submit_delay_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.delivery.free_delivery_from, Money::from_tenge(7000));
        assert_eq!(config.delivery.delivery_fee, Money::from_tenge(500));
        assert_eq!(config.delivery.time_slots.len(), 5);
        assert_eq!(config.checkout.submit_delay_ms, 0);
        assert_eq!(config.store.name, "Bazaar");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = StorefrontConfig::default();
        config.store.name = "Bazaar Есиль".to_string();
        config.delivery.min_order_amount = Money::from_tenge(3000);
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[store]"));
        assert!(contents.contains("[delivery]"));

        let loaded: StorefrontConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[delivery]\ntime_slots = []\n").unwrap();

        assert!(matches!(
            StorefrontConfig::load(Some(path.clone())),
            Err(StorefrontError::InvalidConfig(_))
        ));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            StorefrontConfig::load(Some(path.clone())),
            Err(StorefrontError::ConfigLoadFailed(_))
        ));

        // Falls back instead of failing.
        let config = StorefrontConfig::load_or_default(Some(path));
        assert_eq!(config.delivery.time_slots.len(), 5);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("BAZAAR_STORE_NAME", "Bazaar Night"),
            ("BAZAAR_FREE_DELIVERY_FROM", "8000"),
            ("BAZAAR_DELIVERY_FEE", "abc"),
            ("BAZAAR_SUBMIT_DELAY_MS", "0"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.name, "Bazaar Night");
        assert_eq!(config.delivery.free_delivery_from, Money::from_tenge(8000));
        // Unparseable values are ignored.
        assert_eq!(config.delivery.delivery_fee, Money::from_tenge(500));
        assert_eq!(config.checkout.submit_delay_ms, 0);
    }

    #[test]
    fn test_format_price() {
        let mut config = StorefrontConfig::default();
        assert_eq!(config.format_price(Money::from_tenge(5000)), "5 000₸");

        config.store.currency_symbol = " тг".to_string();
        assert_eq!(config.format_price(Money::from_tenge(320)), "320 тг");
    }
}
