//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     --data-dir /srv/lpi                                                │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     LPI_DATA_DIR, LPI_STORAGE_KEY, LPI_WHATSAPP_NUMBER,                │
//! │     LPI_MENU_PATH, LPI_KITCHEN_NAME                                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/lpi-kitchen/storefront.toml (Linux)                      │
//! │     ~/Library/Application Support/in.lpi.lpi-kitchen/storefront.toml   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     LPI Kitchen, Delhi NCR delivery, bundled menu                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! kitchen_name = "LPI Kitchen"
//! whatsapp_number = "917505266931"
//! storage_key = "lpi_cart"
//! data_dir = "/var/lib/lpi"
//! menu_path = "/etc/lpi/menu.toml"
//!
//! [delivery]
//! free_delivery_from = 250   # rupees
//! charge = 100               # rupees
//! area_name = "Delhi NCR"
//! pin_prefixes = ["110", "121", "122", "201", "203"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use lpi_core::checkout::{DeliveryPolicy, NCR_PIN_PREFIXES};
use lpi_core::{Money, CART_STORAGE_KEY};

use crate::error::{AppError, AppResult};

// =============================================================================
// Delivery Configuration
// =============================================================================

/// Delivery charge and area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Subtotal (whole rupees) from which delivery is free.
    #[serde(default = "default_free_delivery_from")]
    pub free_delivery_from: i64,

    /// Flat delivery charge in whole rupees.
    #[serde(default = "default_charge")]
    pub charge: i64,

    #[serde(default = "default_area_name")]
    pub area_name: String,

    /// PIN codes must start with one of these.
    #[serde(default = "default_pin_prefixes")]
    pub pin_prefixes: Vec<String>,
}

fn default_free_delivery_from() -> i64 {
    250
}

fn default_charge() -> i64 {
    100
}

fn default_area_name() -> String {
    "Delhi NCR".to_string()
}

fn default_pin_prefixes() -> Vec<String> {
    NCR_PIN_PREFIXES.iter().map(|p| p.to_string()).collect()
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        DeliveryConfig {
            free_delivery_from: default_free_delivery_from(),
            charge: default_charge(),
            area_name: default_area_name(),
            pin_prefixes: default_pin_prefixes(),
        }
    }
}

impl DeliveryConfig {
    /// Builds the checkout policy.
    pub fn policy(&self) -> DeliveryPolicy {
        DeliveryPolicy {
            free_delivery_threshold: Money::from_rupees(self.free_delivery_from),
            delivery_charge: Money::from_rupees(self.charge),
            area_name: self.area_name.clone(),
            serviceable_prefixes: self.pin_prefixes.clone(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Everything the storefront reads at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shown in the order greeting: "Hello {kitchen_name} Team!"
    #[serde(default = "default_kitchen_name")]
    pub kitchen_name: String,

    /// Number orders are sent to, with country code, digits only.
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,

    /// Storage key for the cart snapshot.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Where the cart file lives. Platform data dir when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Menu file. The bundled menu when unset.
    #[serde(default)]
    pub menu_path: Option<PathBuf>,

    #[serde(default)]
    pub delivery: DeliveryConfig,
}

fn default_kitchen_name() -> String {
    "LPI Kitchen".to_string()
}

fn default_whatsapp_number() -> String {
    "917505266931".to_string()
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            kitchen_name: default_kitchen_name(),
            whatsapp_number: default_whatsapp_number(),
            storage_key: default_storage_key(),
            data_dir: None,
            menu_path: None,
            delivery: DeliveryConfig::default(),
        }
    }
}

impl AppConfig {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads defaults, then the config file, then environment overrides.
    ///
    /// ## Behavior
    /// - `config_path` given but missing: `ConfigError`
    /// - No `config_path` and no default file: defaults
    /// - File present but not valid TOML: `ConfigError`
    pub fn load(config_path: Option<&Path>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No config file, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Reads a TOML config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(path = %path.display(), "Loading storefront config");
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
            .map_err(|e| AppError::config(format!("{}: {}", path.display(), e.message)))
    }

    /// Parses TOML config text.
    pub fn from_toml_str(raw: &str) -> AppResult<Self> {
        toml::from_str(raw).map_err(|e| AppError::config(format!("Invalid config: {e}")))
    }

    /// Applies `LPI_*` overrides. `lookup` returns a variable's value, if set.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("LPI_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = lookup("LPI_STORAGE_KEY") {
            self.storage_key = key;
        }

        if let Some(number) = lookup("LPI_WHATSAPP_NUMBER") {
            debug!(number = %number, "Overriding WhatsApp number from environment");
            self.whatsapp_number = number;
        }

        if let Some(path) = lookup("LPI_MENU_PATH") {
            self.menu_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("LPI_KITCHEN_NAME") {
            self.kitchen_name = name;
        }
    }

    /// `<config dir>/storefront.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("in", "lpi", "lpi-kitchen")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// Checkout policy built from `[delivery]`.
    pub fn delivery_policy(&self) -> DeliveryPolicy {
        self.delivery.policy()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.kitchen_name, "LPI Kitchen");
        assert_eq!(config.whatsapp_number, "917505266931");
        assert_eq!(config.storage_key, "lpi_cart");
        assert_eq!(config.delivery_policy(), DeliveryPolicy::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            kitchen_name = "LPI Kitchen Noida"

            [delivery]
            charge = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.kitchen_name, "LPI Kitchen Noida");
        assert_eq!(config.storage_key, "lpi_cart");
        assert_eq!(config.delivery.charge, 60);
        assert_eq!(config.delivery.free_delivery_from, 250);
        assert_eq!(config.delivery.pin_prefixes.len(), 5);

        let policy = config.delivery_policy();
        assert_eq!(policy.delivery_charge, Money::from_rupees(60));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("kitchen_name = [").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = AppConfig::from_toml_str(
            r#"
            whatsapp_number = "911111111111"
            storage_key = "from_file"
            "#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [
            ("LPI_STORAGE_KEY", "from_env"),
            ("LPI_DATA_DIR", "/tmp/lpi"),
            ("LPI_KITCHEN_NAME", "Test Kitchen"),
        ]
        .into_iter()
        .collect();
        config.apply_env_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.storage_key, "from_env");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/lpi")));
        assert_eq!(config.kitchen_name, "Test Kitchen");
        // Not in the environment: file value stays.
        assert_eq!(config.whatsapp_number, "911111111111");
        assert_eq!(config.menu_path, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            "[delivery]\narea_name = \"Gurgaon\"\npin_prefixes = [\"122\"]\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        let policy = config.delivery_policy();
        assert_eq!(policy.area_name, "Gurgaon");
        assert!(policy.is_serviceable("122002"));
        assert!(!policy.is_serviceable("110001"));
    }

    #[test]
    fn test_huge_delivery_amounts_saturate() {
        let config = AppConfig::from_toml_str(
            r#"
            [delivery]
            free_delivery_from = 9223372036854775807
            charge = -9223372036854775807
            "#,
        )
        .unwrap();

        let policy = config.delivery_policy();
        assert_eq!(policy.free_delivery_threshold, Money::from_paise(i64::MAX));
        assert_eq!(policy.delivery_charge, Money::from_paise(i64::MIN));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }
}
