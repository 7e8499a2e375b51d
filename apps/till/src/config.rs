//! # Till Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (--capacity, --menu)           (highest priority)     │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     BAGELS_SHOP_NAME=Bob's Bagels Leeds                                 │
//! │     BAGELS_CAPACITY=20                                                  │
//! │     BAGELS_MENU=/etc/bagels/menu.toml                                   │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     ~/.config/bagels/till.toml (Linux)                                  │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     Bob's Bagels, £, capacity 5, built-in menu                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [shop]
//! name = "Bob's Bagels"
//! currency_symbol = "£"
//!
//! [basket]
//! capacity = 5
//!
//! [menu]
//! path = "/etc/bagels/menu.toml"
//! ```

use std::path::PathBuf;

use bagels_core::validation::validate_capacity;
use bagels_core::{Catalog, ReceiptStyle, DEFAULT_CAPACITY};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{TillError, TillResult};

// =============================================================================
// Sections
// =============================================================================

/// Shop details printed on receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSettings {
    #[serde(default = "default_shop_name")]
    pub name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_shop_name() -> String {
    "Bob's Bagels".to_string()
}

fn default_currency_symbol() -> String {
    "£".to_string()
}

impl Default for ShopSettings {
    fn default() -> Self {
        ShopSettings {
            name: default_shop_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Basket behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketSettings {
    /// Units a basket accepts before "Basket size exceeded!".
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for BasketSettings {
    fn default() -> Self {
        BasketSettings {
            capacity: default_capacity(),
        }
    }
}

/// Where the catalog comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSettings {
    /// TOML menu file. `None` uses the built-in Bob's Bagels menu.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Till Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TillConfig {
    #[serde(default)]
    pub shop: ShopSettings,

    #[serde(default)]
    pub basket: BasketSettings,

    #[serde(default)]
    pub menu: MenuSettings,
}

impl TillConfig {
    /// Platform config file location.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "bobs-bagels", "bagels")
            .map(|dirs| dirs.config_dir().join("till.toml"))
    }

    /// Loads configuration from file (if present) and the environment.
    pub fn load(config_path: Option<PathBuf>) -> TillResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading till config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| TillError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                config = Self::from_toml_str(&contents)?;
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
            warn!("Failed to load till config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_toml_str(contents: &str) -> TillResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> TillResult<()> {
        if self.shop.name.trim().is_empty() {
            return Err(TillError::InvalidConfig("shop name must not be empty".into()));
        }

        validate_capacity(self.basket.capacity)
            .map_err(|e| TillError::InvalidConfig(e.to_string()))?;

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `BAGELS_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("BAGELS_SHOP_NAME") {
            debug!(shop = %name, "Overriding shop name from environment");
            self.shop.name = name;
        }

        if let Some(capacity) = lookup("BAGELS_CAPACITY") {
            match capacity.parse::<usize>() {
                Ok(c) => self.basket.capacity = c,
                Err(_) => warn!(value = %capacity, "Ignoring non-numeric BAGELS_CAPACITY"),
            }
        }

        if let Some(menu) = lookup("BAGELS_MENU") {
            self.menu.path = Some(PathBuf::from(menu));
        }
    }

    pub fn receipt_style(&self) -> ReceiptStyle {
        ReceiptStyle {
            shop_name: self.shop.name.clone(),
            currency_symbol: self.shop.currency_symbol.clone(),
        }
    }

    /// Builds the catalog: the menu file when configured, otherwise the
    /// built-in menu.
    pub fn catalog(&self) -> TillResult<Catalog> {
        match &self.menu.path {
            Some(path) => {
                info!(?path, "Loading menu");
                let contents = std::fs::read_to_string(path).map_err(|source| TillError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                Ok(Catalog::from_toml_str(&contents)?)
            }
            None => Ok(Catalog::bobs_bagels()),
        }
    }
}
