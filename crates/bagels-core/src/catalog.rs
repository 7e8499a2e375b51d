//! # Catalog
//!
//! The product catalog the basket resolves every SKU against.
//!
//! The basket never trusts a caller-supplied price. It asks an [`Inventory`]
//! for the canonical definition at the moment a unit is added.
//!
//! ## Built-in Menu
//! ```text
//! ┌──────┬────────┬──────────────┬───────┐
//! │ SKU  │ Name   │ Variant      │ Price │
//! ├──────┼────────┼──────────────┼───────┤
//! │ BGLO │ Bagel  │ Onion        │ 0.49  │
//! │ BGLP │ Bagel  │ Plain        │ 0.39  │
//! │ BGLE │ Bagel  │ Everything   │ 0.49  │
//! │ BGLS │ Bagel  │ Sesame       │ 0.49  │
//! │ COFB │ Coffee │ Black        │ 0.99  │
//! │ COFW │ Coffee │ White        │ 1.19  │
//! │ COFC │ Coffee │ Capuccino    │ 1.29  │
//! │ COFL │ Coffee │ Latte        │ 1.29  │
//! │ FILB │ Filling│ Bacon        │ 0.12  │
//! │ FILE │ Filling│ Egg          │ 0.12  │
//! │ FILC │ Filling│ Cheese       │ 0.12  │
//! │ FILX │ Filling│ Cream Cheese │ 0.12  │
//! │ FILS │ Filling│ Smoked Salmon│ 0.12  │
//! │ FILH │ Filling│ Ham          │ 0.12  │
//! └──────┴────────┴──────────────┴───────┘
//! ```

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Item, ItemKind};
use crate::validation::{validate_name, validate_price, validate_sku};

/// Read-only access to product definitions.
pub trait Inventory: Send + Sync {
    /// Full snapshot, in catalog order.
    fn list_contents(&self) -> &[Item];

    /// First definition with this SKU.
    fn find(&self, sku: &str) -> Option<&Item> {
        self.list_contents().iter().find(|item| item.sku == sku)
    }

    /// Definitions keyed by SKU.
    fn get_inventory(&self) -> HashMap<String, Item> {
        self.list_contents()
            .iter()
            .map(|item| (item.sku.clone(), item.clone()))
            .collect()
    }
}

const MENU: &[(&str, &str, &str, i64, ItemKind)] = &[
    ("BGLO", "Bagel", "Onion", 49, ItemKind::Bagel),
    ("BGLP", "Bagel", "Plain", 39, ItemKind::Bagel),
    ("BGLE", "Bagel", "Everything", 49, ItemKind::Bagel),
    ("BGLS", "Bagel", "Sesame", 49, ItemKind::Bagel),
    ("COFB", "Coffee", "Black", 99, ItemKind::Coffee),
    ("COFW", "Coffee", "White", 119, ItemKind::Coffee),
    ("COFC", "Coffee", "Capuccino", 129, ItemKind::Coffee),
    ("COFL", "Coffee", "Latte", 129, ItemKind::Coffee),
    ("FILB", "Filling", "Bacon", 12, ItemKind::Filling),
    ("FILE", "Filling", "Egg", 12, ItemKind::Filling),
    ("FILC", "Filling", "Cheese", 12, ItemKind::Filling),
    ("FILX", "Filling", "Cream Cheese", 12, ItemKind::Filling),
    ("FILS", "Filling", "Smoked Salmon", 12, ItemKind::Filling),
    ("FILH", "Filling", "Ham", 12, ItemKind::Filling),
];

/// An in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

#[derive(Deserialize)]
struct MenuFile {
    #[serde(default)]
    items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog, validating every entry.
    ///
    /// ## Errors
    /// - invalid SKU, name, variant or negative price
    /// - the same SKU listed twice
    pub fn new(items: Vec<Item>) -> CoreResult<Self> {
        let mut seen = HashSet::new();

        for item in &items {
            validate_sku(&item.sku)?;
            validate_name("name", &item.name)?;
            validate_name("variant", &item.variant)?;
            validate_price(item.price)?;

            if !seen.insert(item.sku.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "sku".to_string(),
                    value: item.sku.clone(),
                }
                .into());
            }
        }

        debug!(count = items.len(), "Catalog built");
        Ok(Catalog { items })
    }

    /// Parses a TOML menu (`[[items]]` tables) into a validated catalog.
    ///
    /// ## Example
    /// ```rust
    /// use bagels_core::{Catalog, Inventory};
    ///
    /// let menu = r#"
    ///     [[items]]
    ///     sku = "BGLR"
    ///     name = "Bagel"
    ///     variant = "Rye"
    ///     price = 55
    ///     kind = "bagel"
    /// "#;
    /// let catalog = Catalog::from_toml_str(menu).unwrap();
    /// assert_eq!(catalog.find("BGLR").unwrap().price.pence(), 55);
    /// ```
    pub fn from_toml_str(menu: &str) -> CoreResult<Self> {
        let file: MenuFile = toml::from_str(menu)?;
        Catalog::new(file.items)
    }

    /// The whole Bob's Bagels menu.
    pub fn bobs_bagels() -> Self {
        Catalog {
            items: MENU
                .iter()
                .map(|&(sku, name, variant, pence, kind)| {
                    Item::new(sku, name, variant, Money::from_pence(pence), kind)
                })
                .collect(),
        }
    }

    /// Bagels only.
    pub fn bagels() -> Self {
        Self::bobs_bagels().only(ItemKind::Bagel)
    }

    /// Coffees only.
    pub fn coffees() -> Self {
        Self::bobs_bagels().only(ItemKind::Coffee)
    }

    /// Fillings only.
    pub fn fillings() -> Self {
        Self::bobs_bagels().only(ItemKind::Filling)
    }

    /// Keeps the entries of one kind.
    pub fn only(mut self, kind: ItemKind) -> Self {
        self.items.retain(|item| item.kind == kind);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Inventory for Catalog {
    fn list_contents(&self) -> &[Item] {
        &self.items
    }
}
