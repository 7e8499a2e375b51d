//! # Domain Types
//!
//! Items as the catalog defines them and as the basket owns them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   copied at add-time   ┌─────────────────────┐    │
//! │  │      Item       │ ─────────────────────► │     BasketItem      │    │
//! │  │  ─────────────  │                        │  ─────────────────  │    │
//! │  │  sku            │                        │  id (UUID v4)       │    │
//! │  │  name           │                        │  sku, name, variant │    │
//! │  │  variant        │                        │  unit_price         │    │
//! │  │  price (pence)  │                        │  kind               │    │
//! │  │  kind           │                        │  fillings: [Item]   │    │
//! │  └─────────────────┘                        └─────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! - `sku`: product identity, shared by every unit of the same product
//! - `id`: one physical unit in one basket

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Item Kind
// =============================================================================

/// What sort of product an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Takes fillings.
    Bagel,
    Coffee,
    /// Attached to a bagel, never sold on its own line.
    Filling,
}

impl ItemKind {
    /// Whether units of this kind own a filling sequence.
    #[inline]
    pub const fn is_composite(&self) -> bool {
        matches!(self, ItemKind::Bagel)
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Bagel => write!(f, "bagel"),
            ItemKind::Coffee => write!(f, "coffee"),
            ItemKind::Filling => write!(f, "filling"),
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// A product definition as held by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stock Keeping Unit - catalog key.
    pub sku: String,

    /// Product name ("Bagel", "Coffee", "Filling").
    pub name: String,

    /// Descriptive variant ("Onion", "Black", "Cream Cheese").
    pub variant: String,

    /// Price in pence.
    pub price: Money,

    pub kind: ItemKind,
}

impl Item {
    /// Creates an item definition.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        variant: impl Into<String>,
        price: Money,
        kind: ItemKind,
    ) -> Self {
        Item {
            sku: sku.into(),
            name: name.into(),
            variant: variant.into(),
            price,
            kind,
        }
    }

    /// Receipt label: `"<variant> <name>"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.variant, self.name)
    }
}

// =============================================================================
// Basket Item
// =============================================================================

/// One unit of sale owned by a basket.
///
/// Uses the snapshot pattern: name, variant and price are frozen when the
/// unit is added. Only the filling sequence changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    /// Unit identifier (UUID v4), fresh for every addition.
    pub id: String,

    /// SKU at time of adding (frozen).
    pub sku: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Variant at time of adding (frozen).
    pub variant: String,

    /// Catalog price at time of adding (frozen).
    pub unit_price: Money,

    pub kind: ItemKind,

    /// When this unit was added.
    pub added_at: DateTime<Utc>,

    fillings: Vec<Item>,
}

impl BasketItem {
    /// Creates a new unit from a catalog definition.
    pub fn from_item(item: &Item) -> Self {
        BasketItem {
            id: Uuid::new_v4().to_string(),
            sku: item.sku.clone(),
            name: item.name.clone(),
            variant: item.variant.clone(),
            unit_price: item.price,
            kind: item.kind,
            added_at: Utc::now(),
            fillings: Vec::new(),
        }
    }

    /// Fillings attached to this unit, in the order they were added.
    pub fn fillings(&self) -> &[Item] {
        &self.fillings
    }

    /// Whether this unit can carry fillings.
    #[inline]
    pub fn is_composite(&self) -> bool {
        self.kind.is_composite()
    }

    /// Receipt label: `"<variant> <name>"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.variant, self.name)
    }

    pub(crate) fn attach_filling(&mut self, filling: Item) {
        self.fillings.push(filling);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
