//! # Basket
//!
//! The basket owns the units a customer has picked and the cost ledger that
//! prices them.
//!
//! ## Two Collections, Kept Reconciled
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Basket Operations                                    │
//! │                                                                         │
//! │  Operation          items                    ledger                     │
//! │  ─────────          ─────                    ──────                     │
//! │                                                                         │
//! │  add_item()  ─────► push(unit)      ──────► record(Item charge)        │
//! │                                                                         │
//! │  add_filling() ───► unit.fillings.push ───► record(Filling charge)     │
//! │                                                                         │
//! │  apply_bundle() ──► (unchanged)     ──────► waive N charges by amount  │
//! │                                             record(Bundle charge)      │
//! │                                                                         │
//! │  remove_item() ───► remove(first by SKU)    (unchanged)                │
//! │                                                                         │
//! │  total_cost() ────────────────────────────► sum of active charges      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every charge records where it came from, so a discount is an auditable
//! edit of the ledger rather than a recomputation.
//!
//! Removing a unit leaves its charge in the ledger. Callers relying on the
//! total after a removal see the pre-removal amount.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bundle::BundleRule;
use crate::catalog::Inventory;
use crate::error::{CoreError, CoreResult, Rejection};
use crate::money::Money;
use crate::output::{Notice, OutputSink, StdoutSink};
use crate::receipt::{Receipt, ReceiptStyle};
use crate::types::{BasketItem, Item};
use crate::DEFAULT_CAPACITY;

// =============================================================================
// Ledger
// =============================================================================

/// What a ledger charge was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChargeSource {
    Item { unit_id: String, sku: String },
    Filling { unit_id: String, sku: String },
    Bundle { rule: BundleRule },
}

/// One billable event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Charge {
    pub source: ChargeSource,
    pub amount: Money,
    /// Cancelled by a bundle; excluded from totals.
    pub waived: bool,
}

/// The basket's running cost record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ledger {
    charges: Vec<Charge>,
}

impl Ledger {
    /// Every charge ever recorded, waived ones included.
    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    /// Charges that still count towards the total.
    pub fn active(&self) -> impl Iterator<Item = &Charge> {
        self.charges.iter().filter(|c| !c.waived)
    }

    pub fn active_len(&self) -> usize {
        self.active().count()
    }

    pub fn waived_len(&self) -> usize {
        self.charges.len() - self.active_len()
    }

    pub fn total(&self) -> Money {
        self.active().map(|c| c.amount).sum()
    }

    pub(crate) fn record(&mut self, source: ChargeSource, amount: Money) {
        self.charges.push(Charge {
            source,
            amount,
            waived: false,
        });
    }

    /// Waives up to `count` active charges whose amount equals `amount`,
    /// oldest first. Returns how many were waived.
    pub(crate) fn waive(&mut self, amount: Money, count: usize) -> usize {
        let mut waived = 0;
        for charge in self.charges.iter_mut() {
            if waived == count {
                break;
            }
            if !charge.waived && charge.amount == amount {
                charge.waived = true;
                waived += 1;
            }
        }
        waived
    }
}

// =============================================================================
// Basket
// =============================================================================

/// A capacity-bounded basket for one checkout session.
pub struct Basket {
    inventory: Arc<dyn Inventory>,
    capacity: usize,
    pub(crate) items: Vec<BasketItem>,
    pub(crate) ledger: Ledger,
    output: Box<dyn OutputSink>,
    style: ReceiptStyle,
}

impl Basket {
    /// Creates an empty basket that writes to standard output.
    pub fn new(inventory: Arc<dyn Inventory>) -> Self {
        Self::with_output(inventory, StdoutSink)
    }

    /// Creates an empty basket writing notices and receipts to `output`.
    pub fn with_output(inventory: Arc<dyn Inventory>, output: impl OutputSink + 'static) -> Self {
        Basket {
            inventory,
            capacity: DEFAULT_CAPACITY,
            items: Vec::new(),
            ledger: Ledger::default(),
            output: Box::new(output),
            style: ReceiptStyle::default(),
        }
    }

    /// Sets the shop name and currency used by `print_receipt`.
    pub fn with_receipt_style(mut self, style: ReceiptStyle) -> Self {
        self.style = style;
        self
    }

    // -------------------------------------------------------------------------
    // Item lifecycle
    // -------------------------------------------------------------------------

    /// Adds one unit of `sku` at its catalog price.
    ///
    /// ## Behavior
    /// - Unknown SKU: `Rejection::UnknownSku`, nothing written. Checked before
    ///   capacity, so a full basket stays quiet about unknown SKUs.
    /// - Basket full: writes `Basket size exceeded!`, returns
    ///   `Rejection::CapacityExceeded`.
    /// - Otherwise: a new unit with a fresh ID is appended and charged.
    pub fn add_item(&mut self, sku: &str) -> Result<BasketItem, Rejection> {
        let Some(definition) = self.inventory.find(sku) else {
            debug!(sku = %sku, "Rejected unknown SKU");
            return Err(Rejection::UnknownSku(sku.to_string()));
        };

        if self.items.len() >= self.capacity {
            warn!(sku = %sku, capacity = self.capacity, "Basket full");
            self.output.notice(Notice::CapacityExceeded);
            return Err(Rejection::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let unit = BasketItem::from_item(definition);
        self.ledger.record(
            ChargeSource::Item {
                unit_id: unit.id.clone(),
                sku: unit.sku.clone(),
            },
            unit.unit_price,
        );
        debug!(sku = %unit.sku, unit_id = %unit.id, price = %unit.unit_price, "Added unit");
        self.items.push(unit.clone());

        Ok(unit)
    }

    /// Removes the first unit with this SKU.
    ///
    /// The unit's charge stays in the ledger.
    pub fn remove_item(&mut self, sku: &str) -> bool {
        match self.items.iter().position(|unit| unit.sku == sku) {
            Some(index) => {
                let unit = self.items.remove(index);
                debug!(sku = %sku, unit_id = %unit.id, "Removed unit");
                true
            }
            None => {
                self.output.notice(Notice::NotInBasket);
                false
            }
        }
    }

    /// Sets a new capacity. Units already in the basket are kept even when
    /// there are more of them than the new capacity.
    pub fn change_capacity(&mut self, capacity: usize) {
        debug!(from = self.capacity, to = capacity, "Capacity changed");
        self.capacity = capacity;
    }

    /// Attaches a copy of the catalog item `filling_sku` to the bagel unit
    /// `unit_id`. Any catalog SKU is accepted, not only `Filling` kinds.
    ///
    /// ## Returns
    /// - `Ok(Some(filling))` when attached and charged
    /// - `Ok(None)` when `filling_sku` is not in the catalog (no notice)
    /// - `Err(UnitNotFound)` / `Err(NotComposite)` for a bad unit reference
    pub fn add_filling(&mut self, unit_id: &str, filling_sku: &str) -> CoreResult<Option<Item>> {
        let index = self.position_of(unit_id)?;
        if !self.items[index].is_composite() {
            return Err(CoreError::NotComposite(unit_id.to_string()));
        }

        let Some(filling) = self.inventory.find(filling_sku).cloned() else {
            debug!(sku = %filling_sku, "Ignored unknown filling");
            return Ok(None);
        };

        self.items[index].attach_filling(filling.clone());
        self.ledger.record(
            ChargeSource::Filling {
                unit_id: unit_id.to_string(),
                sku: filling.sku.clone(),
            },
            filling.price,
        );
        debug!(unit_id = %unit_id, filling = %filling.sku, "Attached filling");

        Ok(Some(filling))
    }

    /// Looks up a unit by ID.
    pub fn item(&self, unit_id: &str) -> CoreResult<&BasketItem> {
        self.position_of(unit_id).map(|index| &self.items[index])
    }

    /// Catalog price of `sku`; writes `Product not found!` when unknown.
    pub fn item_price(&mut self, sku: &str) -> Option<Money> {
        let price = self.inventory.find(sku).map(|item| item.price);
        if price.is_none() {
            self.output.notice(Notice::ProductNotFound);
        }
        price
    }

    fn position_of(&self, unit_id: &str) -> CoreResult<usize> {
        self.items
            .iter()
            .position(|unit| unit.id == unit_id)
            .ok_or_else(|| CoreError::UnitNotFound(unit_id.to_string()))
    }

    // -------------------------------------------------------------------------
    // Totals and receipt
    // -------------------------------------------------------------------------

    /// Sum of every active ledger charge.
    pub fn total_cost(&self) -> Money {
        self.ledger.total()
    }

    /// Snapshot of the receipt as of now.
    pub fn receipt(&self) -> Receipt {
        Receipt::from_basket(self)
    }

    /// Writes the receipt to the basket's output.
    pub fn print_receipt(&mut self) {
        let receipt = self.receipt();
        info!(
            lines = receipt.lines.len(),
            total = %receipt.total,
            "Printing receipt"
        );
        for line in receipt.render(&self.style) {
            self.output.write_line(&line);
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units with this SKU.
    pub fn count_sku(&self, sku: &str) -> usize {
        self.items.iter().filter(|unit| unit.sku == sku).count()
    }

    pub fn summary(&self) -> BasketSummary {
        BasketSummary::from(self)
    }
}

impl fmt::Debug for Basket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Basket")
            .field("capacity", &self.capacity)
            .field("items", &self.items)
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}

/// Basket totals for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketSummary {
    pub item_count: usize,
    pub capacity: usize,
    pub active_charges: usize,
    pub waived_charges: usize,
    pub total_pence: i64,
}

impl From<&Basket> for BasketSummary {
    fn from(basket: &Basket) -> Self {
        BasketSummary {
            item_count: basket.len(),
            capacity: basket.capacity(),
            active_charges: basket.ledger.active_len(),
            waived_charges: basket.ledger.waived_len(),
            total_pence: basket.total_cost().pence(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
