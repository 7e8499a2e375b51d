//! # bagels-core: Pure Business Logic for the Bob's Bagels Till
//!
//! This crate is the **heart** of the till. It holds the basket, the cost
//! ledger, the bundle discount rules and the receipt formatter.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bob's Bagels Till                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/till (CLI)                              │   │
//! │  │    config ──► order script ──► basket ──► receipt on stdout     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bagels-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │  basket   │  │  bundle   │  │  receipt  │  │   │
//! │  │   │ Inventory │  │  Ledger   │  │ b6 / b12  │  │  Receipt  │  │   │
//! │  │   │  Catalog  │  │  Charges  │  │   bac     │  │   Style   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO NETWORK • OUTPUT ONLY THROUGH OutputSink        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (pence, no floats)
//! - [`types`] - Catalog items and basket units
//! - [`catalog`] - The `Inventory` trait and the built-in menu
//! - [`basket`] - Basket, cost ledger and item lifecycle
//! - [`bundle`] - Bundle discount rules
//! - [`receipt`] - Receipt snapshot and fixed-width rendering
//! - [`output`] - Output sinks for notices and receipts
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog entry validation
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use bagels_core::{Basket, BundleRule, Catalog, MemorySink, Money};
//!
//! let sink = MemorySink::new();
//! let mut basket = Basket::with_output(Arc::new(Catalog::bobs_bagels()), sink.clone());
//!
//! basket.add_item("BGLE").unwrap();
//! basket.add_item("COFB").unwrap();
//! basket.apply_bundle(BundleRule::BagelAndCoffee, "BGLE", "COFB").unwrap();
//!
//! assert_eq!(basket.total_cost(), Money::from_pence(125));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod bundle;
pub mod catalog;
pub mod error;
pub mod money;
pub mod output;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::{Basket, BasketSummary, Charge, ChargeSource, Ledger};
pub use bundle::BundleRule;
pub use catalog::{Catalog, Inventory};
pub use error::{CoreError, CoreResult, Rejection, ValidationError};
pub use money::Money;
pub use output::{MemorySink, Notice, OutputSink, StdoutSink};
pub use receipt::{Receipt, ReceiptLine, ReceiptStyle};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of units a new basket accepts before rejecting additions.
pub const DEFAULT_CAPACITY: usize = 5;

/// SKU reported by a rejected addition.
///
/// Kept so callers that compare against the old sentinel item still work.
pub const NONE_SKU: &str = "none";

/// Width of the dashed rules on a receipt.
pub const RECEIPT_RULE_WIDTH: usize = 30;

/// Column the item label is padded to on a receipt line.
pub const RECEIPT_LABEL_WIDTH: usize = 22;
