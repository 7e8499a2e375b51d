//! # Error Types
//!
//! Domain-specific error types for bagels-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Rejection        - soft: the basket said no, caller carries on         │
//! │  ├── UnknownSku        (no notice)                                      │
//! │  └── CapacityExceeded  ("Basket size exceeded!" notice)                 │
//! │                                                                         │
//! │  CoreError        - hard: the caller passed a reference it should      │
//! │  ├── UnitNotFound      not have held                                    │
//! │  ├── NotComposite                                                       │
//! │  ├── ItemNotInBasket                                                    │
//! │  ├── UnknownBundle                                                      │
//! │  └── Validation   ◄── ValidationError (catalog building)               │
//! │                                                                         │
//! │  TillError (apps/till) wraps CoreError for the command line            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::NONE_SKU;

// =============================================================================
// Rejection
// =============================================================================

/// Why `Basket::add_item` declined to add a unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The SKU is not in the catalog.
    #[error("Product not found: {0}")]
    UnknownSku(String),

    /// The basket already holds `capacity` units.
    #[error("Basket size exceeded! (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
}

impl Rejection {
    /// SKU of the item a rejected addition stands for.
    ///
    /// Always `"none"`, mirroring the placeholder item older callers compare
    /// against.
    pub fn sku(&self) -> &'static str {
        NONE_SKU
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These are precondition violations: the caller held a unit ID or SKU that
/// the basket does not know about.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No unit in the basket has this ID.
    #[error("Basket unit not found: {0}")]
    UnitNotFound(String),

    /// Fillings can only be attached to bagels.
    #[error("Basket unit {0} cannot take fillings")]
    NotComposite(String),

    /// A bundle referenced a SKU with no unit in the basket.
    #[error("Item not in basket: {0}")]
    ItemNotInBasket(String),

    /// Bundle code is not one of b6, b12, bac.
    #[error("Unknown bundle '{0}'. Valid options: b6, b12, bac")]
    UnknownBundle(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Menu text could not be parsed.
    #[error("Invalid menu: {0}")]
    MenuParse(#[from] toml::de::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
