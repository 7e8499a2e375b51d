//! # Till Error Type
//!
//! Everything that can stop the till before a receipt is printed.
//!
//! Rejected additions are not errors here: the basket writes its notice and
//! the order carries on, just like at the counter.

use bagels_core::CoreError;
use thiserror::Error;

/// Result type alias for till operations.
pub type TillResult<T> = Result<T, TillError>;

#[derive(Debug, Error)]
pub enum TillError {
    /// Invalid till configuration.
    #[error("Invalid till configuration: {0}")]
    InvalidConfig(String),

    /// Config or menu file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `TillConfig`.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// An order token could not be understood.
    #[error("Invalid order token '{token}': {reason}")]
    InvalidOrder { token: String, reason: String },

    /// Basket precondition failed (bad bundle, unknown menu entry, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// JSON output failed.
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl TillError {
    pub(crate) fn invalid_order(token: &str, reason: impl Into<String>) -> Self {
        TillError::InvalidOrder {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
