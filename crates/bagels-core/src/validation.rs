//! # Validation Module
//!
//! Checks applied to catalog entries before a menu is accepted, and to the
//! capacity a till is configured with.
//!
//! The basket itself does no validation: prices come from a catalog that was
//! validated when it was built.
//!
//! ## Usage
//! ```rust
//! use bagels_core::validation::{validate_sku, validate_price};
//! use bagels_core::Money;
//!
//! validate_sku("BGLO").unwrap();
//! validate_price(Money::from_pence(49)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::NONE_SKU;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_SKU_LEN: usize = 50;
const MAX_NAME_LEN: usize = 200;

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only letters, digits, hyphens, underscores
/// - Must not be `"none"`, which rejected additions report
///
/// ## Example
/// ```rust
/// use bagels_core::validation::validate_sku;
///
/// assert!(validate_sku("COFB").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("none").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    if sku.eq_ignore_ascii_case(NONE_SKU) {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: format!("'{}' is reserved", NONE_SKU),
        });
    }

    Ok(())
}

/// Validates a product name or variant.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a catalog price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a configured basket capacity.
///
/// `Basket::change_capacity` accepts anything; this is for config input.
pub fn validate_capacity(capacity: usize) -> ValidationResult<()> {
    if capacity == 0 {
        return Err(ValidationError::OutOfRange {
            field: "capacity".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("BGLO").is_ok());
        assert!(validate_sku("cof_b-2").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
        assert!(validate_sku("NONE").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Bagel").is_ok());
        assert_eq!(
            validate_name("variant", " ").unwrap_err(),
            ValidationError::Required {
                field: "variant".to_string()
            }
        );
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_pence(129)).is_ok());
        assert!(validate_price(Money::from_pence(-1)).is_err());
    }

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity(1).is_ok());
        assert!(validate_capacity(0).is_err());
    }
}
