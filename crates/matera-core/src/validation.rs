//! # Validation Module
//!
//! Input validation utilities for the Matera storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Axum Route (Rust)                                            │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │                                                                         │
//! │  A request that fails here is rejected BEFORE any cart mutation or     │
//! │  hand-off step runs: invalid input never corrupts state.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use matera_core::validation::{validate_item_id, validate_quantity};
//!
//! // Validate before the cart mutation
//! validate_item_id("mate-imperial").unwrap();
//! validate_quantity(2).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ShippingDetails;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item ID (product or combo identifier).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
/// - Otherwise opaque: the catalog owns the format
///
/// ## Example
/// ```rust
/// use matera_core::validation::validate_item_id;
///
/// assert!(validate_item_id("mate-imperial").is_ok());
/// assert!(validate_item_id("").is_err());
/// assert!(validate_item_id(&"x".repeat(200)).is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "item_id".to_string(),
        });
    }

    if id.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "item_id".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a customer name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 120 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer_name".to_string(),
        });
    }

    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "customer_name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a contact phone number.
///
/// ## Rules
/// - Must not be empty
/// - Separators (spaces, dashes, parentheses) are ignored
/// - An optional leading `+`, then digits only
/// - At least 6 and at most 20 digits
///
/// ## Example
/// ```rust
/// use matera_core::validation::validate_phone;
///
/// assert!(validate_phone("+54 9 11 2345-6789").is_ok());
/// assert!(validate_phone("1123456789").is_ok());
/// assert!(validate_phone("not a phone").is_err());
/// assert!(validate_phone("").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if compact.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let digits = compact.strip_prefix('+').unwrap_or(&compact);

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits and an optional leading +".to_string(),
        });
    }

    if digits.len() < 6 {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: 6,
        });
    }

    if digits.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 20,
        });
    }

    Ok(())
}

/// Validates a delivery address.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 300 characters
pub fn validate_address(address: &str) -> ValidationResult<()> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    if address.len() > 300 {
        return Err(ValidationError::TooLong {
            field: "address".to_string(),
            max: 300,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Item                                                         │
/// │                                                                         │
/// │  Request quantity: 2                                                   │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(2) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_line                                   │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional freebies)
///
/// ## Example
/// ```rust
/// use matera_core::money::Money;
/// use matera_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_pesos(45_000)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_centavos(-100)).is_err());
/// ```
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

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates the full shipping form submitted at checkout.
///
/// Runs the field validators in order and fails on the first violation,
/// so the frontend always gets one actionable message at a time.
pub fn validate_shipping(details: &ShippingDetails) -> ValidationResult<()> {
    validate_customer_name(&details.customer_name)?;
    validate_phone(&details.phone)?;
    validate_address(&details.address)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("mate-imperial").is_ok());
        assert!(validate_item_id("combo-matero").is_ok());

        assert!(validate_item_id("").is_err());
        assert!(validate_item_id("   ").is_err());
        assert!(validate_item_id(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Juana Molina").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name(&"a".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+5491123456789").is_ok());
        assert!(validate_phone("+54 9 11 2345-6789").is_ok());
        assert!(validate_phone("(011) 2345-6789").is_ok());

        assert!(validate_phone("").is_err());
        assert!(validate_phone("12345").is_err()); // too short
        assert!(validate_phone("llamame").is_err());
        assert!(validate_phone("+54-11-abc").is_err());
        assert!(validate_phone(&"9".repeat(30)).is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("Av. Corrientes 1234, CABA").is_ok());
        assert!(validate_address("").is_err());
        assert!(validate_address(&"x".repeat(400)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_pesos(45_000)).is_ok());
        assert!(validate_price(Money::from_centavos(-1)).is_err());
    }

    #[test]
    fn test_validate_shipping() {
        let mut details = ShippingDetails {
            customer_name: "Juana Molina".to_string(),
            phone: "+5491123456789".to_string(),
            address: "Av. Corrientes 1234".to_string(),
            city: Some("CABA".to_string()),
            notes: None,
        };
        assert!(validate_shipping(&details).is_ok());

        details.phone = "nope".to_string();
        assert!(validate_shipping(&details).is_err());

        details.phone = "+5491123456789".to_string();
        details.customer_name = "  ".to_string();
        assert!(validate_shipping(&details).is_err());
    }
}
