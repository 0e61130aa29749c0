//! # Validation Module
//!
//! Field rules enforced before any product or login request is sent.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field        Rule                          Message                     │
//! │  ──────────   ───────────────────────────   ──────────────────────────  │
//! │  name         required                      "Name is required"          │
//! │               <= 100 characters             "Name too long"             │
//! │  description  optional, unconstrained       -                           │
//! │  price        numeric                       "Price must be a number"    │
//! │               > 0                           "Price must be greater      │
//! │                                              than 0"                    │
//! │               <= 10000                      "Price too high"            │
//! │  category     required                      "Category is required"      │
//! │  email        contains '@'                  "Please enter a valid       │
//! │                                              email"                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::{validate_price, validate_email};
//!
//! assert!(validate_price(19.99).is_ok());
//! assert!(validate_price(0.0).is_err());
//! assert!(validate_email("someone@example.com").is_ok());
//! ```

use crate::error::{Field, FormErrors, ValidationError};
use crate::types::{ProductInput, ProductPatch};
use crate::{MAX_NAME_LENGTH, MAX_PRICE};

/// Result type for single-field checks.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name: required, at most 100 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: Field::Name });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: Field::Name,
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a price: a finite number with `0 < price <= 10000`.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_price;
///
/// assert!(validate_price(10_000.0).is_ok());
/// assert!(validate_price(15_000.0).is_err());
/// assert!(validate_price(-1.0).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if price.is_nan() {
        return Err(ValidationError::NotANumber {
            field: Field::Price,
        });
    }

    if price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: Field::Price,
        });
    }

    if price > MAX_PRICE {
        return Err(ValidationError::TooHigh {
            field: Field::Price,
            max: MAX_PRICE,
        });
    }

    Ok(())
}

/// Validates a category: required.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    if category.trim().is_empty() {
        return Err(ValidationError::Required {
            field: Field::Category,
        });
    }

    Ok(())
}

/// Syntactic email check done before a login is dispatched.
///
/// Only the presence of `@` is checked; whether the address may log in is
/// decided by the allow-list during the login itself.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() || !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a create payload, collecting every failing field.
pub fn validate_product(input: &ProductInput) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    errors.check(validate_product_name(&input.name));
    errors.check(validate_price(input.price));
    errors.check(validate_category(&input.category));
    errors.into_result()
}

/// Validates the fields present in an update payload.
pub fn validate_patch(patch: &ProductPatch) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    if let Some(name) = &patch.name {
        errors.check(validate_product_name(name));
    }
    if let Some(price) = patch.price {
        errors.check(validate_price(price));
    }
    if let Some(category) = &patch.category {
        errors.check(validate_category(category));
    }
    errors.into_result()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: f64, category: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: None,
            price,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Desk Lamp").is_ok());
        assert!(validate_product_name(&"A".repeat(100)).is_ok());

        assert_eq!(
            validate_product_name("   "),
            Err(ValidationError::Required { field: Field::Name })
        );
        assert!(matches!(
            validate_product_name(&"A".repeat(101)),
            Err(ValidationError::TooLong { max: 100, .. })
        ));
    }

    #[test]
    fn test_validate_price_bounds() {
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(10_000.0).is_ok());

        assert_eq!(
            validate_price(0.0).unwrap_err().to_string(),
            "Price must be greater than 0"
        );
        assert_eq!(
            validate_price(15_000.0).unwrap_err().to_string(),
            "Price too high"
        );
        assert_eq!(
            validate_price(f64::NAN).unwrap_err().to_string(),
            "Price must be a number"
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("symansalman@gmail.com").is_ok());
        assert_eq!(validate_email("nobody"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email(""), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_validate_product_collects_all_errors() {
        let errors = validate_product(&input("", 0.0, "")).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.message_for(Field::Price).as_deref(),
            Some("Price must be greater than 0")
        );
    }

    #[test]
    fn test_validate_product_accepts_valid_input() {
        assert!(validate_product(&input("Mug", 8.5, "Kitchen")).is_ok());
    }

    #[test]
    fn test_validate_patch_checks_present_fields_only() {
        assert!(validate_patch(&ProductPatch::default()).is_ok());

        let patch = ProductPatch {
            price: Some(20_000.0),
            ..Default::default()
        };
        let errors = validate_patch(&patch).unwrap_err();
        assert_eq!(errors.to_string(), "Price too high");
    }
}
