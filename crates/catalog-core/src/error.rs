//! # Error Types
//!
//! Validation errors raised before anything reaches the network.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── ValidationError  - One field failed one rule                      │
//! │  └── FormErrors       - Every failing field of a submitted form        │
//! │                                                                         │
//! │  catalog-client errors (separate crate)                                │
//! │  └── ClientError      - Validation / Auth / NotFound / Network / ...   │
//! │                                                                         │
//! │  Flow: ValidationError → FormErrors → ClientError → store `error`      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The display strings are what the form shows next to each field, so they
//! are written for people, not logs.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Field
// =============================================================================

/// A user-editable input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Description,
    Price,
    Category,
    Email,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "Name",
            Field::Description => "Description",
            Field::Price => "Price",
            Field::Category => "Category",
            Field::Email => "Email",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single failed field rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: Field },

    /// Text is longer than allowed.
    #[error("{field} too long")]
    TooLong { field: Field, max: usize },

    /// Numeric input could not be parsed.
    #[error("{field} must be a number")]
    NotANumber { field: Field },

    /// Value must be strictly positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: Field },

    /// Value exceeds the allowed maximum.
    #[error("{field} too high")]
    TooHigh { field: Field, max: f64 },

    /// Login address is not syntactically an email.
    #[error("Please enter a valid email")]
    InvalidEmail,
}

impl ValidationError {
    /// The field this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::NotANumber { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::TooHigh { field, .. } => *field,
            ValidationError::InvalidEmail => Field::Email,
        }
    }
}

// =============================================================================
// Form Errors
// =============================================================================

/// All failing rules of one form submission, in field order.
///
/// Forms report every problem at once instead of stopping at the first,
/// so the user can fix them in one pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormErrors {
    errors: Vec<ValidationError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one failure.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records the failure of a field check, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.push(e);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// The first message for `field`, as shown under that input.
    pub fn message_for(&self, field: Field) -> Option<String> {
        self.errors
            .iter()
            .find(|e| e.field() == field)
            .map(ToString::to_string)
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for FormErrors {
    fn from(error: ValidationError) -> Self {
        FormErrors {
            errors: vec![error],
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: Field::Name };
        assert_eq!(err.to_string(), "Name is required");

        let err = ValidationError::MustBePositive {
            field: Field::Price,
        };
        assert_eq!(err.to_string(), "Price must be greater than 0");

        let err = ValidationError::TooHigh {
            field: Field::Price,
            max: 10_000.0,
        };
        assert_eq!(err.to_string(), "Price too high");

        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email"
        );
    }

    #[test]
    fn test_form_errors_display_joins_messages() {
        let mut errors = FormErrors::new();
        errors.push(ValidationError::Required { field: Field::Name });
        errors.push(ValidationError::Required {
            field: Field::Category,
        });

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "Name is required; Category is required"
        );
        assert_eq!(
            errors.message_for(Field::Category).as_deref(),
            Some("Category is required")
        );
        assert_eq!(errors.message_for(Field::Price), None);
    }

    #[test]
    fn test_empty_form_errors_is_ok() {
        assert!(FormErrors::new().into_result().is_ok());

        let single: FormErrors = ValidationError::InvalidEmail.into();
        assert!(single.into_result().is_err());
    }
}
