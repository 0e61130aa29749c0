//! # Product Form
//!
//! Raw create/edit form text as typed by the user, parsed into a payload.
//!
//! ```text
//! ProductForm { name, description, price: "24.50", category }
//!     │
//!     ├── parse()        ──► ProductInput   (POST /products)
//!     └── parse_patch()  ──► ProductPatch   (PUT /products/:id)
//!
//! Every failing field is collected into one FormErrors.
//! ```

use crate::error::{Field, FormErrors, ValidationError};
use crate::types::{Product, ProductInput, ProductPatch};
use crate::validation::{validate_category, validate_price, validate_product_name};

// =============================================================================
// Form
// =============================================================================

/// Raw contents of the create/edit product form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
}

impl ProductForm {
    /// Pre-fills the edit form from a fetched product.
    pub fn from_product(product: &Product) -> Self {
        ProductForm {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            category: product.category.clone(),
        }
    }

    /// Parses and validates every field.
    ///
    /// All failures are reported together. A blank description becomes
    /// `None`.
    pub fn parse(&self) -> Result<ProductInput, FormErrors> {
        let mut errors = FormErrors::new();

        errors.check(validate_product_name(&self.name));

        let price = match self.price.trim().parse::<f64>() {
            Ok(price) => {
                errors.check(validate_price(price));
                price
            }
            Err(_) if self.price.trim().is_empty() => {
                errors.push(ValidationError::Required {
                    field: Field::Price,
                });
                0.0
            }
            Err(_) => {
                errors.push(ValidationError::NotANumber {
                    field: Field::Price,
                });
                0.0
            }
        };

        errors.check(validate_category(&self.category));
        errors.into_result()?;

        let description = self.description.trim();
        Ok(ProductInput {
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            price,
            category: self.category.trim().to_string(),
        })
    }

    /// Parses the form as a full replacement patch for `PUT /products/:id`.
    pub fn parse_patch(&self) -> Result<ProductPatch, FormErrors> {
        self.parse().map(ProductPatch::from)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, price: &str, category: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            description: String::new(),
            price: price.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_parses_valid_form() {
        let input = form("  Desk Lamp ", "24.50", "Lighting").parse().unwrap();
        assert_eq!(input.name, "Desk Lamp");
        assert_eq!(input.price, 24.5);
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_zero_price_is_rejected() {
        let errors = form("Lamp", "0", "Lighting").parse().unwrap_err();
        assert_eq!(
            errors.message_for(Field::Price).as_deref(),
            Some("Price must be greater than 0")
        );
    }

    #[test]
    fn test_excessive_price_is_rejected() {
        let errors = form("Lamp", "15000", "Lighting").parse().unwrap_err();
        assert_eq!(errors.to_string(), "Price too high");
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        let errors = form("Lamp", "cheap", "Lighting").parse().unwrap_err();
        assert_eq!(errors.to_string(), "Price must be a number");

        let errors = form("Lamp", "", "Lighting").parse().unwrap_err();
        assert_eq!(errors.to_string(), "Price is required");
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let errors = form("", "abc", " ").parse().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_edit_form_round_trips_a_product() {
        let product = Product {
            id: "9".to_string(),
            name: "Mug".to_string(),
            description: Some("Stoneware".to_string()),
            price: 8.0,
            category: "Kitchen".to_string(),
            image_url: None,
        };
        let patch = ProductForm::from_product(&product).parse_patch().unwrap();
        assert_eq!(product.patched(&patch), product);
    }
}
