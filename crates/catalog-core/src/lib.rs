//! # catalog-core: Pure Domain Logic for the Catalog Console
//!
//! Everything in this crate is deterministic and free of I/O. The
//! `catalog-client` crate wraps it with HTTP calls and observable stores.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Console Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Front end (CLI / web)                       │   │
//! │  │    Login ──► Product list ──► Detail ──► Create / Edit          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          catalog-client: AuthStore, ProductsStore, ApiClient    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   state   │  │ validation │  │pagination │  │   │
//! │  │   │  Product  │  │  Session  │  │   form     │  │ PageWindow│  │   │
//! │  │   │  Patch    │  │ ListState │  │   email    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (`Product`, `ProductInput`, `ProductPatch`)
//! - [`state`] - `Session` and `ProductListState` with their reducers
//! - [`validation`] - Field rules for products and login email
//! - [`form`] - Raw product form parsing
//! - [`pagination`] - Display range and page navigation math
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::pagination::PageWindow;
//!
//! // Page 2 of a 10-per-page listing currently holding 4 items
//! let window = PageWindow::derive(2, 10, 4, 2);
//! assert_eq!((window.start, window.end, window.total_items), (11, 14, 20));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod pagination;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{Field, FormErrors, ValidationError};
pub use form::ProductForm;
pub use pagination::PageWindow;
pub use state::{ListTicket, ProductListState, Session};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of products the API returns per page.
///
/// Used for the display range only; the server decides the real page size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound (inclusive) for a product price.
pub const MAX_PRICE: f64 = 10_000.0;

/// Maximum product name length, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// The only address accepted by the login allow-list unless configured
/// otherwise.
pub const DEFAULT_ALLOWED_EMAIL: &str = "symansalman@gmail.com";
