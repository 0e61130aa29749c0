//! # catalog-client: Stores and HTTP Client for the Catalog Console
//!
//! Wraps `catalog-core` with the network: the REST client, the two
//! observable stores, and the navigation commands front ends execute.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Client Architecture                       │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Front end (CLI / web view)                    │  │
//! │  │  renders snapshots, subscribes to changes, executes Navigation   │  │
//! │  └───────────────┬──────────────────────────────┬───────────────────┘  │
//! │                  │ operations                   │ watch::Receiver      │
//! │  ┌───────────────▼──────────────────────────────┴───────────────────┐  │
//! │  │                           AppState                               │  │
//! │  │   ┌────────────┐   ┌────────────────┐   ┌───────────────────┐   │  │
//! │  │   │ AuthStore  │   │ ProductsStore  │   │    RouteGuard     │   │  │
//! │  │   │ login      │   │ list / create  │   │  no token ──►     │   │  │
//! │  │   │ logout     │   │ update / delete│   │  Replace(Login)   │   │  │
//! │  │   │            │   │ get_by_id      │   │                   │   │  │
//! │  │   └─────┬──────┘   └───────┬────────┘   └───────────────────┘   │  │
//! │  │         └────────┬─────────┘                                     │  │
//! │  │           ┌──────▼──────┐                                        │  │
//! │  │           │  ApiClient  │  reqwest, 10 s timeout, 401 logging    │  │
//! │  │           └──────┬──────┘                                        │  │
//! │  └──────────────────┼───────────────────────────────────────────────┘  │
//! │                     ▼                                                   │
//! │        REST API:  /auth   /products   /products/:id                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] - `ApiClient` and the response wire types
//! - [`auth`] - `AuthStore` (session, login, logout)
//! - [`products`] - `ProductsStore` (list, CRUD, local reducers)
//! - [`navigation`] - `Route`, `Navigation`, `RouteGuard`
//! - [`app`] - `AppState` container
//! - [`config`] - Layered client configuration
//! - [`error`] - Client error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_client::{AppState, ClientConfig};
//! use catalog_core::ListQuery;
//!
//! let app = AppState::new(ClientConfig::load_or_default(None))?;
//! app.auth.login("symansalman@gmail.com").await?;
//! app.products.list(ListQuery::new(1, "lamp")).await?;
//!
//! let window = app.products.page_window();
//! println!("{}", window.summary());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod navigation;
pub mod products;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::{AccountRecord, ApiClient, ProductPage};
pub use app::AppState;
pub use auth::AuthStore;
pub use config::{ApiSettings, AuthSettings, ClientConfig, DisplaySettings};
pub use error::{ClientError, ClientResult};
pub use navigation::{post_login_navigation, Navigation, Route, RouteGuard};
pub use products::{ListOutcome, ProductsStore};
