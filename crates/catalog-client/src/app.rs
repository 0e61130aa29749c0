//! # Application State
//!
//! The container front ends receive instead of reaching for globals.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             AppState                                    │
//! │                                                                         │
//! │   config ─────► ApiClient (one pool, shared)                            │
//! │                    │                                                    │
//! │          ┌─────────┴──────────┐                                         │
//! │          ▼                    ▼                                         │
//! │    ┌───────────┐  token  ┌───────────────┐                              │
//! │    │ AuthStore │ ──────► │ ProductsStore │                              │
//! │    │  Session  │  (read) │ ListState     │                              │
//! │    └───────────┘         └───────────────┘                              │
//! │                                                                         │
//! │  Only AuthStore writes the token.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use crate::api::ApiClient;
use crate::auth::AuthStore;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::products::ProductsStore;

/// Both stores wired to one API client.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub auth: AuthStore,
    pub products: ProductsStore,
}

impl AppState {
    /// Validates `config` and builds the stores.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let api = ApiClient::new(&config.api)?;
        let auth = AuthStore::new(api.clone(), config.auth.allowed_email.clone());
        let products = ProductsStore::new(api, auth.clone(), config.display.page_size);

        info!(base_url = %config.api.base_url, "Catalog client initialized");

        Ok(AppState {
            config,
            auth,
            products,
        })
    }
}
