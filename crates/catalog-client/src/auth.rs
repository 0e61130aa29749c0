//! # Auth Store
//!
//! Holds the session and performs login/logout.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  login(email)                                                           │
//! │    │                                                                    │
//! │    ├── no '@' ─────────────────► Err(Validation)   state untouched      │
//! │    │                                                                    │
//! │    ├── begin_login()             loading = true, error = None           │
//! │    │                                                                    │
//! │    ├── email != allowed ───────► fail_login("Invalid email. Only .."    │
//! │    │                                                                    │
//! │    ├── GET /auth ──── error ───► fail_login(server msg | "Login failed")│
//! │    │      │                                                             │
//! │    │      └── email not listed ► fail_login("Email not found: ..")      │
//! │    │                                                                    │
//! │    └── complete_login(token, email) ──► Ok(Push(Products))              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures keep any existing token.

use std::sync::Arc;

use catalog_core::validation::validate_email;
use catalog_core::Session;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{AccountRecord, ApiClient};
use crate::error::{ClientError, ClientResult};
use crate::navigation::{Navigation, Route};

const LOGIN_FAILED: &str = "Login failed";

/// Session owner. Clones share the same session.
#[derive(Debug, Clone)]
pub struct AuthStore {
    state: Arc<watch::Sender<Session>>,
    api: ApiClient,
    allowed_email: String,
}

impl AuthStore {
    pub fn new(api: ApiClient, allowed_email: impl Into<String>) -> Self {
        let (state, _) = watch::channel(Session::new());
        AuthStore {
            state: Arc::new(state),
            api,
            allowed_email: allowed_email.into(),
        }
    }

    /// Current session snapshot.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// The only address allowed to log in; also the login form's initial value.
    pub fn allowed_email(&self) -> &str {
        &self.allowed_email
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Logs in with `email`.
    ///
    /// Returns the navigation into the product list on success. Every
    /// failure past the local email check is also stored in the session's
    /// `error`.
    pub async fn login(&self, email: &str) -> ClientResult<Navigation> {
        let email = email.trim();
        validate_email(email)?;

        debug!(email, "Login dispatched");
        self.state.send_modify(Session::begin_login);

        match self.authenticate(email).await {
            Ok(token) => {
                self.state
                    .send_modify(|session| session.complete_login(token, email));
                info!(email, "Logged in");
                Ok(Navigation::Push(Route::Products))
            }
            Err(err) => {
                warn!(email, error = %err, "Login failed");
                let message = err.to_string();
                self.state.send_modify(|session| session.fail_login(message));
                Err(err)
            }
        }
    }

    /// Clears the session and returns the way back to the login view.
    pub fn logout(&self) -> Navigation {
        self.state.send_modify(Session::clear);
        info!("Logged out");
        Navigation::Replace(Route::Login)
    }

    /// Checks `email` against the allow-list and returns its session token.
    async fn authenticate(&self, email: &str) -> ClientResult<String> {
        if email != self.allowed_email {
            return Err(ClientError::Auth(format!(
                "Invalid email. Only {} is allowed",
                self.allowed_email
            )));
        }

        let accounts: Vec<AccountRecord> =
            self.api.send(self.api.get("/auth"), LOGIN_FAILED).await?;

        let account = accounts
            .into_iter()
            .find(|account| account.email == email)
            .ok_or_else(|| ClientError::Auth(format!("Email not found: {}", email)))?;

        Ok(account
            .token
            .unwrap_or_else(|| Uuid::new_v4().to_string()))
    }
}
