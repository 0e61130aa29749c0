//! # Navigation
//!
//! Routes of the console and the commands that move between them.
//!
//! Nothing in this crate navigates by itself. Store operations and the
//! [`RouteGuard`] *return* a [`Navigation`] and the front end executes it.
//!
//! ## Guard Decisions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  route protected?  session loading?  token?   already redirected?      │
//! │  ───────────────   ────────────────  ──────   ──────────────────       │
//! │  no                -                 -        -        ──► stay         │
//! │  yes               yes               -        -        ──► stay         │
//! │  yes               no                yes      -        ──► stay, re-arm │
//! │  yes               no                no       no       ──► Replace(Login)│
//! │  yes               no                no       yes      ──► stay         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use catalog_core::Session;
use tokio::sync::watch;
use tracing::debug;

// =============================================================================
// Routes
// =============================================================================

/// Views of the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Products,
    ProductDetail(String),
    ProductCreate,
    ProductEdit(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Products => "/products".to_string(),
            Route::ProductDetail(id) => format!("/products/{}", id),
            Route::ProductCreate => "/products/create".to_string(),
            Route::ProductEdit(id) => format!("/products/edit/{}", id),
        }
    }

    /// Every view except the login entry point needs a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Whether this view shows `ProductListState::selected`.
    pub fn shows_selected(&self) -> bool {
        matches!(self, Route::ProductDetail(_) | Route::ProductEdit(_))
    }
}

/// A navigation request for the front end to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Add an entry to history.
    Push(Route),
    /// Replace the current entry (redirects, logout).
    Replace(Route),
}

impl Navigation {
    pub fn route(&self) -> &Route {
        match self {
            Navigation::Push(route) | Navigation::Replace(route) => route,
        }
    }
}

/// Where the login view goes once a login has landed.
///
/// Nothing while the request is still in flight.
pub fn post_login_navigation(session: &Session) -> Option<Navigation> {
    (session.is_authenticated() && !session.is_loading())
        .then(|| Navigation::Push(Route::Products))
}

// =============================================================================
// Route Guard
// =============================================================================

/// Per-view authentication check.
///
/// One guard belongs to one mounted view. It issues at most one redirect per
/// unauthenticated stretch and re-arms once a token shows up again.
#[derive(Debug, Default)]
pub struct RouteGuard {
    redirected: bool,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates the guard for `route` against one session snapshot.
    pub fn check(&mut self, route: &Route, session: &Session) -> Option<Navigation> {
        if !route.is_protected() || session.is_loading() {
            return None;
        }

        if session.is_authenticated() {
            self.redirected = false;
            return None;
        }

        if self.redirected {
            return None;
        }

        debug!(path = %route.path(), "No session, redirecting to login");
        self.redirected = true;
        Some(Navigation::Replace(Route::Login))
    }

    /// Waits until the session requires leaving `route`.
    ///
    /// Evaluates the current snapshot first, then every change. Returns
    /// `None` once the auth store is gone.
    pub async fn next_redirect(
        &mut self,
        route: &Route,
        session: &mut watch::Receiver<Session>,
    ) -> Option<Navigation> {
        loop {
            let snapshot = session.borrow_and_update().clone();
            if let Some(navigation) = self.check(route, &snapshot) {
                return Some(navigation);
            }
            if session.changed().await.is_err() {
                return None;
            }
        }
    }
}
