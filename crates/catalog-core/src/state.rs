//! # Store State
//!
//! The two state objects the client stores publish, together with the pure
//! reducers that move them from one snapshot to the next.
//!
//! ## Reducer Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Async operation lifecycle                            │
//! │                                                                         │
//! │  dispatch ──► begin_*()  ──► network ──┬──► complete_*()                │
//! │               loading = true           │    replace with server truth   │
//! │               error = None             │                                │
//! │                                        └──► fail_*(message)             │
//! │                                             error = Some(message)       │
//! │                                                                         │
//! │  Local patches (no network):                                            │
//! │    delete_product_local ─► insert_created ─► update_product_local       │
//! │    applied first, then reconciled by the next list response             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every reducer is synchronous and side-effect free so it can be tested
//! without a server.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{ListQuery, Product};

// =============================================================================
// Session
// =============================================================================

/// Authentication state.
///
/// ## Invariant
/// `token` and `user_email` are either both set or both empty. Fields are
/// private so only the reducers below can change them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    token: Option<String>,
    user_email: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl Session {
    /// Empty session, as at process start.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Login dispatched: loading, previous error cleared.
    pub fn begin_login(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Login succeeded.
    pub fn complete_login(&mut self, token: impl Into<String>, email: impl Into<String>) {
        self.loading = false;
        self.token = Some(token.into());
        self.user_email = Some(email.into());
        self.error = None;
    }

    /// Login failed. Any existing token is kept.
    pub fn fail_login(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Logout: clears identity and error unconditionally.
    pub fn clear(&mut self) {
        self.token = None;
        self.user_email = None;
        self.error = None;
    }
}

// =============================================================================
// List Ticket
// =============================================================================

/// Receipt for an issued list request.
///
/// Generations increase monotonically; a response is applied only when its
/// ticket is still the newest one issued. The default ticket is generation
/// zero, issued before any list request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListTicket(u64);

impl ListTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

// =============================================================================
// Product List State
// =============================================================================

/// Current page of products plus list metadata and the selected product.
///
/// ## Invariants
/// - `items` is exactly one page of one search; it is replaced, never merged,
///   by a list response.
/// - `current_page` and `search_term` are the parameters of the most
///   recently *issued* list request, whether or not it has completed.
/// - `loading` is true while any request of this store is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListState {
    items: Vec<Product>,
    total_pages: u32,
    current_page: u32,
    search_term: String,
    loading: bool,
    error: Option<String>,
    selected: Option<Product>,
    generation: u64,
    in_flight: u32,
}

impl Default for ProductListState {
    fn default() -> Self {
        ProductListState {
            items: Vec::new(),
            total_pages: 0,
            current_page: 1,
            search_term: String::new(),
            loading: false,
            error: None,
            selected: None,
            generation: 0,
            in_flight: 0,
        }
    }
}

impl ProductListState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    /// Page and search of the most recently issued list request.
    pub fn query(&self) -> ListQuery {
        ListQuery::new(self.current_page, self.search_term.clone())
    }

    // =========================================================================
    // Request Bookkeeping
    // =========================================================================

    /// Any request dispatched: loading on, previous error cleared.
    pub fn begin_request(&mut self) {
        self.in_flight += 1;
        self.loading = true;
        self.error = None;
    }

    /// A request resolved successfully.
    pub fn finish_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }

    /// A request failed; `message` becomes the visible error.
    pub fn fail_request(&mut self, message: impl Into<String>) {
        self.finish_request();
        self.error = Some(message.into());
    }

    /// Records an error that happened before any request was issued
    /// (for example a missing token).
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    // =========================================================================
    // List
    // =========================================================================

    /// Records an issued list request and returns its ticket.
    pub fn begin_list(&mut self, query: &ListQuery) -> ListTicket {
        self.generation += 1;
        self.current_page = query.page.max(1);
        self.search_term = query.search.clone();
        self.begin_request();
        ListTicket(self.generation)
    }

    /// Applies a list response. Returns `false` (and leaves the page
    /// untouched) when a newer request has been issued since.
    pub fn complete_list(
        &mut self,
        ticket: ListTicket,
        products: Vec<Product>,
        total_pages: u32,
    ) -> bool {
        self.finish_request();
        if !self.is_current(ticket) {
            return false;
        }
        self.items = products;
        self.total_pages = total_pages;
        true
    }

    /// Records a list failure. Previous items stay visible. Returns `false`
    /// when the failure belongs to a superseded request.
    pub fn fail_list(&mut self, ticket: ListTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            self.finish_request();
            return false;
        }
        self.fail_request(message);
        true
    }

    pub fn is_current(&self, ticket: ListTicket) -> bool {
        ticket.0 == self.generation
    }

    // =========================================================================
    // Local Reducers
    // =========================================================================

    /// Replaces the visible page wholesale.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.items = products;
    }

    /// Sets the page the next list request will ask for (minimum 1).
    pub fn set_current_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Sets the search term the next list request will use.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Prepends a product created on the server.
    pub fn insert_created(&mut self, product: Product) {
        self.items.insert(0, product);
        self.total_pages = self.total_pages.max(1);
    }

    /// Replaces the matching product in `items` and in `selected`.
    /// Returns whether anything changed.
    pub fn update_product_local(&mut self, product: Product) -> bool {
        let mut changed = false;
        if let Some(slot) = self.items.iter_mut().find(|p| p.id == product.id) {
            *slot = product.clone();
            changed = true;
        }
        if let Some(selected) = self.selected.as_mut() {
            if selected.id == product.id {
                *selected = product;
                changed = true;
            }
        }
        changed
    }

    /// Removes a product from the visible page.
    ///
    /// When that empties the page and it is not the first, steps back one
    /// page so the follow-up refresh lands on a page that still has items.
    pub fn delete_product_local(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != id);
        let removed = self.items.len() != before;
        if self.items.is_empty() && self.current_page > 1 {
            self.current_page -= 1;
        }
        removed
    }

    /// Stores the product fetched for the detail or edit view.
    pub fn select(&mut self, product: Product) {
        self.selected = Some(product);
    }

    /// Drops the selection when navigation leaves the detail or edit view.
    pub fn clear_selected(&mut self) {
        self.selected = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
