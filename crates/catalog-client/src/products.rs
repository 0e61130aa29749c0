//! # Products Store
//!
//! The current page of products, list metadata, and the selected product,
//! plus every operation that reads or changes them.
//!
//! ## Operation Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ProductsStore                                  │
//! │                                                                         │
//! │  Async (need a token, attach `Authorization: Bearer <token>`)          │
//! │    list(query)        GET    /products?page=&search=                    │
//! │    create(input)      POST   /products          prepend on success      │
//! │    update(id, patch)  PUT    /products/:id      items untouched         │
//! │    delete(id)         DELETE /products/:id                              │
//! │    get_by_id(id)      GET    /products/:id      into `selected`         │
//! │                                                                         │
//! │  Composite                                                              │
//! │    search(term)  go_to_page(n)  refresh()  delete_and_refresh(id)       │
//! │                                                                         │
//! │  Local (sync, no network)                                               │
//! │    set_products  set_current_page  set_search_term  clear_selected      │
//! │    update_product_local  delete_product_local  insert_created           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stale Responses
//! Each `list` takes a ticket from the state. When the response lands and a
//! newer `list` has been issued in the meantime, it is dropped and the call
//! returns [`ListOutcome::Stale`].

use std::sync::Arc;

use catalog_core::validation::{validate_patch, validate_product};
use catalog_core::{ListQuery, PageWindow, Product, ProductInput, ProductListState, ProductPatch};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ProductPage};
use crate::auth::AuthStore;
use crate::error::{ClientError, ClientResult};

const NO_AUTH_TOKEN: &str = "No auth token";
const FETCH_FAILED: &str = "Failed to fetch products";
const CREATE_FAILED: &str = "Failed to create product";
const UPDATE_FAILED: &str = "Failed to update product";
const DELETE_FAILED: &str = "Failed to delete product";
const FETCH_ONE_FAILED: &str = "Failed to fetch product";

/// What happened to a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// The response replaced the visible page.
    Applied,
    /// A newer list request was issued first; the response was dropped.
    Stale,
}

/// Product list owner. Clones share the same state.
#[derive(Debug, Clone)]
pub struct ProductsStore {
    state: Arc<watch::Sender<ProductListState>>,
    api: ApiClient,
    auth: AuthStore,
    page_size: u32,
}

impl ProductsStore {
    pub fn new(api: ApiClient, auth: AuthStore, page_size: u32) -> Self {
        let (state, _) = watch::channel(ProductListState::new());
        ProductsStore {
            state: Arc::new(state),
            api,
            auth,
            page_size,
        }
    }

    pub fn snapshot(&self) -> ProductListState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProductListState> {
        self.state.subscribe()
    }

    /// Display range of the visible page.
    pub fn page_window(&self) -> PageWindow {
        let state = self.state.borrow();
        PageWindow::derive(
            state.current_page(),
            self.page_size,
            state.items().len(),
            state.total_pages(),
        )
    }

    /// Applies `f` to the state, notifies subscribers, returns `f`'s result.
    fn modify<R: Default>(&self, f: impl FnOnce(&mut ProductListState) -> R) -> R {
        let mut result = R::default();
        self.state.send_modify(|s| result = f(s));
        result
    }

    /// Reads the session token, recording an error when there is none.
    fn require_token(&self) -> ClientResult<String> {
        match self.auth.token() {
            Some(token) => Ok(token),
            None => {
                warn!("Products operation without a session");
                self.state.send_modify(|s| s.set_error(NO_AUTH_TOKEN));
                Err(ClientError::Auth(NO_AUTH_TOKEN.to_string()))
            }
        }
    }

    // =========================================================================
    // List
    // =========================================================================

    /// Fetches one page and replaces `items` / `total_pages` with it.
    ///
    /// Failures keep the previous items visible.
    pub async fn list(&self, query: ListQuery) -> ClientResult<ListOutcome> {
        let token = self.require_token()?;

        let ticket = self.modify(|s| s.begin_list(&query));
        debug!(page = query.page, search = %query.search, generation = ticket.generation(), "Listing products");

        let request = self
            .api
            .get("/products")
            .bearer_auth(&token)
            .query(&query.to_pairs());

        match self.api.send::<ProductPage>(request, FETCH_FAILED).await {
            Ok(page) => {
                let count = page.products.len();
                let total_pages = page.total_pages;
                let applied = self.modify(|s| s.complete_list(ticket, page.products, total_pages));

                if applied {
                    info!(count, total_pages, page = query.page, "Products listed");
                    Ok(ListOutcome::Applied)
                } else {
                    debug!(generation = ticket.generation(), "Dropping stale product list");
                    Ok(ListOutcome::Stale)
                }
            }
            Err(err) => {
                let message = err.to_string();
                let current = self.modify(|s| s.fail_list(ticket, message));
                if current {
                    warn!(error = %err, "Listing products failed");
                } else {
                    debug!(error = %err, "Ignoring failure of a stale list request");
                }
                Err(err)
            }
        }
    }

    /// Sets the search term and lists its first page.
    pub async fn search(&self, term: impl Into<String>) -> ClientResult<ListOutcome> {
        self.list(ListQuery::new(1, term)).await
    }

    /// Lists `page` of the current search.
    pub async fn go_to_page(&self, page: u32) -> ClientResult<ListOutcome> {
        let search = self.state.borrow().search_term().to_string();
        self.list(ListQuery::new(page, search)).await
    }

    /// Re-issues the last list request.
    pub async fn refresh(&self) -> ClientResult<ListOutcome> {
        let query = self.state.borrow().query();
        self.list(query).await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Creates a product and prepends the server's record to `items`.
    pub async fn create(&self, input: ProductInput) -> ClientResult<Product> {
        validate_product(&input)?;
        let token = self.require_token()?;

        debug!(name = %input.name, "Creating product");
        self.state.send_modify(ProductListState::begin_request);

        let request = self.api.post("/products").bearer_auth(&token).json(&input);
        match self.api.send::<Product>(request, CREATE_FAILED).await {
            Ok(product) => {
                info!(id = %product.id, name = %product.name, "Product created");
                let created = product.clone();
                self.state.send_modify(|s| {
                    s.finish_request();
                    s.insert_created(created);
                });
                Ok(product)
            }
            Err(err) => Err(self.record_failure(err, "Creating product failed")),
        }
    }

    /// Sends a partial update. The visible page is left as it is.
    pub async fn update(&self, id: &str, patch: ProductPatch) -> ClientResult<Product> {
        validate_patch(&patch)?;
        let token = self.require_token()?;

        debug!(id, "Updating product");
        self.state.send_modify(ProductListState::begin_request);

        let request = self
            .api
            .put(&format!("/products/{}", id))
            .bearer_auth(&token)
            .json(&patch);
        match self.api.send::<Product>(request, UPDATE_FAILED).await {
            Ok(product) => {
                info!(id, "Product updated");
                self.state.send_modify(ProductListState::finish_request);
                Ok(product)
            }
            Err(err) => Err(self.record_failure(err, "Updating product failed")),
        }
    }

    /// Deletes a product on the server only.
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let token = self.require_token()?;

        debug!(id, "Deleting product");
        self.state.send_modify(ProductListState::begin_request);

        let request = self
            .api
            .delete(&format!("/products/{}", id))
            .bearer_auth(&token);
        match self.api.send_empty(request, DELETE_FAILED).await {
            Ok(()) => {
                info!(id, "Product deleted");
                self.state.send_modify(ProductListState::finish_request);
                Ok(())
            }
            Err(err) => Err(self.record_failure(err, "Deleting product failed")),
        }
    }

    /// Removes locally, deletes remotely, then re-lists the current page
    /// whatever the delete returned.
    ///
    /// Returns the delete result; the refresh reports through the state.
    pub async fn delete_and_refresh(&self, id: &str) -> ClientResult<()> {
        self.delete_product_local(id);
        let result = self.delete(id).await;

        if let Err(err) = self.refresh().await {
            debug!(error = %err, "Refresh after delete failed");
        }
        result
    }

    /// Fetches one product into `selected`.
    pub async fn get_by_id(&self, id: &str) -> ClientResult<Product> {
        let token = self.require_token()?;

        debug!(id, "Fetching product");
        self.state.send_modify(ProductListState::begin_request);

        let request = self
            .api
            .get(&format!("/products/{}", id))
            .bearer_auth(&token);
        match self.api.send::<Option<Product>>(request, FETCH_ONE_FAILED).await {
            Ok(Some(product)) => {
                let selected = product.clone();
                self.state.send_modify(|s| {
                    s.finish_request();
                    s.select(selected);
                });
                Ok(product)
            }
            Ok(None) => {
                self.clear_selected();
                let err = ClientError::NotFound("Product not found".to_string());
                Err(self.record_failure(err, "Product missing"))
            }
            Err(err) => {
                self.clear_selected();
                Err(self.record_failure(err, "Fetching product failed"))
            }
        }
    }

    /// Stores `err` as the visible error and hands it back.
    fn record_failure(&self, err: ClientError, context: &str) -> ClientError {
        warn!(error = %err, "{}", context);
        let message = err.to_string();
        self.state.send_modify(|s| s.fail_request(message));
        err
    }

    // =========================================================================
    // Local Reducers
    // =========================================================================

    pub fn set_products(&self, products: Vec<Product>) {
        self.state.send_modify(|s| s.set_products(products));
    }

    pub fn set_current_page(&self, page: u32) {
        self.state.send_modify(|s| s.set_current_page(page));
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.state.send_modify(|s| s.set_search_term(term));
    }

    pub fn update_product_local(&self, product: Product) -> bool {
        self.modify(|s| s.update_product_local(product))
    }

    pub fn delete_product_local(&self, id: &str) -> bool {
        self.modify(|s| s.delete_product_local(id))
    }

    pub fn insert_created(&self, product: Product) {
        self.state.send_modify(|s| s.insert_created(product));
    }

    pub fn clear_selected(&self) {
        self.state.send_modify(ProductListState::clear_selected);
    }
}
