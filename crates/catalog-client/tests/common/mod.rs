//! In-process mock of the catalog REST API.
//!
//! Served by axum on an ephemeral port under `/api`:
//! - `GET /auth` lists two accounts; only the allowed one carries a token.
//! - Products endpoints demand `Authorization: Bearer tok-123`.
//! - Searches starting with `slow` answer after 150 ms; `bare` answers `{}`;
//!   `nulls` answers null fields; `zero` answers `totalPages: 0`;
//!   `fail` answers a 500 without a body.
//! - Creating a product named `explode` answers a 500 with a message.
//! - `GET /products/ghost` answers `null`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use catalog_client::{AppState, ClientConfig};
use catalog_core::{Product, ProductInput, ProductPatch};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub const ALLOWED_EMAIL: &str = "symansalman@gmail.com";
pub const TOKENLESS_EMAIL: &str = "other@example.com";
pub const TOKEN: &str = "tok-123";
pub const PAGE_SIZE: usize = 10;

// =============================================================================
// Mock State
// =============================================================================

#[derive(Clone, Default)]
pub struct MockApi {
    products: Arc<Mutex<Vec<Product>>>,
    requests: Arc<AtomicUsize>,
    next_id: Arc<AtomicUsize>,
}

impl MockApi {
    /// Requests received so far, across all endpoints.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Current server-side catalog.
    pub fn products(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    fn hit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct TestServer {
    pub base_url: String,
    pub api: MockApi,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn product(n: usize) -> Product {
    Product {
        id: format!("p-{}", n),
        name: format!("Product {}", n),
        description: None,
        price: 10.0 + n as f64,
        category: "General".to_string(),
        image_url: None,
    }
}

pub fn catalog(count: usize) -> Vec<Product> {
    (1..=count).map(product).collect()
}

pub fn valid_input(name: &str) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: Some("Fresh stock".to_string()),
        price: 49.99,
        category: "Lighting".to_string(),
    }
}

/// Starts the mock seeded with `products`.
pub async fn spawn_server(products: Vec<Product>) -> TestServer {
    let api = MockApi {
        products: Arc::new(Mutex::new(products)),
        requests: Arc::new(AtomicUsize::new(0)),
        next_id: Arc::new(AtomicUsize::new(1000)),
    };

    let app = Router::new()
        .route("/api/auth", get(list_accounts))
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}/api", addr),
        api,
        handle,
    }
}

pub fn app_for(server: &TestServer) -> AppState {
    AppState::new(ClientConfig::with_base_url(server.base_url.clone())).unwrap()
}

/// App whose allow-list names `email` instead of the default address.
pub fn app_allowing(server: &TestServer, email: &str) -> AppState {
    let mut config = ClientConfig::with_base_url(server.base_url.clone());
    config.auth.allowed_email = email.to_string();
    AppState::new(config).unwrap()
}

pub async fn logged_in_app(server: &TestServer) -> AppState {
    let app = app_for(server);
    app.auth.login(ALLOWED_EMAIL).await.unwrap();
    app
}

// =============================================================================
// Handlers
// =============================================================================

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

async fn list_accounts(State(api): State<MockApi>) -> Json<Value> {
    api.hit();
    Json(json!([
        { "id": "1", "email": ALLOWED_EMAIL, "token": TOKEN },
        { "id": "2", "email": TOKENLESS_EMAIL }
    ]))
}

async fn list_products(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    api.hit();
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let search = params.get("search").cloned().unwrap_or_default();
    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .max(1);

    if search.starts_with("slow") {
        tokio::time::sleep(Duration::from_millis(150)).await;
    }
    if search == "bare" {
        return Json(json!({})).into_response();
    }
    if search == "nulls" {
        return Json(json!({ "products": null, "totalPages": null })).into_response();
    }
    if search == "zero" {
        return Json(json!({ "products": [], "totalPages": 0 })).into_response();
    }
    if search == "fail" {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let needle = search.to_lowercase();
    let matching: Vec<Product> = api
        .products()
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect();

    let total_pages = matching.len().div_ceil(PAGE_SIZE).max(1);
    let items: Vec<Product> = matching
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    Json(json!({ "products": items, "totalPages": total_pages })).into_response()
}

async fn create_product(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Json(input): Json<ProductInput>,
) -> Response {
    api.hit();
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    if input.name == "explode" {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    }

    let id = api.next_id.fetch_add(1, Ordering::SeqCst);
    let product = Product {
        id: format!("p-{}", id),
        name: input.name,
        description: input.description,
        price: input.price,
        category: input.category,
        image_url: None,
    };
    api.products.lock().unwrap().insert(0, product.clone());

    (StatusCode::CREATED, Json(product)).into_response()
}

async fn get_product(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    api.hit();
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    if id == "ghost" {
        return Json(Value::Null).into_response();
    }

    match api.products().into_iter().find(|p| p.id == id) {
        Some(product) => Json(product).into_response(),
        None => message(StatusCode::NOT_FOUND, "Product not found"),
    }
}

async fn update_product(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Response {
    api.hit();
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let mut products = api.products.lock().unwrap();
    match products.iter_mut().find(|p| p.id == id) {
        Some(slot) => {
            *slot = slot.patched(&patch);
            Json(slot.clone()).into_response()
        }
        None => message(StatusCode::NOT_FOUND, "Product not found"),
    }
}

async fn delete_product(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    api.hit();
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let mut products = api.products.lock().unwrap();
    let before = products.len();
    products.retain(|p| p.id != id);
    if products.len() == before {
        return message(StatusCode::NOT_FOUND, "Product not found");
    }
    StatusCode::NO_CONTENT.into_response()
}
