//! # API Client
//!
//! One configured HTTP client shared by both stores.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  store ──► api.get("/products")          builder for {base}/products    │
//! │              .bearer_auth(token)         attached by the store          │
//! │              .query(..)                                                 │
//! │        ──► api.send(builder, fallback)                                  │
//! │              │                                                          │
//! │              ├── transport error ──────► Network(fallback)              │
//! │              ├── 2xx ──► decode JSON ──► Ok(T)                          │
//! │              └── non-2xx                                                │
//! │                    401 observed ───────► error! log only               │
//! │                    {"message": ".."} ──► message, else fallback         │
//! │                    401/403 → Auth, 404 → NotFound, else Server          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The client never attaches credentials and never reacts to a 401 beyond
//! logging it; both are the caller's job.

use catalog_core::types::deserialize_optional_id;
use catalog_core::Product;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, error, warn};

use crate::config::ApiSettings;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Wire Types
// =============================================================================

/// One entry of the `GET /auth` account collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountRecord {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// Body of `GET /products`.
///
/// A missing or `null` `products` field is an empty page; a missing,
/// `null` or zero `totalPages` is a single page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub products: Vec<Product>,
    #[serde(default = "single_page", deserialize_with = "at_least_one_page")]
    pub total_pages: u32,
}

fn single_page() -> u32 {
    1
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Product>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Product>>::deserialize(deserializer)?.unwrap_or_default())
}

fn at_least_one_page<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?
        .filter(|pages| *pages > 0)
        .unwrap_or_else(single_page))
}

/// Error body the API sends with non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extracts a non-empty `message` from a JSON error body.
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client bound to one API base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds the client with the configured timeout.
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        url::Url::parse(&settings.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        debug!(
            base_url = %settings.base_url,
            timeout_secs = settings.timeout_secs,
            "API client ready"
        );

        Ok(ApiClient {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint path such as `/products/42`.
    ///
    /// Plain concatenation: `Url::join` would drop a base path like `/api`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Sends `request` and decodes a JSON body of type `T`.
    ///
    /// `fallback` is the error message used when the server gives none.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> ClientResult<T> {
        let response = self.execute(request, fallback).await?;
        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, "Undecodable response body");
            ClientError::Network(fallback.to_string())
        })
    }

    /// Sends `request` and ignores any response body.
    pub async fn send_empty(&self, request: RequestBuilder, fallback: &str) -> ClientResult<()> {
        self.execute(request, fallback).await.map(|_| ())
    }

    async fn execute(&self, request: RequestBuilder, fallback: &str) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, timeout = e.is_timeout(), "Request failed");
            ClientError::Network(fallback.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            error!(url = %response.url(), "Unauthorized - please log in");
        }

        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body).unwrap_or_else(|| fallback.to_string());
        debug!(status = status.as_u16(), %message, "Request rejected");

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Auth(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Server {
                status: status.as_u16(),
                message,
            },
        })
    }
}
