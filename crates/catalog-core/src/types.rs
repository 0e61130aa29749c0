//! # Domain Types
//!
//! Wire types exchanged with the catalog REST API.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductInput   │   │  ProductPatch   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (server)    │   │  name           │   │  name?          │       │
//! │  │  name           │   │  description?   │   │  description?   │       │
//! │  │  description?   │   │  price          │   │  price?         │       │
//! │  │  price          │   │  category       │   │  category?      │       │
//! │  │  category       │   │                 │   │  imageUrl?      │       │
//! │  │  imageUrl?      │   │  POST /products │   │  PUT /products/ │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `Product::id` is assigned by the server and never edited by the client.
//! The client only ever holds a cached, possibly stale copy of a product.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier as it may appear on the wire: text or an integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(text) => text,
            WireId::Signed(n) => n.to_string(),
            WireId::Unsigned(n) => n.to_string(),
        }
    }
}

/// Reads a string or integer identifier as text.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    WireId::deserialize(deserializer).map(String::from)
}

/// Like [`deserialize_id`], with `null` read as `None`.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<WireId>::deserialize(deserializer)?.map(String::from))
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Server-assigned identifier. Numeric ids are read as their decimal text.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Display name, at most 100 characters.
    pub name: String,

    /// Optional free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price, `0 < price <= 10000`.
    pub price: f64,

    /// Category label.
    pub category: String,

    /// Optional image location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Applies the present fields of `patch` to a copy of this product.
    ///
    /// Used for optimistic reflection of an edit before the server confirms it.
    pub fn patched(&self, patch: &ProductPatch) -> Product {
        let mut product = self.clone();
        if let Some(name) = &patch.name {
            product.name = name.clone();
        }
        if let Some(description) = &patch.description {
            product.description = Some(description.clone());
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category) = &patch.category {
            product.category = category.clone();
        }
        if let Some(image_url) = &patch.image_url {
            product.image_url = Some(image_url.clone());
        }
        product
    }
}

// =============================================================================
// Product Input (create)
// =============================================================================

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductInput {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub price: f64,

    pub category: String,
}

// =============================================================================
// Product Patch (update)
// =============================================================================

/// Body of `PUT /products/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
    }
}

impl From<ProductInput> for ProductPatch {
    fn from(input: ProductInput) -> Self {
        ProductPatch {
            name: Some(input.name),
            description: input.description,
            price: Some(input.price),
            category: Some(input.category),
            image_url: None,
        }
    }
}

// =============================================================================
// List Query
// =============================================================================

/// Parameters of one `GET /products` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    /// Name filter; empty means no filter.
    pub search: String,
}

impl ListQuery {
    pub fn new(page: u32, search: impl Into<String>) -> Self {
        ListQuery {
            page: page.max(1),
            search: search.into(),
        }
    }

    /// Query-string pairs; `search` is omitted when empty.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string())];
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        pairs
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery::new(1, "")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
