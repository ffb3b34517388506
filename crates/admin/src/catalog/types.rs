//! Request and response shapes for the catalog admin API.
//!
//! List endpoints wrap their payload in a `{ "data": ... }` envelope;
//! create/update endpoints return the resource directly.

use serde::{Deserialize, Serialize};

/// The `{ "data": ... }` envelope on list responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Body for `POST /api/v1/admin/attributes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttributeRequest {
    /// Display name.
    pub name: String,
    /// Stable machine key.
    pub key: String,
    /// Attribute kind understood by the catalog (e.g. `select`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the storefront may filter by this attribute.
    pub filterable: bool,
    /// Locale of the display name.
    pub locale: String,
}

/// Body for `POST /api/v1/admin/attributes/{id}/values`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttributeValueRequest {
    /// Display label; the catalog derives the machine token.
    pub label: String,
    /// Locale of the label.
    pub locale: String,
}

/// Body for `POST /api/v1/admin/brands`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrandRequest {
    /// Display name.
    pub name: String,
    /// Locale of the name.
    pub locale: String,
}

/// Body for `POST /api/v1/admin/categories`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    /// Display title.
    pub title: String,
    /// Locale of the title.
    pub locale: String,
    /// Whether products in the category must carry a size breakdown.
    pub requires_sizes: bool,
}
