//! Catalog service admin API client.
//!
//! REST client for the `/api/v1/admin` surface of the catalog service:
//! attributes and their values, products, brands, and categories. The
//! client carries a bearer token; transport, retry, and auth flows beyond
//! the token header are the catalog service's concern.
//!
//! # Example
//!
//! ```rust,ignore
//! use storekeeper_admin::catalog::CatalogClient;
//! use storekeeper_admin::config::AdminConfig;
//!
//! let config = AdminConfig::from_env()?;
//! let client = CatalogClient::new(&config.catalog)?;
//!
//! let attributes = client.get_attributes().await?;
//! let product = client.get_product(ProductId::new(42)).await?;
//! ```

mod types;

pub use types::{
    CreateAttributeRequest, CreateAttributeValueRequest, CreateBrandRequest,
    CreateCategoryRequest,
};

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use storekeeper_core::{
    Attribute, AttributeId, AttributeValueId, Brand, Category, ProductData, ProductId,
    ProductPayload,
};
use thiserror::Error;
use tracing::instrument;

use crate::config::CatalogConfig;
use types::Envelope;

/// API path prefix for the admin surface.
const ADMIN_PREFIX: &str = "/api/v1/admin";

/// Errors that can occur when interacting with the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the catalog service.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse a response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unauthorized (invalid or expired token).
    #[error("Unauthorized: invalid API token")]
    Unauthorized,
}

/// Catalog admin API client.
///
/// Cheap to clone; the underlying HTTP client and configuration are shared.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the token is
    /// not a valid header value.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.token.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| CatalogError::Parse(format!("Invalid API token format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// List all attributes with their values.
    #[instrument(skip(self))]
    pub async fn get_attributes(&self) -> Result<Vec<Attribute>, CatalogError> {
        let envelope: Envelope<Vec<Attribute>> = self.get("/attributes").await?;
        Ok(envelope.data)
    }

    /// Create an attribute.
    #[instrument(skip(self, request), fields(key = %request.key))]
    pub async fn create_attribute(
        &self,
        request: &CreateAttributeRequest,
    ) -> Result<Attribute, CatalogError> {
        self.post("/attributes", request).await
    }

    /// Append a value to an attribute. Returns the updated attribute.
    #[instrument(skip(self, request))]
    pub async fn add_attribute_value(
        &self,
        attribute_id: AttributeId,
        request: &CreateAttributeValueRequest,
    ) -> Result<Attribute, CatalogError> {
        self.post(&format!("/attributes/{attribute_id}/values"), request)
            .await
    }

    /// Delete an attribute and all its values.
    #[instrument(skip(self))]
    pub async fn delete_attribute(&self, attribute_id: AttributeId) -> Result<(), CatalogError> {
        self.delete(&format!("/attributes/{attribute_id}")).await
    }

    /// Delete a single attribute value.
    #[instrument(skip(self))]
    pub async fn delete_attribute_value(
        &self,
        attribute_id: AttributeId,
        value_id: AttributeValueId,
    ) -> Result<(), CatalogError> {
        self.delete(&format!("/attributes/{attribute_id}/values/{value_id}"))
            .await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch a product with its persisted variants.
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<ProductData, CatalogError> {
        self.get(&format!("/products/{product_id}")).await
    }

    /// Create a product.
    #[instrument(skip(self, payload), fields(slug = %payload.slug, variants = payload.variants.len()))]
    pub async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<ProductData, CatalogError> {
        self.post("/products", payload).await
    }

    /// Update an existing product.
    #[instrument(skip(self, payload), fields(slug = %payload.slug, variants = payload.variants.len()))]
    pub async fn update_product(
        &self,
        product_id: ProductId,
        payload: &ProductPayload,
    ) -> Result<ProductData, CatalogError> {
        self.put(&format!("/products/{product_id}"), payload).await
    }

    // =========================================================================
    // Brands & Categories
    // =========================================================================

    /// List all brands.
    #[instrument(skip(self))]
    pub async fn get_brands(&self) -> Result<Vec<Brand>, CatalogError> {
        let envelope: Envelope<Vec<Brand>> = self.get("/brands").await?;
        Ok(envelope.data)
    }

    /// Create a brand.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_brand(&self, request: &CreateBrandRequest) -> Result<Brand, CatalogError> {
        self.post("/brands", request).await
    }

    /// List all categories.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let envelope: Envelope<Vec<Category>> = self.get("/categories").await?;
        Ok(envelope.data)
    }

    /// Create a category.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<Category, CatalogError> {
        self.post("/categories", request).await
    }

    // =========================================================================
    // Transport helpers
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{ADMIN_PREFIX}{path}", self.inner.base_url)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let response = self.inner.client.get(self.url(path)).send().await?;
        self.handle_response(response).await
    }

    async fn post<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        let response = self.inner.client.post(self.url(path)).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn put<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        let response = self.inner.client.put(self.url(path)).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), CatalogError> {
        let response = self.inner.client.delete(self.url(path)).send().await?;

        let status = response.status();
        if status.is_success() || status.as_u16() == 204 {
            return Ok(());
        }

        Err(Self::parse_error(response).await)
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CatalogError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| CatalogError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Map an error response onto the error taxonomy.
    async fn parse_error(response: reqwest::Response) -> CatalogError {
        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return CatalogError::RateLimited(retry_after);
        }

        if status == 401 || status == 403 {
            return CatalogError::Unauthorized;
        }

        if status == 404 {
            return CatalogError::NotFound("Resource not found".to_string());
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        CatalogError::Api { status, message }
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}
