//! Product, brand, and category wire types for the admin catalog API.

use serde::{Deserialize, Serialize};

use super::id::{AttributeId, BrandId, CategoryId, ProductId};
use super::label::Label;
use super::media::MediaEntry;
use super::variant::VariantRecord;

/// A brand, as listed by the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    /// Brand ID.
    pub id: BrandId,
    /// Display name.
    pub name: String,
}

/// A category, as listed by the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display title.
    pub title: String,
    /// Whether products in this category must carry a size breakdown.
    #[serde(default)]
    pub requires_sizes: bool,
}

/// Create/update payload for a product, fed from the expander's output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Rich-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    /// Owning brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<BrandId>,
    /// Primary category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_category_id: Option<CategoryId>,
    /// All categories the product appears in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category_ids: Vec<CategoryId>,
    /// Storefront visibility.
    pub published: bool,
    /// Whether the product is featured on the storefront.
    pub featured: bool,
    /// Sellable variants.
    pub variants: Vec<VariantRecord>,
    /// Ordered media list, featured entry first.
    pub media: Vec<MediaEntry>,
    /// Badges rendered over product imagery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    /// Attributes used by the single-variant multi-attribute mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_ids: Vec<AttributeId>,
}

/// A product as returned by the read endpoint. Feeds the collapser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    /// Product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Rich-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    /// Owning brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<BrandId>,
    /// Primary category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_category_id: Option<CategoryId>,
    /// All categories the product appears in.
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
    /// Storefront visibility.
    #[serde(default)]
    pub published: bool,
    /// Whether the product is featured on the storefront.
    #[serde(default)]
    pub featured: bool,
    /// Persisted variants.
    #[serde(default)]
    pub variants: Vec<VariantRecord>,
    /// Persisted media list.
    #[serde(default)]
    pub media: Vec<MediaEntry>,
    /// Persisted labels.
    #[serde(default)]
    pub labels: Vec<Label>,
}
