//! Flat variant wire types.
//!
//! A [`VariantRecord`] is the backend-persisted representation of one
//! concrete, sellable SKU. It is produced by the expander at submit time and
//! read back by the collapser at edit-load time; between those two events it
//! is owned by the product-storage service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One sellable variant, as stored by the product service.
///
/// `image_url` is a comma-joined list of image URLs. Base64 `data:` URIs are
/// kept intact despite the comma between MIME prefix and payload; see the
/// builder's URL splitting helpers for the matching parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    /// Selling price.
    pub price: Decimal,
    /// Original price when on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Decimal>,
    /// SKU code, unique within the owning product.
    pub sku: String,
    /// Color token, if the variant is color-bearing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Size token, if the variant is size-bearing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Inventory on hand.
    pub stock: i64,
    /// Comma-joined image URL list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Whether this variant carries the product's featured image.
    #[serde(default)]
    pub is_featured: bool,
    /// Whether the variant is visible on the storefront. Legacy records
    /// omit the field; absence means published.
    #[serde(default = "default_published")]
    pub published: bool,
    /// Attribute options in any of the legacy persisted shapes. Only ever
    /// read back; the expander does not emit them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<VariantOption>,
}

const fn default_published() -> bool {
    true
}

/// One attribute option attached to a persisted variant.
///
/// Three generations of the storage schema coexist in real installations:
/// a flat `key` field, a flat `attribute` field, and a nested
/// `attributeValue.attribute.key` relation. All fields are optional so any
/// of them deserializes; resolution order lives in the builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOption {
    /// Flat attribute key (oldest shape).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Flat attribute key under a different field name (middle shape).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Raw value token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Nested relation (newest shape).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_value: Option<VariantOptionValue>,
}

/// Nested attribute-value relation on a [`VariantOption`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOptionValue {
    /// Raw value token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Owning attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<VariantOptionAttribute>,
}

/// Owning attribute of a nested option relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOptionAttribute {
    /// Machine key of the attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}
