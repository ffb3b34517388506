//! Catalog attribute reference types.
//!
//! Attributes are axes of product variation (Color, Size, Material, ...)
//! owned by the catalog service. The builder only reads them: it never
//! creates or mutates attribute data outside the admin API calls.

use serde::{Deserialize, Serialize};

use super::id::{AttributeId, AttributeValueId};

/// Stable machine key of the color attribute.
pub const COLOR_KEY: &str = "color";

/// Stable machine key of the size attribute.
pub const SIZE_KEY: &str = "size";

/// A named axis of product variation with a catalog-managed value list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Attribute ID.
    pub id: AttributeId,
    /// Stable machine name (e.g. `color`, `size`).
    pub key: String,
    /// Display name.
    pub name: String,
    /// Catalog-managed values.
    #[serde(default)]
    pub values: Vec<AttributeValue>,
}

/// One value of an attribute (e.g. `deep-blue` under Color).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    /// Value ID - the primary identity.
    pub id: AttributeValueId,
    /// Machine token. Secondary key used to match legacy variant records
    /// that stored raw tokens instead of ids.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Hex swatch colors, if the value represents a color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_swatch: Option<Vec<String>>,
    /// Representative image, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Attribute {
    /// Look up a value by its ID.
    #[must_use]
    pub fn value_by_id(&self, id: AttributeValueId) -> Option<&AttributeValue> {
        self.values.iter().find(|v| v.id == id)
    }

    /// Look up a value by its machine token.
    ///
    /// This is the backward-compatible path for variant records that
    /// persisted raw tokens instead of value ids.
    #[must_use]
    pub fn value_by_token(&self, token: &str) -> Option<&AttributeValue> {
        self.values.iter().find(|v| v.value == token)
    }
}

/// Find the attribute with the given machine key in a catalog listing.
#[must_use]
pub fn attribute_by_key<'a>(attributes: &'a [Attribute], key: &str) -> Option<&'a Attribute> {
    attributes.iter().find(|a| a.key == key)
}
