//! Grouped authoring state: one [`ColorGroup`] per distinct color.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storekeeper_core::{Attribute, slugify};

use super::urls::canonical_url_key;

/// Admin-side aggregate of one color's images, pricing, stock, and size
/// breakdown for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorGroup {
    /// Machine token of the color value.
    pub color_value: String,
    /// Display label.
    pub color_label: String,
    /// Image URLs, insertion-ordered and de-duplicated.
    #[serde(default)]
    pub images: Vec<String>,
    /// Price shared by every size under this group unless a size overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<Decimal>,
    /// Compare-at price shared the same way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_compare_at_price: Option<Decimal>,
    /// Stock for the group when it has no sizes. Ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_stock: Option<i64>,
    /// Whether this group carries the product's featured image. At most one
    /// group per product is featured; see [`set_featured_color`].
    #[serde(default)]
    pub is_featured: bool,
    /// Size breakdown, declaration-ordered.
    #[serde(default)]
    pub sizes: Vec<SizeEntry>,
}

impl ColorGroup {
    /// Create an empty group for a color.
    #[must_use]
    pub fn new(color_value: impl Into<String>, color_label: impl Into<String>) -> Self {
        Self {
            color_value: color_value.into(),
            color_label: color_label.into(),
            images: Vec::new(),
            base_price: None,
            base_compare_at_price: None,
            base_stock: None,
            is_featured: false,
            sizes: Vec::new(),
        }
    }

    /// Append an image unless an equivalent URL is already present.
    ///
    /// Equivalence ignores a leading `/` on path-like URLs; `data:` URIs
    /// are compared verbatim.
    pub fn push_image(&mut self, url: String) {
        let key = canonical_url_key(&url).to_string();
        if !self.images.iter().any(|u| canonical_url_key(u) == key) {
            self.images.push(url);
        }
    }

    /// Find a size entry by its machine token.
    #[must_use]
    pub fn size_mut(&mut self, size_value: &str) -> Option<&mut SizeEntry> {
        self.sizes.iter_mut().find(|s| s.size_value == size_value)
    }
}

/// One size row under a [`ColorGroup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeEntry {
    /// Machine token of the size value.
    pub size_value: String,
    /// Display label; see [`size_label`] for the fallback chain.
    pub size_label: String,
    /// Inventory on hand. Mandatory for submission; `None` means the admin
    /// has not filled the field in yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    /// Price override for this size. Falls back to the group's base price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Compare-at override with the same fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Decimal>,
}

/// Resolve the display label for a size token.
///
/// Fallback chain: the label the catalog attribute provides for the token,
/// else a manually-entered label, else the uppercased slug of the token.
#[must_use]
pub fn size_label(token: &str, manual: Option<&str>, size_attribute: Option<&Attribute>) -> String {
    if let Some(value) = size_attribute.and_then(|a| a.value_by_token(token)) {
        return value.label.clone();
    }
    if let Some(label) = manual.filter(|l| !l.is_empty()) {
        return label.to_string();
    }
    slugify(token).to_uppercase()
}

/// Mark one group as featured and clear the flag on all its siblings.
///
/// Returns `false` (leaving every flag untouched) when no group carries the
/// given color token.
pub fn set_featured_color(groups: &mut [ColorGroup], color_value: &str) -> bool {
    if !groups.iter().any(|g| g.color_value == color_value) {
        return false;
    }
    for group in groups.iter_mut() {
        group.is_featured = group.color_value == color_value;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use storekeeper_core::{AttributeId, AttributeValue, AttributeValueId, SIZE_KEY};

    fn size_attribute() -> Attribute {
        Attribute {
            id: AttributeId::new(2),
            key: SIZE_KEY.to_string(),
            name: "Size".to_string(),
            values: vec![AttributeValue {
                id: AttributeValueId::new(20),
                value: "m".to_string(),
                label: "Medium".to_string(),
                color_swatch: None,
                image_url: None,
            }],
        }
    }

    #[test]
    fn test_push_image_dedupes_leading_slash() {
        let mut group = ColorGroup::new("red", "Red");
        group.push_image("/uploads/a.jpg".to_string());
        group.push_image("uploads/a.jpg".to_string());
        group.push_image("/uploads/b.jpg".to_string());
        assert_eq!(group.images, vec!["/uploads/a.jpg", "/uploads/b.jpg"]);
    }

    #[test]
    fn test_push_image_keeps_distinct_data_uris() {
        let mut group = ColorGroup::new("red", "Red");
        group.push_image("data:image/png;base64,AAAA==".to_string());
        group.push_image("data:image/png;base64,AAAA==".to_string());
        group.push_image("data:image/png;base64,BBBB==".to_string());
        assert_eq!(group.images.len(), 2);
    }

    #[test]
    fn test_size_label_fallback_chain() {
        let attr = size_attribute();
        assert_eq!(size_label("m", None, Some(&attr)), "Medium");
        assert_eq!(size_label("xl", Some("Extra Large"), Some(&attr)), "Extra Large");
        assert_eq!(size_label("xl", None, Some(&attr)), "XL");
        assert_eq!(size_label("one-size", None, None), "ONE-SIZE");
    }

    #[test]
    fn test_set_featured_color_exactly_one() {
        let mut groups = vec![ColorGroup::new("red", "Red"), ColorGroup::new("blue", "Blue")];
        groups[0].is_featured = true;

        assert!(set_featured_color(&mut groups, "blue"));
        assert!(!groups[0].is_featured);
        assert!(groups[1].is_featured);
        assert_eq!(groups.iter().filter(|g| g.is_featured).count(), 1);
    }

    #[test]
    fn test_set_featured_color_unknown_is_noop() {
        let mut groups = vec![ColorGroup::new("red", "Red")];
        groups[0].is_featured = true;

        assert!(!set_featured_color(&mut groups, "green"));
        assert!(groups[0].is_featured);
    }
}
