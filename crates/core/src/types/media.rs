//! Product media wire types.

use serde::{Deserialize, Serialize};

/// One media item attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    /// Media URL (path, absolute URL, or `data:` URI).
    pub url: String,
    /// Media kind.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Zero-based display position. The featured entry sorts first.
    pub position: i32,
    /// Whether this entry is the product's featured image.
    pub is_featured: bool,
}

impl MediaEntry {
    /// Create an image entry at the given position.
    #[must_use]
    pub const fn image(url: String, position: i32, is_featured: bool) -> Self {
        Self {
            url,
            kind: MediaKind::Image,
            position,
            is_featured,
        }
    }
}

/// Supported media kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image.
    Image,
}
