//! Product label wire types (badges rendered over product imagery).

use serde::{Deserialize, Serialize};

/// A badge shown on top of product imagery ("New", "-20%", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Label kind.
    #[serde(rename = "type")]
    pub kind: LabelKind,
    /// Display text, or the percentage figure for percentage labels.
    pub value: String,
    /// Corner the label is anchored to.
    pub position: LabelPosition,
    /// Background hex color, or `null` for the theme default.
    pub color: Option<String>,
}

/// Label kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    /// Free-text badge.
    Text,
    /// Discount percentage badge.
    Percentage,
}

/// Corner positions for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}
