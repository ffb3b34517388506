//! Variant builder - the product-authoring core.
//!
//! Two pure transforms mirror each other:
//!
//! - **Expand** ([`expand::expand`]): grouped authoring state
//!   ([`ColorGroup`]s) plus a shared [`expand::VariantTemplate`] become the
//!   flat [`storekeeper_core::VariantRecord`] list submitted to the catalog
//!   service.
//! - **Collapse** ([`collapse::collapse`]): a persisted flat variant list is
//!   reconstructed into [`ColorGroup`]s so a saved product can be re-edited.
//!
//! There is no workflow state beyond these two directions: each edit-screen
//! load performs one collapse, each submit performs one expand.
//!
//! # Builder modes
//!
//! The builder runs in one of two explicitly chosen modes:
//!
//! - per-combination ([`expand::expand`]) - the canonical color/size path.
//!   Every concrete combination becomes its own stock-tracked variant
//!   record.
//! - single-variant ([`expand::expand_uniform`]) - "one variant, many
//!   attributes". A single shared row of price/stock/sku/images applies
//!   uniformly to the whole product; combinations are intentionally NOT
//!   expanded into separate rows. Used for products where per-combination
//!   stock tracking is not required.

pub mod collapse;
pub mod expand;
pub mod group;
pub mod selection;
pub mod urls;

mod resolve;

pub use collapse::{CollapseOutcome, CollapseWarning, collapse};
pub use expand::{
    Expansion, UniformRow, VariantTemplate, expand, expand_uniform,
};
pub use group::{ColorGroup, SizeEntry, set_featured_color, size_label};
pub use selection::{AttributeSelectionState, SelectionAction};
pub use urls::{join_urls, smart_split};

use thiserror::Error;

/// A pre-submission invariant violation.
///
/// Every variant names the group (and size, where relevant) that failed so
/// the form can surface the exact field. Validation failures reject the
/// whole expansion; nothing is partially emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The product has no color groups at all.
    #[error("no colors selected for this product")]
    NoColorGroups,

    /// A group's resolved base price is missing, zero, or negative.
    #[error("color '{color}': price is required and must be greater than zero")]
    InvalidPrice { color: String },

    /// A size row's resolved price is zero or negative.
    #[error("color '{color}', size '{size}': price must be greater than zero")]
    InvalidSizePrice { color: String, size: String },

    /// The owning category requires sizes but the group has none.
    #[error("color '{color}': this category requires at least one size")]
    MissingSizes { color: String },

    /// A size row's stock is missing or negative.
    #[error("color '{color}', size '{size}': stock is required and must not be negative")]
    InvalidSizeStock { color: String, size: String },

    /// A size-less group's stock is missing or negative.
    #[error("color '{color}': stock is required and must not be negative")]
    InvalidStock { color: String },

    /// Single-variant mode: the shared row has no usable price.
    #[error("price is required and must be greater than zero")]
    InvalidTemplatePrice,

    /// Single-variant mode: the shared row has no usable stock.
    #[error("stock is required and must not be negative")]
    InvalidTemplateStock,

    /// Single-variant mode: no attribute values are selected.
    #[error("no attribute values selected")]
    NoAttributesSelected,
}

/// A non-blocking issue noticed during expansion.
///
/// The form surfaces these as warnings; submission proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandWarning {
    /// A group has no images attached.
    #[error("color '{color}': no images attached")]
    MissingImages { color: String },
}
