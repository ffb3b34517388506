//! Core types for Storekeeper.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod attribute;
pub mod id;
pub mod label;
pub mod media;
pub mod product;
pub mod slug;
pub mod variant;

pub use attribute::{Attribute, AttributeValue, COLOR_KEY, SIZE_KEY, attribute_by_key};
pub use id::*;
pub use label::{Label, LabelKind, LabelPosition};
pub use media::{MediaEntry, MediaKind};
pub use product::{Brand, Category, ProductData, ProductPayload};
pub use slug::{slugify, title_case_token};
pub use variant::{VariantOption, VariantOptionAttribute, VariantOptionValue, VariantRecord};
