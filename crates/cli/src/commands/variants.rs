//! Offline variant builder commands.
//!
//! These operate on local JSON files and never contact the catalog, which
//! makes them usable for inspecting drafts and for reproducing validation
//! failures outside the admin panel.
//!
//! # Draft file format
//!
//! ```json
//! {
//!   "slug": "summer-tee",
//!   "requiresSizes": true,
//!   "template": { "sku": "TEE-001", "price": "20.00" },
//!   "groups": [ { "colorValue": "red", "colorLabel": "Red", ... } ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use storekeeper_admin::builder::{ColorGroup, VariantTemplate};
use storekeeper_core::ProductData;
use thiserror::Error;

/// Errors that can occur in the offline variant commands.
#[derive(Debug, Error)]
pub enum VariantsError {
    /// Could not read the input file.
    #[error("Failed to read {0}: {1}")]
    Read(String, std::io::Error),

    /// The input file is not valid JSON of the expected shape.
    #[error("Failed to parse {0}: {1}")]
    Parse(String, serde_json::Error),

    /// The draft violated a pre-submission invariant.
    #[error("Validation failed: {0}")]
    Validation(#[from] storekeeper_admin::builder::ValidationError),

    /// Output serialization failed.
    #[error("Failed to serialize output: {0}")]
    Serialize(serde_json::Error),
}

/// A variant draft as authored in a local JSON file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftFile {
    /// Product slug, used for SKU generation.
    slug: String,
    /// Whether the owning category mandates a size breakdown.
    #[serde(default)]
    requires_sizes: bool,
    /// Shared defaults for every emitted variant.
    #[serde(default)]
    template: Option<VariantTemplate>,
    /// Color groups.
    groups: Vec<ColorGroup>,
}

/// Validate a draft file without emitting anything.
pub fn validate(file: &Path) -> Result<(), VariantsError> {
    let draft = read_draft(file)?;
    let template = draft.template.unwrap_or_default();
    let expansion = storekeeper_admin::builder::expand(
        &draft.groups,
        &template,
        &draft.slug,
        draft.requires_sizes,
    )?;

    tracing::info!(
        variants = expansion.variants.len(),
        media = expansion.media.len(),
        "draft is valid"
    );
    for warning in &expansion.warnings {
        tracing::warn!("{warning}");
    }
    Ok(())
}

/// Expand a draft file and print the flat variant list as JSON.
pub fn expand(file: &Path) -> Result<(), VariantsError> {
    let draft = read_draft(file)?;
    let template = draft.template.unwrap_or_default();
    let expansion = storekeeper_admin::builder::expand(
        &draft.groups,
        &template,
        &draft.slug,
        draft.requires_sizes,
    )?;

    for warning in &expansion.warnings {
        tracing::warn!("{warning}");
    }
    let json = serde_json::to_string_pretty(&expansion.variants)
        .map_err(VariantsError::Serialize)?;
    println!("{json}");
    Ok(())
}

/// Collapse a persisted product file back into color groups.
///
/// Accepts either a full product document or a bare variant array. Without
/// catalog access, color labels fall back to title-cased tokens.
pub fn collapse(file: &Path) -> Result<(), VariantsError> {
    let path = file.display().to_string();
    let raw = std::fs::read_to_string(file).map_err(|e| VariantsError::Read(path.clone(), e))?;

    let variants = match serde_json::from_str::<ProductData>(&raw) {
        Ok(product) => product.variants,
        Err(_) => serde_json::from_str(&raw).map_err(|e| VariantsError::Parse(path, e))?,
    };

    let outcome = storekeeper_admin::builder::collapse(&variants, &[]);
    for warning in &outcome.warnings {
        tracing::warn!("{warning}");
    }
    let json =
        serde_json::to_string_pretty(&outcome.groups).map_err(VariantsError::Serialize)?;
    println!("{json}");
    Ok(())
}

fn read_draft(file: &Path) -> Result<DraftFile, VariantsError> {
    let path = file.display().to_string();
    let raw = std::fs::read_to_string(file).map_err(|e| VariantsError::Read(path.clone(), e))?;
    serde_json::from_str(&raw).map_err(|e| VariantsError::Parse(path, e))
}
