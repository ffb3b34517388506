//! Variant expansion: grouped authoring state -> flat variant records.
//!
//! The save path. Validation and emission happen in one pass, but a failed
//! validation rejects the whole expansion - the caller never sees a partial
//! variant list.

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use storekeeper_core::{AttributeId, MediaEntry, VariantRecord, slugify};
use tracing::debug;

use super::selection::AttributeSelectionState;
use super::urls::join_urls;
use super::{ColorGroup, ExpandWarning, ValidationError};

/// Shared defaults applied to every emitted variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantTemplate {
    /// SKU base. When empty, SKUs are generated from the product slug and a
    /// timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Price used when neither the group nor the size row provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Compare-at price with the same precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Decimal>,
    /// Storefront visibility stamped onto every variant.
    #[serde(default = "default_published")]
    pub published: bool,
}

const fn default_published() -> bool {
    true
}

impl Default for VariantTemplate {
    fn default() -> Self {
        Self {
            sku: None,
            price: None,
            compare_at_price: None,
            published: true,
        }
    }
}

/// Result of a successful expansion.
#[derive(Debug, Clone)]
pub struct Expansion {
    /// One record per concrete combination, declaration-ordered.
    pub variants: Vec<VariantRecord>,
    /// Ordered media list, featured entry first, positions reassigned.
    pub media: Vec<MediaEntry>,
    /// Non-blocking issues to surface alongside the form.
    pub warnings: Vec<ExpandWarning>,
}

/// Expand color groups into the flat variant list for submission.
///
/// Override precedence for price and compare-at price is
/// size row > group base > template default. Emission order follows group
/// and size declaration order. Every emitted SKU is unique within the
/// result; collisions are resolved by appending a random 4-character suffix.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered; nothing is emitted in
/// that case. Price must resolve to a positive amount for every record. A
/// category that requires sizes rejects any group without them; otherwise a
/// size-less group must carry a non-negative base stock.
pub fn expand(
    groups: &[ColorGroup],
    template: &VariantTemplate,
    product_slug: &str,
    requires_sizes: bool,
) -> Result<Expansion, ValidationError> {
    if groups.is_empty() {
        return Err(ValidationError::NoColorGroups);
    }

    let template_sku = template
        .sku
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let multi = groups.len() > 1 || groups.iter().any(|g| g.sizes.len() > 1);
    let generated_base = format!("{}-{}", slugify(product_slug), Utc::now().timestamp_millis());

    let mut variants = Vec::new();
    let mut warnings = Vec::new();

    for (color_index, group) in groups.iter().enumerate() {
        if group.images.is_empty() {
            warnings.push(ExpandWarning::MissingImages {
                color: group.color_value.clone(),
            });
        }

        let image_url = if group.images.is_empty() {
            None
        } else {
            Some(join_urls(&group.images))
        };

        if group.sizes.is_empty() {
            if requires_sizes {
                return Err(ValidationError::MissingSizes {
                    color: group.color_value.clone(),
                });
            }

            let price = resolve_positive_price(
                group.base_price.or(template.price),
                || ValidationError::InvalidPrice {
                    color: group.color_value.clone(),
                },
            )?;
            let stock = group
                .base_stock
                .filter(|s| *s >= 0)
                .ok_or_else(|| ValidationError::InvalidStock {
                    color: group.color_value.clone(),
                })?;

            variants.push(VariantRecord {
                price,
                compare_at_price: group.base_compare_at_price.or(template.compare_at_price),
                sku: assign_sku(template_sku, &generated_base, multi, color_index, None),
                color: Some(group.color_value.clone()),
                size: None,
                stock,
                image_url: image_url.clone(),
                is_featured: group.is_featured,
                published: template.published,
                options: Vec::new(),
            });
            continue;
        }

        for (size_index, size) in group.sizes.iter().enumerate() {
            let price = resolve_positive_price(
                size.price.or(group.base_price).or(template.price),
                || ValidationError::InvalidSizePrice {
                    color: group.color_value.clone(),
                    size: size.size_value.clone(),
                },
            )?;
            let stock = size
                .stock
                .filter(|s| *s >= 0)
                .ok_or_else(|| ValidationError::InvalidSizeStock {
                    color: group.color_value.clone(),
                    size: size.size_value.clone(),
                })?;

            variants.push(VariantRecord {
                price,
                compare_at_price: size
                    .compare_at_price
                    .or(group.base_compare_at_price)
                    .or(template.compare_at_price),
                sku: assign_sku(
                    template_sku,
                    &generated_base,
                    multi,
                    color_index,
                    Some(size_index),
                ),
                color: Some(group.color_value.clone()),
                size: Some(size.size_value.clone()),
                stock,
                image_url: image_url.clone(),
                is_featured: group.is_featured && size_index == 0,
                published: template.published,
                options: Vec::new(),
            });
        }
    }

    dedupe_skus(&mut variants);
    let media = featured_media(groups);

    debug!(
        groups = groups.len(),
        variants = variants.len(),
        media = media.len(),
        warnings = warnings.len(),
        "expanded color groups"
    );

    Ok(Expansion {
        variants,
        media,
        warnings,
    })
}

/// Shared row for the single-variant multi-attribute mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniformRow {
    /// Selling price. Mandatory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Compare-at price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Decimal>,
    /// Shared stock figure. Mandatory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    /// SKU; generated from the product slug when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Shared image list.
    #[serde(default)]
    pub images: Vec<String>,
}

/// Expand the single-variant multi-attribute mode.
///
/// One shared row applies uniformly to the whole product: the selection's
/// combinations are intentionally NOT expanded into separate stock-tracked
/// records. Returns the single record plus the attribute ids to persist on
/// the product.
///
/// # Errors
///
/// Requires at least one selected attribute value, a positive price, and a
/// non-negative stock.
pub fn expand_uniform(
    selection: &AttributeSelectionState,
    row: &UniformRow,
    product_slug: &str,
    published: bool,
) -> Result<(VariantRecord, Vec<AttributeId>), ValidationError> {
    if !selection.has_values() {
        return Err(ValidationError::NoAttributesSelected);
    }
    let price = resolve_positive_price(row.price, || ValidationError::InvalidTemplatePrice)?;
    let stock = row
        .stock
        .filter(|s| *s >= 0)
        .ok_or(ValidationError::InvalidTemplateStock)?;

    let sku = row
        .sku
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(
            || format!("{}-{}", slugify(product_slug), Utc::now().timestamp_millis()),
            str::to_string,
        );

    let record = VariantRecord {
        price,
        compare_at_price: row.compare_at_price,
        sku,
        color: None,
        size: None,
        stock,
        image_url: if row.images.is_empty() {
            None
        } else {
            Some(join_urls(&row.images))
        },
        is_featured: true,
        published,
        options: Vec::new(),
    };

    Ok((record, selection.selected_attributes().collect()))
}

fn resolve_positive_price(
    price: Option<Decimal>,
    err: impl FnOnce() -> ValidationError,
) -> Result<Decimal, ValidationError> {
    price.filter(|p| *p > Decimal::ZERO).ok_or_else(err)
}

/// SKU for one emitted record.
///
/// With a template SKU: unmodified for a single-color, at-most-one-size set;
/// otherwise suffixed with the 1-based color index and, for sized records,
/// the 1-based size index. Without one: generated from the product slug and
/// a millisecond timestamp with the same index suffixes.
fn assign_sku(
    template_sku: Option<&str>,
    generated_base: &str,
    multi: bool,
    color_index: usize,
    size_index: Option<usize>,
) -> String {
    let suffix = size_index.map_or_else(
        || format!("{}", color_index + 1),
        |si| format!("{}-{}", color_index + 1, si + 1),
    );
    match template_sku {
        Some(base) if multi => format!("{base}-{suffix}"),
        Some(base) => base.to_string(),
        None => format!("{generated_base}-{suffix}"),
    }
}

/// Post-pass uniqueness resolution over the emitted records, in order.
///
/// A repeated SKU is regenerated by appending a random 4-character suffix
/// until it no longer collides. The result is globally unique within the
/// product; it is not reproducible across runs and does not need to be.
fn dedupe_skus(variants: &mut [VariantRecord]) {
    let mut seen: HashSet<String> = HashSet::with_capacity(variants.len());
    let mut rng = rand::rng();
    for variant in variants.iter_mut() {
        while seen.contains(&variant.sku) {
            let suffix: String = (&mut rng)
                .sample_iter(Alphanumeric)
                .take(4)
                .map(|b| (b as char).to_ascii_lowercase())
                .collect();
            variant.sku = format!("{}-{}", variant.sku, suffix);
        }
        seen.insert(variant.sku.clone());
    }
}

/// Collect all group images into the product media list.
///
/// The first image of each featured group is tagged featured; featured
/// entries sort first (stable within the original order). When no group is
/// featured but at least one image exists, the very first image takes the
/// featured role. Positions are reassigned after sorting.
fn featured_media(groups: &[ColorGroup]) -> Vec<MediaEntry> {
    let mut media = Vec::new();
    for group in groups {
        for (index, url) in group.images.iter().enumerate() {
            media.push(MediaEntry::image(
                url.clone(),
                0,
                group.is_featured && index == 0,
            ));
        }
    }

    media.sort_by_key(|entry| !entry.is_featured);
    if !media.iter().any(|entry| entry.is_featured)
        && let Some(first) = media.first_mut()
    {
        first.is_featured = true;
    }
    for (index, entry) in media.iter_mut().enumerate() {
        entry.position = i32::try_from(index).unwrap_or(i32::MAX);
    }
    media
}
