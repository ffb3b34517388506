//! Variant collapse: flat persisted records -> grouped authoring state.
//!
//! The edit-load path, inverting [`super::expand`]. Records are walked in
//! order; the first sighting of a color creates its group, later sightings
//! merge into it. Collapse never fails: a record whose color cannot be
//! resolved by any strategy lands in a synthetic `default` group and is
//! reported as a warning instead of aborting the load.

use std::collections::HashMap;
use storekeeper_core::{
    Attribute, COLOR_KEY, SIZE_KEY, VariantRecord, attribute_by_key, title_case_token,
};
use thiserror::Error;
use tracing::debug;

use super::group::{ColorGroup, SizeEntry, size_label};
use super::resolve::{resolve_color, resolve_size};
use super::urls::smart_split;

/// Color token assigned to records no strategy could resolve.
pub const DEFAULT_COLOR: &str = "default";

/// Human-readable label for the synthetic color group.
pub const DEFAULT_COLOR_LABEL: &str = "Default";

/// Result of collapsing a variant list.
#[derive(Debug, Clone)]
pub struct CollapseOutcome {
    /// Reconstructed groups, in first-seen order. Size entries within a
    /// group are in first-seen order too.
    pub groups: Vec<ColorGroup>,
    /// Records that needed the synthetic fallback.
    pub warnings: Vec<CollapseWarning>,
}

/// A non-fatal data-shape issue noticed during collapse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollapseWarning {
    /// No resolver strategy produced a color for this record; it was
    /// grouped under the synthetic `default` color.
    #[error("variant '{sku}': no color could be resolved, grouped under 'default'")]
    UnresolvedColor { sku: String },
}

/// Reconstruct editable color groups from persisted variant records.
///
/// The catalog attribute list supplies display labels: a resolved color or
/// size token is first matched against the corresponding attribute's values
/// (by machine token - the backward-compatible secondary key), falling back
/// to title-casing the raw token.
///
/// Merging rules for repeat sightings of a color:
/// - images are unioned with de-duplication (path-like URLs compare without
///   their leading `/`, `data:` URIs verbatim),
/// - a sized record adds or updates that size's stock and per-size price
///   overrides,
/// - a size-less record's stock is **summed** into the group's base stock -
///   distinct records without sizes are additive, not overwriting,
/// - the featured flag is a logical OR across all contributing records.
///
/// The group's base price is seeded from the first record seen for its
/// color. Which row originally carried an override is not recorded on the
/// wire, so a draft whose first size row overrode the price comes back with
/// that override as the base and the other rows marked as overrides. The
/// two forms expand to identical records.
#[must_use]
pub fn collapse(variants: &[VariantRecord], attributes: &[Attribute]) -> CollapseOutcome {
    let color_attribute = attribute_by_key(attributes, COLOR_KEY);
    let size_attribute = attribute_by_key(attributes, SIZE_KEY);

    let mut groups: Vec<ColorGroup> = Vec::new();
    let mut index_by_color: HashMap<String, usize> = HashMap::new();
    let mut warnings = Vec::new();

    for record in variants {
        let color = resolve_color(record).unwrap_or_else(|| {
            warnings.push(CollapseWarning::UnresolvedColor {
                sku: record.sku.clone(),
            });
            DEFAULT_COLOR.to_string()
        });
        let size = resolve_size(record);

        let group_index = *index_by_color.entry(color.clone()).or_insert_with(|| {
            let label = if color == DEFAULT_COLOR {
                DEFAULT_COLOR_LABEL.to_string()
            } else {
                color_attribute
                    .and_then(|a| a.value_by_token(&color))
                    .map_or_else(|| title_case_token(&color), |v| v.label.clone())
            };
            let mut group = ColorGroup::new(color.clone(), label);
            group.base_price = Some(record.price);
            group.base_compare_at_price = record.compare_at_price;
            groups.push(group);
            groups.len() - 1
        });
        let Some(group) = groups.get_mut(group_index) else {
            continue;
        };

        if let Some(joined) = record.image_url.as_deref() {
            for url in smart_split(joined) {
                group.push_image(url);
            }
        }
        group.is_featured |= record.is_featured;

        match size {
            Some(size_token) => {
                let base_price = group.base_price;
                let base_compare = group.base_compare_at_price;
                let price_override = base_price
                    .is_none_or(|base| base != record.price)
                    .then_some(record.price);
                let compare_override = record
                    .compare_at_price
                    .filter(|c| base_compare.as_ref() != Some(c));

                if let Some(entry) = group.size_mut(&size_token) {
                    entry.stock = Some(record.stock);
                    entry.price = price_override;
                    entry.compare_at_price = compare_override;
                } else {
                    group.sizes.push(SizeEntry {
                        size_label: size_label(&size_token, None, size_attribute),
                        size_value: size_token,
                        stock: Some(record.stock),
                        price: price_override,
                        compare_at_price: compare_override,
                    });
                }
            }
            None => {
                group.base_stock = Some(group.base_stock.unwrap_or(0) + record.stock);
            }
        }
    }

    debug!(
        records = variants.len(),
        groups = groups.len(),
        warnings = warnings.len(),
        "collapsed variant records"
    );

    CollapseOutcome { groups, warnings }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use storekeeper_core::{AttributeId, AttributeValue, AttributeValueId};

    fn record(sku: &str, color: Option<&str>, size: Option<&str>, stock: i64) -> VariantRecord {
        VariantRecord {
            price: Decimal::new(2000, 2),
            compare_at_price: None,
            sku: sku.to_string(),
            color: color.map(str::to_string),
            size: size.map(str::to_string),
            stock,
            image_url: None,
            is_featured: false,
            published: true,
            options: Vec::new(),
        }
    }

    fn catalog() -> Vec<Attribute> {
        vec![Attribute {
            id: AttributeId::new(1),
            key: COLOR_KEY.to_string(),
            name: "Color".to_string(),
            values: vec![AttributeValue {
                id: AttributeValueId::new(10),
                value: "deep-blue".to_string(),
                label: "Deep Blue".to_string(),
                color_swatch: None,
                image_url: None,
            }],
        }]
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let variants = vec![
            record("a", Some("red"), Some("s"), 1),
            record("b", Some("blue"), Some("s"), 1),
            record("c", Some("red"), Some("m"), 1),
        ];
        let outcome = collapse(&variants, &[]);
        assert_eq!(outcome.groups.len(), 2);
        assert_eq!(outcome.groups[0].color_value, "red");
        assert_eq!(outcome.groups[1].color_value, "blue");
        let sizes: Vec<&str> = outcome.groups[0]
            .sizes
            .iter()
            .map(|s| s.size_value.as_str())
            .collect();
        assert_eq!(sizes, vec!["s", "m"]);
    }

    #[test]
    fn test_sizeless_stock_is_additive() {
        let variants = vec![
            record("a", Some("red"), None, 3),
            record("b", Some("red"), None, 4),
        ];
        let outcome = collapse(&variants, &[]);
        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].base_stock, Some(7));
    }

    #[test]
    fn test_label_from_catalog_else_title_case() {
        let variants = vec![
            record("a", Some("deep-blue"), None, 1),
            record("b", Some("burnt-orange"), None, 1),
        ];
        let outcome = collapse(&variants, &catalog());
        assert_eq!(outcome.groups[0].color_label, "Deep Blue");
        assert_eq!(outcome.groups[1].color_label, "Burnt Orange");
    }

    #[test]
    fn test_unresolved_color_falls_back_to_default() {
        let variants = vec![record("plainsku", None, None, 2)];
        let outcome = collapse(&variants, &[]);
        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].color_value, DEFAULT_COLOR);
        assert_eq!(outcome.groups[0].color_label, DEFAULT_COLOR_LABEL);
        assert_eq!(
            outcome.warnings,
            vec![CollapseWarning::UnresolvedColor {
                sku: "plainsku".to_string()
            }]
        );
    }

    #[test]
    fn test_images_merged_with_dedup() {
        let mut a = record("a", Some("red"), None, 1);
        a.image_url = Some("/uploads/front.jpg,data:image/png;base64,AAAA==".to_string());
        let mut b = record("b", Some("red"), None, 1);
        b.image_url = Some("uploads/front.jpg,/uploads/back.jpg".to_string());

        let outcome = collapse(&[a, b], &[]);
        assert_eq!(
            outcome.groups[0].images,
            vec![
                "/uploads/front.jpg",
                "data:image/png;base64,AAAA==",
                "/uploads/back.jpg",
            ]
        );
    }

    #[test]
    fn test_featured_is_or_across_records() {
        let mut a = record("a", Some("red"), Some("s"), 1);
        a.is_featured = false;
        let mut b = record("b", Some("red"), Some("m"), 1);
        b.is_featured = true;

        let outcome = collapse(&[a, b], &[]);
        assert!(outcome.groups[0].is_featured);
    }

    #[test]
    fn test_per_size_price_override_detected() {
        let mut base = record("a", Some("red"), Some("s"), 1);
        base.price = Decimal::new(2000, 2);
        let mut premium = record("b", Some("red"), Some("xl"), 1);
        premium.price = Decimal::new(2500, 2);

        let outcome = collapse(&[base, premium], &[]);
        let group = &outcome.groups[0];
        assert_eq!(group.base_price, Some(Decimal::new(2000, 2)));
        assert_eq!(group.sizes[0].price, None);
        assert_eq!(group.sizes[1].price, Some(Decimal::new(2500, 2)));
    }

    #[test]
    fn test_base_price_seeded_from_first_record() {
        let mut premium = record("a", Some("red"), Some("s"), 1);
        premium.price = Decimal::new(2500, 2);
        let mut plain = record("b", Some("red"), Some("m"), 1);
        plain.price = Decimal::new(2000, 2);

        let outcome = collapse(&[premium, plain], &[]);
        let group = &outcome.groups[0];
        assert_eq!(group.base_price, Some(Decimal::new(2500, 2)));
        assert_eq!(group.sizes[0].price, None);
        assert_eq!(group.sizes[1].price, Some(Decimal::new(2000, 2)));
    }

    #[test]
    fn test_repeat_size_updates_stock() {
        let variants = vec![
            record("a", Some("red"), Some("s"), 1),
            record("b", Some("red"), Some("s"), 9),
        ];
        let outcome = collapse(&variants, &[]);
        assert_eq!(outcome.groups[0].sizes.len(), 1);
        assert_eq!(outcome.groups[0].sizes[0].stock, Some(9));
    }

    #[test]
    fn test_sku_heuristic_used_when_fields_absent() {
        let variants = vec![record("tee-black-xl", None, None, 1)];
        let outcome = collapse(&variants, &[]);
        assert_eq!(outcome.groups[0].color_value, "black");
        assert_eq!(outcome.groups[0].sizes[0].size_value, "xl");
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let outcome = collapse(&[], &[]);
        assert!(outcome.groups.is_empty());
        assert!(outcome.warnings.is_empty());
    }
}
