//! End-to-end properties of the variant expand/collapse pair.
//!
//! These run fully offline: a draft is expanded into the flat record list
//! the catalog would persist, then collapsed back, and the reconstruction
//! is compared against the original authoring state.

#![allow(clippy::indexing_slicing)]

use rust_decimal::Decimal;
use storekeeper_admin::builder::{
    ColorGroup, SizeEntry, VariantTemplate, collapse, expand, join_urls, smart_split,
};

fn size(value: &str, stock: i64) -> SizeEntry {
    SizeEntry {
        size_value: value.to_string(),
        size_label: value.to_uppercase(),
        stock: Some(stock),
        price: None,
        compare_at_price: None,
    }
}

fn blue_and_red() -> Vec<ColorGroup> {
    let mut blue = ColorGroup::new("blue", "Blue");
    blue.base_price = Some(Decimal::new(2000, 2));
    blue.is_featured = true;
    blue.push_image("/uploads/blue-front.jpg".to_string());
    blue.push_image("/uploads/blue-back.jpg".to_string());
    blue.sizes = vec![size("s", 2), size("m", 3)];

    let mut red = ColorGroup::new("red", "Red");
    red.base_price = Some(Decimal::new(2200, 2));
    red.base_stock = Some(4);
    red.push_image("/uploads/red.jpg".to_string());

    vec![blue, red]
}

// ============================================================================
// Round-trip
// ============================================================================

#[test]
fn test_expand_then_collapse_reconstructs_groups() {
    let groups = blue_and_red();
    let expansion =
        expand(&groups, &VariantTemplate::default(), "summer-tee", false).expect("expand");
    assert_eq!(expansion.variants.len(), 3);

    let outcome = collapse(&expansion.variants, &[]);
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.groups, groups);
}

#[test]
fn test_per_size_price_override_survives_round_trip() {
    let mut groups = blue_and_red();
    groups[0].sizes[1].price = Some(Decimal::new(2500, 2));

    let expansion =
        expand(&groups, &VariantTemplate::default(), "summer-tee", false).expect("expand");
    let outcome = collapse(&expansion.variants, &[]);

    let blue = &outcome.groups[0];
    assert_eq!(blue.base_price, Some(Decimal::new(2000, 2)));
    assert_eq!(blue.sizes[0].price, None);
    assert_eq!(blue.sizes[1].price, Some(Decimal::new(2500, 2)));
}

#[test]
fn test_first_size_override_reexpands_identically() {
    // An override on the FIRST size row seeds the collapsed group's base
    // price, so the reconstructed draft differs from the original. The two
    // drafts must still expand to the same records.
    let mut groups = blue_and_red();
    groups[0].sizes[0].price = Some(Decimal::new(2500, 2));

    let expansion =
        expand(&groups, &VariantTemplate::default(), "summer-tee", false).expect("expand");
    let outcome = collapse(&expansion.variants, &[]);

    let blue = &outcome.groups[0];
    assert_eq!(blue.base_price, Some(Decimal::new(2500, 2)));
    assert_eq!(blue.sizes[0].price, None);
    assert_eq!(blue.sizes[1].price, Some(Decimal::new(2000, 2)));

    let reexpanded = expand(
        &outcome.groups,
        &VariantTemplate::default(),
        "summer-tee",
        false,
    )
    .expect("re-expand");
    let original: Vec<(Option<String>, Decimal, i64)> = expansion
        .variants
        .iter()
        .map(|v| (v.size.clone(), v.price, v.stock))
        .collect();
    let rebuilt: Vec<(Option<String>, Decimal, i64)> = reexpanded
        .variants
        .iter()
        .map(|v| (v.size.clone(), v.price, v.stock))
        .collect();
    assert_eq!(original, rebuilt);
}

#[test]
fn test_featured_flag_survives_round_trip() {
    let groups = blue_and_red();
    let expansion =
        expand(&groups, &VariantTemplate::default(), "summer-tee", false).expect("expand");

    // Only the first size of the featured group carries the flag on the wire.
    let featured: Vec<&str> = expansion
        .variants
        .iter()
        .filter(|v| v.is_featured)
        .map(|v| v.sku.as_str())
        .collect();
    assert_eq!(featured.len(), 1);

    let outcome = collapse(&expansion.variants, &[]);
    assert!(outcome.groups[0].is_featured);
    assert!(!outcome.groups[1].is_featured);
}

// ============================================================================
// SKU uniqueness
// ============================================================================

#[test]
fn test_skus_unique_even_with_shared_template_sku() {
    let mut groups = Vec::new();
    for color in ["red", "blue", "green"] {
        let mut g = ColorGroup::new(color, color.to_uppercase());
        g.base_price = Some(Decimal::new(1000, 2));
        g.sizes = vec![size("s", 1), size("m", 1), size("l", 1)];
        groups.push(g);
    }
    let template = VariantTemplate {
        sku: Some("TEE-001".to_string()),
        ..VariantTemplate::default()
    };

    let expansion = expand(&groups, &template, "tee", true).expect("expand");
    assert_eq!(expansion.variants.len(), 9);

    let mut skus: Vec<&str> = expansion.variants.iter().map(|v| v.sku.as_str()).collect();
    skus.sort_unstable();
    skus.dedup();
    assert_eq!(skus.len(), 9, "every emitted SKU must be unique");
}

// ============================================================================
// Stock additivity
// ============================================================================

#[test]
fn test_sizeless_records_sum_on_collapse() {
    let groups = vec![{
        let mut g = ColorGroup::new("red", "Red");
        g.base_price = Some(Decimal::new(1000, 2));
        g.base_stock = Some(3);
        g
    }];
    let expansion = expand(&groups, &VariantTemplate::default(), "tee", false).expect("expand");

    // A second persisted record for the same color, as older products have.
    let mut records = expansion.variants;
    let mut extra = records[0].clone();
    extra.sku = format!("{}-legacy", extra.sku);
    extra.stock = 4;
    records.push(extra);

    let outcome = collapse(&records, &[]);
    assert_eq!(outcome.groups.len(), 1);
    assert_eq!(outcome.groups[0].base_stock, Some(7));
}

// ============================================================================
// Media and image URLs
// ============================================================================

#[test]
fn test_exactly_one_featured_media_entry() {
    let mut groups = blue_and_red();
    // No group featured at all: the first image still takes the role.
    for g in &mut groups {
        g.is_featured = false;
    }
    let expansion =
        expand(&groups, &VariantTemplate::default(), "summer-tee", false).expect("expand");

    assert_eq!(
        expansion.media.iter().filter(|m| m.is_featured).count(),
        1
    );
    assert!(expansion.media[0].is_featured);
    let positions: Vec<i32> = expansion.media.iter().map(|m| m.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[test]
fn test_smart_split_inverts_join_with_data_uris() {
    let urls = vec![
        "/uploads/front.jpg".to_string(),
        "data:image/png;base64,AAAA==".to_string(),
        "/uploads/back.jpg".to_string(),
    ];
    let joined = join_urls(&urls);
    let split = smart_split(&joined);
    assert_eq!(split, urls);

    // Splitting the rejoined list again changes nothing.
    assert_eq!(smart_split(&join_urls(&split)), urls);
}

// ============================================================================
// Size requirement gate
// ============================================================================

#[test]
fn test_category_size_requirement_blocks_sizeless_groups() {
    let mut g = ColorGroup::new("red", "Red");
    g.base_price = Some(Decimal::new(1000, 2));
    g.base_stock = Some(5);

    assert!(expand(&[g.clone()], &VariantTemplate::default(), "tee", true).is_err());
    assert!(expand(&[g], &VariantTemplate::default(), "tee", false).is_ok());
}
