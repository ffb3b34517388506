//! Resolver strategies for persisted variant records.
//!
//! Three generations of the storage schema encode a variant's color and size
//! differently. Each strategy is a pure `fn(&VariantRecord) -> Option<String>`
//! and the chains below try them in fixed priority order:
//!
//! 1. the dedicated `color`/`size` field,
//! 2. the options array (flat `key`, flat `attribute`, or the nested
//!    `attributeValue.attribute.key` relation),
//! 3. positional SKU segments - a best-effort fallback for legacy data that
//!    followed the `{base}-{color}-{size}` convention, never a primary data
//!    source. It misparses SKUs outside that convention; that behavior is
//!    load-bearing for existing installations and is kept as-is.

use storekeeper_core::{COLOR_KEY, SIZE_KEY, VariantOption, VariantRecord};

type FieldResolver = fn(&VariantRecord) -> Option<String>;

const COLOR_RESOLVERS: &[FieldResolver] = &[color_field, color_option, color_sku_segment];
const SIZE_RESOLVERS: &[FieldResolver] = &[size_field, size_option, size_sku_segment];

/// Resolve a record's color token, if any strategy finds one.
pub(crate) fn resolve_color(record: &VariantRecord) -> Option<String> {
    COLOR_RESOLVERS.iter().find_map(|resolve| resolve(record))
}

/// Resolve a record's size token. Absence is meaningful: the record then
/// contributes to its group's size-less base stock.
pub(crate) fn resolve_size(record: &VariantRecord) -> Option<String> {
    SIZE_RESOLVERS.iter().find_map(|resolve| resolve(record))
}

/// The attribute key an option refers to, across all persisted shapes.
fn option_key(option: &VariantOption) -> Option<&str> {
    option
        .key
        .as_deref()
        .or(option.attribute.as_deref())
        .or_else(|| {
            option
                .attribute_value
                .as_ref()
                .and_then(|av| av.attribute.as_ref())
                .and_then(|a| a.key.as_deref())
        })
}

/// The value token an option carries, across all persisted shapes.
fn option_value(option: &VariantOption) -> Option<&str> {
    option
        .value
        .as_deref()
        .or_else(|| option.attribute_value.as_ref().and_then(|av| av.value.as_deref()))
}

fn option_with_key(record: &VariantRecord, key: &str) -> Option<String> {
    record
        .options
        .iter()
        .find(|opt| option_key(opt) == Some(key))
        .and_then(option_value)
        .map(str::to_string)
}

/// SKU segment at `index` (split on `-`), accepted only when non-numeric.
fn sku_segment(record: &VariantRecord, index: usize) -> Option<String> {
    record
        .sku
        .split('-')
        .nth(index)
        .filter(|s| !s.is_empty() && !s.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

fn color_field(record: &VariantRecord) -> Option<String> {
    record.color.clone().filter(|c| !c.is_empty())
}

fn color_option(record: &VariantRecord) -> Option<String> {
    option_with_key(record, COLOR_KEY)
}

fn color_sku_segment(record: &VariantRecord) -> Option<String> {
    sku_segment(record, 1)
}

fn size_field(record: &VariantRecord) -> Option<String> {
    record.size.clone().filter(|s| !s.is_empty())
}

fn size_option(record: &VariantRecord) -> Option<String> {
    option_with_key(record, SIZE_KEY)
}

fn size_sku_segment(record: &VariantRecord) -> Option<String> {
    sku_segment(record, 2)
}
