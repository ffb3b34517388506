//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use storekeeper_core::define_id;
/// define_id!(WarehouseId);
/// define_id!(SupplierId);
///
/// let warehouse_id = WarehouseId::new(1);
/// let supplier_id = SupplierId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: WarehouseId = supplier_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(AttributeId);
define_id!(AttributeValueId);
define_id!(ProductId);
define_id!(BrandId);
define_id!(CategoryId);
