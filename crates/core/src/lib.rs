//! Storekeeper Core - Shared types library.
//!
//! This crate provides common types used across all Storekeeper components:
//! - `admin` - Variant-builder engine and catalog API client
//! - `cli` - Command-line tools for offline product authoring
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, catalog reference types, and wire shapes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
