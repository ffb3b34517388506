//! Storekeeper Admin - variant-builder engine and catalog API client.
//!
//! This crate implements the product-authoring core of the admin panel:
//!
//! - [`builder`] - attribute selection state, the variant expander (grouped
//!   color/size authoring state -> flat variant records) and the variant
//!   collapser (flat records -> editable grouped state)
//! - [`catalog`] - REST client for the catalog service's admin API
//! - [`submit`] - the sequenced save chain (brand -> category -> expand ->
//!   product create/update) with abort-on-first-failure semantics
//! - [`config`] - environment-driven configuration
//!
//! # Architecture
//!
//! The builder is a set of pure transforms over immutable state values; the
//! only asynchronous boundaries are the catalog API calls. Nothing in this
//! crate renders UI or persists data itself.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod submit;

pub use error::AppError;
