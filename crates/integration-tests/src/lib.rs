//! Integration tests for Storekeeper.
//!
//! # Running Tests
//!
//! ```bash
//! # Offline builder properties (no services needed)
//! cargo test -p storekeeper-integration-tests
//!
//! # Live catalog tests (need a catalog service and credentials)
//! CATALOG_API_URL=... CATALOG_API_TOKEN=... \
//!     cargo test -p storekeeper-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `variant_roundtrip` - End-to-end properties of the expand/collapse pair
//! - `catalog_live` - Tests against a running catalog service (ignored by
//!   default)
