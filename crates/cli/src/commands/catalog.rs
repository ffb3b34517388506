//! Live catalog inspection commands.
//!
//! # Environment Variables
//!
//! - `CATALOG_API_URL` - Base URL of the catalog service
//! - `CATALOG_API_TOKEN` - Bearer token for the admin API

use storekeeper_admin::catalog::{CatalogClient, CatalogError};
use storekeeper_admin::config::AdminConfig;
use storekeeper_core::ProductId;
use thiserror::Error;

/// Errors that can occur in the live catalog commands.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] storekeeper_admin::config::ConfigError),

    /// A catalog API call failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Output serialization failed.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Fetch a product and print its collapsed color groups.
pub async fn pull(product_id: i64) -> Result<(), CatalogCommandError> {
    let client = client()?;

    let attributes = client.get_attributes().await?;
    let product = client.get_product(ProductId::new(product_id)).await?;
    tracing::info!(
        title = %product.title,
        variants = product.variants.len(),
        "fetched product"
    );

    let outcome = storekeeper_admin::builder::collapse(&product.variants, &attributes);
    for warning in &outcome.warnings {
        tracing::warn!("{warning}");
    }
    println!("{}", serde_json::to_string_pretty(&outcome.groups)?);
    Ok(())
}

/// List all attributes with their values.
pub async fn attributes() -> Result<(), CatalogCommandError> {
    let client = client()?;
    let attributes = client.get_attributes().await?;
    println!("{}", serde_json::to_string_pretty(&attributes)?);
    Ok(())
}

fn client() -> Result<CatalogClient, CatalogCommandError> {
    let config = AdminConfig::from_env()?;
    Ok(CatalogClient::new(&config.catalog)?)
}
