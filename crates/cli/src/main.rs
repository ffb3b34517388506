//! Storekeeper CLI - variant builder and catalog inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate a variant draft without touching the catalog
//! sk-cli variants validate draft.json
//!
//! # Expand a draft into the flat variant list it would submit
//! sk-cli variants expand draft.json
//!
//! # Collapse a persisted variant list back into color groups
//! sk-cli variants collapse product.json
//!
//! # Pull a product from the catalog and collapse it for inspection
//! sk-cli catalog pull 42
//!
//! # List attributes known to the catalog
//! sk-cli catalog attributes
//! ```
//!
//! # Commands
//!
//! - `variants` - Offline expand/collapse tooling over JSON files
//! - `catalog` - Live catalog inspection (needs `CATALOG_API_URL`/`CATALOG_API_TOKEN`)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "sk-cli")]
#[command(author, version, about = "Storekeeper CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Offline variant builder tooling
    Variants {
        #[command(subcommand)]
        action: VariantsAction,
    },
    /// Live catalog inspection
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum VariantsAction {
    /// Validate a draft file; exit non-zero on the first violation
    Validate {
        /// Draft JSON file (color groups, template, slug)
        file: PathBuf,
    },
    /// Expand a draft file and print the flat variant list as JSON
    Expand {
        /// Draft JSON file (color groups, template, slug)
        file: PathBuf,
    },
    /// Collapse a flat variant list back into color groups
    Collapse {
        /// Product JSON file (as returned by the catalog read endpoint)
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Fetch a product and print its collapsed color groups
    Pull {
        /// Product ID
        product_id: i64,
    },
    /// List all attributes with their values
    Attributes,
}

#[tokio::main]
async fn main() {
    // Load .env before tracing reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Variants { action } => match action {
            VariantsAction::Validate { file } => commands::variants::validate(&file)?,
            VariantsAction::Expand { file } => commands::variants::expand(&file)?,
            VariantsAction::Collapse { file } => commands::variants::collapse(&file)?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Pull { product_id } => {
                commands::catalog::pull(product_id).await?;
            }
            CatalogAction::Attributes => commands::catalog::attributes().await?,
        },
    }
    Ok(())
}
