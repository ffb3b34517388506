//! Unified error handling for the admin crate.
//!
//! Three recoverable families, mirroring what the form can do about them:
//! validation errors re-focus the offending field, catalog errors surface
//! the failed call, submit errors additionally carry partial-progress
//! information. None of them is fatal to the process; the form stays
//! editable after every one.

use thiserror::Error;

use crate::builder::ValidationError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::submit::SubmitError;

/// Application-level error type for the admin panel core.
#[derive(Debug, Error)]
pub enum AppError {
    /// A pre-submission invariant was violated.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A catalog API call failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The submit chain aborted partway through.
    #[error("Submit error: {0}")]
    Submit(#[from] SubmitError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Validation(ValidationError::NoColorGroups);
        assert_eq!(
            err.to_string(),
            "Validation error: no colors selected for this product"
        );
    }

    #[test]
    fn test_from_validation_error() {
        let err: AppError = ValidationError::NoColorGroups.into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
