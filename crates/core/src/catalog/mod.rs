//! Movie catalog - the load, transform, persist cycle around a store.
//!
//! Every operation reads the collection fresh from the store. Mutations
//! then write the whole collection back; nothing is kept in memory between
//! calls.

mod service;

pub use service::MovieCatalog;

use thiserror::Error;

use crate::movie::ValidationErrors;
use crate::store::StoreError;

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("The movie by id: \"{0}\" does not exist")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl CatalogError {
    /// Label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "not_found",
            CatalogError::Validation(_) => "invalid",
            CatalogError::Storage(_) => "storage",
        }
    }
}
