//! Persistence of the movie collection.
//!
//! A store only knows how to read and write the whole collection; every
//! query and mutation happens in memory between a `load` and a `save`.

mod json_file;

pub use json_file::JsonFileStore;

use std::path::PathBuf;

use thiserror::Error;

use crate::movie::Movie;

/// Errors for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid movie document {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for movie collection storage.
pub trait MovieStore: Send + Sync {
    /// Read the full collection.
    fn load(&self) -> Result<Vec<Movie>, StoreError>;

    /// Replace the full collection.
    ///
    /// On error the previously saved collection stays authoritative.
    fn save(&self, movies: &[Movie]) -> Result<(), StoreError>;
}
