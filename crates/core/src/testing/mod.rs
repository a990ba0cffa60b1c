//! Testing utilities shared by unit, integration and E2E tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use cinedex_core::testing::{fixtures, MemoryStore};
//!
//! let store = Arc::new(MemoryStore::with_movies(fixtures::sample_movies()));
//! let catalog = MovieCatalog::new(store, &QueryConfig::default());
//! ```

mod memory_store;

pub use memory_store::MemoryStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::movie::Movie;

    /// Create a movie with only the mandatory keys.
    pub fn movie(id: &str, title: &str, genre: &str) -> Movie {
        Movie::new(id, title, genre)
    }

    /// The three-movie catalog used across the query tests:
    /// two Sci-Fi titles followed by one Comedy.
    pub fn sample_movies() -> Vec<Movie> {
        vec![
            movie("A", "2001", "Sci-Fi"),
            movie("B", "Planet of the Apes", "Sci-Fi"),
            movie("C", "Dr. Strangelove", "Comedy"),
        ]
    }

    /// `count` drama movies with ids `m000`, `m001`, ...
    pub fn numbered_movies(count: usize) -> Vec<Movie> {
        (0..count)
            .map(|i| movie(&format!("m{i:03}"), &format!("Movie {i}"), "drama"))
            .collect()
    }
}
