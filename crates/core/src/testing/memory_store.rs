//! In-memory movie store for testing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::movie::Movie;
use crate::store::{MovieStore, StoreError};

/// Mock implementation of the MovieStore trait.
///
/// Keeps the collection in memory and can be told to fail the next load or
/// save, to exercise storage error paths.
///
/// # Example
///
/// ```rust,ignore
/// use cinedex_core::testing::MemoryStore;
///
/// let store = MemoryStore::with_movies(fixtures::sample_movies());
/// store.fail_next_save();
/// assert!(catalog.delete("A").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    movies: RwLock<Vec<Movie>>,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
            ..Self::default()
        }
    }

    /// Snapshot of the stored collection.
    pub fn movies(&self) -> Vec<Movie> {
        self.movies.read().unwrap().clone()
    }

    /// Replace the stored collection without counting a save.
    pub fn set_movies(&self, movies: Vec<Movie>) {
        *self.movies.write().unwrap() = movies;
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_next_load(&self) {
        self.fail_load.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_save(&self) {
        self.fail_save.store(true, Ordering::SeqCst);
    }
}

impl MovieStore for MemoryStore {
    fn load(&self) -> Result<Vec<Movie>, StoreError> {
        if self.fail_load.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated load failure".to_string()));
        }
        Ok(self.movies())
    }

    fn save(&self, movies: &[Movie]) -> Result<(), StoreError> {
        if self.fail_save.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated save failure".to_string()));
        }
        *self.movies.write().unwrap() = movies.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        store.save(&[Movie::new("A", "2001", "Sci-Fi")]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_injected_failures_fire_once() {
        let store = MemoryStore::new();

        store.fail_next_load();
        assert!(store.load().is_err());
        assert!(store.load().is_ok());

        store.fail_next_save();
        assert!(store.save(&[]).is_err());
        assert!(store.save(&[]).is_ok());
        assert_eq!(store.save_count(), 1);
    }
}
