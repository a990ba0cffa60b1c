//! Movie store backed by a single pretty-printed JSON array.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{MovieStore, StoreError};
use crate::movie::Movie;

/// Reads the file on every `load` and rewrites it on every `save`.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a failed write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the store, seeding an empty collection when the file is absent
    /// and `create_if_missing` is set.
    pub fn open(path: impl Into<PathBuf>, create_if_missing: bool) -> Result<Self, StoreError> {
        let store = Self::new(path);
        if !store.path.exists() {
            if !create_if_missing {
                return Err(StoreError::Unavailable(format!(
                    "{} does not exist",
                    store.path.display()
                )));
            }
            info!("Creating empty movie store at {:?}", store.path);
            store.save(&[])?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl MovieStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Movie>, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let movies: Vec<Movie> =
            serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        debug!("Loaded {} movie(s) from {:?}", movies.len(), self.path);
        Ok(movies)
    }

    fn save(&self, movies: &[Movie]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(movies).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let temp_path = self.temp_path();
        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&temp_path);
            return Err(self.io_error(e));
        }

        debug!("Saved {} movie(s) to {:?}", movies.len(), self.path);
        Ok(())
    }
}
