use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::CatalogError;
use crate::config::QueryConfig;
use crate::metrics::MOVIE_MUTATIONS_TOTAL;
use crate::movie::{genre_names, validate_new, validate_patch, Movie};
use crate::mutation::{self, Mutation};
use crate::query::{PageResult, QueryEngine, QueryParams};
use crate::store::MovieStore;

/// Catalog operations over a [`MovieStore`].
///
/// Mutations are serialized through a single writer lock so two concurrent
/// writers cannot overwrite each other's changes. Reads take no lock.
pub struct MovieCatalog {
    store: Arc<dyn MovieStore>,
    engine: QueryEngine,
    max_size: u32,
    write_lock: Mutex<()>,
}

impl MovieCatalog {
    pub fn new(store: Arc<dyn MovieStore>, config: &QueryConfig) -> Self {
        Self::with_engine(store, QueryEngine::from_config(config), config.max_size)
    }

    pub fn with_engine(store: Arc<dyn MovieStore>, engine: QueryEngine, max_size: u32) -> Self {
        Self {
            store,
            engine,
            max_size: max_size.max(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Filter and page the collection. Page size is capped at `max_size`.
    pub fn query(&self, params: &QueryParams) -> Result<PageResult, CatalogError> {
        let params = QueryParams {
            size: params.size.min(self.max_size),
            ..params.clone()
        };
        let movies = self.store.load()?;
        Ok(self.engine.query(&movies, &params))
    }

    pub fn get(&self, id: &str) -> Result<Movie, CatalogError> {
        let movies = self.store.load()?;
        match mutation::get_by_id(&movies, id) {
            Some(movie) => Ok(movie.clone()),
            None => {
                debug!("Movie {} not found", id);
                Err(CatalogError::NotFound(id.to_string()))
            }
        }
    }

    /// Validate `payload` and store it as a new movie.
    pub fn create(&self, payload: &Map<String, Value>) -> Result<Movie, CatalogError> {
        self.mutate("create", |movies| {
            let fields = validate_new(payload)?;
            Ok(mutation::create(movies, fields, Utc::now()))
        })
        .inspect(|movie| info!("Created movie {} ({:?})", movie.id, movie.title))
    }

    /// Validate `payload` as a partial update and merge it into `id`.
    pub fn update(&self, id: &str, payload: &Map<String, Value>) -> Result<Movie, CatalogError> {
        self.mutate("update", |movies| {
            let fields = validate_patch(payload)?;
            mutation::update(movies, id, fields, Utc::now())
                .ok_or_else(|| CatalogError::NotFound(id.to_string()))
        })
        .inspect(|movie| info!("Updated movie {}", movie.id))
    }

    pub fn delete(&self, id: &str) -> Result<Movie, CatalogError> {
        self.mutate("delete", |movies| {
            mutation::delete(movies, id).ok_or_else(|| CatalogError::NotFound(id.to_string()))
        })
        .inspect(|movie| info!("Deleted movie {}", movie.id))
    }

    /// Display names of the accepted genres.
    pub fn genres(&self) -> Vec<String> {
        genre_names()
    }

    fn mutate<F>(&self, operation: &'static str, transform: F) -> Result<Movie, CatalogError>
    where
        F: FnOnce(Vec<Movie>) -> Result<Mutation, CatalogError>,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let result = self.store.load().map_err(CatalogError::from).and_then(|movies| {
            let Mutation { movie, movies } = transform(movies)?;
            self.store.save(&movies)?;
            Ok(movie)
        });

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => {
                warn!("Movie {} failed: {}", operation, e);
                e.kind()
            }
        };
        MOVIE_MUTATIONS_TOTAL
            .with_label_values(&[operation, outcome])
            .inc();

        result
    }
}
