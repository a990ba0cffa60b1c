use cinedex_core::{Config, MovieCatalog};

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: MovieCatalog,
}

impl AppState {
    pub fn new(config: Config, catalog: MovieCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }
}
