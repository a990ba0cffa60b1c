pub mod catalog;
pub mod config;
pub mod metrics;
pub mod movie;
pub mod mutation;
pub mod query;
pub mod store;
pub mod testing;

pub use catalog::{CatalogError, MovieCatalog};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, MatchMode,
    QueryConfig, ServerConfig, StoreConfig,
};
pub use movie::{
    genre_names, validate_new, validate_patch, FieldError, Movie, MovieFields, ValidationErrors,
    GENRES,
};
pub use mutation::Mutation;
pub use query::{PageLinks, PageResult, QueryEngine, QueryParams, TextMatcher};
pub use store::{JsonFileStore, MovieStore, StoreError};
