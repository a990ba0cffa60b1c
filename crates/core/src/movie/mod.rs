//! Movie records and the schema client payloads are checked against.

mod schema;
mod types;

pub use schema::{
    genre_names, is_known_genre, validate_new, validate_patch, FieldError, ValidationErrors,
    GENRES, MAX_DESCRIPTION_LEN, MAX_IMG_LEN, MAX_TITLE_LEN, PRODUCERS, RATINGS,
};
pub use types::{Movie, MovieFields};
