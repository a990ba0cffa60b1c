//! Pure create/update/delete transforms over a movie collection.
//!
//! Each function consumes the collection and hands back the new one along
//! with the affected record. Created and updated records go to the front.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::movie::{Movie, MovieFields};

/// Length of generated identifiers.
pub const ID_LEN: usize = 10;

/// Outcome of a successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    /// The created, updated or removed record.
    pub movie: Movie,
    /// The collection after the change.
    pub movies: Vec<Movie>,
}

/// First record whose identifier equals `id`.
pub fn get_by_id<'a>(movies: &'a [Movie], id: &str) -> Option<&'a Movie> {
    movies.iter().find(|m| m.id == id)
}

/// Add a new record built from `fields`.
///
/// Any `id` in `fields` is ignored in favour of a freshly generated one.
pub fn create(movies: Vec<Movie>, fields: MovieFields, now: DateTime<Utc>) -> Mutation {
    let mut movie = Movie::new(generate_id(&movies), String::new(), String::new());
    fields.apply_to(&mut movie);
    movie.created_at = Some(now);
    movie.updated_at = Some(now);

    let mut result = Vec::with_capacity(movies.len() + 1);
    result.push(movie.clone());
    result.extend(movies);

    Mutation {
        movie,
        movies: result,
    }
}

/// Merge `fields` over the record `id`.
///
/// The identifier and creation time are kept, `updated_at` becomes `now`.
/// Returns `None` when no record has that identifier.
pub fn update(
    movies: Vec<Movie>,
    id: &str,
    fields: MovieFields,
    now: DateTime<Utc>,
) -> Option<Mutation> {
    let index = movies.iter().position(|m| m.id == id)?;
    let mut movies = movies;
    let mut movie = movies.remove(index);

    fields.apply_to(&mut movie);
    movie.id = id.to_string();
    movie.updated_at = Some(now);

    // drop any stray duplicates so exactly one copy remains
    movies.retain(|m| m.id != id);
    movies.insert(0, movie.clone());

    Some(Mutation { movie, movies })
}

/// Remove the record `id`. Returns `None` when it does not exist.
pub fn delete(movies: Vec<Movie>, id: &str) -> Option<Mutation> {
    let index = movies.iter().position(|m| m.id == id)?;
    let mut movies = movies;
    let movie = movies.remove(index);
    movies.retain(|m| m.id != id);

    Some(Mutation { movie, movies })
}

/// Short random identifier not yet used in `movies`.
fn generate_id(movies: &[Movie]) -> String {
    loop {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ID_LEN);
        if get_by_id(movies, &id).is_none() {
            return id;
        }
    }
}
