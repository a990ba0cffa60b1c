//! Movie query engine: genre/text filtering, fuzzy matching and
//! cursor-style pagination over an in-memory collection.

mod cache;
mod engine;
mod filter;
mod matcher;
mod paginate;
mod types;

pub use cache::PatternCache;
pub use engine::QueryEngine;
pub use filter::filter_movies;
pub use matcher::TextMatcher;
pub use paginate::{last_page, page_range, paginate};
pub use types::{PageLinks, PageResult, QueryParams, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
