//! Filter + paginate in one call.

use tracing::debug;

use super::filter::filter_movies;
use super::matcher::TextMatcher;
use super::paginate::{page_range, paginate};
use super::types::{PageResult, QueryParams, DEFAULT_PAGE_SIZE};
use crate::config::QueryConfig;
use crate::metrics::MOVIE_QUERIES_TOTAL;
use crate::movie::Movie;

/// Runs catalog queries against an in-memory collection.
///
/// Holds no movie state; the only thing kept between calls is the
/// matcher's pattern cache.
pub struct QueryEngine {
    matcher: TextMatcher,
    default_size: u32,
}

impl QueryEngine {
    pub fn new(matcher: TextMatcher) -> Self {
        Self {
            matcher,
            default_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn from_config(config: &QueryConfig) -> Self {
        Self::new(TextMatcher::new(
            config.match_mode,
            config.pattern_cache_capacity,
        ))
        .with_default_size(config.default_size)
    }

    pub fn with_default_size(mut self, size: u32) -> Self {
        self.default_size = size.max(1);
        self
    }

    pub fn matcher(&self) -> &TextMatcher {
        &self.matcher
    }

    /// Filter `movies` by `params` and cut out the requested page.
    ///
    /// An out-of-range page yields no movies and a `previous` link to the
    /// last page.
    pub fn query(&self, movies: &[Movie], params: &QueryParams) -> PageResult {
        let params = params.normalized(self.default_size);

        let filtered = filter_movies(
            movies,
            &params.genres,
            params.category.as_deref(),
            params.text.as_deref(),
            &self.matcher,
        );
        let total = filtered.len();
        let pages = paginate(total, &params);
        let movies: Vec<Movie> = filtered[page_range(total, params.page, params.size)]
            .iter()
            .map(|m| (*m).clone())
            .collect();

        MOVIE_QUERIES_TOTAL.inc();
        debug!(
            "Query page {} (size {}) matched {} movie(s), returning {}",
            params.page,
            params.size,
            total,
            movies.len()
        );

        PageResult {
            movies,
            total,
            pages,
        }
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(TextMatcher::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchMode;

    fn movies() -> Vec<Movie> {
        vec![
            Movie::new("A", "2001", "Sci-Fi"),
            Movie::new("B", "Planet of the Apes", "Sci-Fi"),
            Movie::new("C", "Dr. Strangelove", "Comedy"),
        ]
    }

    fn many(n: usize) -> Vec<Movie> {
        (0..n)
            .map(|i| Movie::new(format!("m{i:03}"), format!("Movie {i}"), "drama"))
            .collect()
    }

    fn ids(result: &PageResult) -> Vec<&str> {
        result.movies.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_text_search() {
        let result = QueryEngine::default().query(&movies(), &QueryParams::new().with_text("love"));
        assert_eq!(ids(&result), vec!["C"]);
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_genre_and_text_search() {
        let params = QueryParams::new().with_genres(["sci-fi"]).with_text("ape");
        let result = QueryEngine::default().query(&movies(), &params);
        assert_eq!(ids(&result), vec!["B"]);
    }

    #[test]
    fn test_exact_fit_page_has_no_links() {
        let result = QueryEngine::default().query(&movies(), &QueryParams::new().with_size(3));
        assert_eq!(result.total, 3);
        assert!(result.pages.next.is_none());
        assert!(result.pages.previous.is_none());
    }

    #[test]
    fn test_padded_mixed_case_input_gives_same_result() {
        let engine = QueryEngine::default();
        let plain = engine.query(
            &movies(),
            &QueryParams::new().with_genres(["sci-fi"]).with_text("ape"),
        );
        let padded = engine.query(
            &movies(),
            &QueryParams::new()
                .with_genres(["  SCI-FI "])
                .with_text("  APE  "),
        );
        assert_eq!(plain, padded);
    }

    #[test]
    fn test_links_echo_normalized_params() {
        let params = QueryParams::new()
            .with_genres([" Drama "])
            .with_size(10)
            .with_page(2);
        let result = QueryEngine::default().query(&many(35), &params);

        let next = result.pages.next.unwrap();
        assert_eq!(next.page, 3);
        assert_eq!(next.genres, vec!["drama"]);
        assert_eq!(next.size, 10);
        assert_eq!(result.pages.previous.unwrap().page, 1);
    }

    #[test]
    fn test_out_of_range_page() {
        let result = QueryEngine::default().query(&many(35), &QueryParams::new().with_page(12));
        assert!(result.movies.is_empty());
        assert_eq!(result.total, 35);
        assert!(result.pages.next.is_none());
        assert_eq!(result.pages.previous.unwrap().page, 4);
    }

    #[test]
    fn test_all_pages_reassemble_the_filtered_set() {
        let engine = QueryEngine::default();
        let all = many(47);
        let mut params = QueryParams::new().with_size(6);
        let mut collected = Vec::new();

        loop {
            let result = engine.query(&all, &params);
            collected.extend(result.movies);
            match result.pages.next {
                Some(next) => params = next,
                None => break,
            }
        }

        assert_eq!(collected, all);
    }

    #[test]
    fn test_size_zero_uses_default_size() {
        let engine = QueryEngine::default().with_default_size(4);
        let result = engine.query(&many(10), &QueryParams::new().with_size(0));
        assert_eq!(result.movies.len(), 4);
        assert_eq!(result.pages.next.unwrap().size, 4);
    }

    #[test]
    fn test_fuzzy_engine_from_config() {
        let config = QueryConfig {
            match_mode: MatchMode::Fuzzy,
            ..QueryConfig::default()
        };
        let engine = QueryEngine::from_config(&config);
        let result = engine.query(&movies(), &QueryParams::new().with_text("plnt"));
        assert_eq!(ids(&result), vec!["B"]);
        assert_eq!(engine.matcher().mode(), MatchMode::Fuzzy);
    }

    #[test]
    fn test_query_does_not_touch_input() {
        let all = movies();
        let before = all.clone();
        QueryEngine::default().query(&all, &QueryParams::new().with_text("a"));
        assert_eq!(all, before);
    }
}
