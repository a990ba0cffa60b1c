//! Genre and free-text record filter.

use std::collections::HashSet;

use super::matcher::TextMatcher;
use crate::movie::Movie;

/// Narrow `movies` by genre set and search text.
///
/// - An empty genre list lets every record through; otherwise the record's
///   genre must be one of `genres` (compared trimmed and lower-cased).
/// - A missing or blank `text` lets every record through. With a `category`
///   only that field is matched, otherwise any field of the record may match.
///
/// The input is never modified and surviving records keep their order.
pub fn filter_movies<'a>(
    movies: &'a [Movie],
    genres: &[String],
    category: Option<&str>,
    text: Option<&str>,
    matcher: &TextMatcher,
) -> Vec<&'a Movie> {
    let genres: HashSet<String> = genres
        .iter()
        .map(|g| g.trim().to_lowercase())
        .filter(|g| !g.is_empty())
        .collect();
    let category = category
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());
    let text = text.map(str::trim).filter(|t| !t.is_empty());

    movies
        .iter()
        .filter(|movie| genres.is_empty() || genres.contains(&movie.genre.trim().to_lowercase()))
        .filter(|movie| match text {
            None => true,
            Some(text) => match category.as_deref() {
                Some(field) => matcher.matches_opt(movie.field(field).as_deref(), text),
                None => movie
                    .field_values()
                    .iter()
                    .any(|value| matcher.matches(value, text)),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies() -> Vec<Movie> {
        vec![
            Movie::new("A", "2001", "Sci-Fi"),
            Movie::new("B", "Planet of the Apes", "Sci-Fi"),
            Movie::new("C", "Dr. Strangelove", "Comedy"),
        ]
    }

    fn ids(movies: &[&Movie]) -> Vec<String> {
        movies.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn test_no_filters_returns_everything_in_order() {
        let all = movies();
        let result = filter_movies(&all, &[], None, None, &TextMatcher::substring());
        assert_eq!(ids(&result), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_genre_filter_is_case_and_space_insensitive() {
        let all = movies();
        let genres = vec!["  SCI-fi ".to_string()];
        let result = filter_movies(&all, &genres, None, None, &TextMatcher::substring());
        assert_eq!(ids(&result), vec!["A", "B"]);
    }

    #[test]
    fn test_genre_filter_is_a_union() {
        let all = movies();
        let genres = vec!["comedy".to_string(), "sci-fi".to_string()];
        let result = filter_movies(&all, &genres, None, None, &TextMatcher::substring());
        assert_eq!(ids(&result), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_unknown_genre_matches_nothing() {
        let all = movies();
        let genres = vec!["western".to_string()];
        let result = filter_movies(&all, &genres, None, None, &TextMatcher::substring());
        assert!(result.is_empty());
    }

    #[test]
    fn test_text_matches_any_field() {
        let all = movies();
        let matcher = TextMatcher::substring();

        let result = filter_movies(&all, &[], None, Some("love"), &matcher);
        assert_eq!(ids(&result), vec!["C"]);

        // genre and id are candidates too
        let result = filter_movies(&all, &[], None, Some("comedy"), &matcher);
        assert_eq!(ids(&result), vec!["C"]);
        let result = filter_movies(&all, &[], None, Some("b"), &matcher);
        assert_eq!(ids(&result), vec!["B"]);
    }

    #[test]
    fn test_text_matches_nested_unknown_keys() {
        let mut all = movies();
        all[1].extra.insert(
            "cast".to_string(),
            serde_json::json!([{ "name": "Charlton Heston" }]),
        );

        let result = filter_movies(&all, &[], None, Some("heston"), &TextMatcher::substring());
        assert_eq!(ids(&result), vec!["B"]);
    }

    #[test]
    fn test_category_restricts_search() {
        let all = movies();
        let matcher = TextMatcher::substring();

        let result = filter_movies(&all, &[], Some(" Title "), Some("sci"), &matcher);
        assert!(result.is_empty());

        let result = filter_movies(&all, &[], Some("genre"), Some("sci"), &matcher);
        assert_eq!(ids(&result), vec!["A", "B"]);
    }

    #[test]
    fn test_category_on_absent_field_matches_nothing() {
        let all = movies();
        let result = filter_movies(
            &all,
            &[],
            Some("producer"),
            Some("fox"),
            &TextMatcher::substring(),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_category_without_text_is_ignored() {
        let all = movies();
        let result = filter_movies(&all, &[], Some("title"), Some("  "), &TextMatcher::substring());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_genre_and_text_are_combined() {
        let all = movies();
        let genres = vec!["sci-fi".to_string()];
        let result = filter_movies(&all, &genres, None, Some("ape"), &TextMatcher::substring());
        assert_eq!(ids(&result), vec!["B"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let all = movies();
        let matcher = TextMatcher::substring();
        let genres = vec!["sci-fi".to_string()];

        let once: Vec<Movie> = filter_movies(&all, &genres, None, Some("a"), &matcher)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_movies(&once, &genres, None, Some("a"), &matcher);
        assert_eq!(ids(&twice), once.iter().map(|m| m.id.clone()).collect::<Vec<_>>());
    }
}
