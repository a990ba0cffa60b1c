//! Case-insensitive text matching of search terms against field values.

use std::sync::{Arc, Mutex};

use regex_lite::Regex;
use tracing::warn;

use super::cache::PatternCache;
use crate::config::MatchMode;
use crate::metrics::PATTERN_CACHE_LOOKUPS;

/// Decides whether a field value matches a search term.
///
/// A term made of several whitespace separated words matches when any
/// single word matches. In [`MatchMode::Fuzzy`] each word is compiled once
/// into a subsequence pattern and kept in a bounded cache.
pub struct TextMatcher {
    mode: MatchMode,
    patterns: Mutex<PatternCache<Arc<Regex>>>,
}

impl TextMatcher {
    pub fn new(mode: MatchMode, cache_capacity: usize) -> Self {
        Self {
            mode,
            patterns: Mutex::new(PatternCache::new(cache_capacity)),
        }
    }

    pub fn substring() -> Self {
        Self::new(MatchMode::Substring, 1)
    }

    pub fn fuzzy(cache_capacity: usize) -> Self {
        Self::new(MatchMode::Fuzzy, cache_capacity)
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Number of compiled patterns currently cached.
    pub fn cached_patterns(&self) -> usize {
        self.lock_patterns().len()
    }

    /// False when either side is empty.
    pub fn matches(&self, value: &str, term: &str) -> bool {
        let value = value.trim().to_lowercase();
        if value.is_empty() {
            return false;
        }

        term.split_whitespace()
            .map(str::to_lowercase)
            .any(|word| self.matches_word(&value, &word))
    }

    /// Same as [`matches`](Self::matches), false for an absent value.
    pub fn matches_opt(&self, value: Option<&str>, term: &str) -> bool {
        value.is_some_and(|v| self.matches(v, term))
    }

    fn matches_word(&self, value: &str, word: &str) -> bool {
        match self.mode {
            MatchMode::Substring => value.contains(word),
            MatchMode::Fuzzy => match self.pattern(word) {
                Some(re) => re.is_match(value),
                None => is_subsequence(word, value),
            },
        }
    }

    fn pattern(&self, word: &str) -> Option<Arc<Regex>> {
        let mut patterns = self.lock_patterns();
        if let Some(re) = patterns.get(word) {
            PATTERN_CACHE_LOOKUPS.with_label_values(&["hit"]).inc();
            return Some(re);
        }
        PATTERN_CACHE_LOOKUPS.with_label_values(&["miss"]).inc();

        match Regex::new(&subsequence_pattern(word)) {
            Ok(re) => {
                let re = Arc::new(re);
                patterns.insert(word.to_string(), Arc::clone(&re));
                Some(re)
            }
            Err(e) => {
                warn!("Failed to compile search pattern for {:?}: {}", word, e);
                None
            }
        }
    }

    fn lock_patterns(&self) -> std::sync::MutexGuard<'_, PatternCache<Arc<Regex>>> {
        self.patterns.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for TextMatcher {
    fn default() -> Self {
        Self::substring()
    }
}

/// `abc` becomes `(?s)a.*?b.*?c`: the characters in order, anything between.
fn subsequence_pattern(word: &str) -> String {
    let body = word
        .chars()
        .map(|c| regex_lite::escape(c.encode_utf8(&mut [0; 4])))
        .collect::<Vec<_>>()
        .join(".*?");
    format!("(?s){body}")
}

fn is_subsequence(word: &str, value: &str) -> bool {
    let mut haystack = value.chars();
    word.chars().all(|c| haystack.any(|h| h == c))
}
