//! Query parameter and result types.

use serde::{Deserialize, Serialize};

use crate::movie::Movie;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Parameters for one catalog query.
///
/// The same type is echoed back in [`PageLinks`] so a client can replay
/// the filter on a neighbouring page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    /// Restrict text search to this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            genres: Vec::new(),
            category: None,
            text: None,
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Trim and lower-case every string parameter, dropping the empty ones.
    ///
    /// Page 0 becomes the first page and size 0 becomes `default_size`.
    /// Applying this twice yields the same value.
    pub fn normalized(&self, default_size: u32) -> Self {
        Self {
            genres: self
                .genres
                .iter()
                .filter_map(|g| normalize(g))
                .collect(),
            category: self.category.as_deref().and_then(normalize),
            text: self.text.as_deref().and_then(normalize),
            page: self.page.max(DEFAULT_PAGE),
            size: if self.size == 0 {
                default_size.max(1)
            } else {
                self.size
            },
        }
    }

    /// The same query pointed at another page.
    pub(crate) fn at_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

fn normalize(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_lowercase())
    }
}

/// Links to the pages around the one returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<QueryParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<QueryParams>,
}

impl PageLinks {
    pub fn is_empty(&self) -> bool {
        self.next.is_none() && self.previous.is_none()
    }
}

/// One page of filtered movies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    pub movies: Vec<Movie>,
    /// Number of movies matching the filter across all pages.
    pub total: usize,
    pub pages: PageLinks,
}
