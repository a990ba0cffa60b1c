//! Movie record types.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A movie as persisted in the backing JSON document.
///
/// Keys the model does not know about are kept in `extra` and written back
/// on save. The legacy `retail` key is read as `price` and saved as `price`;
/// when a document carries both, `price` wins and `retail` is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredMovie")]
pub struct Movie {
    /// Server generated, immutable after creation.
    pub id: String,
    pub title: String,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Image reference (path or URL).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// On-disk shape of a movie, `price` and `retail` read separately.
#[derive(Deserialize)]
struct StoredMovie {
    id: String,
    title: String,
    genre: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    producer: Option<String>,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    retail: Option<f64>,
    #[serde(default)]
    img: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl From<StoredMovie> for Movie {
    fn from(stored: StoredMovie) -> Self {
        Self {
            id: stored.id,
            title: stored.title,
            genre: stored.genre,
            description: stored.description,
            producer: stored.producer,
            rating: stored.rating,
            price: stored.price.or(stored.retail),
            img: stored.img,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            extra: stored.extra,
        }
    }
}

impl Movie {
    /// Create a bare record with only the mandatory keys set.
    pub fn new(id: impl Into<String>, title: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            genre: genre.into(),
            description: None,
            producer: None,
            rating: None,
            price: None,
            img: None,
            created_at: None,
            updated_at: None,
            extra: BTreeMap::new(),
        }
    }

    /// String form of a single field, looked up by key.
    ///
    /// Returns `None` when the record has no such key.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.clone()),
            "title" => Some(self.title.clone()),
            "genre" => Some(self.genre.clone()),
            "description" => self.description.clone(),
            "producer" => self.producer.clone(),
            "rating" => self.rating.clone(),
            "price" | "retail" => self.price.map(|p| p.to_string()),
            "img" => self.img.clone(),
            "created_at" => self.created_at.as_ref().map(format_timestamp),
            "updated_at" => self.updated_at.as_ref().map(format_timestamp),
            other => self.extra.get(other).and_then(scalar_to_string),
        }
    }

    /// Every present field rendered as a string, id and genre included.
    ///
    /// Arrays and objects in `extra` contribute each scalar they contain.
    pub fn field_values(&self) -> Vec<String> {
        let mut values = vec![self.id.clone(), self.title.clone(), self.genre.clone()];
        values.extend(
            [
                &self.description,
                &self.producer,
                &self.rating,
                &self.img,
            ]
            .into_iter()
            .flatten()
            .cloned(),
        );
        values.extend(self.price.map(|p| p.to_string()));
        values.extend(self.created_at.as_ref().map(format_timestamp));
        values.extend(self.updated_at.as_ref().map(format_timestamp));
        for value in self.extra.values() {
            collect_scalars(value, &mut values);
        }
        values
    }
}

/// Client supplied movie fields, already checked by the schema.
///
/// There is no `id` or timestamp here: those are only ever set by the
/// mutation functions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFields {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub producer: Option<String>,
    pub rating: Option<String>,
    pub price: Option<f64>,
    pub img: Option<String>,
}

#[cfg(test)]
impl MovieFields {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}

impl MovieFields {
    /// Copy every present field onto `movie`, leaving `id` and timestamps alone.
    pub(crate) fn apply_to(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(genre) = self.genre {
            movie.genre = genre;
        }
        if self.description.is_some() {
            movie.description = self.description;
        }
        if self.producer.is_some() {
            movie.producer = self.producer;
        }
        if self.rating.is_some() {
            movie.rating = self.rating;
        }
        if self.price.is_some() {
            movie.price = self.price;
        }
        if self.img.is_some() {
            movie.img = self.img;
        }
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn collect_scalars(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|v| collect_scalars(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_scalars(v, out)),
        scalar => out.extend(scalar_to_string(scalar)),
    }
}
