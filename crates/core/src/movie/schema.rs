//! Payload validation for movie create and update requests.
//!
//! Payloads arrive as raw JSON objects so every violation can be reported
//! per field instead of failing on the first type mismatch.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::MovieFields;

pub const GENRES: &[&str] = &[
    "sci-fi and fantasy",
    "comedy",
    "action and adventure",
    "drama",
    "horror",
    "documentary",
    "kids and family",
    "thriller",
];

pub const PRODUCERS: &[&str] = &[
    "universal studios",
    "metro-goldwyn-mayer",
    "united artists",
    "paramount pictures",
    "tristar pictures",
    "warner bros. pictures",
    "20th century fox",
    "magnolia pictures",
    "pixar animation studios",
    "miramax films",
];

pub const RATINGS: &[&str] = &["G", "PG", "PG-13", "R", "NC-17"];

pub const MAX_TITLE_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 1024;
pub const MAX_IMG_LEN: usize = 256;

/// Keys only the server may set.
const SERVER_ONLY: &[&str] = &["id", "created_at", "updated_at"];

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Every violation found in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

/// Genre names for display, each word capitalized.
pub fn genre_names() -> Vec<String> {
    GENRES.iter().map(|g| title_case(g)).collect()
}

/// Case-insensitive membership in [`GENRES`].
pub fn is_known_genre(genre: &str) -> bool {
    let genre = genre.trim().to_lowercase();
    GENRES.contains(&genre.as_str())
}

/// Validate a payload for a new movie. `title` and `genre` are required.
pub fn validate_new(payload: &Map<String, Value>) -> Result<MovieFields, ValidationErrors> {
    validate(payload, true)
}

/// Validate a partial update. Only the keys present are checked.
pub fn validate_patch(payload: &Map<String, Value>) -> Result<MovieFields, ValidationErrors> {
    validate(payload, false)
}

fn validate(payload: &Map<String, Value>, require: bool) -> Result<MovieFields, ValidationErrors> {
    let mut errors = Vec::new();
    let mut fields = MovieFields::default();

    for key in payload.keys() {
        if SERVER_ONLY.contains(&key.as_str()) {
            errors.push(FieldError::new(key, format!("\"{key}\" is not allowed")));
        }
    }

    fields.title = string_field(payload, "title", require, &mut errors).and_then(|title| {
        check_len("title", &title, MAX_TITLE_LEN, &mut errors).then_some(title)
    });

    fields.genre = string_field(payload, "genre", require, &mut errors).and_then(|genre| {
        if is_known_genre(&genre) {
            Some(genre.trim().to_lowercase())
        } else {
            errors.push(FieldError::new(
                "genre",
                format!("\"genre\" must be one of [{}]", GENRES.join(", ")),
            ));
            None
        }
    });

    fields.description =
        string_field(payload, "description", false, &mut errors).and_then(|description| {
            check_len("description", &description, MAX_DESCRIPTION_LEN, &mut errors)
                .then_some(description)
        });

    fields.producer = string_field(payload, "producer", false, &mut errors).and_then(|producer| {
        let producer = producer.trim().to_lowercase();
        if PRODUCERS.contains(&producer.as_str()) {
            Some(producer)
        } else {
            errors.push(FieldError::new(
                "producer",
                format!("\"producer\" must be one of [{}]", PRODUCERS.join(", ")),
            ));
            None
        }
    });

    fields.rating = string_field(payload, "rating", false, &mut errors).and_then(|rating| {
        if RATINGS.contains(&rating.as_str()) {
            Some(rating)
        } else {
            errors.push(FieldError::new(
                "rating",
                format!("\"rating\" must be one of [{}]", RATINGS.join(", ")),
            ));
            None
        }
    });

    let price = price_field(payload, "price", &mut errors);
    let retail = price_field(payload, "retail", &mut errors);
    if payload.contains_key("price") && payload.contains_key("retail") {
        errors.push(FieldError::new(
            "retail",
            "\"retail\" cannot be combined with \"price\"",
        ));
    }
    fields.price = price.or(retail);

    fields.img = string_field(payload, "img", false, &mut errors)
        .and_then(|img| check_len("img", &img, MAX_IMG_LEN, &mut errors).then_some(img));

    for key in payload.keys() {
        if !is_known_key(key) {
            errors.push(FieldError::new(key, format!("\"{key}\" is not allowed")));
        }
    }

    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(ValidationErrors(errors))
    }
}

fn is_known_key(key: &str) -> bool {
    SERVER_ONLY.contains(&key)
        || matches!(
            key,
            "title" | "genre" | "description" | "producer" | "rating" | "price" | "retail" | "img"
        )
}

fn string_field(
    payload: &Map<String, Value>,
    key: &str,
    required: bool,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match payload.get(key) {
        None => {
            if required {
                errors.push(FieldError::new(key, format!("\"{key}\" is required")));
            }
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(FieldError::new(
                key,
                format!("\"{key}\" is not allowed to be empty"),
            ));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(key, format!("\"{key}\" must be a string")));
            None
        }
    }
}

fn check_len(key: &str, value: &str, max: usize, errors: &mut Vec<FieldError>) -> bool {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            key,
            format!("\"{key}\" length must be less than or equal to {max} characters long"),
        ));
        return false;
    }
    true
}

fn price_field(
    payload: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let value = payload.get(key)?;
    let Some(price) = value.as_f64() else {
        errors.push(FieldError::new(key, format!("\"{key}\" must be a number")));
        return None;
    };

    if price <= 0.0 {
        errors.push(FieldError::new(
            key,
            format!("\"{key}\" must be a positive number"),
        ));
        return None;
    }

    let cents = price * 100.0;
    if (cents.round() - cents).abs() > 1e-6 {
        errors.push(FieldError::new(
            key,
            format!("\"{key}\" must have no more than 2 decimal places"),
        ));
        return None;
    }

    Some(price)
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
