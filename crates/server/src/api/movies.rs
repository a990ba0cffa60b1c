//! Movie API handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;

use cinedex_core::{CatalogError, FieldError, Movie, PageLinks, QueryParams};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Query string of `GET /api/movies`.
///
/// Numbers are taken as text so a malformed value falls back to its
/// default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesParams {
    #[serde(default, alias = "p")]
    pub page: Option<String>,
    #[serde(default, alias = "limit")]
    pub size: Option<String>,
    /// Comma-separated genre list.
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "q")]
    pub text: Option<String>,
}

impl ListMoviesParams {
    /// Size 0 leaves the choice to the configured default.
    pub fn into_query(self) -> QueryParams {
        let number = |value: Option<String>| value.and_then(|v| v.trim().parse::<u32>().ok());

        QueryParams {
            genres: self
                .genres
                .map(|g| g.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
            category: self.category,
            text: self.text,
            page: number(self.page).unwrap_or(cinedex_core::query::DEFAULT_PAGE),
            size: number(self.size).unwrap_or(0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub movies: Vec<Movie>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct GenreListResponse {
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: CatalogError) -> HandlerError {
    match err {
        CatalogError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: err.to_string(),
                errors: Vec::new(),
            }),
        ),
        CatalogError::Validation(errors) => {
            let errors = errors.errors().to_vec();
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: errors
                        .iter()
                        .map(|e| e.message.as_str())
                        .collect::<Vec<_>>()
                        .join(". "),
                    errors,
                }),
            )
        }
        CatalogError::Storage(e) => {
            error!("Movie store failure: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "500 server error".to_string(),
                    errors: Vec::new(),
                }),
            )
        }
    }
}

/// Accept only a JSON object body; anything else is a client error.
fn object_body(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Map<String, Value>, HandlerError> {
    match payload {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(_)) => {
            let message = "\"value\" must be of type object".to_string();
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: message.clone(),
                    errors: vec![FieldError {
                        field: "value".to_string(),
                        message,
                    }],
                }),
            ))
        }
        Err(rejection) => Err((
            rejection.status(),
            Json(ErrorResponse {
                error: rejection.body_text(),
                errors: Vec::new(),
            }),
        )),
    }
}

// ============================================================================
// Link header
// ============================================================================

/// Serialize `params` back into a query string.
fn query_string(params: &QueryParams) -> String {
    let mut pairs = vec![
        format!("page={}", params.page),
        format!("size={}", params.size),
    ];
    if !params.genres.is_empty() {
        pairs.push(format!(
            "genres={}",
            urlencoding::encode(&params.genres.join(","))
        ));
    }
    if let Some(category) = &params.category {
        pairs.push(format!("category={}", urlencoding::encode(category)));
    }
    if let Some(text) = &params.text {
        pairs.push(format!("text={}", urlencoding::encode(text)));
    }
    pairs.join("&")
}

/// `<url>; rel="next", <url>; rel="previous"`, or `None` without neighbours.
pub fn link_header(host: &str, links: &PageLinks) -> Option<String> {
    let base = format!("http://{}/api/movies", host);
    let parts: Vec<String> = [("next", &links.next), ("previous", &links.previous)]
        .into_iter()
        .filter_map(|(rel, params)| {
            params
                .as_ref()
                .map(|p| format!("<{}?{}>; rel=\"{}\"", base, query_string(p), rel))
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/movies
///
/// Filter and page the catalog. Neighbouring pages are advertised in the
/// `Link` header.
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ListMoviesParams>,
) -> Result<Response, HandlerError> {
    let result = state
        .catalog()
        .query(&params.into_query())
        .map_err(error_response)?;

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let link = link_header(host, &result.pages);

    let mut response = Json(MovieListResponse {
        movies: result.movies,
        total: result.total,
    })
    .into_response();

    if let Some(value) = link.and_then(|l| HeaderValue::from_str(&l).ok()) {
        response.headers_mut().insert(header::LINK, value);
    }
    Ok(response)
}

/// GET /api/movies/genres
pub async fn list_genres(State(state): State<Arc<AppState>>) -> Json<GenreListResponse> {
    Json(GenreListResponse {
        genres: state.catalog().genres(),
    })
}

/// GET /api/movies/{id}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, HandlerError> {
    state.catalog().get(&id).map(Json).map_err(error_response)
}

/// POST /api/movies
///
/// Responds 201 with the stored record and its `Location`.
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, HandlerError> {
    let payload = object_body(payload)?;
    let movie = state.catalog().create(&payload).map_err(error_response)?;

    let location = format!("/api/movies/{}", urlencoding::encode(&movie.id));
    let mut response = (StatusCode::CREATED, Json(movie)).into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    Ok(response)
}

/// PUT /api/movies/{id}
///
/// Partial update: only the keys present in the body change.
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Movie>, HandlerError> {
    let payload = object_body(payload)?;
    state
        .catalog()
        .update(&id, &payload)
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/movies/{id}
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, HandlerError> {
    state
        .catalog()
        .delete(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
