//! Common test utilities for in-process API testing.
//!
//! The fixture builds the real router over either an in-memory store or a
//! JSON file in a temporary directory, and sends requests with `oneshot`.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use cinedex_core::{
    testing::MemoryStore, Config, JsonFileStore, Movie, MovieCatalog, MovieStore, QueryConfig,
};
use cinedex_server::state::AppState;

/// Re-export fixtures for test convenience
pub use cinedex_core::testing::fixtures;

/// Test fixture running the full router in-process.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_create_movie() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/movies", json!({
///         "title": "Alien",
///         "genre": "horror"
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// In-memory store, when the fixture is not file-backed
    pub store: Option<Arc<MemoryStore>>,
    /// Temporary directory holding the JSON file, when file-backed
    pub temp_dir: Option<TempDir>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestFixture {
    /// Fixture over the three sample movies.
    pub fn new() -> Self {
        Self::with_movies(fixtures::sample_movies())
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self::with_query_config(movies, QueryConfig::default())
    }

    /// In-memory fixture with custom query settings.
    pub fn with_query_config(movies: Vec<Movie>, query: QueryConfig) -> Self {
        let store = Arc::new(MemoryStore::with_movies(movies));
        let config = Config {
            query,
            ..Config::default()
        };
        let router = build_router(config, Arc::clone(&store) as Arc<dyn MovieStore>);

        Self {
            router,
            store: Some(store),
            temp_dir: None,
        }
    }

    /// Fixture persisting to `movies.json` in a temporary directory.
    pub fn file_backed(movies: Vec<Movie>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("movies.json");
        std::fs::write(&path, serde_json::to_string_pretty(&movies).unwrap())
            .expect("Failed to seed movie file");

        let mut config = Config::default();
        config.store.path = path.clone();
        let store = JsonFileStore::open(&path, false).expect("Failed to open movie file");
        let router = build_router(config, Arc::new(store));

        Self {
            router,
            store: None,
            temp_dir: Some(temp_dir),
        }
    }

    /// Fixture that also serves files from `static_dir` outside the API.
    pub fn with_static_dir(static_dir: PathBuf) -> Self {
        let store = Arc::new(MemoryStore::new());
        let mut config = Config::default();
        config.server.static_dir = Some(static_dir);
        let router = build_router(config, Arc::clone(&store) as Arc<dyn MovieStore>);

        Self {
            router,
            store: Some(store),
            temp_dir: None,
        }
    }

    /// The in-memory store. Panics for file-backed fixtures.
    pub fn memory_store(&self) -> &MemoryStore {
        self.store.as_deref().expect("fixture is file-backed")
    }

    /// Path of the backing JSON file. Panics for in-memory fixtures.
    pub fn movie_file(&self) -> PathBuf {
        self.temp_dir
            .as_ref()
            .expect("fixture is in-memory")
            .path()
            .join("movies.json")
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder()
            .method(method)
            .uri(path)
            .header("Host", "movies.test");

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

fn build_router(config: Config, store: Arc<dyn MovieStore>) -> Router {
    let catalog = MovieCatalog::new(store, &config.query);
    let state = Arc::new(AppState::new(config, catalog));
    cinedex_server::api::create_router(state)
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
