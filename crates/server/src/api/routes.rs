use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::middleware::metrics_middleware;
use super::{handlers, movies};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config().server.static_dir.clone();

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Movies
        .route(
            "/movies",
            get(movies::list_movies).post(movies::create_movie),
        )
        .route("/movies/genres", get(movies::list_genres))
        .route(
            "/movies/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .with_state(state);

    let router = Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(handlers::metrics));

    // Everything outside the API is served from disk when configured
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    // Outermost first: CORS, tracing, then request metrics
    router
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
