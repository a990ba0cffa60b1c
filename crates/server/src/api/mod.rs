pub mod handlers;
pub mod middleware;
pub mod movies;
pub mod routes;

pub use routes::create_router;
