//! # rl-api
//!
//! The web routing and orchestration layer for Rusty-Links.

pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{
    routing::{get, post},
    Router,
};

pub use error::ApiError;
pub use handlers::AppState;

/// Builds the application router with its middleware stack.
///
/// | Method | Path | |
/// |---|---|---|
/// | GET | `/` | front page |
/// | GET | `/upvote/{id}` | upvote, redirect to `/` |
/// | GET | `/new` | submit form |
/// | POST | `/create` | create, redirect to `/` |
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::index))
        .route("/upvote/{id}", get(handlers::upvote))
        .route("/new", get(handlers::new_submission))
        .route("/create", post(handlers::create_submission))
        .with_state(state);

    middleware::standard_middleware(routes)
}
