//! HTTP routes
//!
//! Each endpoint takes raw records exactly as the annotation API returned
//! them and answers with the view model the UI renders.

pub mod anchor;
pub mod feed;
pub mod health;
pub mod replies;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/health", get(health::health_check))
        .nest("/api/v1/feed", feed::router())
        .nest("/api/v1/replies", replies::router())
        .route("/api/v1/anchor", post(anchor::build_anchor))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
