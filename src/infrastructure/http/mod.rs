//! Read-only HTML character sheet view

mod character_routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::infrastructure::state::AppState;

/// Create all view routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/characters", get(character_routes::list_characters))
        .route("/characters/{name}", get(character_routes::view_character))
        .layer(TraceLayer::new_for_http())
}
