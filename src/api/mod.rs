//! HTTP API module
//!
//! This module contains the timer control endpoints and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/mode/:mode_id", post(select_mode_handler))
        .route("/toggle", post(toggle_handler))
        .route("/reset", post(reset_handler))
        .route("/timer", get(timer_handler))
        .route("/modes", get(modes_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
