//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::state::AppState;
use super::responses::{ApiResponse, HealthResponse, ModesResponse, TimerStatusResponse};

/// Handle POST /mode/:mode_id - Switch the timer to a preset
pub async fn select_mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode_id): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.select_mode(&mode_id) {
        Ok(Some(view)) => {
            info!("Mode endpoint called - switched to {}", view.mode);
            Ok(Json(ApiResponse::idle(format!("Mode set to {}", view.mode), view)))
        }
        Ok(None) => {
            warn!("Mode endpoint called with unknown mode: {}", mode_id);
            match state.snapshot() {
                Ok(view) => Ok(Json(ApiResponse::ignored(
                    format!("Unknown mode: {}", mode_id),
                    view,
                ))),
                Err(e) => {
                    error!("Failed to read timer view: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
        Err(e) => {
            error!("Failed to select mode: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /toggle - Start or pause the countdown
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle() {
        Ok(view) => {
            let message = if view.running { "Timer started" } else { "Timer paused" };
            Ok(Json(ApiResponse::from_view(message.to_string(), view)))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Restore the current mode's full duration
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(view) => Ok(Json(ApiResponse::idle("Timer reset".to_string(), view))),
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /timer - Return the rendered timer and last report outcome
pub async fn timer_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerStatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(view) => view,
        Err(e) => {
            error!("Failed to read timer view: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let tick_scheduled = match state.has_scheduled_tick() {
        Ok(scheduled) => scheduled,
        Err(e) => {
            error!("Failed to read tick handle: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(Json(TimerStatusResponse {
        timer,
        tick_scheduled,
        failure_policy: state.failure_policy,
        last_report: state.last_report(),
        uptime: state.get_uptime(),
    }))
}

/// Handle GET /modes - List the presets and mark the active one
pub async fn modes_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModesResponse>, StatusCode> {
    match state.snapshot() {
        Ok(view) => Ok(Json(ModesResponse::new(&state.timer_config, view.mode))),
        Err(e) => {
            error!("Failed to read timer view: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /events - Stream timer events as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("Event stream client connected");
    let rx = state.subscribe_events();

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => match Event::default().event(event.name()).json_data(&event) {
                    Ok(sse) => return Some((Ok::<_, Infallible>(sse), rx)),
                    Err(e) => warn!("Failed to encode timer event: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream client lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}
