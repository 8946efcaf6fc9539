//! # Web API
//!
//! Routes behind the single-page UI.
//!
//! ## Endpoints
//!
//! - `GET /` - The page itself
//! - `GET /api/options` - Roles, tones, preselection and model
//! - `POST /api/generate` - Generate guidance for one incident
//! - `GET /api/logs` - Raw incident log, or an "empty" notice

mod generate;
mod logs;
mod options;
mod page;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use triage_core::{Assistant, AssistantError};

use crate::config::Selection;

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub selection: Selection,
}

/// Error body shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub kind: &'static str,
    pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(err: &AssistantError) -> ApiError {
    let status = match err {
        AssistantError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
        AssistantError::Generation(_) => StatusCode::BAD_GATEWAY,
        AssistantError::LogReadMissing => StatusCode::NOT_FOUND,
        AssistantError::LogWrite(_) | AssistantError::LogRead(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            kind: err.kind(),
            message: err.to_string(),
        }),
    )
}

pub fn create_router(assistant: Arc<Assistant>, selection: Selection) -> Router {
    let state = AppState {
        assistant,
        selection,
    };

    Router::new()
        .route("/", get(page::index))
        .route("/api/options", get(options::get_options))
        .route("/api/generate", post(generate::generate))
        .route("/api/logs", get(logs::get_logs))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
