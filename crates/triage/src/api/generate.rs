use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use triage_core::{IncidentRequest, Role, Tone};
use triage_store::TIMESTAMP_FORMAT;

use super::{api_error, ApiError, AppState, ErrorResponse};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub role: Option<Role>,
    pub tone: Option<Tone>,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub role: Role,
    pub response: String,
    pub timestamp: String,
    /// Set when the response was produced but could not be logged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_error: Option<String>,
}

pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        (
            rejection.status(),
            Json(ErrorResponse {
                kind: "invalid_request",
                message: rejection.body_text(),
            }),
        )
    })?;

    let request = IncidentRequest::new(
        body.role.unwrap_or(state.selection.role),
        body.tone.unwrap_or(state.selection.tone),
        body.description,
    );

    let resolution = state
        .assistant
        .resolve(&request)
        .await
        .map_err(|e| api_error(&e))?;

    Ok(Json(GenerateResponse {
        role: resolution.role,
        timestamp: resolution.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        log_error: resolution.log_failure.map(|e| e.to_string()),
        response: resolution.response,
    }))
}
