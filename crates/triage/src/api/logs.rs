use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use super::{api_error, ApiError, AppState};

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LogsResponse {
    Ok { content: String },
    Empty { message: String },
}

pub async fn get_logs(State(state): State<AppState>) -> Result<Json<LogsResponse>, ApiError> {
    match state.assistant.read_log() {
        Ok(content) => Ok(Json(LogsResponse::Ok { content })),
        Err(e) if e.is_informational() => Ok(Json(LogsResponse::Empty {
            message: e.to_string(),
        })),
        Err(e) => Err(api_error(&e)),
    }
}
