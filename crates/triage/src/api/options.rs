use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use triage_core::{Role, Tone};

use super::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub roles: Vec<&'static str>,
    pub tones: Vec<&'static str>,
    pub default_role: Role,
    pub default_tone: Tone,
    pub model: String,
}

pub async fn get_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        roles: Role::ALL.iter().map(|r| r.label()).collect(),
        tones: Tone::ALL.iter().map(|t| t.label()).collect(),
        default_role: state.selection.role,
        default_tone: state.selection.tone,
        model: state.assistant.generator().model().to_string(),
    })
}
