mod assistant;
mod error;
mod prompt;

pub use assistant::{Assistant, IncidentRequest, Resolution};
pub use error::AssistantError;
pub use prompt::{build_incident_prompt, Role, Tone};
