use thiserror::Error;

use triage_llm::GenerationError;
use triage_store::StoreError;

/// Everything that can go wrong while handling one user action.
///
/// None of these are fatal; each one is rendered and control returns to the
/// interactive surface.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Please describe the issue first!")]
    EmptyInput,

    #[error("Error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Failed to save incident log: {0}")]
    LogWrite(StoreError),

    #[error("No logs yet. Generate a response first!")]
    LogReadMissing,

    #[error("Failed to read incident log: {0}")]
    LogRead(StoreError),
}

impl AssistantError {
    /// Informational states are shown as notices, not errors
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::LogReadMissing)
    }

    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::Generation(_) => "generation",
            Self::LogWrite(_) => "log_write",
            Self::LogReadMissing => "log_read_missing",
            Self::LogRead(_) => "log_read",
        }
    }
}
