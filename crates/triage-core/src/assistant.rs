use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use triage_llm::Generator;
use triage_logging::{LogEvent, Logger};
use triage_store::{IncidentLogStore, IncidentRecord, StoreError};

use crate::error::AssistantError;
use crate::prompt::{build_incident_prompt, Role, Tone};

/// What the operator submitted for one generate action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRequest {
    pub role: Role,
    pub tone: Tone,
    pub description: String,
}

impl IncidentRequest {
    pub fn new(role: Role, tone: Tone, description: impl Into<String>) -> Self {
        Self {
            role,
            tone,
            description: description.into(),
        }
    }

    /// True when the description is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
    }
}

/// Result of a successful generation.
///
/// The response is always present. A failed log write is carried alongside
/// it instead of replacing it.
#[derive(Debug)]
pub struct Resolution {
    pub role: Role,
    pub response: String,
    pub timestamp: NaiveDateTime,
    pub log_failure: Option<AssistantError>,
}

impl Resolution {
    pub fn is_logged(&self) -> bool {
        self.log_failure.is_none()
    }
}

/// Handles the two user actions: generate guidance and view the log
pub struct Assistant {
    generator: Arc<dyn Generator>,
    store: IncidentLogStore,
    logger: Arc<Logger>,
}

impl Assistant {
    pub fn new(generator: Arc<dyn Generator>, store: IncidentLogStore, logger: Arc<Logger>) -> Self {
        Self {
            generator,
            store,
            logger,
        }
    }

    pub fn generator(&self) -> &dyn Generator {
        self.generator.as_ref()
    }

    pub fn store(&self) -> &IncidentLogStore {
        &self.store
    }

    /// Validate, prompt, generate, then append one record.
    ///
    /// Blank input and generation failures return early without touching
    /// the log.
    pub async fn resolve(&self, request: &IncidentRequest) -> Result<Resolution, AssistantError> {
        if request.is_blank() {
            self.logger.log(&LogEvent::EmptyInputRejected);
            return Err(AssistantError::EmptyInput);
        }

        let prompt = build_incident_prompt(request.role, request.tone, &request.description);

        self.logger.log(&LogEvent::GenerationStarted {
            role: request.role.label().to_string(),
            tone: request.tone.label().to_string(),
            model: self.generator.model().to_string(),
            input_preview: Logger::preview(&request.description, 60),
        });

        let started = Instant::now();
        let response = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, generator = self.generator.name(), "Generation failed");
                self.logger.log(&LogEvent::GenerationFailed {
                    error: e.to_string(),
                    duration_secs: started.elapsed().as_secs_f64(),
                });
                return Err(AssistantError::Generation(e));
            }
        };

        self.logger.log(&LogEvent::GenerationCompleted {
            role: request.role.label().to_string(),
            response_len: response.len(),
            duration_secs: started.elapsed().as_secs_f64(),
        });

        let record = IncidentRecord::now(
            request.role.label(),
            request.description.as_str(),
            response,
        );

        let log_failure = match self.store.append(&record) {
            Ok(()) => {
                self.logger.log(&LogEvent::RecordAppended {
                    path: self.store.path().to_path_buf(),
                });
                None
            }
            Err(e) => {
                warn!(error = %e, "Incident log append failed");
                self.logger.log(&LogEvent::AppendFailed {
                    path: self.store.path().to_path_buf(),
                    error: e.to_string(),
                });
                Some(AssistantError::LogWrite(e))
            }
        };

        Ok(Resolution {
            role: request.role,
            timestamp: record.timestamp,
            response: record.response,
            log_failure,
        })
    }

    /// Whole log as raw text, oldest entry first
    pub fn read_log(&self) -> Result<String, AssistantError> {
        match self.store.read_all() {
            Ok(content) => {
                debug!(bytes = content.len(), "Read incident log");
                self.logger.log(&LogEvent::LogRead {
                    path: self.store.path().to_path_buf(),
                    bytes: content.len(),
                });
                Ok(content)
            }
            Err(StoreError::Missing(path)) => {
                self.logger.log(&LogEvent::LogMissing { path });
                Err(AssistantError::LogReadMissing)
            }
            Err(e) => Err(AssistantError::LogRead(e)),
        }
    }
}
