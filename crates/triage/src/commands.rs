//! One-shot commands: `ask`, `logs` and `options`.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use triage_core::{Assistant, AssistantError, IncidentRequest, Role, Tone};
use triage_store::TIMESTAMP_FORMAT;

use crate::config::Selection;

/// Exit codes for `triage ask`
pub const EXIT_OK: i32 = 0;
pub const EXIT_GENERATION_FAILED: i32 = 1;
pub const EXIT_EMPTY_INPUT: i32 = 2;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AskOutput {
    role: Role,
    response: String,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_error: Option<String>,
}

/// Description from the flag, a file, or stdin, in that order
pub fn read_description(description: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(description) = description {
        return Ok(description);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read incident description from stdin")?;
    Ok(buffer)
}

pub async fn handle_ask(
    assistant: &Assistant,
    role: Role,
    tone: Tone,
    description: String,
    json_output: bool,
) -> Result<i32> {
    let request = IncidentRequest::new(role, tone, description);

    if !request.is_blank() && !json_output {
        eprintln!("{}", "Analyzing incident and generating insights...".dimmed());
    }

    match assistant.resolve(&request).await {
        Ok(resolution) => {
            let log_error = resolution.log_failure.as_ref().map(|e| e.to_string());
            if json_output {
                let output = AskOutput {
                    role: resolution.role,
                    response: resolution.response,
                    timestamp: resolution.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    log_error,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                eprintln!();
                eprintln!("{}", "Suggested Resolution:".bold());
                println!("{}", resolution.response);
                if let Some(error) = log_error {
                    eprintln!("{} {}", "✗".bright_red(), error.bright_red());
                }
            }
            Ok(EXIT_OK)
        }
        Err(AssistantError::EmptyInput) => {
            eprintln!(
                "{} {}",
                "⚠".bright_yellow(),
                AssistantError::EmptyInput.to_string().yellow()
            );
            Ok(EXIT_EMPTY_INPUT)
        }
        Err(e) => {
            eprintln!("{} {}", "✗".bright_red(), e.to_string().bright_red());
            Ok(EXIT_GENERATION_FAILED)
        }
    }
}

pub fn handle_logs(assistant: &Assistant) -> Result<()> {
    match assistant.read_log() {
        Ok(content) => {
            print!("{}", content);
            Ok(())
        }
        Err(e) if e.is_informational() => {
            eprintln!("{} {}", "ℹ".bright_blue(), e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn handle_options(selection: Selection) {
    eprintln!("{}", "Roles:".bold());
    for role in Role::ALL {
        let marker = if role == selection.role { "*" } else { " " };
        println!("  {} {:<22} ({})", marker, role.label(), role.id());
    }
    eprintln!("{}", "Tones:".bold());
    for tone in Tone::ALL {
        let marker = if tone == selection.tone { "*" } else { " " };
        println!("  {} {}", marker, tone.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use tempfile::TempDir;
    use triage_llm::{GenerationError, Generator};
    use triage_logging::{LogFormat, Logger};
    use triage_store::IncidentLogStore;

    struct Canned(Option<&'static str>);

    #[async_trait]
    impl Generator for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        fn model(&self) -> &str {
            "canned-model"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| GenerationError::EmptyResponse("no candidates".to_string()))
        }
    }

    fn assistant(dir: &TempDir, reply: Option<&'static str>) -> Assistant {
        Assistant::new(
            Arc::new(Canned(reply)),
            IncidentLogStore::in_dir(dir.path()),
            Arc::new(Logger::new(LogFormat::Compact)),
        )
    }

    #[tokio::test]
    async fn test_ask_exit_codes() {
        let dir = TempDir::new().unwrap();

        let ok = assistant(&dir, Some("T"));
        let code = handle_ask(&ok, Role::SreExpert, Tone::Concise, "disk full".into(), true)
            .await
            .unwrap();
        assert_eq!(code, EXIT_OK);

        let code = handle_ask(&ok, Role::SreExpert, Tone::Concise, "  ".into(), true)
            .await
            .unwrap();
        assert_eq!(code, EXIT_EMPTY_INPUT);

        let failing = assistant(&dir, None);
        let code = handle_ask(&failing, Role::SreExpert, Tone::Concise, "x".into(), true)
            .await
            .unwrap();
        assert_eq!(code, EXIT_GENERATION_FAILED);

        // Only the successful run was logged
        let log = ok.read_log().unwrap();
        assert_eq!(log.matches("[Response]: T").count(), 1);
    }

    #[test]
    fn test_read_description_prefers_flag_then_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("incident.md");
        std::fs::write(&path, "from file\n").unwrap();

        assert_eq!(
            read_description(Some("from flag".into()), Some(&path)).unwrap(),
            "from flag"
        );
        assert_eq!(read_description(None, Some(&path)).unwrap(), "from file\n");
        assert!(read_description(None, Some(&dir.path().join("missing.md"))).is_err());
    }

    #[test]
    fn test_logs_without_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(handle_logs(&assistant(&dir, Some("T"))).is_ok());
    }
}
