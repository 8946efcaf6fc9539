use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Structured log events for one assistant interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    EmptyInputRejected,
    GenerationStarted {
        role: String,
        tone: String,
        model: String,
        input_preview: String,
    },
    GenerationCompleted {
        role: String,
        response_len: usize,
        duration_secs: f64,
    },
    GenerationFailed {
        error: String,
        duration_secs: f64,
    },
    RecordAppended {
        path: PathBuf,
    },
    AppendFailed {
        path: PathBuf,
        error: String,
    },
    LogRead {
        path: PathBuf,
        bytes: usize,
    },
    LogMissing {
        path: PathBuf,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for assistant events - handles both console output and file logging
pub struct Logger {
    format: LogFormat,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            file_writer: None,
        }
    }

    /// Create a logger with file output in addition to console
    pub fn with_file(format: LogFormat, log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Self {
            format,
            file_writer: Some(Mutex::new(file)),
        })
    }

    pub fn log(&self, event: &LogEvent) {
        // File output is always JSON
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => self.log_compact(event),
        }
    }

    fn log_json(&self, event: &LogEvent) {
        let _ = writeln!(std::io::stderr(), "{}", event.with_timestamp());
    }

    fn log_pretty(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        match event {
            LogEvent::EmptyInputRejected => {
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "⚠".bright_yellow(),
                    "Empty incident description, nothing sent".yellow()
                );
            }
            LogEvent::GenerationStarted {
                role,
                tone,
                model,
                input_preview,
            } => {
                let _ = writeln!(
                    stderr,
                    "  {} {} {}",
                    "▶".bright_cyan(),
                    role.bright_cyan().bold(),
                    format!("({}, {})", tone, model).dimmed()
                );
                let _ = writeln!(stderr, "    {} {}", "│".dimmed(), input_preview.dimmed());
            }
            LogEvent::GenerationCompleted {
                response_len,
                duration_secs,
                ..
            } => {
                let _ = writeln!(
                    stderr,
                    "    {} Response received ({} chars, {:.1}s)",
                    "✓".bright_green(),
                    response_len,
                    duration_secs
                );
            }
            LogEvent::GenerationFailed {
                error,
                duration_secs,
            } => {
                let _ = writeln!(
                    stderr,
                    "    {} Generation failed after {:.1}s: {}",
                    "✗".bright_red(),
                    duration_secs,
                    error.bright_red()
                );
            }
            LogEvent::RecordAppended { path } => {
                let _ = writeln!(
                    stderr,
                    "    {} {}",
                    "💾".dimmed(),
                    format!("Logged to {}", path.display()).dimmed()
                );
            }
            LogEvent::AppendFailed { path, error } => {
                let _ = writeln!(
                    stderr,
                    "    {} Could not write {}: {}",
                    "✗".bright_red(),
                    path.display(),
                    error.bright_red()
                );
            }
            LogEvent::LogRead { .. } => {
                // Debug info only
            }
            LogEvent::LogMissing { path } => {
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "ℹ".bright_blue(),
                    format!("No incident log at {}", path.display()).dimmed()
                );
            }
        }
    }

    fn log_compact(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        let msg = match event {
            LogEvent::EmptyInputRejected => format!("[{}] input:empty", timestamp),
            LogEvent::GenerationStarted { role, tone, .. } => {
                format!("[{}] gen:start {}/{}", timestamp, role, tone)
            }
            LogEvent::GenerationCompleted {
                response_len,
                duration_secs,
                ..
            } => format!(
                "[{}] gen:done {}c {:.1}s",
                timestamp, response_len, duration_secs
            ),
            LogEvent::GenerationFailed { error, .. } => {
                format!("[{}] gen:error {}", timestamp, error)
            }
            LogEvent::RecordAppended { path } => {
                format!("[{}] log:append {}", timestamp, path.display())
            }
            LogEvent::AppendFailed { error, .. } => {
                format!("[{}] log:error {}", timestamp, error)
            }
            LogEvent::LogRead { bytes, .. } => format!("[{}] log:read {}b", timestamp, bytes),
            LogEvent::LogMissing { .. } => format!("[{}] log:empty", timestamp),
        };
        let _ = writeln!(stderr, "{}", msg);
    }

    /// Single-line preview of free text, cut at `max_chars` characters
    pub fn preview(text: &str, max_chars: usize) -> String {
        let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.chars().count() <= max_chars {
            return flat;
        }
        let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
