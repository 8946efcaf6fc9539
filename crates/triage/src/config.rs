//! Project configuration file support for triage.
//!
//! Loads configuration from `triage.toml` in the working directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use triage_core::{Role, Tone};
use triage_llm::{GenerationConfig, DEFAULT_BASE_URL, DEFAULT_CREDENTIAL_ENV, DEFAULT_MODEL};
use triage_store::DEFAULT_LOG_FILE;

/// Project-level configuration loaded from `triage.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Generation model identifier
    pub model: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Generation service root URL
    pub base_url: Option<String>,
    /// Request timeout, e.g. "60s" (default: HTTP client default)
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    /// Incident log path, relative to the working directory unless absolute
    pub log_file: Option<PathBuf>,
    /// Initial role/tone selections
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    pub role: Option<Role>,
    pub tone: Option<Tone>,
}

/// Role and tone preselected on every surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub role: Role,
    pub tone: Tone,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "triage.toml";

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// Build the generation client configuration. The API key is read from
    /// the environment here, once, at process entry.
    /// Priority for the model: `model_override` > config > default
    pub fn generation_config(&self, model_override: Option<&str>) -> GenerationConfig {
        let model = model_override
            .or(self.model.as_deref())
            .unwrap_or(DEFAULT_MODEL);
        let credential_env = self.api_key_env.as_deref().unwrap_or(DEFAULT_CREDENTIAL_ENV);
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

        let mut config = GenerationConfig::new(model)
            .with_api_key_from_env(credential_env)
            .with_base_url(base_url);
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        config
    }

    /// Resolve the incident log path.
    /// Priority: `path_override` > config > `incident_log.txt`
    pub fn log_path(&self, working_dir: &Path, path_override: Option<&Path>) -> PathBuf {
        let path = path_override
            .or(self.log_file.as_deref())
            .unwrap_or_else(|| Path::new(DEFAULT_LOG_FILE));
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            working_dir.join(path)
        }
    }

    pub fn selection(&self) -> Selection {
        Selection {
            role: self.defaults.role.unwrap_or_default(),
            tone: self.defaults.tone.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(ProjectConfig::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_full_config_parses() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
model = "gemini-1.5-pro"
api_key_env = "TRIAGE_TEST_KEY_UNSET"
base_url = "http://localhost:8080/"
timeout = "90s"
log_file = "logs/incidents.txt"

[defaults]
role = "Linux Troubleshooter"
tone = "Concise"
"#,
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap().unwrap();

        assert_eq!(config.timeout, Some(Duration::from_secs(90)));
        assert_eq!(
            config.selection(),
            Selection {
                role: Role::LinuxTroubleshooter,
                tone: Tone::Concise,
            }
        );
        assert_eq!(
            config.log_path(dir.path(), None),
            dir.path().join("logs/incidents.txt")
        );

        let generation = config.generation_config(None);
        assert_eq!(generation.model, "gemini-1.5-pro");
        assert_eq!(generation.base_url, "http://localhost:8080");
        assert_eq!(generation.credential_env, "TRIAGE_TEST_KEY_UNSET");
        assert!(generation.api_key.is_none());
        assert_eq!(generation.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_unknown_key_is_hard_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "temperature = 0.2\n").unwrap();
        assert!(ProjectConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_unknown_role_is_hard_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[defaults]\nrole = \"DBA\"\n",
        )
        .unwrap();
        assert!(ProjectConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_defaults_accept_any_case() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[defaults]\nrole = \"sre expert\"\ntone = \"CONCISE\"\n",
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap().unwrap();

        assert_eq!(
            config.selection(),
            Selection {
                role: Role::SreExpert,
                tone: Tone::Concise,
            }
        );
    }

    #[test]
    fn test_defaults_and_overrides() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig::default();

        assert_eq!(config.selection(), Selection::default());
        assert_eq!(config.selection().role, Role::SreExpert);
        assert_eq!(config.selection().tone, Tone::Professional);
        assert_eq!(
            config.log_path(dir.path(), None),
            dir.path().join("incident_log.txt")
        );
        assert_eq!(
            config.log_path(dir.path(), Some(Path::new("/var/log/triage.txt"))),
            PathBuf::from("/var/log/triage.txt")
        );

        let generation = config.generation_config(Some("gemini-exp"));
        assert_eq!(generation.model, "gemini-exp");
        assert_eq!(generation.credential_env, "GEMINI_API_KEY");
        assert_eq!(generation.base_url, "https://generativelanguage.googleapis.com");
        assert!(generation.timeout.is_none());
    }
}
