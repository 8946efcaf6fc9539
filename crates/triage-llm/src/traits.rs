use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Environment variable holding the generation-service credential
pub const DEFAULT_CREDENTIAL_ENV: &str = "GEMINI_API_KEY";

/// Public Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Errors that can occur while talking to a generation service
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("No API key configured. Set the {0} environment variable")]
    MissingCredential(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request to generation service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Authentication rejected (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("Quota exceeded (HTTP 429): {0}")]
    QuotaExceeded(String),

    #[error("Generation service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Malformed response from generation service: {0}")]
    MalformedResponse(String),

    #[error("Generation service returned no text ({0})")]
    EmptyResponse(String),
}

/// Configuration for a generation client
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// Credential, if one was found at startup
    pub api_key: Option<String>,
    /// Name of the environment variable the credential comes from
    pub credential_env: String,
    /// Service root, without a trailing slash
    pub base_url: String,
    /// Optional request timeout (None = HTTP client default)
    pub timeout: Option<Duration>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            credential_env: DEFAULT_CREDENTIAL_ENV.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl GenerationConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Read the credential from `var`. An unset or blank variable leaves
    /// the key empty; the client reports that on first use.
    pub fn with_api_key_from_env(mut self, var: impl Into<String>) -> Self {
        let var = var.into();
        self.api_key = std::env::var(&var)
            .ok()
            .filter(|value| !value.trim().is_empty());
        self.credential_env = var;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A text-generation backend: one prompt in, one text out.
///
/// Implementations do not retry, cache or rate-limit. Each call is a
/// single independent request.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Human-readable name of the backend (e.g., "Gemini")
    fn name(&self) -> &str;

    /// Model identifier used for requests
    fn model(&self) -> &str;

    /// Generate text for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
