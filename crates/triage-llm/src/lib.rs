//! # triage-llm
//!
//! Text-generation clients for triage.
//!
//! ## Key Types
//!
//! - [`Generator`] - The seam every generation backend implements
//! - [`GeminiClient`] - Google Gemini `generateContent` over HTTPS
//! - [`GenerationConfig`] - Model, credential and endpoint settings
//! - [`GenerationError`] - Failure kinds surfaced to callers

mod gemini;
mod traits;

pub use gemini::GeminiClient;
pub use traits::{
    GenerationConfig, GenerationError, Generator, DEFAULT_BASE_URL, DEFAULT_CREDENTIAL_ENV,
    DEFAULT_MODEL,
};
