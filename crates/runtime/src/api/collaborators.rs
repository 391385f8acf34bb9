//! Asynchronous abstraction over the external generative services.
//!
//! Runtime users plug in [`ScenarioAnalyzer`] and [`ArtGenerator`]
//! implementations so sessions can run against a hosted model, a local
//! fixture, or nothing at all.
use async_trait::async_trait;
use thiserror::Error;

use quest_content::ScenarioLoader;
use quest_core::Scenario;

/// Opaque "request failed" signal from a collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unusable response: {0}")]
    InvalidResponse(String),

    #[error("unsupported input type {0}")]
    Unsupported(String),
}

/// Turns a photo into a scenario.
#[async_trait]
pub trait ScenarioAnalyzer: Send + Sync {
    /// Analyze `image` (raw bytes of type `mime`) and synthesize one scenario.
    ///
    /// The returned scenario's position and skin are overridden by the runtime.
    async fn analyze(&self, image: &[u8], mime: &str) -> Result<Scenario, CollaboratorError>;
}

/// Renders reward card art.
#[async_trait]
pub trait ArtGenerator: Send + Sync {
    /// Generate an image for `prompt` and return a reference to it.
    async fn generate(&self, prompt: &str) -> Result<String, CollaboratorError>;
}

/// Analyzer that reads a ready-made scenario from a JSON payload.
///
/// Useful offline: the "photo" is a scenario file the analyzer would have
/// produced. Anything other than `application/json` is rejected.
pub struct JsonScenarioAnalyzer;

#[async_trait]
impl ScenarioAnalyzer for JsonScenarioAnalyzer {
    async fn analyze(&self, image: &[u8], mime: &str) -> Result<Scenario, CollaboratorError> {
        if mime != "application/json" {
            return Err(CollaboratorError::Unsupported(mime.to_owned()));
        }
        let text = std::str::from_utf8(image)
            .map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))?;
        ScenarioLoader::from_json(text).map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))
    }
}

/// Art generator that never calls out and returns a stable placeholder reference.
pub struct PlaceholderArtGenerator;

impl PlaceholderArtGenerator {
    /// Reference returned for `prompt`.
    pub fn reference(prompt: &str) -> String {
        let slug: String = prompt
            .chars()
            .take_while(|c| *c != '.')
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        format!("placeholder://{}", slug.trim_matches('-'))
    }
}

#[async_trait]
impl ArtGenerator for PlaceholderArtGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, CollaboratorError> {
        Ok(Self::reference(prompt))
    }
}
