use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

pub use gemini::GeminiProvider;

#[derive(Error, Debug)]
pub enum AssistError {
    /// The model answered with no usable text.
    #[error("The model returned an empty response")]
    Empty,
    #[error("Provider rejected the request: {0}")]
    Rejected(String),
    #[error("External service error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Text-generation backend for the assist endpoint. `json` asks the provider
/// to constrain its output to a JSON document.
#[async_trait]
pub trait AssistProvider: Send + Sync + std::fmt::Debug {
    async fn generate(&self, prompt: &str, json: bool) -> Result<String, AssistError>;
}
