pub mod types;
pub mod prompt;
pub mod parser;
pub mod gemini;
pub mod engine;

pub use types::*;
pub use prompt::*;
pub use parser::*;
pub use gemini::*;
pub use engine::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("GEMINI_API_KEY is not set; symptom analysis is disabled")]
    MissingApiKey,

    #[error("Symptom description is empty")]
    EmptySymptoms,

    #[error("Invalid model identifier: '{0}'")]
    InvalidModelName(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Gemini returned error for model '{model}' (status {status}): {body}")]
    Provider {
        model: String,
        status: u16,
        body: String,
    },

    #[error("Gemini response contained no text")]
    EmptyCompletion,

    #[error("All configured models failed")]
    ProvidersExhausted,
}
