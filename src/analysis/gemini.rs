//! Google Gemini API client for symptom analysis.
//!
//! Thin blocking wrapper around the Gemini generateContent endpoint. The
//! credential and request timeout are fixed at construction; absence of the
//! credential is a configuration error detected before any call is made.

use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Deserialize;

use super::types::TextCompletion;
use super::AnalysisError;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Upper bound on provider error bodies kept in error values (characters).
const ERROR_BODY_LIMIT: usize = 200;

pub struct GeminiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

// -- Response types --

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a client, failing fast when no credential is configured.
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        if api_key.trim().is_empty() {
            return Err(AnalysisError::MissingApiKey);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: GEMINI_ENDPOINT.to_string(),
        })
    }

    fn request_url(&self, model: &str) -> String {
        // Identifiers may carry the API's resource prefix ("models/gemini-…")
        // which is already part of the endpoint path.
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/{}:generateContent", self.base_url, model)
    }

    fn build_request_body(prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }]
        })
    }

    fn extract_completion_text(response: &GenerateContentResponse) -> Option<String> {
        let parts = &response.candidates.first()?.content.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl TextCompletion for GeminiClient {
    fn complete(&self, model: &str, prompt: &str) -> Result<String, AnalysisError> {
        validate_model_name(model)?;

        let url = self.request_url(model);
        let body = Self::build_request_body(prompt);

        tracing::debug!(model, prompt_chars = prompt.len(), "calling Gemini");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(
                "x-goog-api-key",
                HeaderValue::from_str(&self.api_key).map_err(|e| {
                    AnalysisError::HttpClient(format!("invalid API key header: {e}"))
                })?,
            )
            .json(&body)
            .send()
            .map_err(|e| AnalysisError::HttpClient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            // Truncated so request echoes can't flood the logs
            let truncated: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(AnalysisError::Provider {
                model: model.to_string(),
                status: status.as_u16(),
                body: truncated,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| AnalysisError::HttpClient(format!("malformed Gemini response: {e}")))?;

        Self::extract_completion_text(&parsed).ok_or(AnalysisError::EmptyCompletion)
    }
}

/// Validate a model identifier against the Gemini naming convention.
///
/// Blocks path traversal and shell metacharacters before the identifier is
/// interpolated into a request URL. Accepts an optional single
/// namespace/resource segment (`models/gemini-1.5-pro`) and an optional tag.
pub fn validate_model_name(name: &str) -> Result<(), AnalysisError> {
    if name.is_empty() {
        return Err(AnalysisError::InvalidModelName(name.to_string()));
    }

    let valid = regex::Regex::new(
        r"^[a-zA-Z0-9][a-zA-Z0-9._-]*(/[a-zA-Z0-9][a-zA-Z0-9._-]*)?(:[a-zA-Z0-9._-]+)?$",
    )
    .expect("static regex");

    if !valid.is_match(name) {
        return Err(AnalysisError::InvalidModelName(name.to_string()));
    }

    Ok(())
}

/// Mock completion provider for tests; returns a configurable response.
pub struct MockCompletionClient {
    response: String,
}

impl MockCompletionClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl TextCompletion for MockCompletionClient {
    fn complete(&self, _model: &str, _prompt: &str) -> Result<String, AnalysisError> {
        Ok(self.response.clone())
    }
}
