use uuid::Uuid;

use super::parser::parse_analysis_response;
use super::prompt::build_analysis_prompt;
use super::types::{AnalysisContext, AnalysisResult, TextCompletion};
use super::AnalysisError;

/// Model identifiers in order of preference. The newer resource-prefixed
/// name first, then the older bare names kept for deployments where the
/// preferred model has been renamed or retired.
pub const DEFAULT_ANALYSIS_MODELS: &[&str] =
    &["models/gemini-1.5-pro", "gemini-pro", "gemini-1.0-pro"];

/// Runs one symptom analysis end to end: prompt → provider fallback chain →
/// response extraction. Holds no per-request state; the web layer shares one
/// instance across requests.
pub struct SymptomAnalyzer {
    provider: Box<dyn TextCompletion + Send + Sync>,
    models: Vec<String>,
}

impl SymptomAnalyzer {
    /// An empty model list falls back to `DEFAULT_ANALYSIS_MODELS`.
    pub fn new(provider: Box<dyn TextCompletion + Send + Sync>, models: Vec<String>) -> Self {
        let models = if models.is_empty() {
            DEFAULT_ANALYSIS_MODELS
                .iter()
                .map(|m| m.to_string())
                .collect()
        } else {
            models
        };
        Self { provider, models }
    }

    pub fn with_default_models(provider: Box<dyn TextCompletion + Send + Sync>) -> Self {
        Self::new(provider, Vec::new())
    }

    /// Analyze the described symptoms.
    ///
    /// Fails only when no model produced a reply (or the symptoms are blank);
    /// a reply that cannot be parsed still yields a result carrying the raw
    /// text. Callers map the error to a generic "unavailable" message.
    pub fn analyze(&self, ctx: &AnalysisContext) -> Result<AnalysisResult, AnalysisError> {
        if ctx.symptoms.trim().is_empty() {
            return Err(AnalysisError::EmptySymptoms);
        }

        let _span =
            tracing::info_span!("analyze_symptoms", request_id = %Uuid::new_v4()).entered();

        let prompt = build_analysis_prompt(ctx);
        let reply = self.complete_with_fallback(&prompt)?;

        let result = parse_analysis_response(&reply);
        tracing::info!(
            conditions = result.possible_conditions.len(),
            degraded = result.is_degraded(),
            "symptom analysis complete"
        );
        Ok(result)
    }

    /// Try each configured model in order, stopping at the first success.
    ///
    /// Per-model failures are recovered by advancing the chain; this is a
    /// renamed-or-retired-model fallback, not a transient-error retry, so
    /// there is no backoff and no model is tried twice.
    fn complete_with_fallback(&self, prompt: &str) -> Result<String, AnalysisError> {
        for model in &self.models {
            match self.provider.complete(model, prompt) {
                Ok(reply) => {
                    tracing::debug!(model, reply_chars = reply.len(), "model call succeeded");
                    return Ok(reply);
                }
                Err(e) => {
                    tracing::warn!(model, error = %e, "model call failed, trying next");
                }
            }
        }

        tracing::error!(models_tried = self.models.len(), "every configured model failed");
        Err(AnalysisError::ProvidersExhausted)
    }
}
