use std::sync::Arc;

use serde::Serialize;

use crate::analysis::{AnalysisResult, SymptomAnalyzer};

/// Shared state handed to every handler.
///
/// `analyzer` is `None` when no API credential was configured at startup;
/// the service still serves the page, and analysis requests resolve to a
/// generic failure envelope.
#[derive(Clone)]
pub struct ApiContext {
    pub analyzer: Option<Arc<SymptomAnalyzer>>,
}

impl ApiContext {
    pub fn new(analyzer: Option<Arc<SymptomAnalyzer>>) -> Self {
        Self { analyzer }
    }
}

/// Response envelope the browser front end consumes.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    pub fn completed(result: AnalysisResult) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_envelope_omits_error_field() {
        let envelope = AnalyzeResponse::completed(AnalysisResult {
            possible_conditions: vec![],
            disclaimer: "d".into(),
            general_advice: "g".into(),
            raw_response: None,
        });
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["result"]["disclaimer"], "d");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failed_envelope_omits_result_field() {
        let json = serde_json::to_value(AnalyzeResponse::failed("nope")).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "nope");
        assert!(json.get("result").is_none());
    }
}
