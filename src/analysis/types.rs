use serde::{Deserialize, Serialize};

use super::AnalysisError;

/// Everything the user told us about their symptoms. Built once per request
/// by the web layer and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub symptoms: String,
    pub age: Option<String>,
    pub gender: Option<String>,
}

impl AnalysisContext {
    pub fn new(symptoms: &str, age: Option<String>, gender: Option<String>) -> Self {
        Self {
            symptoms: symptoms.to_string(),
            age: age.filter(|a| !a.trim().is_empty()),
            gender: gender.filter(|g| !g.trim().is_empty()),
        }
    }
}

/// How urgently the user should act on a suggested condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    ImmediateAttention,
    DoctorVisit,
    SelfCare,
}

/// A single possible condition suggested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub common_symptoms: Vec<String>,
    pub urgency_level: UrgencyLevel,
}

/// The analysis returned to the caller.
///
/// Either structured (`raw_response` absent, fields taken directly from the
/// parsed model output; missing keys default rather than fail) or degraded
/// (`possible_conditions` empty, `raw_response` holding the unparsed model
/// text). Never a mix of the two.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub possible_conditions: Vec<Condition>,
    #[serde(default)]
    pub disclaimer: String,
    #[serde(default)]
    pub general_advice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl AnalysisResult {
    pub fn is_degraded(&self) -> bool {
        self.raw_response.is_some()
    }
}

/// Upstream text-completion provider abstraction (allows mocking).
pub trait TextCompletion {
    fn complete(&self, model: &str, prompt: &str) -> Result<String, AnalysisError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_drops_blank_optional_fields() {
        let ctx = AnalysisContext::new(
            "headache",
            Some("   ".to_string()),
            Some("female".to_string()),
        );
        assert!(ctx.age.is_none());
        assert_eq!(ctx.gender.as_deref(), Some("female"));
    }

    #[test]
    fn urgency_level_uses_snake_case_on_the_wire() {
        let level: UrgencyLevel = serde_json::from_str("\"immediate_attention\"").unwrap();
        assert_eq!(level, UrgencyLevel::ImmediateAttention);
        assert_eq!(
            serde_json::to_string(&UrgencyLevel::SelfCare).unwrap(),
            "\"self_care\""
        );
    }

    #[test]
    fn unknown_urgency_level_is_rejected() {
        let result: Result<UrgencyLevel, _> = serde_json::from_str("\"call_a_friend\"");
        assert!(result.is_err());
    }

    #[test]
    fn structured_result_omits_raw_response_field() {
        let result = AnalysisResult {
            possible_conditions: vec![],
            disclaimer: "d".into(),
            general_advice: "g".into(),
            raw_response: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("raw_response").is_none());
        assert!(!result.is_degraded());
    }

    #[test]
    fn missing_keys_deserialize_to_defaults() {
        let result: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert!(result.possible_conditions.is_empty());
        assert!(result.disclaimer.is_empty());
        assert!(result.raw_response.is_none());
    }
}
