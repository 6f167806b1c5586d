use super::types::AnalysisResult;

/// Disclaimer used when the model reply could not be parsed as JSON.
pub const FALLBACK_DISCLAIMER: &str = "IMPORTANT: This information is not a diagnosis. \
     Always consult with a healthcare professional about your symptoms.";

/// General advice used when the model reply could not be parsed as JSON.
pub const FALLBACK_GENERAL_ADVICE: &str =
    "Please seek medical attention if you're concerned about your symptoms.";

/// Parse the model's free-text reply into an `AnalysisResult`.
///
/// Models don't reliably honor format instructions, so a reply that fails to
/// parse is an expected path, not an error: the caller gets a result carrying
/// the original unparsed text instead. This function never fails.
pub fn parse_analysis_response(response: &str) -> AnalysisResult {
    let candidate = extract_json_candidate(response);

    match serde_json::from_str::<AnalysisResult>(candidate) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, "analysis reply is not valid JSON, keeping raw text");
            AnalysisResult {
                possible_conditions: Vec::new(),
                disclaimer: FALLBACK_DISCLAIMER.to_string(),
                general_advice: FALLBACK_GENERAL_ADVICE.to_string(),
                raw_response: Some(response.to_string()),
            }
        }
    }
}

/// Unwrap the JSON payload from a reply that may fence it in a code block.
///
/// A json-tagged fence wins over a bare fence; an unclosed fence yields the
/// rest of the text. Without any fence the reply is used as-is.
fn extract_json_candidate(response: &str) -> &str {
    if let Some(start) = response.find("```json") {
        let rest = &response[start + "```json".len()..];
        let end = rest.find("```").unwrap_or(rest.len());
        return rest[..end].trim();
    }

    if let Some(start) = response.find("```") {
        let rest = &response[start + 3..];
        let end = rest.find("```").unwrap_or(rest.len());
        return rest[..end].trim();
    }

    response
}
