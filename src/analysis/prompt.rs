use super::types::AnalysisContext;

/// Build the symptom-analysis prompt for a single request.
///
/// Pure function of the context: identical contexts always produce the
/// identical string. Age and gender lines are appended only when the user
/// actually provided them.
pub fn build_analysis_prompt(ctx: &AnalysisContext) -> String {
    let age_line = match ctx.age.as_deref() {
        Some(age) => format!("User age: {age}\n"),
        None => String::new(),
    };
    let gender_line = match ctx.gender.as_deref() {
        Some(gender) => format!("User gender: {gender}\n"),
        None => String::new(),
    };

    format!(
        r#"You are a medical symptoms analyzer. Based on the symptoms provided, suggest possible
medical conditions. For each condition, provide a brief description and common symptoms.
Also suggest if the user should seek immediate medical attention, visit a doctor soon,
or if the condition may resolve on its own with home care.

DO NOT diagnose the user. Make it clear these are only possibilities based on limited
information. Return your response as a JSON object with the following structure:
{{
    "possible_conditions": [
        {{
            "name": "Condition name",
            "description": "Brief description",
            "common_symptoms": ["symptom1", "symptom2", ...],
            "urgency_level": "immediate_attention|doctor_visit|self_care"
        }},
        ...
    ],
    "disclaimer": "Medical disclaimer text",
    "general_advice": "General health advice"
}}

User symptoms: {symptoms}
{age_line}{gender_line}"#,
        symptoms = ctx.symptoms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(symptoms: &str, age: Option<&str>, gender: Option<&str>) -> AnalysisContext {
        AnalysisContext::new(
            symptoms,
            age.map(str::to_string),
            gender.map(str::to_string),
        )
    }

    #[test]
    fn prompt_is_deterministic() {
        let context = ctx("persistent cough", Some("30"), None);
        assert_eq!(
            build_analysis_prompt(&context),
            build_analysis_prompt(&context)
        );
    }

    #[test]
    fn prompt_contains_symptoms_verbatim() {
        let prompt = build_analysis_prompt(&ctx("sharp pain behind the left eye", None, None));
        assert!(prompt.contains("User symptoms: sharp pain behind the left eye"));
    }

    #[test]
    fn prompt_includes_age_and_gender_only_when_present() {
        let with_both = build_analysis_prompt(&ctx("headache", Some("45"), Some("female")));
        assert!(with_both.contains("User age: 45"));
        assert!(with_both.contains("User gender: female"));

        let without = build_analysis_prompt(&ctx("headache", None, None));
        assert!(!without.contains("User age:"));
        assert!(!without.contains("User gender:"));
    }

    #[test]
    fn blank_optional_fields_are_omitted() {
        let prompt = build_analysis_prompt(&ctx("headache", Some("  "), Some("")));
        assert!(!prompt.contains("User age:"));
        assert!(!prompt.contains("User gender:"));
    }

    #[test]
    fn prompt_specifies_the_output_contract() {
        let prompt = build_analysis_prompt(&ctx("headache", None, None));
        assert!(prompt.contains("DO NOT diagnose"));
        assert!(prompt.contains("\"possible_conditions\""));
        assert!(prompt.contains("immediate_attention|doctor_visit|self_care"));
        assert!(prompt.contains("\"disclaimer\""));
        assert!(prompt.contains("\"general_advice\""));
    }

    /// symptoms + age 45 + gender female → both demographic lines present
    /// alongside the verbatim symptom text.
    #[test]
    fn full_scenario_prompt() {
        let prompt = build_analysis_prompt(&ctx(
            "persistent headache and blurred vision",
            Some("45"),
            Some("female"),
        ));
        assert!(prompt.contains("persistent headache and blurred vision"));
        assert!(prompt.contains("User age: 45"));
        assert!(prompt.contains("User gender: female"));
    }
}
