//! Tutor flows
//!
//! A flow renders its prompt, asks the model, then pulls the first JSON
//! object out of the reply and deserializes it. Models often wrap JSON in
//! prose or Markdown code fences, so everything around the object is
//! ignored. There is no retry: a failed call is reported to the caller.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::output::export::ExperimentReport;
use crate::tutor::error::TutorError;
use crate::tutor::prompt::PromptTemplate;
use crate::tutor::LanguageModel;

/// Input of [`analyze_student_performance`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInput {
    /// Quiz results, as JSON text
    pub quiz_results: String,
    /// Experiment results, as JSON text
    pub experiment_results: String,
    /// Course material the student is working from
    pub course_material: String,
}

impl PerformanceInput {
    pub fn new(
        quiz_results: impl Into<String>,
        experiment_results: impl Into<String>,
        course_material: impl Into<String>,
    ) -> Self {
        Self {
            quiz_results: quiz_results.into(),
            experiment_results: experiment_results.into(),
            course_material: course_material.into(),
        }
    }

    /// Use a simulated run as the experiment results
    pub fn with_report(
        quiz_results: impl Into<String>,
        report: &ExperimentReport,
        course_material: impl Into<String>,
    ) -> Result<Self, TutorError> {
        let experiment_results = report
            .to_json_string()
            .map_err(|e| TutorError::InvalidInput(e.to_string()))?;
        Ok(Self::new(quiz_results, experiment_results, course_material))
    }
}

/// Output of [`analyze_student_performance`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    #[serde(alias = "knowledge_gaps")]
    pub knowledge_gaps: String,
    #[serde(alias = "suggested_resources")]
    pub suggested_resources: String,
}

/// Output of [`chemistry_fact`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemistryFact {
    pub fact: String,
}

/// Identify knowledge gaps and suggest resources
pub fn analyze_student_performance(
    model: &dyn LanguageModel,
    input: &PerformanceInput,
) -> Result<PerformanceAnalysis, TutorError> {
    let input = serde_json::to_value(input).map_err(|e| TutorError::InvalidInput(e.to_string()))?;
    run_flow(model, &PromptTemplate::analyze_student_performance(), &input)
}

/// One surprising chemistry fact
pub fn chemistry_fact(model: &dyn LanguageModel) -> Result<ChemistryFact, TutorError> {
    run_flow(model, &PromptTemplate::chemistry_fact(), &Value::Object(Default::default()))
}

fn run_flow<T: DeserializeOwned>(
    model: &dyn LanguageModel,
    template: &PromptTemplate,
    input: &Value,
) -> Result<T, TutorError> {
    // Fail on missing fields before spending a model call
    let prompt = template.render(input)?;
    log::debug!("running flow '{}' ({} prompt bytes)", template.name, prompt.len());

    let reply = model.generate(template, input).inspect_err(|e| {
        log::warn!("flow '{}' failed: {}", template.name, e);
    })?;

    let Some(object) = extract_json_object(&reply) else {
        log::warn!("flow '{}' reply has no JSON object", template.name);
        return Err(TutorError::NoJson);
    };

    serde_json::from_str(object).map_err(|e| {
        log::warn!("flow '{}' reply does not match its schema: {}", template.name, e);
        TutorError::MalformedReply(e.to_string())
    })
}

/// First balanced `{ ... }` in `text`, ignoring braces inside JSON strings
///
/// Returns `None` when there is no opening brace or it is never closed.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(&'static str);

    impl LanguageModel for Canned {
        fn generate(&self, template: &PromptTemplate, input: &Value) -> Result<String, TutorError> {
            template.render(input)?;
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl LanguageModel for Failing {
        fn generate(&self, _: &PromptTemplate, _: &Value) -> Result<String, TutorError> {
            Err(TutorError::Model("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_extract_plain_and_fenced() {
        assert_eq!(extract_json_object(r#"{"fact":"x"}"#), Some(r#"{"fact":"x"}"#));

        let fenced = "Sure!\n```json\n{\"fact\": \"Helium {is} light\"}\n```\nEnjoy.";
        assert_eq!(extract_json_object(fenced), Some("{\"fact\": \"Helium {is} light\"}"));
    }

    #[test]
    fn test_extract_nested_and_escaped() {
        let text = r#"prefix {"a": {"b": "quote \" and } brace"}} suffix {"c": 1}"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"a": {"b": "quote \" and } brace"}}"#)
        );
    }

    #[test]
    fn test_extract_none() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{\"open\": 1"), None);
    }

    #[test]
    fn test_chemistry_fact() {
        let model = Canned("```json\n{\"fact\": \"Glass is an amorphous solid.\"}\n```");
        let fact = chemistry_fact(&model).unwrap();
        assert_eq!(fact.fact, "Glass is an amorphous solid.");
    }

    #[test]
    fn test_analysis_accepts_snake_case_keys() {
        let model = Canned(r#"{"knowledge_gaps": "endpoints", "suggested_resources": "lab manual ch. 4"}"#);
        let input = PerformanceInput::new("[]", "{}", "Acid-base titration");
        let analysis = analyze_student_performance(&model, &input).unwrap();
        assert_eq!(analysis.knowledge_gaps, "endpoints");
        assert_eq!(analysis.suggested_resources, "lab manual ch. 4");
    }

    #[test]
    fn test_errors_propagate() {
        assert_eq!(
            chemistry_fact(&Failing).unwrap_err(),
            TutorError::Model("quota exceeded".to_string())
        );
        assert_eq!(chemistry_fact(&Canned("no idea")).unwrap_err(), TutorError::NoJson);
        assert!(matches!(
            chemistry_fact(&Canned(r#"{"trivia": "x"}"#)),
            Err(TutorError::MalformedReply(_))
        ));
    }
}
