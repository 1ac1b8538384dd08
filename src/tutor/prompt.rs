//! Prompt templates
//!
//! Templates use triple-brace placeholders, `{{{field}}}`, filled from the
//! top-level fields of a JSON object. String values are inserted verbatim;
//! any other value is inserted as compact JSON.

use serde_json::Value;

use crate::tutor::error::TutorError;

const OPEN: &str = "{{{";
const CLOSE: &str = "}}}";

const ANALYZE_PERFORMANCE_TEXT: &str = "You are an AI assistant that analyzes student performance in chemistry.

Based on the student's quiz results, experiment results, and the course material, identify the student's knowledge gaps and suggest relevant learning resources.

Quiz Results: {{{quizResults}}}
Experiment Results: {{{experimentResults}}}
Course Material: {{{courseMaterial}}}

Reply with a single JSON object of the form {\"knowledgeGaps\": \"...\", \"suggestedResources\": \"...\"}.";

const CHEMISTRY_FACT_TEXT: &str = "You are a chemistry enthusiast. Provide one surprising and fun fact about chemistry.

Reply with a single JSON object of the form {\"fact\": \"...\"}.";

/// A named prompt with `{{{field}}}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: String,
    pub text: String,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }

    /// Prompt used by [`analyze_student_performance`](crate::tutor::analyze_student_performance)
    pub fn analyze_student_performance() -> Self {
        Self::new("analyzeStudentPerformancePrompt", ANALYZE_PERFORMANCE_TEXT)
    }

    /// Prompt used by [`chemistry_fact`](crate::tutor::chemistry_fact)
    pub fn chemistry_fact() -> Self {
        Self::new("chemistryFactPrompt", CHEMISTRY_FACT_TEXT)
    }

    /// Names of the placeholders, in order of appearance
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.text.as_str();
        while let Some(start) = rest.find(OPEN) {
            let after = &rest[start + OPEN.len()..];
            let Some(end) = after.find(CLOSE) else { break };
            names.push(after[..end].trim());
            rest = &after[end + CLOSE.len()..];
        }
        names
    }

    /// Substitute every placeholder with the matching field of `input`
    ///
    /// An unterminated `{{{` is kept as literal text.
    ///
    /// # Errors
    ///
    /// `MissingField` when a placeholder has no matching field, or when
    /// `input` is not an object and the template has placeholders.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    /// use titration_rs::tutor::PromptTemplate;
    ///
    /// let template = PromptTemplate::new("greet", "Hello {{{name}}}, score {{{score}}}");
    /// let text = template.render(&json!({ "name": "Ada", "score": 9 })).unwrap();
    /// assert_eq!(text, "Hello Ada, score 9");
    /// ```
    pub fn render(&self, input: &Value) -> Result<String, TutorError> {
        let mut rendered = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();

        while let Some(start) = rest.find(OPEN) {
            let after = &rest[start + OPEN.len()..];
            let Some(end) = after.find(CLOSE) else { break };

            let field = after[..end].trim();
            let value = input.get(field).ok_or_else(|| TutorError::MissingField {
                template: self.name.clone(),
                field: field.to_string(),
            })?;

            rendered.push_str(&rest[..start]);
            match value {
                Value::String(s) => rendered.push_str(s),
                other => rendered.push_str(&other.to_string()),
            }
            rest = &after[end + CLOSE.len()..];
        }

        rendered.push_str(rest);
        Ok(rendered)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
