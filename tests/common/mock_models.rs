//! Mock language models for tutor tests

use std::sync::Mutex;

use serde_json::Value;
use titration_rs::tutor::{LanguageModel, PromptTemplate, TutorError};

// =================================================================================================
// Scripted model: fixed reply, records prompts
// =================================================================================================

/// Returns the same reply to every call and keeps the rendered prompts
pub struct ScriptedModel {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Rendered prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl LanguageModel for ScriptedModel {
    fn generate(&self, template: &PromptTemplate, input: &Value) -> Result<String, TutorError> {
        let prompt = template.render(input)?;
        self.prompts.lock().unwrap().push(prompt);
        Ok(self.reply.clone())
    }
}

// =================================================================================================
// Failing model
// =================================================================================================

/// Always fails, counting attempts
#[derive(Default)]
pub struct FailingModel {
    attempts: Mutex<usize>,
}

impl FailingModel {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl LanguageModel for FailingModel {
    fn generate(&self, _template: &PromptTemplate, _input: &Value) -> Result<String, TutorError> {
        *self.attempts.lock().unwrap() += 1;
        Err(TutorError::Model("service unavailable".to_string()))
    }
}
