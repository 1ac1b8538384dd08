//! Language-model tutor
//!
//! Two flows sit on top of an injected [`LanguageModel`]:
//!
//! - [`analyze_student_performance`]: knowledge gaps and suggested resources
//!   from quiz results, experiment results and course material
//! - [`chemistry_fact`]: one fun chemistry fact
//!
//! The crate ships no model client. Hosts implement [`LanguageModel`] for
//! whatever backend they use; tests use a canned mock.
//!
//! # Example
//!
//! ```rust
//! use serde_json::Value;
//! use titration_rs::tutor::{chemistry_fact, LanguageModel, PromptTemplate, TutorError};
//!
//! struct Offline;
//!
//! impl LanguageModel for Offline {
//!     fn generate(&self, _: &PromptTemplate, _: &Value) -> Result<String, TutorError> {
//!         Ok(r#"{"fact": "Water expands when it freezes."}"#.to_string())
//!     }
//! }
//!
//! let fact = chemistry_fact(&Offline).unwrap();
//! assert_eq!(fact.fact, "Water expands when it freezes.");
//! ```

mod error;
mod flows;
mod prompt;

use serde_json::Value;

pub use error::{TutorError, GENERIC_USER_MESSAGE};
pub use flows::{
    analyze_student_performance,
    chemistry_fact,
    extract_json_object,
    ChemistryFact,
    PerformanceAnalysis,
    PerformanceInput,
};
pub use prompt::PromptTemplate;

/// Text generation backend
///
/// `generate` receives the template and its input separately so a backend can
/// use native templating; [`PromptTemplate::render`] gives the plain text.
pub trait LanguageModel: Send + Sync {
    fn generate(&self, template: &PromptTemplate, input: &Value) -> Result<String, TutorError>;
}
