//! Tutor errors

/// Message shown to students whatever went wrong
pub const GENERIC_USER_MESSAGE: &str = "Something went wrong while contacting the tutor. Please try again.";

/// Errors raised by the tutor flows
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TutorError {
    /// A `{{{field}}}` placeholder has no matching input field
    #[error("prompt '{template}' needs field '{field}' which the input does not provide")]
    MissingField { template: String, field: String },

    /// The input could not be turned into a JSON object
    #[error("invalid flow input: {0}")]
    InvalidInput(String),

    /// The language model failed to produce a reply
    #[error("language model error: {0}")]
    Model(String),

    /// The reply contained no JSON object
    #[error("reply contains no JSON object")]
    NoJson,

    /// The JSON object did not match the expected output
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

impl TutorError {
    /// What a student-facing front-end should display
    ///
    /// Details stay in the logs; the student always sees the same message.
    pub fn user_message(&self) -> &'static str {
        GENERIC_USER_MESSAGE
    }
}
