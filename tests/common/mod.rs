//! Common utilities for integration tests

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{FailingModel, ScriptedModel};
pub use test_helpers::{
    assert_monotonic,
    finished_run,
    relative_error,
    standard_setup,
};
