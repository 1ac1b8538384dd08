//! Error types for the titration engine and simulation driver
//!
//! Numeric domain errors (log of a non-positive concentration) never show up
//! here: the engine prevents them with branch guards. What remains is invalid
//! input rejected at the boundary, and lifecycle misuse of a run.

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TitrationError>;

/// Errors raised by the titration engine, driver and configuration layer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TitrationError {
    /// A reagent field is zero, negative or not finite
    #[error("invalid reagent {field}: {value} (must be a finite positive number)")]
    InvalidReagent {
        /// Name of the offending field
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Titrant concentration is zero, negative or not finite
    #[error("invalid titrant concentration: {0} mol/L (must be a finite positive number)")]
    InvalidTitrantConcentration(f64),

    /// Volume of titrant added is negative or not finite
    #[error("invalid added volume: {0} mL (must be finite and non-negative)")]
    InvalidVolume(f64),

    /// Caller tried to move the added volume backwards without a reset
    #[error("added volume cannot decrease from {previous} mL to {requested} mL without a reset")]
    VolumeDecreased {
        /// Volume already reached
        previous: f64,
        /// Requested volume
        requested: f64,
    },

    /// Reagents or indicator changed after titrant was already added
    #[error("setup is locked once titrant has been added; reset the run first")]
    SetupLocked,

    /// Configuration values are inconsistent
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Equivalence volume is infinite or not a number
    #[error("equivalence point cannot be reached")]
    UnreachableEquivalence,
}

impl TitrationError {
    /// Whether the error comes from user-supplied numbers (as opposed to
    /// lifecycle misuse)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TitrationError::InvalidReagent { .. }
                | TitrationError::InvalidTitrantConcentration(_)
                | TitrationError::InvalidVolume(_)
                | TitrationError::InvalidConfig(_)
        )
    }
}
