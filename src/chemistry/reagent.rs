//! Reagent and regime types
//!
//! This module defines the value types the engine computes on:
//! - `ReagentSpec`: volume and concentration of a solution
//! - `TitrationRegime`: which acid/base pairing is being titrated
//! - `TitrationSetup`: validated combination of analyte, titrant and regime

use serde::{Deserialize, Serialize};

use crate::error::{Result, TitrationError};

// =================================================================================================
// Reagent specification
// =================================================================================================

/// Volume and concentration of a solution
///
/// Describes the analyte (fixed volume, fixed concentration). For the titrant
/// only the concentration matters; the volume is the independent variable of
/// the simulation.
///
/// # Example
/// ```
/// use titration_rs::chemistry::ReagentSpec;
///
/// let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
/// assert!((analyte.moles() - 0.0025).abs() < 1e-12);
/// assert!(ReagentSpec::new(0.0, 0.1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReagentSpec {
    /// Volume (mL)
    pub volume_ml: f64,

    /// Concentration (mol/L)
    pub concentration: f64,
}

impl ReagentSpec {
    /// Create a validated reagent
    pub fn new(volume_ml: f64, concentration: f64) -> Result<Self> {
        let reagent = Self { volume_ml, concentration };
        reagent.validate()?;
        Ok(reagent)
    }

    /// Check that volume and concentration are finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        if !self.volume_ml.is_finite() || self.volume_ml <= 0.0 {
            return Err(TitrationError::InvalidReagent {
                field: "volume_ml",
                value: self.volume_ml,
            });
        }
        if !self.concentration.is_finite() || self.concentration <= 0.0 {
            return Err(TitrationError::InvalidReagent {
                field: "concentration",
                value: self.concentration,
            });
        }
        Ok(())
    }

    /// Amount of substance (mol)
    pub fn moles(&self) -> f64 {
        self.concentration * self.volume_ml / 1000.0
    }
}

// =================================================================================================
// Titration regime
// =================================================================================================

/// Acid/base pairing that selects the closed-form pH formula
///
/// `Challenge` computes pH exactly like `StrongAnalyteStrongTitrant`; the
/// difference is that the titrant concentration is hidden from the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitrationRegime {
    /// Strong acid titrated by a strong base
    StrongAnalyteStrongTitrant,

    /// Weak acid (pKa 4.76) titrated by a strong base
    WeakAnalyteStrongTitrant,

    /// Strong acid titrated by a weak base (pKb 4.75)
    StrongAnalyteWeakTitrant,

    /// Strong-strong titration with an unknown titrant concentration
    Challenge,
}

impl TitrationRegime {
    /// All regimes, in display order
    pub const ALL: [TitrationRegime; 4] = [
        TitrationRegime::StrongAnalyteStrongTitrant,
        TitrationRegime::WeakAnalyteStrongTitrant,
        TitrationRegime::StrongAnalyteWeakTitrant,
        TitrationRegime::Challenge,
    ];

    /// Short identifier
    pub fn name(&self) -> &'static str {
        match self {
            TitrationRegime::StrongAnalyteStrongTitrant => "strong_strong",
            TitrationRegime::WeakAnalyteStrongTitrant => "weak_strong",
            TitrationRegime::StrongAnalyteWeakTitrant => "strong_weak",
            TitrationRegime::Challenge => "challenge",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            TitrationRegime::StrongAnalyteStrongTitrant => "Strong Acid - Strong Base",
            TitrationRegime::WeakAnalyteStrongTitrant => "Weak Acid - Strong Base",
            TitrationRegime::StrongAnalyteWeakTitrant => "Strong Acid - Weak Base",
            TitrationRegime::Challenge => "Challenge: Unknown Concentration",
        }
    }

    /// Whether the titrant concentration must stay hidden from the consumer
    pub fn hides_titrant(&self) -> bool {
        matches!(self, TitrationRegime::Challenge)
    }
}

impl std::fmt::Display for TitrationRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =================================================================================================
// Titration setup
// =================================================================================================

/// Validated parameters of one titration run
///
/// Fixed for the duration of a run. Build it once, then hand it to the
/// engine or the driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TitrationSetup {
    /// Solution in the flask
    pub analyte: ReagentSpec,

    /// Concentration of the solution in the burette (mol/L)
    pub titrant_concentration: f64,

    /// Acid/base pairing
    pub regime: TitrationRegime,
}

impl TitrationSetup {
    /// Create a validated setup
    pub fn new(
        analyte: ReagentSpec,
        titrant_concentration: f64,
        regime: TitrationRegime,
    ) -> Result<Self> {
        let setup = Self { analyte, titrant_concentration, regime };
        setup.validate()?;
        Ok(setup)
    }

    /// Validate every field
    pub fn validate(&self) -> Result<()> {
        self.analyte.validate()?;
        validate_titrant_concentration(self.titrant_concentration)
    }

    /// Same setup with a different regime
    pub fn with_regime(mut self, regime: TitrationRegime) -> Self {
        self.regime = regime;
        self
    }
}

pub(crate) fn validate_titrant_concentration(concentration: f64) -> Result<()> {
    if !concentration.is_finite() || concentration <= 0.0 {
        return Err(TitrationError::InvalidTitrantConcentration(concentration));
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
