//! Simulation configuration
//!
//! Settings are grouped by concern and loaded from an optional JSON file.
//! Missing or malformed files fall back to the built-in defaults, which
//! reproduce the classroom experiment: 25 mL of 0.1 M strong acid titrated
//! with 0.1 M strong base in 0.1 mL steps up to 50 mL.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::chemistry::{
    Indicator, ReagentSpec, TitrationRegime, TitrationSetup, DEFAULT_EQUIVALENCE_TOLERANCE,
};
use crate::error::{Result, TitrationError};

/// Top-level configuration container
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Burette and tick settings
    pub driver: DriverSettings,
    /// pH engine settings
    pub engine: EngineSettings,
    /// Initial experiment parameters
    pub preset: ExperimentPreset,
}

impl SimulationConfig {
    /// Load configuration from a JSON file, or use defaults if it doesn't exist
    /// or can't be parsed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match Self::from_json_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded simulation configuration from {:?}", path.as_ref());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to load simulation configuration: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Simulation configuration file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TitrationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize as pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TitrationError::InvalidConfig(e.to_string()))
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.driver.validate()?;
        self.engine.validate()?;
        self.preset.setup().map(|_| ())
    }
}

/// Burette and tick settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Titrant added per tick (mL)
    pub step_ml: f64,

    /// Burette capacity (mL)
    pub max_volume_ml: f64,

    /// Interval between ticks for interactive front-ends (ms)
    pub tick_interval_ms: u64,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            step_ml: 0.1,
            max_volume_ml: 50.0,
            tick_interval_ms: 100,
        }
    }
}

impl DriverSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.step_ml.is_finite() || self.step_ml <= 0.0 {
            return Err(TitrationError::InvalidConfig(format!(
                "driver.step_ml must be positive, got {}",
                self.step_ml
            )));
        }
        if !self.max_volume_ml.is_finite() || self.max_volume_ml < self.step_ml {
            return Err(TitrationError::InvalidConfig(format!(
                "driver.max_volume_ml must be at least one step, got {}",
                self.max_volume_ml
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(TitrationError::InvalidConfig(
                "driver.tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}

/// pH engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Relative tolerance for equivalence detection
    pub equivalence_tolerance: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { equivalence_tolerance: DEFAULT_EQUIVALENCE_TOLERANCE }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.equivalence_tolerance.is_finite() || self.equivalence_tolerance < 0.0 {
            return Err(TitrationError::InvalidConfig(format!(
                "engine.equivalence_tolerance must be non-negative, got {}",
                self.equivalence_tolerance
            )));
        }
        Ok(())
    }
}

/// Initial experiment parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentPreset {
    pub analyte_volume_ml: f64,
    pub analyte_concentration: f64,
    pub titrant_concentration: f64,
    pub regime: TitrationRegime,
    pub indicator: Indicator,
}

impl Default for ExperimentPreset {
    fn default() -> Self {
        Self {
            analyte_volume_ml: 25.0,
            analyte_concentration: 0.1,
            titrant_concentration: 0.1,
            regime: TitrationRegime::StrongAnalyteStrongTitrant,
            indicator: Indicator::Phenolphthalein,
        }
    }
}

impl ExperimentPreset {
    /// Validated setup described by this preset
    pub fn setup(&self) -> Result<TitrationSetup> {
        let analyte = ReagentSpec::new(self.analyte_volume_ml, self.analyte_concentration)?;
        TitrationSetup::new(analyte, self.titrant_concentration, self.regime)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.driver.step_ml, 0.1);
        assert_eq!(config.driver.max_volume_ml, 50.0);
        assert_eq!(config.preset.indicator, Indicator::Phenolphthalein);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "preset": { "regime": "weak_analyte_strong_titrant", "indicator": "litmus" } }"#;
        let config = SimulationConfig::from_json_str(json).unwrap();

        assert_eq!(config.preset.regime, TitrationRegime::WeakAnalyteStrongTitrant);
        assert_eq!(config.preset.indicator, Indicator::Litmus);
        assert_eq!(config.preset.analyte_volume_ml, 25.0);
        assert_eq!(config.driver, DriverSettings::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let json = r#"{ "driver": { "step_ml": -0.1 } }"#;
        assert!(matches!(
            SimulationConfig::from_json_str(json),
            Err(TitrationError::InvalidConfig(_))
        ));

        let json = r#"{ "preset": { "analyte_concentration": 0.0 } }"#;
        assert!(matches!(
            SimulationConfig::from_json_str(json),
            Err(TitrationError::InvalidReagent { .. })
        ));
    }

    #[test]
    fn test_round_trip_through_file() {
        let mut config = SimulationConfig::default();
        config.driver.step_ml = 0.5;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_json_string().unwrap().as_bytes()).unwrap();

        let loaded = SimulationConfig::load_or_default(file.path());
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_or_malformed_file_falls_back() {
        let missing = SimulationConfig::load_or_default("does/not/exist.json");
        assert_eq!(missing, SimulationConfig::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert_eq!(SimulationConfig::load_or_default(file.path()), SimulationConfig::default());
    }
}
