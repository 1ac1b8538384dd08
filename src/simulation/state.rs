//! Caller-owned simulation state
//!
//! The engine is stateless; everything that changes during a run lives here
//! and is passed explicitly to the driver on each tick.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TitrationError};

/// One point of the titration curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Titrant added so far (mL)
    pub volume_ml: f64,
    /// pH at that volume
    pub ph: f64,
}

impl Sample {
    pub fn new(volume_ml: f64, ph: f64) -> Self {
        Self { volume_ml, ph }
    }
}

/// Progress of one titration run
///
/// # Invariants
///
/// - `volume_added_ml` never decreases between resets
/// - `samples` are ordered by volume
/// - `steps` counts the fixed-size driver steps taken so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    volume_added_ml: f64,
    samples: Vec<Sample>,
    running: bool,
    steps: usize,
}

impl SimulationState {
    /// Fresh state at zero added volume
    pub fn new() -> Self {
        Self::default()
    }

    pub fn volume_added_ml(&self) -> f64 {
        self.volume_added_ml
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn last_sample(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// No titrant added and nothing recorded
    pub fn is_pristine(&self) -> bool {
        self.volume_added_ml == 0.0 && self.samples.is_empty() && self.steps == 0
    }

    /// Volume column of the curve
    pub fn volumes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.volume_ml).collect()
    }

    /// pH column of the curve
    pub fn ph_values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.ph).collect()
    }

    /// Discard everything and go back to zero added volume
    ///
    /// Calling it twice is the same as calling it once.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Append a sample, enforcing monotonic volume
    pub(crate) fn record(&mut self, steps: usize, volume_ml: f64, ph: f64) -> Result<Sample> {
        if volume_ml < self.volume_added_ml {
            return Err(TitrationError::VolumeDecreased {
                previous: self.volume_added_ml,
                requested: volume_ml,
            });
        }

        let sample = Sample::new(volume_ml, ph);
        self.volume_added_ml = volume_ml;
        self.steps = steps;
        self.samples.push(sample);
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_pristine() {
        let state = SimulationState::new();
        assert!(state.is_pristine());
        assert!(!state.running());
        assert!(state.last_sample().is_none());
    }

    #[test]
    fn test_record_appends_in_order() {
        let mut state = SimulationState::new();
        state.record(1, 0.1, 1.0).unwrap();
        state.record(2, 0.2, 1.1).unwrap();

        assert_eq!(state.volumes(), vec![0.1, 0.2]);
        assert_eq!(state.ph_values(), vec![1.0, 1.1]);
        assert_eq!(state.steps(), 2);
        assert_eq!(state.volume_added_ml(), 0.2);
    }

    #[test]
    fn test_record_rejects_decreasing_volume() {
        let mut state = SimulationState::new();
        state.record(1, 5.0, 2.0).unwrap();
        let err = state.record(2, 4.0, 2.0).unwrap_err();
        assert_eq!(err, TitrationError::VolumeDecreased { previous: 5.0, requested: 4.0 });
        assert_eq!(state.samples().len(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = SimulationState::new();
        state.set_running(true);
        state.record(1, 0.1, 1.0).unwrap();

        state.reset();
        let once = state.clone();
        state.reset();

        assert_eq!(state, once);
        assert!(state.is_pristine());
        assert!(!state.running());
    }
}
