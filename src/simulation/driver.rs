//! Fixed-step titration driver
//!
//! # Algorithm
//!
//! The driver plays the role of the burette tap. On each tick:
//!
//! 1. `steps += 1`
//! 2. `V = min(steps * step_ml, max_volume_ml)`
//! 3. compute `pH(V)` with the engine
//! 4. append `(V, pH)` to the state
//! 5. stop once `V >= max_volume_ml`
//!
//! The volume is derived from the step count rather than accumulated, so a
//! 0.1 mL step lands on 25.0 mL after 250 ticks instead of drifting.
//!
//! The driver owns no timer. An external scheduler (UI interval, test loop,
//! benchmark) calls [`TitrationDriver::tick`] at whatever rate it wants.

use crate::chemistry::engine::validate_added_volume;
use crate::chemistry::{TitrationEngine, TitrationSetup};
use crate::config::SimulationConfig;
use crate::error::{Result, TitrationError};
use crate::simulation::state::{Sample, SimulationState};

/// Default volume added per tick (mL)
pub const DEFAULT_STEP_ML: f64 = 0.1;

/// Default burette capacity (mL)
pub const DEFAULT_MAX_VOLUME_ML: f64 = 50.0;

/// Fixed-step simulation loop
///
/// # Example
///
/// ```rust
/// use titration_rs::chemistry::{ReagentSpec, TitrationRegime, TitrationSetup};
/// use titration_rs::simulation::TitrationDriver;
///
/// let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
/// let setup = TitrationSetup::new(analyte, 0.1, TitrationRegime::StrongAnalyteStrongTitrant).unwrap();
///
/// let state = TitrationDriver::default().run_to_completion(&setup).unwrap();
/// assert_eq!(state.samples().len(), 500);
/// assert_eq!(state.volume_added_ml(), 50.0);
/// assert!(!state.running());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitrationDriver {
    step_ml: f64,
    max_volume_ml: f64,
    engine: TitrationEngine,
}

impl Default for TitrationDriver {
    fn default() -> Self {
        Self {
            step_ml: DEFAULT_STEP_ML,
            max_volume_ml: DEFAULT_MAX_VOLUME_ML,
            engine: TitrationEngine::default(),
        }
    }
}

impl TitrationDriver {
    /// Create a driver
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the step or maximum volume is not a finite
    /// positive number, or when the step exceeds the maximum.
    pub fn new(step_ml: f64, max_volume_ml: f64, engine: TitrationEngine) -> Result<Self> {
        if !step_ml.is_finite() || step_ml <= 0.0 {
            return Err(TitrationError::InvalidConfig(format!(
                "step must be a finite positive volume, got {} mL",
                step_ml
            )));
        }
        if !max_volume_ml.is_finite() || max_volume_ml <= 0.0 {
            return Err(TitrationError::InvalidConfig(format!(
                "maximum volume must be a finite positive volume, got {} mL",
                max_volume_ml
            )));
        }
        if step_ml > max_volume_ml {
            return Err(TitrationError::InvalidConfig(format!(
                "step ({} mL) exceeds maximum volume ({} mL)",
                step_ml, max_volume_ml
            )));
        }
        Ok(Self { step_ml, max_volume_ml, engine })
    }

    /// Build a driver from the `driver` and `engine` sections of a configuration
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let engine = TitrationEngine::new(config.engine.equivalence_tolerance)?;
        Self::new(config.driver.step_ml, config.driver.max_volume_ml, engine)
    }

    pub fn step_ml(&self) -> f64 {
        self.step_ml
    }

    pub fn max_volume_ml(&self) -> f64 {
        self.max_volume_ml
    }

    pub fn engine(&self) -> &TitrationEngine {
        &self.engine
    }

    /// Number of ticks needed to go from empty to full
    pub fn total_steps(&self) -> usize {
        (self.max_volume_ml / self.step_ml).ceil() as usize
    }

    /// Mark the state as running, unless the burette is already empty
    ///
    /// Returns whether the state is now running.
    pub fn start(&self, state: &mut SimulationState) -> bool {
        let can_run = state.volume_added_ml() < self.max_volume_ml;
        state.set_running(can_run);
        can_run
    }

    /// Stop advancing without discarding anything
    pub fn pause(&self, state: &mut SimulationState) {
        state.set_running(false);
    }

    /// Advance one fixed step
    ///
    /// Returns the recorded sample, or `None` when the state is paused or
    /// the maximum volume was already reached.
    pub fn tick(&self, setup: &TitrationSetup, state: &mut SimulationState) -> Result<Option<Sample>> {
        if !state.running() {
            return Ok(None);
        }
        if state.volume_added_ml() >= self.max_volume_ml {
            state.set_running(false);
            return Ok(None);
        }

        let steps = state.steps() + 1;
        let volume = (steps as f64 * self.step_ml).min(self.max_volume_ml);
        let ph = self.engine.ph_for(setup, volume)?;
        let sample = state.record(steps, volume, ph)?;

        log::debug!("tick {}: V = {:.2} mL, pH = {:.3}", steps, volume, ph);

        if volume >= self.max_volume_ml {
            state.set_running(false);
            log::info!(
                "titration ({}) finished at {} mL after {} steps",
                setup.regime.name(),
                volume,
                steps
            );
        }

        Ok(Some(sample))
    }

    /// Record a sample at an arbitrary volume chosen by an external scheduler
    ///
    /// # Errors
    ///
    /// - `InvalidVolume` for negative volumes or volumes above the maximum
    /// - `VolumeDecreased` when `volume_ml` is below the current volume
    pub fn sample_at(
        &self,
        setup: &TitrationSetup,
        state: &mut SimulationState,
        volume_ml: f64,
    ) -> Result<Sample> {
        validate_added_volume(volume_ml)?;
        if volume_ml > self.max_volume_ml {
            return Err(TitrationError::InvalidVolume(volume_ml));
        }

        let ph = self.engine.ph_for(setup, volume_ml)?;
        let steps = (volume_ml / self.step_ml).floor() as usize;
        let sample = state.record(steps.max(state.steps()), volume_ml, ph)?;

        if volume_ml >= self.max_volume_ml {
            state.set_running(false);
        }
        Ok(sample)
    }

    /// Run a fresh simulation from zero to the maximum volume
    pub fn run_to_completion(&self, setup: &TitrationSetup) -> Result<SimulationState> {
        setup.validate()?;

        let mut state = SimulationState::new();
        self.start(&mut state);
        while self.tick(setup, &mut state)?.is_some() {}

        Ok(state)
    }

    /// Full titration curve, including the starting point at 0 mL
    pub fn curve(&self, setup: &TitrationSetup) -> Result<Vec<Sample>> {
        let initial = Sample::new(0.0, self.engine.ph_for(setup, 0.0)?);
        let state = self.run_to_completion(setup)?;

        let mut curve = Vec::with_capacity(state.samples().len() + 1);
        curve.push(initial);
        curve.extend_from_slice(state.samples());
        Ok(curve)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
