//! Titration run lifecycle
//!
//! A [`TitrationRun`] bundles what one experiment needs: the setup, the
//! chosen indicator, the driver and the caller-owned state. It enforces the
//! lifecycle rules:
//!
//! - reagents and indicator can only change while no titrant has been added
//! - changing the regime resets the run
//! - reset is idempotent and discards all recorded samples

use crate::chemistry::{indicator_color, IndicatorSpec, Rgba, TitrationRegime, TitrationSetup};
use crate::config::SimulationConfig;
use crate::error::{Result, TitrationError};
use crate::simulation::driver::TitrationDriver;
use crate::simulation::state::{Sample, SimulationState};

/// One titration experiment, from setup to finished curve
#[derive(Debug, Clone)]
pub struct TitrationRun {
    setup: TitrationSetup,
    indicator: IndicatorSpec,
    driver: TitrationDriver,
    state: SimulationState,
}

impl TitrationRun {
    /// Create a run at zero added volume
    pub fn new(setup: TitrationSetup, indicator: IndicatorSpec, driver: TitrationDriver) -> Result<Self> {
        setup.validate()?;
        Ok(Self {
            setup,
            indicator,
            driver,
            state: SimulationState::new(),
        })
    }

    /// Create a run from the preset and driver settings of a configuration
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let driver = TitrationDriver::from_config(config)?;
        let setup = config.preset.setup()?;
        Self::new(setup, config.preset.indicator.spec(), driver)
    }

    pub fn setup(&self) -> &TitrationSetup {
        &self.setup
    }

    pub fn indicator(&self) -> &IndicatorSpec {
        &self.indicator
    }

    pub fn driver(&self) -> &TitrationDriver {
        &self.driver
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn samples(&self) -> &[Sample] {
        self.state.samples()
    }

    pub fn is_running(&self) -> bool {
        self.state.running()
    }

    /// Titrant has been added or the run is in progress
    pub fn is_locked(&self) -> bool {
        self.state.volume_added_ml() > 0.0 || self.state.running()
    }

    /// The burette is empty: nothing left to add
    pub fn is_finished(&self) -> bool {
        self.state.volume_added_ml() >= self.driver.max_volume_ml()
    }

    /// Replace reagents (and regime) before the run starts
    ///
    /// # Errors
    ///
    /// `SetupLocked` once titrant has been added; validation errors for
    /// invalid reagents.
    pub fn set_setup(&mut self, setup: TitrationSetup) -> Result<()> {
        if self.is_locked() {
            return Err(TitrationError::SetupLocked);
        }
        setup.validate()?;
        self.setup = setup;
        Ok(())
    }

    /// Replace the indicator before the run starts
    pub fn set_indicator(&mut self, indicator: IndicatorSpec) -> Result<()> {
        if self.is_locked() {
            return Err(TitrationError::SetupLocked);
        }
        self.indicator = indicator;
        Ok(())
    }

    /// Switch regime; always allowed, always resets the run
    pub fn set_regime(&mut self, regime: TitrationRegime) {
        self.setup.regime = regime;
        self.reset();
    }

    /// Start (or resume) adding titrant
    pub fn start(&mut self) -> bool {
        self.driver.start(&mut self.state)
    }

    pub fn pause(&mut self) {
        self.driver.pause(&mut self.state);
    }

    /// Start when paused, pause when running
    pub fn toggle(&mut self) -> bool {
        if self.state.running() {
            self.pause();
            false
        } else {
            self.start()
        }
    }

    /// Advance one driver step
    pub fn tick(&mut self) -> Result<Option<Sample>> {
        self.driver.tick(&self.setup, &mut self.state)
    }

    /// Tick until the driver stops, returning the number of samples recorded
    pub fn finish(&mut self) -> Result<usize> {
        if !self.state.running() {
            self.start();
        }
        let mut recorded = 0;
        while self.tick()?.is_some() {
            recorded += 1;
        }
        Ok(recorded)
    }

    /// Back to zero added volume with no samples
    pub fn reset(&mut self) {
        if !self.state.is_pristine() || self.state.running() {
            log::info!("resetting titration run ({})", self.setup.regime.name());
        }
        self.state.reset();
    }

    /// pH at the current added volume
    pub fn current_ph(&self) -> Result<f64> {
        self.driver.engine().ph_for(&self.setup, self.state.volume_added_ml())
    }

    /// Flask colour at the current added volume
    pub fn current_color(&self) -> Result<Rgba> {
        Ok(indicator_color(self.current_ph()?, &self.indicator))
    }

    /// Equivalence volume for the current setup (mL)
    pub fn equivalence_volume(&self) -> f64 {
        self.driver
            .engine()
            .equivalence_volume(&self.setup.analyte, self.setup.titrant_concentration)
    }

    /// Whether the equivalence point falls inside the simulated range
    pub fn equivalence_visible(&self) -> bool {
        let v_eq = self.equivalence_volume();
        v_eq.is_finite() && v_eq <= self.driver.max_volume_ml()
    }

    /// Fraction of the burette still full, in `[0, 1]`
    pub fn burette_level(&self) -> f64 {
        (1.0 - self.state.volume_added_ml() / self.driver.max_volume_ml()).clamp(0.0, 1.0)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::{Indicator, ReagentSpec};

    fn run() -> TitrationRun {
        let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
        let setup = TitrationSetup::new(analyte, 0.1, TitrationRegime::StrongAnalyteStrongTitrant).unwrap();
        TitrationRun::new(setup, Indicator::Phenolphthalein.spec(), TitrationDriver::default()).unwrap()
    }

    #[test]
    fn test_setup_locked_after_first_tick() {
        let mut run = run();
        let other = *run.setup();
        assert!(run.set_setup(other).is_ok());

        run.start();
        run.tick().unwrap();

        assert_eq!(run.set_setup(other).unwrap_err(), TitrationError::SetupLocked);
        assert_eq!(
            run.set_indicator(Indicator::Litmus.spec()).unwrap_err(),
            TitrationError::SetupLocked
        );
    }

    #[test]
    fn test_regime_change_resets() {
        let mut run = run();
        run.start();
        for _ in 0..10 {
            run.tick().unwrap();
        }
        assert_eq!(run.samples().len(), 10);

        run.set_regime(TitrationRegime::WeakAnalyteStrongTitrant);
        assert!(run.state().is_pristine());
        assert_eq!(run.setup().regime, TitrationRegime::WeakAnalyteStrongTitrant);
    }

    #[test]
    fn test_toggle() {
        let mut run = run();
        assert!(run.toggle());
        assert!(run.is_running());
        assert!(!run.toggle());
        assert!(!run.is_running());
    }

    #[test]
    fn test_finish_and_colour() {
        let mut run = run();
        assert!(run.current_color().unwrap().is_transparent());

        let recorded = run.finish().unwrap();
        assert_eq!(recorded, 500);
        assert!(run.is_finished());
        assert_eq!(run.burette_level(), 0.0);
        assert_eq!(run.current_color().unwrap(), Rgba::PINK);
    }

    #[test]
    fn test_equivalence_visibility() {
        let mut run = run();
        assert!(run.equivalence_visible());

        let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
        let dilute = TitrationSetup::new(analyte, 0.01, TitrationRegime::StrongAnalyteStrongTitrant).unwrap();
        run.set_setup(dilute).unwrap();
        assert_eq!(run.equivalence_volume(), 250.0);
        assert!(!run.equivalence_visible());
    }

    #[test]
    fn test_reset_twice() {
        let mut run = run();
        run.finish().unwrap();
        run.reset();
        run.reset();
        assert!(run.state().is_pristine());
        assert!(!run.is_locked());
    }
}
