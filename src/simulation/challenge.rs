//! Unknown-concentration challenge
//!
//! In challenge mode the student titrates a known analyte with a titrant of
//! hidden concentration, reads the equivalence point off the curve and
//! back-calculates the concentration:
//!
//! ```text
//! c_t = n_a / V_eq = c_a * V_a / V_eq
//! ```
//!
//! The hidden value never leaves [`ChallengeRun`] except through
//! [`ChallengeRun::reveal`] or the verdict of [`ChallengeRun::check_guess`].

use std::fmt;

use crate::chemistry::{IndicatorSpec, ReagentSpec, Rgba, TitrationRegime, TitrationSetup};
use crate::error::{Result, TitrationError};
use crate::simulation::driver::TitrationDriver;
use crate::simulation::run::TitrationRun;
use crate::simulation::state::Sample;

/// Verdict on a student's concentration estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    TooLow,
    TooHigh,
}

/// Locate the equivalence point on a recorded curve
///
/// Uses the centred difference `(pH[i+1] - pH[i-1]) / (V[i+1] - V[i-1])`
/// at every interior sample and returns the volume of the steepest one.
/// Returns `None` when fewer than three samples are available or the curve
/// never rises.
pub fn detect_equivalence(samples: &[Sample]) -> Option<f64> {
    if samples.len() < 3 {
        return None;
    }

    let mut best: Option<(f64, f64)> = None;
    for window in samples.windows(3) {
        let dv = window[2].volume_ml - window[0].volume_ml;
        if dv <= 0.0 {
            continue;
        }
        let slope = (window[2].ph - window[0].ph) / dv;
        if slope <= 0.0 || !slope.is_finite() {
            continue;
        }
        if best.is_none_or(|(steepest, _)| slope > steepest) {
            best = Some((slope, window[1].volume_ml));
        }
    }

    best.map(|(_, volume)| volume)
}

/// Titrant concentration implied by an equivalence volume
///
/// # Errors
///
/// `UnreachableEquivalence` when the volume is zero, negative or not finite.
pub fn infer_titrant_concentration(analyte: &ReagentSpec, equivalence_volume_ml: f64) -> Result<f64> {
    if !equivalence_volume_ml.is_finite() || equivalence_volume_ml <= 0.0 {
        return Err(TitrationError::UnreachableEquivalence);
    }
    Ok(analyte.concentration * analyte.volume_ml / equivalence_volume_ml)
}

/// Titration run whose titrant concentration is hidden
#[derive(Clone)]
pub struct ChallengeRun {
    run: TitrationRun,
}

// Hand-written so `{:?}` never prints the hidden concentration
impl fmt::Debug for ChallengeRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeRun")
            .field("analyte", self.analyte())
            .field("indicator", &self.run.indicator().name)
            .field("volume_added_ml", &self.run.state().volume_added_ml())
            .field("samples", &self.run.samples().len())
            .field("running", &self.run.is_running())
            .finish_non_exhaustive()
    }
}

impl ChallengeRun {
    pub fn new(
        analyte: ReagentSpec,
        hidden_concentration: f64,
        indicator: IndicatorSpec,
        driver: TitrationDriver,
    ) -> Result<Self> {
        let setup = TitrationSetup::new(analyte, hidden_concentration, TitrationRegime::Challenge)?;
        Ok(Self { run: TitrationRun::new(setup, indicator, driver)? })
    }

    pub fn analyte(&self) -> &ReagentSpec {
        &self.run.setup().analyte
    }

    pub fn samples(&self) -> &[Sample] {
        self.run.samples()
    }

    pub fn start(&mut self) -> bool {
        self.run.start()
    }

    pub fn pause(&mut self) {
        self.run.pause();
    }

    pub fn tick(&mut self) -> Result<Option<Sample>> {
        self.run.tick()
    }

    pub fn finish(&mut self) -> Result<usize> {
        self.run.finish()
    }

    pub fn reset(&mut self) {
        self.run.reset();
    }

    pub fn current_ph(&self) -> Result<f64> {
        self.run.current_ph()
    }

    pub fn current_color(&self) -> Result<Rgba> {
        self.run.current_color()
    }

    /// Concentration estimate from the samples recorded so far
    pub fn estimate(&self) -> Option<f64> {
        let v_eq = detect_equivalence(self.run.samples())?;
        infer_titrant_concentration(self.analyte(), v_eq).ok()
    }

    /// Compare a guess with the hidden concentration
    ///
    /// `relative_tolerance` is the accepted relative error (0.05 = 5 %).
    pub fn check_guess(&self, guess: f64, relative_tolerance: f64) -> Result<GuessOutcome> {
        if !guess.is_finite() || guess <= 0.0 {
            return Err(TitrationError::InvalidTitrantConcentration(guess));
        }
        if !relative_tolerance.is_finite() || relative_tolerance < 0.0 {
            return Err(TitrationError::InvalidConfig(format!(
                "guess tolerance must be finite and non-negative, got {}",
                relative_tolerance
            )));
        }

        let hidden = self.reveal();
        let outcome = if (guess - hidden).abs() <= relative_tolerance * hidden {
            GuessOutcome::Correct
        } else if guess < hidden {
            GuessOutcome::TooLow
        } else {
            GuessOutcome::TooHigh
        };
        log::debug!("challenge guess {} -> {:?}", guess, outcome);
        Ok(outcome)
    }

    /// The hidden titrant concentration
    pub fn reveal(&self) -> f64 {
        self.run.setup().titrant_concentration
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::Indicator;

    fn challenge(hidden: f64) -> ChallengeRun {
        let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
        ChallengeRun::new(analyte, hidden, Indicator::BromothymolBlue.spec(), TitrationDriver::default())
            .unwrap()
    }

    #[test]
    fn test_debug_hides_concentration() {
        let mut run = challenge(0.1234);
        for _ in 0..3 {
            run.start();
            run.tick().unwrap();
        }

        let printed = format!("{:?}", run);
        assert!(printed.contains("ChallengeRun"));
        assert!(!printed.contains("0.1234"), "{}", printed);
        assert!(!printed.contains("titrant"), "{}", printed);
    }

    #[test]
    fn test_detect_needs_three_samples() {
        assert_eq!(detect_equivalence(&[]), None);
        assert_eq!(detect_equivalence(&[Sample::new(0.0, 1.0), Sample::new(1.0, 2.0)]), None);
    }

    #[test]
    fn test_detect_flat_curve() {
        let flat: Vec<Sample> = (0..10).map(|i| Sample::new(i as f64, 3.0)).collect();
        assert_eq!(detect_equivalence(&flat), None);
    }

    #[test]
    fn test_infer_rejects_unreachable() {
        let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
        assert_eq!(
            infer_titrant_concentration(&analyte, f64::INFINITY).unwrap_err(),
            TitrationError::UnreachableEquivalence
        );
        assert!((infer_titrant_concentration(&analyte, 20.0).unwrap() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_recovers_hidden_concentration() {
        let mut run = challenge(0.125);
        run.finish().unwrap();

        let estimate = run.estimate().unwrap();
        assert!((estimate - 0.125).abs() / 0.125 < 0.01, "estimate {}", estimate);
        assert_eq!(run.check_guess(estimate, 0.02).unwrap(), GuessOutcome::Correct);
    }

    #[test]
    fn test_guess_direction() {
        let run = challenge(0.1);
        assert_eq!(run.check_guess(0.05, 0.05).unwrap(), GuessOutcome::TooLow);
        assert_eq!(run.check_guess(0.2, 0.05).unwrap(), GuessOutcome::TooHigh);
        assert_eq!(run.check_guess(0.103, 0.05).unwrap(), GuessOutcome::Correct);
        assert!(run.check_guess(-1.0, 0.05).is_err());
    }
}
