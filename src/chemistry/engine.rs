//! Closed-form pH engine
//!
//! # Chemical Background
//!
//! Every regime works on the same three quantities:
//!
//! ```text
//! n_a = c_a * V_a / 1000          (analyte moles)
//! n_t = c_t * V   / 1000          (titrant moles added so far)
//! V_tot = (V_a + V) / 1000        (total volume, L)
//! ```
//!
//! and picks a formula depending on which side of the equivalence point
//! (`n_t == n_a`) the titration currently is:
//!
//! | Regime        | Before equivalence              | At equivalence         | After equivalence                  |
//! |---------------|---------------------------------|------------------------|------------------------------------|
//! | Strong-strong | `-log10((n_a - n_t) / V_tot)`   | `7`                    | `14 + log10((n_t - n_a) / V_tot)`  |
//! | Weak-strong   | `pKa + log10(n_t / (n_a - n_t))`| conjugate base hydrolysis | `14 + log10((n_t - n_a) / V_tot)` |
//! | Strong-weak   | `-log10((n_a - n_t) / V_tot)`   | conjugate acid hydrolysis | `pKw - pKb + log10((n_t - n_a) / n_a)` |
//!
//! # Equivalence Detection
//!
//! A fixed-step simulation almost never lands exactly on `n_t == n_a`.
//! "Equal" is therefore tested with a relative tolerance. Outside that band
//! each branch is clamped against the value at equivalence (or against
//! neutral pH for strong-strong), so an excess that is only a rounding error
//! away from zero can never produce a spike on the wrong side of the curve.
//! The result: every validated input yields a finite pH, and the curve is
//! monotonically non-decreasing in the added volume.

use crate::chemistry::reagent::{validate_titrant_concentration, ReagentSpec, TitrationRegime, TitrationSetup};
use crate::error::{Result, TitrationError};

// =================================================================================================
// Constants
// =================================================================================================

/// pKa of the weak acid used in the weak-analyte regime (acetic acid)
pub const WEAK_ACID_PKA: f64 = 4.76;

/// pKb of the weak base used in the weak-titrant regime (ammonia)
pub const WEAK_BASE_PKB: f64 = 4.75;

/// Ionic product of water, as pKw
pub const PKW: f64 = 14.0;

/// pH of pure water at 25 °C
pub const NEUTRAL_PH: f64 = 7.0;

/// Default relative tolerance used to decide that equivalence is reached
pub const DEFAULT_EQUIVALENCE_TOLERANCE: f64 = 1e-9;

// =================================================================================================
// Free functions
// =================================================================================================

/// Volume of titrant (mL) needed to neutralise the analyte
///
/// Returns `+Infinity` when `titrant_concentration` is zero: the equivalence
/// point is never reached. Callers must treat infinite or NaN results as
/// "not reached within the simulated range".
///
/// # Example
/// ```
/// use titration_rs::chemistry::{equivalence_volume, ReagentSpec};
///
/// let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
/// assert_eq!(equivalence_volume(&analyte, 0.1), 25.0);
/// assert!(equivalence_volume(&analyte, 0.0).is_infinite());
/// ```
pub fn equivalence_volume(analyte: &ReagentSpec, titrant_concentration: f64) -> f64 {
    if titrant_concentration == 0.0 {
        return f64::INFINITY;
    }
    (analyte.concentration * analyte.volume_ml) / titrant_concentration
}

/// pH after `volume_added` mL of titrant, using the default engine
///
/// # Example
/// ```
/// use titration_rs::chemistry::{ph, ReagentSpec, TitrationRegime};
///
/// let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
/// let regime = TitrationRegime::StrongAnalyteStrongTitrant;
///
/// assert!((ph(&analyte, 0.1, 0.0, regime).unwrap() - 1.0).abs() < 1e-9);
/// assert_eq!(ph(&analyte, 0.1, 25.0, regime).unwrap(), 7.0);
/// ```
pub fn ph(
    analyte: &ReagentSpec,
    titrant_concentration: f64,
    volume_added: f64,
    regime: TitrationRegime,
) -> Result<f64> {
    TitrationEngine::default().ph(analyte, titrant_concentration, volume_added, regime)
}

// =================================================================================================
// Engine
// =================================================================================================

/// Stateless pH calculator
///
/// The only parameter is the relative tolerance used to detect the
/// equivalence point. The engine holds no simulation state: callers pass the
/// current added volume on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitrationEngine {
    equivalence_tolerance: f64,
}

impl Default for TitrationEngine {
    fn default() -> Self {
        Self { equivalence_tolerance: DEFAULT_EQUIVALENCE_TOLERANCE }
    }
}

impl TitrationEngine {
    /// Create an engine with a custom equivalence tolerance
    ///
    /// A tolerance of `0.0` reproduces literal float equality.
    pub fn new(equivalence_tolerance: f64) -> Result<Self> {
        if !equivalence_tolerance.is_finite() || equivalence_tolerance < 0.0 {
            return Err(TitrationError::InvalidConfig(format!(
                "equivalence tolerance must be finite and non-negative, got {}",
                equivalence_tolerance
            )));
        }
        Ok(Self { equivalence_tolerance })
    }

    /// Relative tolerance used for equivalence detection
    pub fn equivalence_tolerance(&self) -> f64 {
        self.equivalence_tolerance
    }

    /// See [`equivalence_volume`]
    pub fn equivalence_volume(&self, analyte: &ReagentSpec, titrant_concentration: f64) -> f64 {
        equivalence_volume(analyte, titrant_concentration)
    }

    /// Validate inputs and compute the pH
    ///
    /// # Errors
    ///
    /// - `InvalidReagent` when the analyte volume or concentration is not positive
    /// - `InvalidTitrantConcentration` when the titrant concentration is not positive
    /// - `InvalidVolume` when `volume_added` is negative or not finite
    pub fn ph(
        &self,
        analyte: &ReagentSpec,
        titrant_concentration: f64,
        volume_added: f64,
        regime: TitrationRegime,
    ) -> Result<f64> {
        analyte.validate()?;
        validate_titrant_concentration(titrant_concentration)?;
        validate_added_volume(volume_added)?;

        Ok(self.compute(analyte, titrant_concentration, volume_added, regime))
    }

    /// pH for a setup at the given added volume
    pub fn ph_for(&self, setup: &TitrationSetup, volume_added: f64) -> Result<f64> {
        self.ph(&setup.analyte, setup.titrant_concentration, volume_added, setup.regime)
    }

    /// Whether `volume_added` sits on the equivalence point for this setup
    pub fn at_equivalence(&self, setup: &TitrationSetup, volume_added: f64) -> bool {
        let v_eq = equivalence_volume(&setup.analyte, setup.titrant_concentration);
        v_eq.is_finite() && self.is_equivalent(volume_added, v_eq)
    }

    // ---------------------------------------------------------------------------------------------
    // Per-regime formulas (inputs already validated)
    // ---------------------------------------------------------------------------------------------

    fn compute(
        &self,
        analyte: &ReagentSpec,
        titrant_concentration: f64,
        volume_added: f64,
        regime: TitrationRegime,
    ) -> f64 {
        let moles = Moles::new(analyte, titrant_concentration, volume_added);

        if moles.total_l <= 0.0 {
            return -analyte.concentration.log10();
        }

        match regime {
            TitrationRegime::StrongAnalyteStrongTitrant | TitrationRegime::Challenge => {
                self.strong_strong(&moles)
            }
            TitrationRegime::WeakAnalyteStrongTitrant => {
                self.weak_strong(analyte, titrant_concentration, &moles)
            }
            TitrationRegime::StrongAnalyteWeakTitrant => {
                self.strong_weak(analyte, titrant_concentration, volume_added, &moles)
            }
        }
    }

    fn strong_strong(&self, m: &Moles) -> f64 {
        if self.is_equivalent(m.titrant, m.analyte) {
            return NEUTRAL_PH;
        }

        if m.titrant < m.analyte {
            // Excess strong acid; cannot go above neutral. This includes the
            // starting point of acids more dilute than 1e-7 M
            (-((m.analyte - m.titrant) / m.total_l).log10()).min(NEUTRAL_PH)
        } else {
            // Excess strong base; cannot go below neutral
            (PKW + ((m.titrant - m.analyte) / m.total_l).log10()).max(NEUTRAL_PH)
        }
    }

    fn weak_strong(&self, analyte: &ReagentSpec, titrant_concentration: f64, m: &Moles) -> f64 {
        let ka = 10f64.powf(-WEAK_ACID_PKA);
        let kb_conjugate = 10f64.powf(-PKW) / ka;

        let initial_ph = -(ka * analyte.concentration).sqrt().log10();

        let eq_total_l = equivalence_total_l(analyte, titrant_concentration);
        let conjugate_base = m.analyte / eq_total_l;
        // Below ~1e-7 M the conjugate-base estimate drops under the weak-acid
        // pH; adding base never lowers the pH, so the start bounds it
        let equivalence_ph = (PKW + (kb_conjugate * conjugate_base).sqrt().log10()).max(initial_ph);

        if m.titrant <= 0.0 {
            return initial_ph;
        }

        if self.is_equivalent(m.titrant, m.analyte) {
            return equivalence_ph;
        }

        if m.titrant < m.analyte {
            // Buffer region (Henderson-Hasselbalch), bounded by the pure
            // weak-acid pH below and the equivalence pH above
            let buffer = WEAK_ACID_PKA + (m.titrant / (m.analyte - m.titrant)).log10();
            buffer.clamp(initial_ph, equivalence_ph)
        } else {
            (PKW + ((m.titrant - m.analyte) / m.total_l).log10()).max(equivalence_ph)
        }
    }

    fn strong_weak(
        &self,
        analyte: &ReagentSpec,
        titrant_concentration: f64,
        volume_added: f64,
        m: &Moles,
    ) -> f64 {
        let kb = 10f64.powf(-WEAK_BASE_PKB);
        let ka_conjugate = 10f64.powf(-PKW) / kb;

        let v_eq = equivalence_volume(analyte, titrant_concentration);
        let eq_total_l = equivalence_total_l(analyte, titrant_concentration);
        let conjugate_acid = m.analyte / eq_total_l;
        let equivalence_ph = -(ka_conjugate * conjugate_acid).sqrt().log10();

        if self.is_equivalent(volume_added, v_eq) {
            return equivalence_ph;
        }

        if volume_added < v_eq {
            let excess = m.analyte - m.titrant;
            if excess <= 0.0 {
                return equivalence_ph;
            }
            (-(excess / m.total_l).log10()).min(equivalence_ph)
        } else {
            let excess = m.titrant - m.analyte;
            if excess <= 0.0 {
                return equivalence_ph;
            }
            // Buffer of weak base and its conjugate acid
            (PKW - WEAK_BASE_PKB + (excess / m.analyte).log10()).max(equivalence_ph)
        }
    }

    fn is_equivalent(&self, value: f64, reference: f64) -> bool {
        (value - reference).abs() <= self.equivalence_tolerance * reference.abs()
    }
}

/// Moles and total volume at one point of the titration
#[derive(Debug, Clone, Copy)]
struct Moles {
    analyte: f64,
    titrant: f64,
    total_l: f64,
}

impl Moles {
    fn new(analyte: &ReagentSpec, titrant_concentration: f64, volume_added: f64) -> Self {
        Self {
            analyte: analyte.moles(),
            titrant: titrant_concentration * volume_added / 1000.0,
            total_l: (analyte.volume_ml + volume_added) / 1000.0,
        }
    }
}

/// Total volume (L) once exactly the equivalence volume has been added
fn equivalence_total_l(analyte: &ReagentSpec, titrant_concentration: f64) -> f64 {
    (analyte.volume_ml + equivalence_volume(analyte, titrant_concentration)) / 1000.0
}

pub(crate) fn validate_added_volume(volume_added: f64) -> Result<()> {
    if !volume_added.is_finite() || volume_added < 0.0 {
        return Err(TitrationError::InvalidVolume(volume_added));
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_analyte() -> ReagentSpec {
        ReagentSpec::new(25.0, 0.1).unwrap()
    }

    fn curve(analyte: &ReagentSpec, regime: TitrationRegime, titrant: f64) -> Vec<f64> {
        let engine = TitrationEngine::default();
        (0..=500)
            .map(|i| engine.ph(analyte, titrant, i as f64 * 0.1, regime).unwrap())
            .collect()
    }

    #[test]
    fn test_equivalence_volume_reference_case() {
        assert_eq!(equivalence_volume(&standard_analyte(), 0.1), 25.0);
        assert_eq!(equivalence_volume(&standard_analyte(), 0.05), 50.0);
    }

    #[test]
    fn test_equivalence_volume_zero_titrant_is_infinite() {
        let v = equivalence_volume(&standard_analyte(), 0.0);
        assert!(v.is_infinite() && v > 0.0);
    }

    #[test]
    fn test_strong_strong_reference_points() {
        let analyte = standard_analyte();
        let regime = TitrationRegime::StrongAnalyteStrongTitrant;

        let start = ph(&analyte, 0.1, 0.0, regime).unwrap();
        assert!((start - 1.0).abs() < 1e-9);

        assert_eq!(ph(&analyte, 0.1, 25.0, regime).unwrap(), 7.0);

        let end = ph(&analyte, 0.1, 50.0, regime).unwrap();
        let expected = 14.0 + (0.1 * 25.0 / 1000.0 / 0.075f64).log10();
        assert!((end - expected).abs() < 1e-9);
        assert!((end - 12.52).abs() < 0.01);
    }

    #[test]
    fn test_challenge_matches_strong_strong() {
        let analyte = standard_analyte();
        for volume in [0.0, 10.0, 24.9, 25.0, 25.1, 40.0] {
            let a = ph(&analyte, 0.08, volume, TitrationRegime::StrongAnalyteStrongTitrant).unwrap();
            let b = ph(&analyte, 0.08, volume, TitrationRegime::Challenge).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_accumulated_step_still_hits_neutral() {
        // 250 additions of 0.1 mL drift away from exactly 25.0
        let mut volume = 0.0;
        for _ in 0..250 {
            volume += 0.1;
        }

        let value = ph(&standard_analyte(), 0.1, volume, TitrationRegime::StrongAnalyteStrongTitrant).unwrap();
        assert_eq!(value, NEUTRAL_PH);
    }

    #[test]
    fn test_literal_equality_engine_has_no_spike() {
        let engine = TitrationEngine::new(0.0).unwrap();
        let analyte = standard_analyte();
        let just_before = engine
            .ph(&analyte, 0.1, 25.0 - 1e-12, TitrationRegime::StrongAnalyteStrongTitrant)
            .unwrap();
        assert!(just_before <= NEUTRAL_PH);
    }

    #[test]
    fn test_weak_strong_initial_ph() {
        let value = ph(&standard_analyte(), 0.1, 0.0, TitrationRegime::WeakAnalyteStrongTitrant).unwrap();
        let ka = 10f64.powf(-WEAK_ACID_PKA);
        let expected = -(ka * 0.1f64).sqrt().log10();
        assert!((value - expected).abs() < 1e-12);
        assert!((value - 2.88).abs() < 0.01);
    }

    #[test]
    fn test_weak_strong_half_equivalence_is_pka() {
        let value = ph(&standard_analyte(), 0.1, 12.5, TitrationRegime::WeakAnalyteStrongTitrant).unwrap();
        assert!((value - WEAK_ACID_PKA).abs() < 1e-9);
    }

    #[test]
    fn test_weak_strong_equivalence_is_basic() {
        let value = ph(&standard_analyte(), 0.1, 25.0, TitrationRegime::WeakAnalyteStrongTitrant).unwrap();
        // Conjugate base 0.05 M: pH ≈ 8.73
        assert!((value - 8.73).abs() < 0.01);
    }

    #[test]
    fn test_strong_weak_equivalence_is_acidic() {
        let value = ph(&standard_analyte(), 0.1, 25.0, TitrationRegime::StrongAnalyteWeakTitrant).unwrap();
        // Conjugate acid 0.05 M: pH ≈ 5.28
        assert!((value - 5.28).abs() < 0.01);
    }

    #[test]
    fn test_strong_weak_buffer_at_double_equivalence() {
        let value = ph(&standard_analyte(), 0.1, 50.0, TitrationRegime::StrongAnalyteWeakTitrant).unwrap();
        assert!((value - (PKW - WEAK_BASE_PKB)).abs() < 1e-9);
    }

    #[test]
    fn test_every_regime_is_monotonic_and_finite() {
        for regime in TitrationRegime::ALL {
            for (volume, concentration) in [(25.0, 0.1), (25.0, 1e-8), (5.0, 2.0)] {
                let analyte = ReagentSpec::new(volume, concentration).unwrap();
                for titrant in [1e-8, 0.05, 0.1, 0.2] {
                    let values = curve(&analyte, regime, titrant);
                    for window in values.windows(2) {
                        assert!(window[0].is_finite() && window[1].is_finite());
                        assert!(
                            window[1] >= window[0],
                            "{:?} {} mL at {} M with {} M decreased: {} -> {}",
                            regime, volume, concentration, titrant, window[0], window[1]
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_dilute_weak_acid_never_drops_below_start() {
        let analyte = ReagentSpec::new(25.0, 1e-8).unwrap();
        let regime = TitrationRegime::WeakAnalyteStrongTitrant;

        let start = ph(&analyte, 1e-8, 0.0, regime).unwrap();
        assert!((start - 6.38).abs() < 0.01);
        for volume in [0.1, 12.5, 25.0, 30.0] {
            let value = ph(&analyte, 1e-8, volume, regime).unwrap();
            assert!(value >= start, "pH {} at {} mL below start {}", value, volume, start);
        }
    }

    #[test]
    fn test_dilute_strong_acid_starts_neutral() {
        let analyte = ReagentSpec::new(25.0, 1e-8).unwrap();
        let regime = TitrationRegime::StrongAnalyteStrongTitrant;

        // Neutral start, so the curve can still pass through 7 at equivalence
        assert_eq!(ph(&analyte, 1e-8, 0.0, regime).unwrap(), NEUTRAL_PH);
        assert_eq!(ph(&analyte, 1e-8, 25.0, regime).unwrap(), NEUTRAL_PH);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let analyte = standard_analyte();
        let regime = TitrationRegime::StrongAnalyteStrongTitrant;

        assert_eq!(
            ph(&analyte, 0.1, -1.0, regime).unwrap_err(),
            TitrationError::InvalidVolume(-1.0)
        );
        assert_eq!(
            ph(&analyte, 0.0, 1.0, regime).unwrap_err(),
            TitrationError::InvalidTitrantConcentration(0.0)
        );

        let bad = ReagentSpec { volume_ml: 0.0, concentration: 0.1 };
        assert!(matches!(
            ph(&bad, 0.1, 1.0, regime).unwrap_err(),
            TitrationError::InvalidReagent { field: "volume_ml", .. }
        ));
    }

    #[test]
    fn test_engine_rejects_negative_tolerance() {
        assert!(TitrationEngine::new(-1e-6).is_err());
        assert!(TitrationEngine::new(f64::NAN).is_err());
        assert_eq!(TitrationEngine::new(1e-6).unwrap().equivalence_tolerance(), 1e-6);
    }

    #[test]
    fn test_at_equivalence() {
        let engine = TitrationEngine::default();
        let setup = TitrationSetup::new(standard_analyte(), 0.1, TitrationRegime::Challenge).unwrap();
        assert!(engine.at_equivalence(&setup, 25.0));
        assert!(!engine.at_equivalence(&setup, 24.9));
    }
}
