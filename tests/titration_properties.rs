//! Integration tests: chemistry engine + driver
//!
//! These tests check the properties every titration curve must satisfy,
//! across regimes and concentrations, on curves produced by the driver.

use titration_rs::chemistry::{
    equivalence_volume, indicator_color, ph, Indicator, ReagentSpec, TitrationEngine,
    TitrationRegime, TitrationSetup, WEAK_ACID_PKA,
};
use titration_rs::simulation::TitrationDriver;

mod common;
use common::{assert_monotonic, relative_error, standard_setup};

// =================================================================================================
// Reference values
// =================================================================================================

#[test]
fn test_initial_ph_is_minus_log_concentration() {
    for volume in [1.0, 25.0, 250.0] {
        for concentration in [1e-6, 0.001, 0.01, 0.1, 1.0, 5.0] {
            let analyte = ReagentSpec::new(volume, concentration).unwrap();
            let value = ph(&analyte, 0.1, 0.0, TitrationRegime::StrongAnalyteStrongTitrant).unwrap();
            let expected = -concentration.log10();
            assert!((value - expected).abs() < 1e-9, "c = {}: pH {} vs {}", concentration, value, expected);
        }
    }
}

#[test]
fn test_acid_below_neutral_concentration_starts_at_seven() {
    for concentration in [1e-8, 1e-10] {
        let analyte = ReagentSpec::new(25.0, concentration).unwrap();
        let value = ph(&analyte, 0.1, 0.0, TitrationRegime::StrongAnalyteStrongTitrant).unwrap();
        assert_eq!(value, 7.0, "c = {}", concentration);
    }
}

#[test]
fn test_neutral_at_equivalence() {
    for (volume, concentration, titrant) in [(25.0, 0.1, 0.1), (10.0, 0.2, 0.05), (40.0, 0.05, 0.08)] {
        let analyte = ReagentSpec::new(volume, concentration).unwrap();
        let v_eq = equivalence_volume(&analyte, titrant);
        let value = ph(&analyte, titrant, v_eq, TitrationRegime::StrongAnalyteStrongTitrant).unwrap();
        assert_eq!(value, 7.0, "V_eq = {} mL", v_eq);
    }
}

#[test]
fn test_classroom_reference_curve() {
    let setup = standard_setup(TitrationRegime::StrongAnalyteStrongTitrant);
    let curve = TitrationDriver::default().curve(&setup).unwrap();

    assert_eq!(equivalence_volume(&setup.analyte, setup.titrant_concentration), 25.0);
    assert!((curve[0].ph - 1.0).abs() < 1e-9);
    assert_eq!(curve[250].ph, 7.0);

    let last = curve.last().unwrap();
    assert_eq!(last.volume_ml, 50.0);
    assert!((last.ph - 12.52).abs() < 0.01, "pH(50) = {}", last.ph);
}

#[test]
fn test_weak_acid_half_equivalence() {
    let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
    let half = equivalence_volume(&analyte, 0.1) / 2.0;
    let value = ph(&analyte, 0.1, half, TitrationRegime::WeakAnalyteStrongTitrant).unwrap();
    assert!(relative_error(value, WEAK_ACID_PKA) < 1e-6, "pH {} at half equivalence", value);
}

// =================================================================================================
// Curve shape
// =================================================================================================

#[test]
fn test_monotonic_for_every_regime() {
    let analytes = [(25.0, 0.1), (1.0, 1e-5), (10.0, 1e-3), (100.0, 1.0), (50.0, 1e-8), (5.0, 2.0)];
    for regime in TitrationRegime::ALL {
        for (volume, concentration) in analytes {
            for titrant in [1e-8, 1e-4, 0.05, 0.08, 0.1, 0.125, 0.2, 1.0] {
                let analyte = ReagentSpec::new(volume, concentration).unwrap();
                let setup = TitrationSetup::new(analyte, titrant, regime).unwrap();
                let curve = TitrationDriver::default().curve(&setup).unwrap();

                let label = format!("{} / {} mL at {} M / {} M", regime, volume, concentration, titrant);
                assert_monotonic(&curve, &label);
                assert!(curve.iter().all(|s| s.ph.is_finite()), "{}", label);
            }
        }
    }
}

#[test]
fn test_challenge_matches_strong_strong() {
    let strong = TitrationDriver::default()
        .curve(&standard_setup(TitrationRegime::StrongAnalyteStrongTitrant))
        .unwrap();
    let challenge = TitrationDriver::default()
        .curve(&standard_setup(TitrationRegime::Challenge))
        .unwrap();
    assert_eq!(strong, challenge);
}

#[test]
fn test_weak_titrant_equivalence_is_acidic() {
    let setup = standard_setup(TitrationRegime::StrongAnalyteWeakTitrant);
    let engine = TitrationEngine::default();
    let at_eq = engine.ph_for(&setup, 25.0).unwrap();
    assert!(at_eq < 7.0 && at_eq > 4.0, "pH at equivalence {}", at_eq);

    let weak_acid = standard_setup(TitrationRegime::WeakAnalyteStrongTitrant);
    let at_eq = engine.ph_for(&weak_acid, 25.0).unwrap();
    assert!(at_eq > 7.0 && at_eq < 10.0, "pH at equivalence {}", at_eq);
}

// =================================================================================================
// Indicators
// =================================================================================================

#[test]
fn test_indicator_extremes() {
    for indicator in Indicator::ALL {
        let spec = indicator.spec();
        assert_eq!(indicator_color(spec.low_ph - 0.5, &spec), spec.below, "{}", indicator);
        assert_eq!(indicator_color(spec.high_ph + 0.5, &spec), spec.above, "{}", indicator);
    }
}

#[test]
fn test_phenolphthalein_turns_pink_after_equivalence() {
    let setup = standard_setup(TitrationRegime::StrongAnalyteStrongTitrant);
    let spec = Indicator::Phenolphthalein.spec();
    let curve = TitrationDriver::default().curve(&setup).unwrap();

    let first_pink = curve
        .iter()
        .find(|s| !indicator_color(s.ph, &spec).is_transparent())
        .unwrap();
    assert!(first_pink.volume_ml > 25.0 && first_pink.volume_ml < 25.5);
}

// =================================================================================================
// Reproducibility
// =================================================================================================

#[test]
fn test_identical_parameters_identical_curves() {
    for regime in TitrationRegime::ALL {
        let setup = standard_setup(regime);
        let a = TitrationDriver::default().run_to_completion(&setup).unwrap();
        let b = TitrationDriver::default().run_to_completion(&setup).unwrap();
        assert_eq!(a.samples(), b.samples());
    }
}
