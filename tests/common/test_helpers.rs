//! Helper functions for integration tests

use titration_rs::chemistry::{Indicator, ReagentSpec, TitrationRegime, TitrationSetup};
use titration_rs::simulation::{Sample, TitrationDriver, TitrationRun};

/// 25 mL of 0.1 M analyte against 0.1 M titrant
pub fn standard_setup(regime: TitrationRegime) -> TitrationSetup {
    let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
    TitrationSetup::new(analyte, 0.1, regime).unwrap()
}

/// Run a standard setup to the end of the burette
pub fn finished_run(regime: TitrationRegime, indicator: Indicator) -> TitrationRun {
    let mut run = TitrationRun::new(standard_setup(regime), indicator.spec(), TitrationDriver::default()).unwrap();
    run.finish().unwrap();
    run
}

/// Assert that pH never decreases along the curve
pub fn assert_monotonic(samples: &[Sample], message: &str) {
    for (i, pair) in samples.windows(2).enumerate() {
        assert!(
            pair[1].ph >= pair[0].ph,
            "{}: pH drops from {} to {} between {} mL and {} mL (sample {})",
            message, pair[0].ph, pair[1].ph, pair[0].volume_ml, pair[1].volume_ml, i
        );
    }
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
