//! JSON experiment reports
//!
//! An [`ExperimentReport`] is a self-contained snapshot of a run: setup,
//! indicator, recorded curve and the flask colour at the end. It is written
//! to disk for record keeping and serialized to a string as the
//! "experiment results" input of the tutor flows.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::chemistry::{ReagentSpec, Rgba, TitrationRegime};
use crate::output::export::{downsample, Exporter};
use crate::simulation::{Sample, TitrationRun};

/// Report format version
pub const REPORT_VERSION: &str = "1.0.0";

/// Errors raised while writing a JSON report
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("empty data: the run has no samples")]
    EmptyData,

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Snapshot of one titration run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Export timestamp (RFC 3339)
    pub exported_at: String,
    /// Report format version
    pub version: String,
    pub regime: TitrationRegime,
    pub analyte: ReagentSpec,
    /// Omitted when the regime hides the titrant
    pub titrant_concentration: Option<f64>,
    /// Omitted when hidden or out of reach
    pub equivalence_volume_ml: Option<f64>,
    pub indicator: String,
    pub final_volume_ml: f64,
    pub final_ph: Option<f64>,
    pub final_color: Option<Rgba>,
    pub samples: Vec<Sample>,
}

impl ExperimentReport {
    /// Build a report from the current state of a run
    pub fn from_run(run: &TitrationRun) -> Self {
        let setup = run.setup();
        let hidden = setup.regime.hides_titrant();
        let v_eq = run.equivalence_volume();

        Self {
            exported_at: Utc::now().to_rfc3339(),
            version: REPORT_VERSION.to_string(),
            regime: setup.regime,
            analyte: setup.analyte,
            titrant_concentration: (!hidden).then_some(setup.titrant_concentration),
            equivalence_volume_ml: (!hidden && v_eq.is_finite()).then_some(v_eq),
            indicator: run.indicator().name.clone(),
            final_volume_ml: run.state().volume_added_ml(),
            final_ph: run.current_ph().ok(),
            final_color: run.current_color().ok(),
            samples: run.samples().to_vec(),
        }
    }

    /// Keep `n_points` samples, first and last included
    pub fn downsampled(mut self, n_points: Option<usize>) -> Self {
        self.samples = downsample(&self.samples, n_points);
        self
    }

    /// Compact JSON, as fed to the tutor prompts
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Write a report as pretty JSON
pub fn export_report_json<P: AsRef<Path>>(report: &ExperimentReport, path: P) -> Result<(), JsonError> {
    let file = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(file, report)?;

    log::info!("JSON report exported: {}", path.as_ref().display());
    Ok(())
}

/// JSON implementation of [`Exporter`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    type Error = JsonError;

    /// A bare curve is written as an array of `{ volume_ml, ph }` objects
    fn export_curve<P: AsRef<Path>>(
        &self,
        samples: &[Sample],
        n_points: Option<usize>,
        path: P,
    ) -> Result<(), JsonError> {
        if samples.is_empty() {
            return Err(JsonError::EmptyData);
        }
        let file = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(file, &downsample(samples, n_points))?;

        log::info!("JSON curve exported: {}", path.as_ref().display());
        Ok(())
    }

    fn export_run<P: AsRef<Path>>(
        &self,
        run: &TitrationRun,
        n_points: Option<usize>,
        path: P,
    ) -> Result<(), JsonError> {
        if run.samples().is_empty() {
            return Err(JsonError::EmptyData);
        }
        export_report_json(&ExperimentReport::from_run(run).downsampled(n_points), path)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::{Indicator, TitrationSetup};
    use crate::simulation::TitrationDriver;

    fn finished_run(regime: TitrationRegime) -> TitrationRun {
        let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
        let setup = TitrationSetup::new(analyte, 0.1, regime).unwrap();
        let mut run =
            TitrationRun::new(setup, Indicator::Phenolphthalein.spec(), TitrationDriver::default()).unwrap();
        run.finish().unwrap();
        run
    }

    #[test]
    fn test_report_from_run() {
        let report = ExperimentReport::from_run(&finished_run(TitrationRegime::StrongAnalyteStrongTitrant));

        assert_eq!(report.samples.len(), 500);
        assert_eq!(report.titrant_concentration, Some(0.1));
        assert_eq!(report.equivalence_volume_ml, Some(25.0));
        assert_eq!(report.final_volume_ml, 50.0);
        assert_eq!(report.final_color, Some(Rgba::PINK));
        assert_eq!(report.indicator, "Phenolphthalein");
    }

    #[test]
    fn test_exported_at_is_utc() {
        let report = ExperimentReport::from_run(&finished_run(TitrationRegime::StrongAnalyteStrongTitrant));
        let stamp = chrono::DateTime::parse_from_rfc3339(&report.exported_at).unwrap();
        assert_eq!(stamp.offset().local_minus_utc(), 0);
        assert!(report.exported_at.ends_with("+00:00"));
    }

    #[test]
    fn test_challenge_report_hides_titrant() {
        let report = ExperimentReport::from_run(&finished_run(TitrationRegime::Challenge));
        assert_eq!(report.titrant_concentration, None);
        assert_eq!(report.equivalence_volume_ml, None);

        let json = report.to_json_string().unwrap();
        assert!(json.contains("\"titrant_concentration\":null"));
    }

    #[test]
    fn test_report_round_trip() {
        let report = ExperimentReport::from_run(&finished_run(TitrationRegime::WeakAnalyteStrongTitrant))
            .downsampled(Some(10));
        let file = tempfile::NamedTempFile::new().unwrap();
        export_report_json(&report, file.path()).unwrap();

        let back: ExperimentReport =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(back.regime, TitrationRegime::WeakAnalyteStrongTitrant);
        assert_eq!(back.exported_at, report.exported_at);
        assert_eq!(back.samples.len(), 10);
        assert_eq!(back.samples[9].volume_ml, 50.0);
    }

    #[test]
    fn test_empty_run_rejected() {
        let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
        let setup = TitrationSetup::new(analyte, 0.1, TitrationRegime::StrongAnalyteStrongTitrant).unwrap();
        let run = TitrationRun::new(setup, Indicator::Litmus.spec(), TitrationDriver::default()).unwrap();

        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            JsonExporter.export_run(&run, None, file.path()),
            Err(JsonError::EmptyData)
        ));
    }
}
