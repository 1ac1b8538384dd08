//! Export module for titration results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module:
//! adding a format means adding a file.
//!
//! # Available formats
//!
//! | Format | Module     | Content                                   |
//! |--------|------------|-------------------------------------------|
//! | CSV    | [`csv`]    | `Volume (mL),pH` rows, optional metadata  |
//! | JSON   | [`json`]   | [`ExperimentReport`]: setup, curve, colour |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use titration_rs::config::SimulationConfig;
//! use titration_rs::output::export::{CsvExporter, Exporter, JsonExporter};
//! use titration_rs::simulation::TitrationRun;
//!
//! let mut run = TitrationRun::from_config(&SimulationConfig::default()).unwrap();
//! run.finish().unwrap();
//!
//! // Full curve
//! CsvExporter::default().export_run(&run, None, "curve.csv").unwrap();
//!
//! // Downsampled to 100 points
//! JsonExporter::default().export_run(&run, Some(100), "report.json").unwrap();
//! ```

pub mod csv;
pub mod json;

pub use csv::{export_titration_csv, CsvConfig, CsvError, CsvExporter, CsvMetadata};
pub use json::{export_report_json, ExperimentReport, JsonError, JsonExporter};

use std::path::Path;

use crate::simulation::{Sample, TitrationRun};

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so the caller
/// can react to the precise failure without downcasting.
///
/// # Parameter `n_points`
///
/// - `None`: exports every recorded sample
/// - `Some(n)`: uniformly downsamples to `n` points, always keeping the
///   first and last samples (see [`downsample`])
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports a bare titration curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `samples` is empty, contains non-finite values, or
    /// the file cannot be written.
    fn export_curve<P: AsRef<Path>>(
        &self,
        samples: &[Sample],
        n_points: Option<usize>,
        path: P,
    ) -> Result<(), Self::Error>;

    /// Exports a run together with its setup.
    fn export_run<P: AsRef<Path>>(
        &self,
        run: &TitrationRun,
        n_points: Option<usize>,
        path: P,
    ) -> Result<(), Self::Error>;
}

/// Uniformly pick `n_points` samples, first and last included
///
/// Returns the input unchanged when `n_points` is `None`, or when it is not
/// smaller than the number of samples.
pub fn downsample(samples: &[Sample], n_points: Option<usize>) -> Vec<Sample> {
    let n = match n_points {
        Some(n) if n < samples.len() => n,
        _ => return samples.to_vec(),
    };

    match n {
        0 => Vec::new(),
        1 => samples.first().copied().into_iter().collect(),
        _ => {
            let last = samples.len() - 1;
            (0..n)
                .map(|i| samples[(i * last + (n - 1) / 2) / (n - 1)])
                .collect()
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
