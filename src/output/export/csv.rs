//! CSV export of titration curves
//!
//! This module writes titration data to CSV (Comma-Separated Values), which
//! spreadsheets, pandas and most lab software read directly.
//!
//! # Features
//!
//! - **Simple interface**: export a `&[Sample]` slice
//! - **Metadata support**: optional `#` header with the experiment setup
//! - **Customizable**: delimiter, decimal separator, precision, headers
//! - **Validation**: rejects empty data and NaN/Inf values
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,no_run
//! use titration_rs::output::export::export_titration_csv;
//! use titration_rs::simulation::Sample;
//!
//! let samples = vec![Sample::new(0.0, 1.0), Sample::new(25.0, 7.0), Sample::new(50.0, 12.52)];
//! export_titration_csv(&samples, "curve.csv", None).unwrap();
//! ```
//!
//! **Output** (`curve.csv`):
//! ```csv
//! Volume (mL),pH
//! 0.000000,1.000000
//! 25.000000,7.000000
//! 50.000000,12.520000
//! ```
//!
//! ## With Metadata
//!
//! ```csv
//! # Titration Simulation Data
//! # Generated: 2026-10-18T09:30:00+00:00
//! # Regime: Strong Acid - Strong Base
//! # Analyte: 25 mL at 0.1 mol/L
//! # Titrant: 0.1 mol/L
//! # Equivalence Volume: 25 mL
//! # Indicator: Phenolphthalein
//! #
//! Volume (mL),pH
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::output::export::{downsample, Exporter};
use crate::simulation::{Sample, TitrationRun};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while writing a CSV file
#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("empty data: the titration curve has no samples")]
    EmptyData,

    #[error("invalid data: non-finite {column} at row {row}")]
    NonFinite { column: &'static str, row: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use titration_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 3,
///     ..Default::default()
/// };
/// assert_eq!(config.volume_header, "Volume (mL)");
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header for the volume column (default: "Volume (mL)")
    pub volume_header: String,

    /// Header for the pH column (default: "pH")
    pub ph_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            volume_header: "Volume (mL)".to_string(),
            ph_header: "pH".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    fn validate(&self) -> Result<(), CsvError> {
        if self.delimiter == self.decimal_separator {
            return Err(CsvError::InvalidConfig(format!(
                "delimiter and decimal separator are both '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }
}

/// Metadata for CSV header comments
///
/// All fields are optional. Only non-None fields are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Regime label (e.g. "Weak Acid - Strong Base")
    pub regime: Option<String>,
    /// Analyte volume (mL)
    pub analyte_volume_ml: Option<f64>,
    /// Analyte concentration (mol/L)
    pub analyte_concentration: Option<f64>,
    /// Titrant concentration (mol/L); left out in challenge mode
    pub titrant_concentration: Option<f64>,
    /// Equivalence volume (mL)
    pub equivalence_volume_ml: Option<f64>,
    /// Indicator name
    pub indicator: Option<String>,
    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata describing a run
    ///
    /// The titrant concentration and equivalence volume are omitted for
    /// regimes that hide the titrant, so an exported file cannot give the
    /// answer away.
    pub fn from_run(run: &TitrationRun) -> Self {
        let setup = run.setup();
        let hidden = setup.regime.hides_titrant();
        let v_eq = run.equivalence_volume();

        Self {
            regime: Some(setup.regime.label().to_string()),
            analyte_volume_ml: Some(setup.analyte.volume_ml),
            analyte_concentration: Some(setup.analyte.concentration),
            titrant_concentration: (!hidden).then_some(setup.titrant_concentration),
            equivalence_volume_ml: (!hidden && v_eq.is_finite()).then_some(v_eq),
            indicator: Some(run.indicator().name.clone()),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> Result<(), CsvError> {
    writeln!(out, "# Titration Simulation Data")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(regime) = &metadata.regime {
        writeln!(out, "# Regime: {}", regime)?;
    }
    match (metadata.analyte_volume_ml, metadata.analyte_concentration) {
        (Some(v), Some(c)) => writeln!(out, "# Analyte: {} mL at {} mol/L", v, c)?,
        (Some(v), None) => writeln!(out, "# Analyte: {} mL", v)?,
        (None, Some(c)) => writeln!(out, "# Analyte: {} mol/L", c)?,
        (None, None) => {}
    }
    if let Some(c) = metadata.titrant_concentration {
        writeln!(out, "# Titrant: {} mol/L", c)?;
    }
    if let Some(v_eq) = metadata.equivalence_volume_ml {
        writeln!(out, "# Equivalence Volume: {} mL", v_eq)?;
    }
    if let Some(indicator) = &metadata.indicator {
        writeln!(out, "# Indicator: {}", indicator)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);
    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn validate_samples(samples: &[Sample]) -> Result<(), CsvError> {
    if samples.is_empty() {
        return Err(CsvError::EmptyData);
    }
    for (row, sample) in samples.iter().enumerate() {
        if !sample.volume_ml.is_finite() {
            return Err(CsvError::NonFinite { column: "volume", row });
        }
        if !sample.ph.is_finite() {
            return Err(CsvError::NonFinite { column: "pH", row });
        }
    }
    Ok(())
}

/// Write a curve to any writer
pub fn write_titration_csv<W: Write>(
    out: &mut W,
    samples: &[Sample],
    configuration: &CsvConfig,
) -> Result<(), CsvError> {
    validate_samples(samples)?;
    configuration.validate()?;

    if configuration.include_metadata
        && let Some(metadata) = &configuration.metadata
    {
        write_metadata_header(out, metadata)?;
    }

    writeln!(
        out,
        "{}{}{}",
        configuration.volume_header, configuration.delimiter, configuration.ph_header
    )?;

    for sample in samples {
        writeln!(
            out,
            "{}{}{}",
            format_number(sample.volume_ml, configuration),
            configuration.delimiter,
            format_number(sample.ph, configuration)
        )?;
    }

    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export a titration curve to CSV
///
/// # Errors
///
/// - [`CsvError::EmptyData`] for an empty curve
/// - [`CsvError::NonFinite`] for NaN or Inf values
/// - [`CsvError::Io`] when the file cannot be created or written
pub fn export_titration_csv<P: AsRef<Path>>(
    samples: &[Sample],
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // Validate before touching the filesystem
    validate_samples(samples)?;
    configuration.validate()?;

    let mut out = BufWriter::new(File::create(output_path.as_ref())?);
    write_titration_csv(&mut out, samples, configuration)?;
    out.flush()?;

    log::info!("exported {} samples to {:?}", samples.len(), output_path.as_ref());
    Ok(())
}

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export_curve<P: AsRef<Path>>(
        &self,
        samples: &[Sample],
        n_points: Option<usize>,
        path: P,
    ) -> Result<(), CsvError> {
        export_titration_csv(&downsample(samples, n_points), path, Some(&self.config))
    }

    /// Metadata from the run is used unless the config already carries some
    fn export_run<P: AsRef<Path>>(
        &self,
        run: &TitrationRun,
        n_points: Option<usize>,
        path: P,
    ) -> Result<(), CsvError> {
        let mut config = self.config.clone();
        if config.metadata.is_none() {
            config = config.with_metadata(CsvMetadata::from_run(run));
        }
        export_titration_csv(&downsample(run.samples(), n_points), path, Some(&config))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
