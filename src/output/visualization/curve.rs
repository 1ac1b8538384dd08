//! Titration curve plotting
//!
//! pH is drawn against the volume of titrant added, on fixed axes:
//! volume from 0 to the burette capacity, pH from 0 to 14. When the
//! equivalence point lies inside the volume range it is marked with a dashed
//! vertical line.
//!
//! # Available functions
//!
//! - [`plot_titration_curve`]       — one curve with its equivalence marker
//! - [`plot_run`]                   — same, taking everything from a run
//! - [`plot_titration_comparison`]  — several labelled curves on the same axes
//!
//! The output format follows the file extension: `.svg` gives a vector
//! image, anything else a PNG bitmap.
//!
//! # Usage
//!
//! ```rust,no_run
//! use titration_rs::output::visualization::{plot_titration_curve, PlotConfig};
//! use titration_rs::simulation::Sample;
//!
//! let samples = vec![Sample::new(0.0, 1.0), Sample::new(25.0, 7.0), Sample::new(50.0, 12.52)];
//! plot_titration_curve(&samples, Some(25.0), "curve.png", None).unwrap();
//!
//! let config = PlotConfig::titration_curve("HCl vs NaOH");
//! plot_titration_curve(&samples, Some(25.0), "curve.svg", Some(&config)).unwrap();
//! ```

use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::config::{PlotConfig, NO_TITLE};
use crate::simulation::{Sample, TitrationRun};

/// Upper bound of the pH axis
const PH_AXIS_MAX: f64 = 14.0;

/// Length of one dash of the equivalence marker, in pH units
const DASH_LENGTH: f64 = 0.35;

/// Dash plus gap, in pH units
const DASH_PERIOD: f64 = 0.6;

// =================================================================================================
// Public API
// =================================================================================================

/// Plot a single titration curve
///
/// # Arguments
///
/// * `samples`     — recorded `(volume, pH)` points, ordered by volume
/// * `equivalence` — equivalence volume in mL; `None` hides the marker
/// * `output_path` — output file path (`.png` → bitmap, `.svg` → vector)
/// * `config`      — optional plot configuration; `None` uses defaults
///
/// # Errors
///
/// Returns `Err` for an empty or non-finite curve, or if the backend cannot
/// write to `output_path`.
pub fn plot_titration_curve<P: AsRef<Path>>(
    samples: &[Sample],
    equivalence: Option<f64>,
    output_path: P,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    validate_curve("curve", samples)?;

    let default_config = PlotConfig::titration_curve(NO_TITLE);
    let config = config.unwrap_or(&default_config);
    let marker = equivalence_marker(equivalence, config.max_volume_ml);

    let path = output_path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("svg") => {
            let backend = SVGBackend::new(path, (config.width, config.height));
            plot_curve_impl(backend, samples, marker, config)?;
        }
        _ => {
            let backend = BitMapBackend::new(path, (config.width, config.height));
            plot_curve_impl(backend, samples, marker, config)?;
        }
    }

    log::info!("titration curve plotted: {}", path.display());
    Ok(())
}

/// Plot the recorded curve of a run
///
/// The volume axis spans the run's burette capacity. The equivalence marker
/// is left out for regimes that hide the titrant concentration, since it
/// would give the answer away.
pub fn plot_run<P: AsRef<Path>>(
    run: &TitrationRun,
    output_path: P,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let mut config = match config {
        Some(config) => config.clone(),
        None => PlotConfig::titration_curve(run.setup().regime.label()),
    };
    config.max_volume_ml = run.driver().max_volume_ml();

    let equivalence = (!run.setup().regime.hides_titrant()).then(|| run.equivalence_volume());
    plot_titration_curve(run.samples(), equivalence, output_path, Some(&config))
}

/// Overlay several titration curves for comparison
///
/// # Arguments
///
/// * `datasets`    — `(label, samples)` pairs, one per curve
/// * `output_path` — output file path (`.png` or `.svg`)
/// * `config`      — optional plot configuration;
///                   use `config.series_colors` to override the default palette
///
/// # Example
///
/// ```rust,ignore
/// plot_titration_comparison(
///     &[("0.05 M", dilute.as_slice()), ("0.1 M", standard.as_slice())],
///     "titrant_strength.png",
///     None,
/// )?;
/// ```
pub fn plot_titration_comparison<P: AsRef<Path>>(
    datasets: &[(&str, &[Sample])],
    output_path: P,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if datasets.is_empty() {
        return Err("Empty data: at least one curve is required".into());
    }
    for (label, samples) in datasets {
        validate_curve(label, samples)?;
    }

    let default_config = PlotConfig::comparison(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let path = output_path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("svg") => {
            let backend = SVGBackend::new(path, (config.width, config.height));
            plot_comparison_impl(backend, datasets, config)?;
        }
        _ => {
            let backend = BitMapBackend::new(path, (config.width, config.height));
            plot_comparison_impl(backend, datasets, config)?;
        }
    }

    log::info!("{} titration curves plotted: {}", datasets.len(), path.display());
    Ok(())
}

// =================================================================================================
// Helper Functions
// =================================================================================================

fn validate_curve(label: &str, samples: &[Sample]) -> Result<(), Box<dyn Error>> {
    if samples.is_empty() {
        return Err(format!("Empty data: {} has no samples", label).into());
    }
    if samples.iter().any(|s| !s.volume_ml.is_finite() || !s.ph.is_finite()) {
        return Err(format!("Invalid data: NaN or Inf detected in {}", label).into());
    }
    Ok(())
}

/// Equivalence volume to mark, if it falls on the volume axis
fn equivalence_marker(equivalence: Option<f64>, max_volume_ml: f64) -> Option<f64> {
    equivalence.filter(|v| v.is_finite() && *v >= 0.0 && *v <= max_volume_ml)
}

/// Segments `(start, end)` along the pH axis that make up the dashed marker
fn dash_segments() -> impl Iterator<Item = (f64, f64)> {
    (0..)
        .map(|i| i as f64 * DASH_PERIOD)
        .take_while(|start| *start < PH_AXIS_MAX)
        .map(|start| (start, (start + DASH_LENGTH).min(PH_AXIS_MAX)))
}

fn in_range(samples: &[Sample], max_volume_ml: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
    samples
        .iter()
        .filter(move |s| s.volume_ml <= max_volume_ml)
        .map(|s| (s.volume_ml, s.ph.clamp(0.0, PH_AXIS_MAX)))
}

// =================================================================================================
// Private Plot Implementations
// =================================================================================================

fn plot_curve_impl<DB: DrawingBackend>(
    backend: DB,
    samples: &[Sample],
    equivalence: Option<f64>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..config.max_volume_ml, 0.0..PH_AXIS_MAX)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;
    }

    chart
        .draw_series(LineSeries::new(
            in_range(samples, config.max_volume_ml),
            ShapeStyle::from(&config.line_color).stroke_width(config.line_width),
        ))?
        .label("pH")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &config.line_color));

    if let Some(v_eq) = equivalence {
        let color = config.equivalence_color;
        let style = ShapeStyle::from(&color).stroke_width(config.line_width);

        // Dashes are drawn as separate short paths
        chart
            .draw_series(
                dash_segments().map(|(start, end)| PathElement::new(vec![(v_eq, start), (v_eq, end)], style)),
            )?
            .label(format!("Equiv. Point ({:.2} mL)", v_eq))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 8, y)], &color)
            });
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn plot_comparison_impl<DB: DrawingBackend>(
    backend: DB,
    datasets: &[(&str, &[Sample])],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..config.max_volume_ml, 0.0..PH_AXIS_MAX)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;
    }

    for (idx, (label, samples)) in datasets.iter().enumerate() {
        let color = config.get_series_color(idx);

        chart
            .draw_series(LineSeries::new(
                in_range(samples, config.max_volume_ml),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
