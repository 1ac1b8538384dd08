//! Output module for titration results
//!
//! This module provides tools to output simulation results in various formats:
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV and JSON files for external analysis and the tutor
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots
//! │   ├── config.rs
//! │   └── curve.rs
//! └── export/             ← Data export
//!     ├── csv.rs
//!     └── json.rs
//! ```
//!
//! # Quick Start
//!
//! ## Visualization
//!
//! ```rust,ignore
//! use titration_rs::output::visualization::plot_titration_curve;
//!
//! plot_titration_curve(run.samples(), Some(25.0), "curve.png", None)?;
//! ```
//!
//! ## Export
//!
//! ```rust,ignore
//! use titration_rs::output::export::{export_report_json, export_titration_csv, ExperimentReport};
//!
//! export_titration_csv(run.samples(), "curve.csv", None)?;
//! export_report_json(&ExperimentReport::from_run(&run), "report.json")?;
//! ```
//!
//! Both sub-modules take plain `&[Sample]` slices, so they work equally on a
//! live run, a finished [`SimulationState`](crate::simulation::SimulationState)
//! or a curve built by hand.

pub mod export;
pub mod visualization;

pub use visualization::{plot_run, plot_titration_comparison, plot_titration_curve, PlotConfig};

pub use export::{
    export_report_json,
    export_titration_csv,
    CsvConfig,
    CsvExporter,
    ExperimentReport,
    Exporter,
    JsonExporter,
};
