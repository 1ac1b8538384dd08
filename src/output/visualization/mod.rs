//! Visualization module for titration results
//!
//! This module draws titration curves with the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **curve**: pH vs volume plots, single or overlaid
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use titration_rs::output::visualization::{plot_run, plot_titration_curve, PlotConfig};
//!
//! run.finish()?;
//!
//! // Everything taken from the run (axis bound, equivalence marker)
//! plot_run(&run, "run.png", None)?;
//!
//! // Or from raw samples with a custom config
//! let config = PlotConfig::titration_curve("HCl vs NaOH").with_max_volume(40.0);
//! plot_titration_curve(run.samples(), Some(25.0), "hcl.svg", Some(&config))?;
//! ```
//!
//! # When to Use Which Function
//!
//! | Use Case | Function |
//! |----------|----------|
//! | One recorded run | `plot_run` |
//! | Curve from raw samples | `plot_titration_curve` |
//! | Compare regimes or concentrations | `plot_titration_comparison` |

pub mod config;
pub mod curve;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};

pub use curve::{plot_run, plot_titration_comparison, plot_titration_curve};
