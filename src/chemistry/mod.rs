//! Titration chemistry
//!
//! This module holds the pure, stateless part of the simulator:
//!
//! - **Reagents** ([`ReagentSpec`], [`TitrationSetup`]): validated inputs
//! - **Regimes** ([`TitrationRegime`]): which closed-form pH formula applies
//! - **Engine** ([`TitrationEngine`]): pH and equivalence volume
//! - **Indicators** ([`Indicator`], [`IndicatorSpec`]): flask colour for a pH
//!
//! # Architecture
//!
//! The chemistry is **separate from the simulation loop**:
//! - this module answers "what is the pH after V mL?"
//! - [`crate::simulation`] decides which V to ask about and records the curve
//!
//! Dependency order is strictly bottom-up: indicator colour depends on pH,
//! pH depends on the equivalence point and the per-regime formulas.
//!
//! # Example
//!
//! ```rust
//! use titration_rs::chemistry::{
//!     equivalence_volume, indicator_color, ph, Indicator, ReagentSpec, TitrationRegime,
//! };
//!
//! let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
//! let regime = TitrationRegime::StrongAnalyteStrongTitrant;
//!
//! let v_eq = equivalence_volume(&analyte, 0.1);
//! let value = ph(&analyte, 0.1, v_eq, regime).unwrap();
//! assert_eq!(value, 7.0);
//!
//! let colour = indicator_color(value, &Indicator::Phenolphthalein.spec());
//! assert!(colour.is_transparent());
//! ```

pub mod engine;
pub mod indicator;
pub mod reagent;

pub use engine::{
    equivalence_volume,
    ph,
    TitrationEngine,
    DEFAULT_EQUIVALENCE_TOLERANCE,
    NEUTRAL_PH,
    PKW,
    WEAK_ACID_PKA,
    WEAK_BASE_PKB,
};
pub use indicator::{indicator_color, ColorTransition, Indicator, IndicatorSpec, Rgba};
pub use reagent::{ReagentSpec, TitrationRegime, TitrationSetup};
