//! titration-rs: Acid-Base Titration Simulator
//!
//! A small engine for teaching acid-base titration: closed-form pH for three
//! classroom regimes, indicator colours, a fixed-step burette driver, an
//! unknown-concentration challenge, CSV/JSON/plot output and an optional
//! language-model tutor.
//!
//! # Architecture
//!
//! titration-rs is built on two core principles:
//!
//! 1. **Separation of Chemistry and Simulation**
//!    - Chemistry answers "what is the pH after V mL?" (pure functions)
//!    - Simulation decides which V to ask about and records the curve
//!
//! 2. **Caller-Owned State**
//!    - The engine holds no state
//!    - `SimulationState` is passed explicitly to the driver on every tick
//!    - Reset, pause and resume are plain operations on that value
//!
//! # Quick Start
//!
//! ```rust
//! use titration_rs::prelude::*;
//!
//! # fn main() -> titration_rs::error::Result<()> {
//! // 1. Describe the experiment
//! let analyte = ReagentSpec::new(25.0, 0.1)?;
//! let setup = TitrationSetup::new(analyte, 0.1, TitrationRegime::StrongAnalyteStrongTitrant)?;
//!
//! // 2. Configure the run
//! let mut run = TitrationRun::new(setup, Indicator::Phenolphthalein.spec(), TitrationDriver::default())?;
//!
//! // 3. Add titrant until the burette is empty
//! run.finish()?;
//!
//! // 4. Read the results
//! assert_eq!(run.equivalence_volume(), 25.0);
//! assert!(run.current_ph()? > 12.0);
//! assert_eq!(run.current_color()?, Rgba::PINK);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`chemistry`]: pH engine, reagents and indicators
//! - [`simulation`]: driver, run lifecycle and challenge mode
//! - [`config`]: JSON configuration with defaults
//! - [`output`]: CSV/JSON export and plots
//! - [`tutor`]: language-model flows behind an injected trait
//! - [`error`]: crate error type

pub mod chemistry;
pub mod config;
pub mod error;
pub mod simulation;

pub mod output;
pub mod tutor;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use titration_rs::prelude::*;
    //! ```
    pub use crate::chemistry::{indicator_color,
                               Indicator,
                               IndicatorSpec,
                               ReagentSpec,
                               Rgba,
                               TitrationEngine,
                               TitrationRegime,
                               TitrationSetup};
    pub use crate::config::SimulationConfig;
    pub use crate::error::{Result, TitrationError};
    pub use crate::simulation::{ChallengeRun,
                                GuessOutcome,
                                Sample,
                                SimulationState,
                                TitrationDriver,
                                TitrationRun};
}
