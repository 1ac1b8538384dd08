//! Titration simulation
//!
//! This module drives the stateless chemistry engine through a titration.
//!
//! # The Architecture (WHAT vs HOW)
//!
//! 1. **Setup** (`TitrationSetup`) - WHAT is titrated
//!    - analyte volume and concentration
//!    - titrant concentration
//!    - regime
//!
//! 2. **Driver** (`TitrationDriver`) - HOW the burette is operated
//!    - fixed volume step per tick
//!    - maximum volume
//!    - engine tolerance
//!
//! 3. **State** (`SimulationState`) - what happened so far
//!    - owned by the caller, passed in on every tick
//!    - reset by the caller
//!
//! `TitrationRun` bundles the three with an indicator and enforces the run
//! lifecycle; `ChallengeRun` hides the titrant concentration on top of it.
//!
//! # Workflow
//!
//! ```text
//! ┌────────────────┐     ┌─────────────────┐
//! │ TitrationSetup │     │ TitrationDriver │
//! └───────┬────────┘     └────────┬────────┘
//!         │                       │
//!         └──────────┬────────────┘
//!                    │ tick(&setup, &mut state)   ← external timer
//!           ┌────────▼────────┐
//!           │ SimulationState │  samples: (V, pH)
//!           └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use titration_rs::chemistry::{Indicator, ReagentSpec, TitrationRegime, TitrationSetup};
//! use titration_rs::simulation::{TitrationDriver, TitrationRun};
//!
//! let analyte = ReagentSpec::new(25.0, 0.1).unwrap();
//! let setup = TitrationSetup::new(analyte, 0.1, TitrationRegime::WeakAnalyteStrongTitrant).unwrap();
//! let mut run = TitrationRun::new(setup, Indicator::Phenolphthalein.spec(), TitrationDriver::default()).unwrap();
//!
//! run.start();
//! while run.tick().unwrap().is_some() {}
//!
//! assert_eq!(run.samples().len(), 500);
//! ```

mod challenge;
mod driver;
mod run;
mod state;

pub use challenge::{detect_equivalence, infer_titrant_concentration, ChallengeRun, GuessOutcome};
pub use driver::{TitrationDriver, DEFAULT_MAX_VOLUME_ML, DEFAULT_STEP_ML};
pub use run::TitrationRun;
pub use state::{Sample, SimulationState};
