//! Example: Unknown Titrant Concentration
//!
//! A student titrates 25 mL of 0.1 M strong acid with a base of unknown
//! concentration, reads the equivalence point off the curve and checks the
//! back-calculated concentration.
//!
//! Pass a concentration as the first argument to change the hidden value
//! (default 0.125 mol/L).

use titration_rs::{
    chemistry::{Indicator, ReagentSpec},
    output::plot_titration_curve,
    output::PlotConfig,
    simulation::{ChallengeRun, GuessOutcome, TitrationDriver},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let hidden: f64 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 0.125,
    };

    let analyte = ReagentSpec::new(25.0, 0.1)?;
    let mut challenge = ChallengeRun::new(
        analyte,
        hidden,
        Indicator::Phenolphthalein.spec(),
        TitrationDriver::default(),
    )?;

    println!("\n═══════════════════════════════════════════════════════");
    println!("  Challenge: Unknown Concentration");
    println!("═══════════════════════════════════════════════════════\n");
    println!("  Analyte : {} mL at {} mol/L", analyte.volume_ml, analyte.concentration);
    println!("  Titrant : ??? mol/L\n");

    // Watch the flask until it changes colour
    challenge.start();
    while let Some(sample) = challenge.tick()? {
        if !challenge.current_color()?.is_transparent() {
            println!("  Flask turned pink at {:.1} mL (pH {:.2})", sample.volume_ml, sample.ph);
            break;
        }
    }
    challenge.finish()?;

    let Some(estimate) = challenge.estimate() else {
        println!("  No equivalence point inside the burette range.");
        return Ok(());
    };
    println!("  Estimated concentration : {:.4} mol/L", estimate);

    let verdict = match challenge.check_guess(estimate, 0.02)? {
        GuessOutcome::Correct => "correct",
        GuessOutcome::TooLow => "too low",
        GuessOutcome::TooHigh => "too high",
    };
    println!("  Verdict                 : {}", verdict);
    println!("  Actual concentration    : {} mol/L", challenge.reveal());

    let path = std::env::temp_dir().join("titration_challenge.png");
    let config = PlotConfig::titration_curve("Challenge: Unknown Concentration");
    plot_titration_curve(challenge.samples(), None, &path, Some(&config))?;
    println!("\n  Curve : {:?}", path);

    Ok(())
}
