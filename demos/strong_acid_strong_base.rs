//! Example: Classroom Titrations — Three Regimes Side by Side
//!
//! Titrates 25 mL of 0.1 M analyte with 0.1 M titrant in 0.1 mL steps up to
//! 50 mL, once per regime, then exports and plots the curves.
//!
//! ## Structure
//!
//! **Phase 1 — Runs** (3 regimes, phenolphthalein)
//! - Curve from a `TitrationRun` driven tick by tick
//!
//! **Phase 2 — Analysis**
//! - pH at 0 mL, half equivalence, equivalence and 50 mL
//! - Flask colour at the end of each run for every indicator
//!
//! **Phase 3 — Output**
//! - One CSV and one PNG per regime, one JSON report, one comparison plot
//!
//! Set `TITRATION_CONFIG` to a JSON file to override the defaults, and
//! `RUST_LOG=info` to see the run log.

use titration_rs::{
    chemistry::{indicator_color, Indicator, TitrationRegime},
    config::SimulationConfig,
    output::export::{export_report_json, CsvExporter, ExperimentReport, Exporter},
    output::{plot_run, plot_titration_comparison, PlotConfig},
    simulation::TitrationRun,
};

use std::time::Instant;

/// Prints a titled section banner to stdout.
fn print_section(title: &str) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════════════════════\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::var("TITRATION_CONFIG") {
        Ok(path) => SimulationConfig::load_or_default(path),
        Err(_) => SimulationConfig::default(),
    };
    let preset = &config.preset;

    print_section("Acid-Base Titration - Three Regimes");
    println!("  Analyte  : {} mL at {} mol/L", preset.analyte_volume_ml, preset.analyte_concentration);
    println!("  Titrant  : {} mol/L", preset.titrant_concentration);
    println!("  Step     : {} mL", config.driver.step_ml);
    println!("  Burette  : {} mL", config.driver.max_volume_ml);

    // =============================================================================================
    // Phase 1 — Runs
    // =============================================================================================

    print_section("Running Titrations");

    let regimes = [
        TitrationRegime::StrongAnalyteStrongTitrant,
        TitrationRegime::WeakAnalyteStrongTitrant,
        TitrationRegime::StrongAnalyteWeakTitrant,
    ];

    let mut runs = Vec::new();
    for regime in regimes {
        let mut run = TitrationRun::from_config(&config)?;
        run.set_regime(regime);

        let start = Instant::now();
        run.start();
        while run.tick()?.is_some() {}
        let elapsed = start.elapsed();

        println!(
            "  {:<26} : {} samples in {:.3} ms",
            regime.label(),
            run.samples().len(),
            elapsed.as_secs_f64() * 1000.0
        );
        runs.push(run);
    }

    // =============================================================================================
    // Phase 2 — Analysis
    // =============================================================================================

    print_section("Results: Key Points");

    for run in &runs {
        let engine = run.driver().engine();
        let setup = run.setup();
        let v_eq = run.equivalence_volume();

        println!("  {}", setup.regime.label());
        println!("    V_eq          : {:.2} mL", v_eq);
        println!("    pH(0)         : {:.2}", engine.ph_for(setup, 0.0)?);
        if run.equivalence_visible() {
            println!("    pH(V_eq / 2)  : {:.2}", engine.ph_for(setup, v_eq / 2.0)?);
            println!("    pH(V_eq)      : {:.2}", engine.ph_for(setup, v_eq)?);
        } else {
            println!("    equivalence beyond the burette");
        }
        println!("    pH(end)       : {:.2}\n", run.current_ph()?);
    }

    print_section("Flask Colour at the End");

    for run in &runs {
        let ph = run.current_ph()?;
        let colours: Vec<String> = Indicator::ALL
            .iter()
            .map(|indicator| format!("{} {}", indicator, indicator_color(ph, &indicator.spec()).to_css()))
            .collect();
        println!("  {:<26} : {}", run.setup().regime.label(), colours.join(" | "));
    }

    // =============================================================================================
    // Phase 3 — Output
    // =============================================================================================

    print_section("Generating Files");

    let tmp_dir = std::env::temp_dir();
    let exporter = CsvExporter::default();

    for run in &runs {
        let name = run.setup().regime.name();

        let csv_path = tmp_dir.join(format!("titration_{}.csv", name));
        exporter.export_run(run, None, &csv_path)?;
        println!("  {} CSV : {:?}", name, csv_path);

        let png_path = tmp_dir.join(format!("titration_{}.png", name));
        plot_run(run, &png_path, None)?;
        println!("  {} PNG : {:?}", name, png_path);
    }

    let report_path = tmp_dir.join("titration_report.json");
    export_report_json(&ExperimentReport::from_run(&runs[0]), &report_path)?;
    println!("  report : {:?}", report_path);

    let datasets: Vec<(&str, &[_])> = runs
        .iter()
        .map(|run| (run.setup().regime.label(), run.samples()))
        .collect();
    let comparison_path = tmp_dir.join("titration_comparison.png");
    plot_titration_comparison(&datasets, &comparison_path, Some(&PlotConfig::comparison("Three Regimes")))?;
    println!("  comparison : {:?}", comparison_path);

    Ok(())
}
