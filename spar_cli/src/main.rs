//! # Sparcalc CLI
//!
//! Terminal front end for the spar rib sizing engine. Evaluates one rib
//! bay against the standard wing loads, prints the margin table, and can
//! optionally run the mass-minimization sweep for the bay, write the CSV
//! report files, and save the result as a project file.

use std::io::{self, BufRead, Write};
use std::path::Path;

use spar_core::loads::{front_spar_height_mm, standard_wing_loads, SpanwiseLoads, StationTable};
use spar_core::report::ReportWriter;
use spar_core::rib::{MarginValue, RibBuilder, RibEvaluation};
use spar_core::sizing::{minimize_mass, CandidateGrid};
use spar_core::{save_project, SparProject};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{} [{}]: ", prompt, default);
    if io::stdout().flush().is_err() {
        return default;
    }
    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }
    input.trim().parse().unwrap_or(default)
}

fn prompt_usize(prompt: &str, default: usize) -> usize {
    prompt_f64(prompt, default as f64) as usize
}

fn prompt_yes(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return false;
    }
    matches!(input.trim(), "y" | "Y" | "yes")
}

fn margin_line(name: &str, margin: &MarginValue) -> String {
    match margin {
        MarginValue::Computed(ms) => {
            let icon = if *ms >= 0.0 { "[OK]" } else { "[FAIL]" };
            format!("  {:<30} M.S. = {:+.3} {}", name, ms, icon)
        }
        MarginValue::NotApplicable(_) => {
            format!("  {:<30} not applicable", name)
        }
    }
}

fn print_evaluation(result: &RibEvaluation) {
    println!("Loads:");
    println!("  Sf = {:.0} N", result.sf_n);
    println!("  Mf = {:.0} N*m", result.mf_nm);
    println!("  he = {:.1} mm", result.he_mm);
    println!();
    println!("Margins:");
    for (name, margin) in result.margins.entries() {
        println!("{}", margin_line(name, margin));
    }
    println!();
    println!("Mass: {:.3} kg", result.mass_kg);
    for diagnostic in &result.diagnostics {
        println!("  note: {:?}", diagnostic);
    }
    println!();
    let verdict = if result.margins.passes() {
        "PASS"
    } else {
        "FAIL"
    };
    match result.margins.governing() {
        Some((name, ms)) => {
            println!("RESULT: {} (governs: {}, M.S. = {:+.3})", verdict, name, ms)
        }
        None => println!("RESULT: {}", verdict),
    }
}

fn main() {
    println!("Sparcalc - Wing Spar Rib Sizing");
    println!("===============================");
    println!();

    let stations = StationTable::standard_wing();
    let loads = standard_wing_loads();

    let index = prompt_usize("Rib station index (0 = root bay)", 0).min(stations.len() - 1);
    let y_left = stations.y_left(index).expect("index clamped above");
    println!(
        "Bay {}: STA {:.0} to {:.0}, spar height {:.0} mm",
        index,
        y_left,
        stations.y_right(index).expect("index clamped above"),
        front_spar_height_mm(y_left)
    );
    println!();

    let web_t = prompt_f64("Web thickness (mm)", 2.03);
    let divisions = prompt_f64("Web panel count", 3.0) as u32;
    let stiff_t = prompt_f64("Stiffener thickness (mm)", 2.03);
    let stiff_b1 = prompt_f64("Stiffener bottom leg (mm)", 20.0);
    let stiff_b2 = prompt_f64("Stiffener free leg (mm)", 25.0);
    let cf_t = prompt_f64("Compression flange thickness (mm)", 6.0);
    let cf_b1 = prompt_f64("Compression flange bottom leg (mm)", 34.5);
    let cf_b2 = prompt_f64("Compression flange height leg (mm)", 34.5);
    let tf_t = prompt_f64("Tension flange thickness (mm)", 8.0);
    let tf_b1 = prompt_f64("Tension flange bottom leg (mm)", 34.5);
    let tf_b2 = prompt_f64("Tension flange height leg (mm)", 34.5);
    let d_stiff = prompt_f64("Stiffener rivet diameter (mm)", 3.175);
    let d_flange = prompt_f64("Flange rivet diameter (mm)", 6.35);

    println!();

    let rib = RibBuilder::new(&stations, index)
        .and_then(|b| b.web(web_t, divisions))
        .and_then(|b| b.stiffener(stiff_t, stiff_b1, stiff_b2))
        .and_then(|b| b.compression_flange(cf_t, cf_b1, cf_b2))
        .and_then(|b| b.tension_flange(tf_t, tf_b1, tf_b2))
        .and_then(|b| b.stiffener_rivets(d_stiff))
        .and_then(|b| b.flange_rivets(d_flange, 4.0, 2))
        .and_then(|b| b.build());

    let rib = match rib {
        Ok(rib) => rib,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    };

    let result = rib.evaluate_with(loads);

    println!("=======================================");
    println!("  RIB EVALUATION - STA {:.0}", y_left);
    println!("=======================================");
    println!();
    print_evaluation(&result);
    println!("=======================================");
    println!();

    if prompt_yes("Write CSV report files to ./results") {
        match ReportWriter::new("results").and_then(|w| w.write_rib(&rib, &result)) {
            Ok(()) => println!("Report tables written to ./results"),
            Err(e) => eprintln!("Report error: {}", e),
        }
        println!();
    }

    if prompt_yes("Run the coarse sizing sweep for this bay") {
        let grid = CandidateGrid::coarse();
        println!(
            "Sweeping {} candidates at STA {:.0}...",
            grid.candidate_count(),
            y_left
        );
        let sf = loads.shear_n(y_left);
        let mf = loads.moment_nm(y_left);
        match minimize_mass(&stations, index, &grid, sf, mf) {
            Ok(outcome) => {
                println!(
                    "Evaluated {} candidates ({} passing, {} skipped)",
                    outcome.evaluated, outcome.passing, outcome.skipped
                );
                match outcome.best {
                    Some(best) => {
                        println!(
                            "Lightest passing design: {:.3} kg",
                            best.evaluation.mass_kg
                        );
                        if let Ok(json) = serde_json::to_string_pretty(&best.geometry) {
                            println!("{}", json);
                        }
                        if prompt_yes("Save as project file ./sizing.spar") {
                            let mut project =
                                SparProject::new("sparcalc", "INTERACTIVE", "local");
                            project.retain_design(best);
                            match save_project(&project, Path::new("sizing.spar")) {
                                Ok(()) => println!("Saved sizing.spar"),
                                Err(e) => eprintln!("Save error: {}", e),
                            }
                        }
                    }
                    None => println!("No candidate passed all margins."),
                }
            }
            Err(e) => eprintln!("Sizing error: {}", e),
        }
    }
}
