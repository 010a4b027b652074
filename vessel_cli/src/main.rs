//! # Vessel Inspection CLI
//!
//! Command-line driver for `vessel_core`. Reads JSON inputs, runs the
//! requested evaluation and prints the result as pretty JSON on stdout.
//! Log output goes to stderr so stdout stays machine-readable.
//!
//! ```text
//! vessel_cli component shell.json
//! vessel_cli --settings plant.toml batch vessel.json
//! vessel_cli stress SA-516-70 650
//! vessel_cli equations > EQUATIONS.md
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use vessel_core::calculations::{
    component, ffs, nozzle, summarize, CalculationItem, CalculationOutput, ComponentInput,
    GeneralMetalLossInput, LocalThinAreaInput, NozzleInput, VesselSummary,
};
use vessel_core::equations::{generate_equations_markdown, EquationTracker};
use vessel_core::{CalcSettings, ReferenceData};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pressure vessel inspection calculations", long_about = None)]
struct Cli {
    /// TOML file overriding the default calculation settings
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a shell course or head
    Component { input: PathBuf },
    /// Evaluate a nozzle neck
    Nozzle { input: PathBuf },
    /// API 579 Level 1 assessment (general metal loss or local thin area)
    Ffs { input: PathBuf },
    /// Evaluate a JSON list of calculation items and summarize the components
    Batch { input: PathBuf },
    /// Look up allowable stress for a material at a temperature (°F)
    Stress { material: String, temperature_f: f64 },
    /// Print the equation reference as Markdown
    Equations,
}

/// FFS input file: the assessment kind selects the input shape.
#[derive(Debug, Deserialize)]
#[serde(tag = "assessment", rename_all = "snake_case")]
enum FfsRequest {
    GeneralMetalLoss(GeneralMetalLossInput),
    LocalThinArea(LocalThinAreaInput),
}

/// One batch entry: the evaluation or the error it produced.
#[derive(Debug, Serialize)]
struct BatchEntry {
    label: String,
    calc_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<CalculationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<vessel_core::CalcError>,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    items: Vec<BatchEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<VesselSummary>,
    /// "List of Equations" appendix covering every successful item
    equation_appendix: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    StderrLogger::install(cli.verbose)?;

    let settings = match &cli.settings {
        Some(path) => CalcSettings::load(path)?,
        None => CalcSettings::default(),
    };

    match cli.command {
        Command::Equations => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
        Command::Stress { material, temperature_f } => {
            if temperature_f.is_nan() {
                bail!("temperature must be a number");
            }
            let reference = ReferenceData::builtin()?;
            match reference.stress_at(&material, temperature_f) {
                Some(lookup) => print_json(&lookup),
                None => bail!("material '{}' not found in the stress table", material),
            }
        }
        Command::Component { input } => {
            let reference = ReferenceData::builtin()?;
            let input: ComponentInput = read_json(&input)?;
            print_json(&component::calculate(&input, &reference, &settings)?)
        }
        Command::Nozzle { input } => {
            let reference = ReferenceData::builtin()?;
            let input: NozzleInput = read_json(&input)?;
            print_json(&nozzle::calculate(&input, &reference, &settings)?)
        }
        Command::Ffs { input } => match read_json::<FfsRequest>(&input)? {
            FfsRequest::GeneralMetalLoss(input) => {
                print_json(&ffs::assess_general_metal_loss(&input, &settings)?)
            }
            FfsRequest::LocalThinArea(input) => print_json(&ffs::assess_local_thin_area(&input, &settings)?),
        },
        Command::Batch { input } => {
            let reference = ReferenceData::builtin()?;
            let items: Vec<CalculationItem> = read_json(&input)?;
            print_json(&run_batch(&items, &reference, &settings)?)
        }
    }
}

fn run_batch(items: &[CalculationItem], reference: &ReferenceData, settings: &CalcSettings) -> Result<BatchReport> {
    let mut entries = Vec::with_capacity(items.len());
    let mut components = Vec::new();
    let mut tracker = EquationTracker::new();

    for item in items {
        let (output, error) = match item.evaluate(reference, settings) {
            Ok(output) => {
                tracker.merge(output.equation_tracker(item.label(), item.calc_type()));
                if let CalculationOutput::Component(result) = &output {
                    components.push(result.clone());
                }
                (Some(output), None)
            }
            Err(e) => {
                // Record faults warn; reference table or config faults are errors
                let level = if e.is_input_error() { log::Level::Warn } else { log::Level::Error };
                log::log!(level, "{} '{}' failed: {}", item.calc_type(), item.label(), e);
                (None, Some(e))
            }
        };
        entries.push(BatchEntry {
            label: item.label().to_string(),
            calc_type: item.calc_type(),
            output,
            error,
        });
    }

    let summary = if components.is_empty() {
        None
    } else {
        Some(summarize(&components)?)
    };
    log::info!("batch: {} items, {} components summarized", entries.len(), components.len());

    Ok(BatchReport {
        items: entries,
        summary,
        equation_appendix: tracker.generate_appendix_markdown(),
    })
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Minimal `log` backend writing to stderr.
struct StderrLogger {
    level: log::LevelFilter,
}

impl StderrLogger {
    fn install(verbose: u8) -> Result<()> {
        let level = match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        log::set_boxed_logger(Box::new(StderrLogger { level })).context("installing logger")?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffs_request_tag() {
        let json = r#"{
            "assessment": "general_metal_loss",
            "label": "Shell",
            "minimum_required_thickness_in": 0.30,
            "measured_thickness_in": 0.40,
            "future_corrosion_allowance_in": 0.02,
            "corrosion_rate_mpy": 5.0,
            "operating_pressure_psi": 100.0,
            "mawp_psi": 150.0
        }"#;
        let request: FfsRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(request, FfsRequest::GeneralMetalLoss(_)));
    }

    #[test]
    fn test_batch_collects_errors_and_summary() {
        let json = r#"[
            {
                "type": "Component",
                "label": "Shell",
                "design_pressure_psi": 150.0,
                "design_temperature_f": 300.0,
                "inside_diameter_in": 60.0,
                "material_spec": "SA-516-70",
                "nominal_thickness_in": 0.5,
                "actual_thickness_in": 0.47,
                "corrosion_allowance_in": 0.125,
                "joint_efficiency": 0.85,
                "component": { "type": "shell" },
                "evaluation_date": "2025-06-01"
            },
            {
                "type": "Nozzle",
                "label": "N9",
                "nominal_size": "2",
                "schedule": "40",
                "actual_thickness_in": 0.15,
                "design_pressure_psi": 150.0,
                "design_temperature_f": 300.0,
                "material_spec": "UNOBTAINIUM"
            }
        ]"#;
        let items: Vec<CalculationItem> = serde_json::from_str(json).unwrap();
        let reference = ReferenceData::builtin().unwrap();
        let report = run_batch(&items, &reference, &CalcSettings::default()).unwrap();

        assert_eq!(report.items.len(), 2);
        assert!(report.items[0].output.is_some());
        assert!(report.items[1].error.is_some());
        assert_eq!(report.summary.unwrap().component_count, 1);
        assert!(report.equation_appendix.contains("Applied to: Shell"));
        assert!(!report.equation_appendix.contains("N9"));
    }
}
