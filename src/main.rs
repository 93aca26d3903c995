use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info};

mod config;
mod constants;
mod error;
mod logging;
mod normalize;
mod pipeline;
mod record;
mod sink;
mod source;
mod verify;

use crate::config::ScrubConfig;
use crate::constants::ID;
use crate::pipeline::Pipeline;
use crate::verify::VerificationReport;

#[derive(Parser)]
#[command(name = "contact_scrubber")]
#[command(about = "Cleans legacy contact exports for CRM migration")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML config file overriding the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean an input file and write the migrated CSV
    Run {
        /// Input file (.csv or .xlsx)
        #[arg(long)]
        input: PathBuf,
        /// Output CSV path
        #[arg(long, default_value = "output_data.csv")]
        output: PathBuf,
        /// Also write the verification report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
        /// Exit nonzero when any verification check warns
        #[arg(long)]
        strict: bool,
    },
    /// Re-run the verification checks on an already-cleaned file
    Verify {
        /// Cleaned file to check (.csv or .xlsx)
        #[arg(long)]
        input: PathBuf,
        /// Also write the verification report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
        /// Exit nonzero when any verification check warns
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScrubConfig::load(path)?,
        None => ScrubConfig::default(),
    };

    match cli.command {
        Commands::Run {
            input,
            output,
            report,
            strict,
        } => {
            println!("🧹 Cleaning contact records from {}...", input.display());

            let records = source::open(&input)?.load()?;
            info!(rows = records.len(), "loaded input records");

            let pipeline = Pipeline::new(config)?;
            let outcome = match pipeline.run(records) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("pipeline run failed: {e}");
                    println!("❌ Run failed: {e}");
                    std::process::exit(1);
                }
            };

            sink::write_csv(&outcome.records, &output)?;
            println!(
                "✅ Wrote {} cleaned records to {}",
                outcome.records.len(),
                output.display()
            );

            print_report(&outcome.report);
            if let Some(path) = report {
                write_report(&outcome.report, &path)?;
            }
            if strict && !outcome.report.all_passed() {
                std::process::exit(2);
            }
        }
        Commands::Verify {
            input,
            report,
            strict,
        } => {
            println!("🔎 Verifying {}...", input.display());

            let records = source::open(&input)?.load()?;
            let id_column = config.fields.prefixed(ID);
            records.require_column(&id_column)?;

            let result = verify::verify(&records, &id_column);
            print_report(&result);
            if let Some(path) = report {
                write_report(&result, &path)?;
            }
            if strict && !result.all_passed() {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}

fn print_report(report: &VerificationReport) {
    println!("\n📋 Verification report:");
    for line in report.summary_lines() {
        println!("   {line}");
    }
}

fn write_report(report: &VerificationReport, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("writing verification report to {}", path.display()))?;
    println!("📝 Verification report saved to {}", path.display());
    Ok(())
}
