//! microcode-check - Intel microcode update-list checker
//!
//! Reads the host processor's fingerprint (family, model, stepping) from
//! the OS hardware description, checks it against the known update list,
//! and reports which listed platforms this machine corresponds to along
//! with the firmware microcode revision currently loaded.

mod hardware;
mod microcode;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use crate::hardware::{CpuSummary, Fingerprint, MicrocodeInfo};
use crate::microcode::KNOWN_PROCESSORS;
use crate::report::Report;

/// Check this machine against the Intel microcode update list
#[derive(Parser)]
#[command(name = "microcode-check")]
#[command(version)]
#[command(about = "Identify the host CPU and check it against the microcode update list")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fingerprint the host and report update-list matches (default)
    Check {
        /// Emit the report as JSON instead of the terminal panel
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the known processor reference table
    List,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check { json }) => run_check(json),
        None => run_check(false),
        Some(Commands::List) => {
            print_reference_table();
            Ok(())
        }
    }
}

/// Fingerprint the host, scan the table, print the report.
///
/// Zero matches is a normal outcome and a normal exit; only unsupported
/// hosts, failed hardware queries and malformed identifier values abort.
fn run_check(json: bool) -> Result<()> {
    let selected = hardware::detect_source()?;

    let fingerprint = Fingerprint::detect(selected.source.as_ref(), &selected.keys)?;
    let microcode = MicrocodeInfo::detect(selected.source.as_ref(), &selected.keys)?;
    let cpu = CpuSummary::detect();

    let report = Report::generate(cpu, fingerprint, microcode);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.display());
    }

    Ok(())
}

fn print_reference_table() {
    println!(
        "{}",
        "KNOWN PROCESSORS (microcode update list):\n"
            .bright_yellow()
            .bold()
    );
    println!(
        "  {:<16} {:<10} {:>6} {:>6} {:>9} {:>9}  {:>5} -> {:<5}",
        "Codename", "Stepping", "Family", "Model", "Stepping", "Platform", "Old", "New"
    );
    for record in KNOWN_PROCESSORS {
        println!(
            "  {:<16} {:<10} {:>6} {:>6} {:>9} {:>9}  {:#5x} -> {:<#5x}",
            record.codename,
            record.stepping,
            record.family,
            record.model,
            record.stepping_id,
            record.platform_id,
            record.old_version,
            record.new_version
        );
        println!("  {:<16} {}", "", record.products.dimmed());
    }
}
