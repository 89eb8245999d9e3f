use super::Host;
use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::facts::{Dataset, Snapshot};
use crate::reports::{generate_console, generate_csv, generate_json};
use crate::sections::build_report;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "    report";

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Snapshot file exported from the issue tracker
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: Utf8PathBuf,

    /// Path to configuration file (default is `rollup.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Output the report to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output the report to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output the report to the console. If omitted, console output is shown only when no other reports are generated.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Computes the configured sections of a snapshot and writes the requested outputs
pub fn process_report<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;

    log::info!(target: LOG_TARGET, "Loading snapshot '{}'", args.snapshot);
    let snapshot = Snapshot::load(&args.snapshot)?;
    let dataset = Dataset::from_snapshot(snapshot, Utc::now())?;

    log::info!(
        target: LOG_TARGET,
        "Project {} has {} issues, {} versions, {} boards, {} components",
        dataset.project,
        dataset.issues.len(),
        dataset.versions.len(),
        dataset.boards.len(),
        dataset.components.len()
    );

    let report = build_report(&dataset, &config.sections);

    let generating_reports = args.json.is_some() || args.csv.is_some();
    if args.console || !generating_reports {
        let mut console_output = String::new();
        generate_console(&report, args.color.use_colors(), &config.empty_placeholder, &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(&report, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("unable to write JSON report '{filename}'"))?;
        log::info!(target: LOG_TARGET, "Wrote JSON report '{filename}'");
    }

    if let Some(filename) = &args.csv {
        let mut csv_output = String::new();
        generate_csv(&report, &mut csv_output)?;
        fs::write(filename, csv_output).into_app_err_with(|| format!("unable to write CSV report '{filename}'"))?;
        log::info!(target: LOG_TARGET, "Wrote CSV report '{filename}'");
    }

    Ok(())
}
