//! Command dispatch logic for jira-rollup

use super::{InitArgs, ReportArgs, ValidateArgs, init_config, process_report, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "jira-rollup", author, version, long_about = None)]
#[command(about = "Effort rollups and overtime projections for Jira projects")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: RollupSubcommand,
}

#[derive(Subcommand, Debug)]
enum RollupSubcommand {
    /// Compute the configured sections of a snapshot and generate reports
    Report(Box<ReportArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        RollupSubcommand::Report(report_args) => process_report(host, report_args),
        RollupSubcommand::Init(init_args) => init_config(host, init_args),
        RollupSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
