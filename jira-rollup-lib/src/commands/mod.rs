//! Command-line interface and orchestration for jira-rollup
//!
//! The module is organized around three commands:
//!
//! - **report**: Load a snapshot, compute the configured sections, and emit them to the console,
//!   a JSON file, and/or a CSV file
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file for syntax errors and invalid values
//!
//! The `run` function parses command-line arguments using clap and routes to the appropriate
//! command handler. All output goes through a [`Host`], so the commands can be driven from tests.
//!
//! Configuration is a TOML file listing the sections to compute and the text shown for empty ones.

mod common;
mod config;
mod host;
mod init;
mod report;
mod run;
mod validate;

pub use common::{ColorMode, LogLevel};
pub use config::Config;
#[cfg(test)]
pub use host::TestHost;
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use report::{ReportArgs, process_report};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
