//! Command-line interface for `tripwire-replay`.

use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = "tripwire.toml";

/// Command line arguments parsed from user input.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Recorded call sites, one JSON object per line; stdin when absent
    pub trace: Option<PathBuf>,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
}

impl CliArgs {
    pub fn command() -> Command {
        Command::new("tripwire-replay")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Replays recorded host call sites through the tripwire adapters")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .default_value(DEFAULT_CONFIG),
            )
            .arg(
                Arg::new("trace")
                    .short('t')
                    .long("trace")
                    .value_name("FILE")
                    .help("Trace of recorded call sites (JSON lines); reads stdin if omitted"),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    /// Parses the process arguments, exiting with usage on error.
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG)),
            trace: matches.get_one::<String>("trace").map(PathBuf::from),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
        }
    }
}
