//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use facet_model::{Facet, SelectionSet, Selections, parse_id_list};

#[derive(Parser)]
#[command(
    name = "facet-filter",
    version,
    about = "Browse and validate cascading module, unit and location filters",
    long_about = "Browse and validate cascading module, unit and location filters.\n\n\
                  Selecting values in one facet narrows the options of the other two.\n\
                  `apply` submits the combined selection to the backend for validation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend API root (overrides the config file).
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Read client settings from this file instead of the default location.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides the config file).
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "compact",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the options of every facet under the given selection.
    Browse(SelectionArgs),

    /// Validate the given selection and print the result.
    Apply(SelectionArgs),
}

#[derive(Args)]
pub struct SelectionArgs {
    /// Selected module ids, comma-separated.
    #[arg(long = "modules", value_name = "IDS", value_parser = parse_ids)]
    pub modules: Option<SelectionSet>,

    /// Selected unit ids, comma-separated.
    #[arg(long = "units", value_name = "IDS", value_parser = parse_ids)]
    pub units: Option<SelectionSet>,

    /// Selected location ids, comma-separated.
    #[arg(long = "locations", value_name = "IDS", value_parser = parse_ids)]
    pub locations: Option<SelectionSet>,
}

impl SelectionArgs {
    pub fn selections(&self) -> Selections {
        let mut selections = Selections::new();
        for (facet, ids) in [
            (Facet::Modules, &self.modules),
            (Facet::Units, &self.units),
            (Facet::Locations, &self.locations),
        ] {
            if let Some(ids) = ids {
                selections.set(facet, ids.clone());
            }
        }
        selections
    }
}

fn parse_ids(input: &str) -> Result<SelectionSet, String> {
    parse_id_list(input).map_err(|e| e.to_string())
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
