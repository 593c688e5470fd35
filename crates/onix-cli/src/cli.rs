//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "onix-normalize",
    version,
    about = "Normalize ONIX 2.x/3.x product feeds into a flat book table",
    long_about = "Normalize publisher ONIX feeds (releases 2.x and 3.x) into one flat book table.\n\n\
                  Categories are derived from BISAC codes and subject phrases. Books marked in\n\
                  the previous table's \"To Collect (x)\" column stay marked across runs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML configuration file (default: $ONIX_NORMALIZE_CONFIG or ./onix-normalize.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract every product below the source directory into the book table.
    Extract(ExtractArgs),

    /// Show the categories of one or more BISAC codes.
    Lookup(LookupArgs),

    /// Show the custom tags the subject-heading phrases assign to a text.
    Match(MatchArgs),
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Directory with one sub-directory of ONIX files per publisher.
    #[arg(long = "source-dir", value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// BISAC code sheet (CSV).
    #[arg(long = "classification", value_name = "CSV")]
    pub classification: Option<PathBuf>,

    /// Subject heading phrase sheet (CSV).
    #[arg(long = "subject-headings", value_name = "CSV")]
    pub subject_headings: Option<PathBuf>,

    /// Book table to write; the previous version supplies selections.
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// State file carried between runs.
    #[arg(long = "state", value_name = "JSON")]
    pub state: Option<PathBuf>,

    /// Report what would be extracted without writing the table or state.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// BISAC codes to look up (case-insensitive).
    #[arg(value_name = "CODE", required = true)]
    pub codes: Vec<String>,

    /// BISAC code sheet (CSV).
    #[arg(long = "classification", value_name = "CSV")]
    pub classification: Option<PathBuf>,
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Free text, e.g. a subject heading or description.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Subject heading phrase sheet (CSV).
    #[arg(long = "subject-headings", value_name = "CSV")]
    pub subject_headings: Option<PathBuf>,
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
