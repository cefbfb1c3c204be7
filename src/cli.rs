use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropwatch",
    version,
    about = "Agricultural weather alerts from forecast series"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate alerts from a forecast series file
    Evaluate {
        /// JSON file with temperature, humidity and precipitation series ("-" for stdin)
        input: PathBuf,

        /// Lead-time reference date (defaults to the earliest forecast date)
        #[arg(long)]
        reference: Option<NaiveDate>,

        /// Ignore forecast days before this date
        #[arg(long)]
        since: Option<NaiveDate>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Print summary statistics to stderr
        #[arg(long)]
        summary: bool,
    },
    /// List configured alert rules
    Rules {
        /// Forecast series JSON to run each rule against separately
        #[arg(long)]
        check: Option<PathBuf>,
    },
    /// Compare alerts for a forecast with observed daily conditions
    Validate {
        /// Forecast series JSON
        input: PathBuf,
        /// Observed daily conditions JSON (array of records)
        observed: PathBuf,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}
