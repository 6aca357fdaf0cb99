//! CLI argument parsing for perfhunt

use crate::report::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "perfhunt")]
#[command(version)]
#[command(about = "Find the commit that killed your performance", long_about = None)]
pub struct Cli {
    /// Known-good baseline revision
    #[arg(long, value_name = "REV")]
    pub from: String,

    /// Suspect (newest) revision
    #[arg(long, value_name = "REV", default_value = "HEAD")]
    pub to: String,

    /// Benchmark shell command, run with `sh -c` in the repository
    #[arg(long = "cmd", value_name = "COMMAND")]
    pub command: Option<String>,

    /// Benchmark runs per revision [default: 10]
    #[arg(short = 'n', long = "iterations", value_name = "N")]
    pub iterations: Option<usize>,

    /// Significance level for the rank-sum test [default: 0.05]
    #[arg(long, value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// Output format for the result
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Repository to hunt in
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub repo: PathBuf,

    /// Config file (defaults to perfhunt.toml in the repository, if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not print per-revision progress
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug tracing on stderr
    #[arg(long)]
    pub debug: bool,
}
