use clap::{Args, Parser, Subcommand};
use dlpconf::core::io::dlpoly::LevelOfDetail;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "dlpconf - inspect and rewrite DL_POLY CONFIG/REVCON configuration files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a summary of a configuration file (header, composition, cell).
    Info(InfoArgs),
    /// Read a configuration file and write it back with new output settings.
    Rewrite(RewriteArgs),
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the CONFIG/REVCON file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `rewrite` subcommand.
#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Path to the input CONFIG/REVCON file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output CONFIG file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Write options in TOML format (`title`, `level-of-detail`).
    /// Replaces the title and level of detail taken from the input header.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the level of detail (0: positions, 1: + velocities, 2: + forces).
    #[arg(short, long, value_name = "INT", value_parser = parse_level)]
    pub level: Option<LevelOfDetail>,

    /// Override the title line.
    #[arg(short, long, value_name = "TEXT")]
    pub title: Option<String>,
}

fn parse_level(value: &str) -> Result<LevelOfDetail, String> {
    let flag: i64 = value
        .parse()
        .map_err(|_| format!("'{}' is not an integer", value))?;
    LevelOfDetail::try_from(flag).map_err(|e| e.to_string())
}
