use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "ProtNeRF Developers",
    version,
    about = "ProtNeRF CLI - Rebuild protein atom coordinates from backbone and side-chain internal angles.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to reconstruct chains in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconstruct Cartesian coordinates for every chain in an angle table.
    Build(BuildArgs),
    /// List the side-chain atoms each residue template places.
    Templates(TemplatesArgs),
}

/// Floating-point precision used for the reconstruction.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    F32,
    #[default]
    F64,
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    // --- Core Arguments ---
    /// Path to the input angle table (CSV, one row per residue).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output coordinate table (CSV, one row per atom).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Residue template file overriding the bundled standard templates.
    #[arg(short, long, value_name = "PATH")]
    pub templates: Option<PathBuf>,

    // --- Input Overrides ---
    /// Read angles in the input table as degrees instead of radians.
    #[arg(long)]
    pub degrees: bool,

    /// Floating-point precision of the reconstruction.
    #[arg(long, value_enum, default_value_t = Precision::F64)]
    pub precision: Precision,

    // --- Reconstruction Overrides ---
    /// Override the normalization epsilon from the config file.
    #[arg(long, value_name = "FLOAT")]
    pub epsilon: Option<f64>,

    /// Reject chains whose coordinates are non-finite or collapsed.
    #[arg(long)]
    pub validate: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S bond-lengths.c-n=1.33
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `templates` subcommand.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Residue template file to list instead of the bundled standard templates.
    #[arg(short, long, value_name = "PATH")]
    pub templates: Option<PathBuf>,
}
