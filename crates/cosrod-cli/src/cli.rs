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
    author = "The cosrod developers",
    version,
    about = "cosrod CLI - Elastic energies, finite-difference forces and steric contacts for discretized Cosserat rods.",
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
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the elastic energy of a rod, with a per-node breakdown.
    Energy(EnergyArgs),
    /// Compute finite-difference forces and torques on every node of a rod.
    Forces(ForcesArgs),
    /// Evaluate the steric contact between one element of each of two rods.
    Contact(ContactArgs),
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug)]
pub struct EnergyArgs {
    /// Path to the rod description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Print the energy of every node in addition to the totals.
    #[arg(long)]
    pub per_node: bool,

    #[command(flatten)]
    pub evaluation: EvaluationArgs,
}

/// Arguments for the `forces` subcommand.
#[derive(Args, Debug)]
pub struct ForcesArgs {
    /// Path to the rod description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub evaluation: EvaluationArgs,
}

/// Arguments for the `contact` subcommand.
#[derive(Args, Debug)]
pub struct ContactArgs {
    /// Rod carrying the first element.
    #[arg(short = 'a', long, required = true, value_name = "PATH")]
    pub first: PathBuf,

    /// Rod carrying the second element. Defaults to the first rod.
    #[arg(short = 'b', long, value_name = "PATH")]
    pub second: Option<PathBuf>,

    /// Element index on the first rod.
    #[arg(long, required = true, value_name = "INT")]
    pub element_a: usize,

    /// Element index on the second rod.
    #[arg(long, required = true, value_name = "INT")]
    pub element_b: usize,

    /// Override `sterics.radius` from the config file.
    #[arg(long, value_name = "FLOAT")]
    pub radius: Option<f64>,

    /// Override `sterics.force-constant` from the config file.
    #[arg(short = 'k', long, value_name = "FLOAT")]
    pub force_constant: Option<f64>,

    #[command(flatten)]
    pub evaluation: EvaluationArgs,
}

/// Options shared by every command that runs the finite-difference engine.
#[derive(Args, Debug, Default)]
pub struct EvaluationArgs {
    /// Path to an evaluation configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override `finite-difference.translation-step` from the config file.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub translation_step: Option<f64>,

    /// Override `finite-difference.rotation-step` from the config file.
    #[arg(short = 'r', long, value_name = "FLOAT")]
    pub rotation_step: Option<f64>,

    /// Override `finite-difference.scheme` from the config file.
    #[command(flatten)]
    pub scheme: SchemeSelection,

    /// Disable NaN/Inf screening of energy terms, overriding the config file.
    #[arg(long)]
    pub no_validation: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S finite-difference.scheme=forward
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    /// How results are written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Layout of the results printed on stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned columns for reading.
    #[default]
    Table,
    /// A TOML document with the same fields as the result types.
    Toml,
}

/// A group to handle mutually exclusive difference-scheme flags.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct SchemeSelection {
    /// Use central differences `(E(−δ) − E(+δ)) / 2δ`.
    #[arg(long)]
    pub central: bool,
    /// Use forward differences `(E(0) − E(+δ)) / δ`.
    #[arg(long)]
    pub forward: bool,
}
