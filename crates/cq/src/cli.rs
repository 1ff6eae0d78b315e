//! Clap CLI definitions for the `cq` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// cq -- compile and evaluate CQQL preference queries.
///
/// Parses a formula, expands the weighted connectives WAND/WOR, removes
/// overlaps between ordinal buckets (price__low, price__high, ...) and ranks
/// objects by their fuzzy match score.
#[derive(Parser, Debug)]
#[command(
    name = "cq",
    about = "Compile and evaluate CQQL preference queries",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Config file (default: auto-discover .cqql/config.yaml).
    #[arg(long, global = true, env = "CQQL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dataset of scored objects, one JSON object per line
    /// (default: `data` from the config, else the built-in apartments).
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a formula and print it in canonical form.
    Parse(FormulaArgs),

    /// List the atoms a formula references.
    Atoms(FormulaArgs),

    /// Expand WAND/WOR into plain boolean connectives.
    Expand(FormulaArgs),

    /// Normalize a formula so no ordinal buckets overlap.
    Normalize(NormalizeArgs),

    /// Print every pipeline stage, then rank the dataset.
    Explain(RankArgs),

    /// Rank the dataset by match score.
    Rank(RankArgs),

    /// Evaluate a formula as crisp boolean logic.
    Check(CheckArgs),

    /// Show or initialize the configuration.
    Config(ConfigArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),
}

/// A single formula argument.
#[derive(Args, Debug)]
pub struct FormulaArgs {
    /// The CQQL formula, or `-` to read it from stdin.
    pub formula: String,
}

/// Normalizer settings that override the config.
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Ordinal attributes, comma separated (default: `ordinal` from the config).
    #[arg(long, value_delimiter = ',')]
    pub ordinal: Vec<String>,

    /// Maximum split recursion depth (default: `max-depth` from the config).
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// Arguments for `cq normalize`.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// The CQQL formula, or `-` to read it from stdin.
    pub formula: String,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Arguments for `cq rank` and `cq explain`.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// The CQQL formula, or `-` to read it from stdin.
    pub formula: String,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Show only the best N objects.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for `cq check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// The CQQL formula, or `-` to read it from stdin.
    pub formula: String,

    /// Atoms that are true; every other atom is false.
    pub atoms: Vec<String>,
}

/// Arguments for `cq config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Print the path of the discovered config file.
    Path,
    /// Write .cqql/config.yaml in the current directory.
    Init(ConfigInitArgs),
}

/// Arguments for `cq config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,

    /// Write plain defaults instead of the apartment demo profile.
    #[arg(long)]
    pub empty: bool,
}

/// Arguments for `cq completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
