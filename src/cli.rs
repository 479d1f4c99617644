use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::artifacts::{DEFAULT_INPUT_PATH, DEFAULT_TOOL};
use crate::tabular::DEFAULT_PREVIEW_ROWS;

#[derive(Parser, Debug)]
#[command(
    name = "school-profile",
    version,
    about = "Build school-selection profiles and filter commands from form state"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a canonical profile from a field bag.
    Profile(ProfileArgs),
    /// Print the filter command line for a profile name.
    Command(PlanArgs),
    /// Write the batch runner wrapping the filter command.
    Runner(RunnerArgs),
    /// Profile, command and runner in one pass.
    Build(BuildArgs),
    /// Parse a delimited file and print its first rows.
    Preview(PreviewArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Field bag JSON file, or `-` for stdin.
    #[arg(long)]
    pub fields: PathBuf,

    #[arg(long, default_value = "")]
    pub profile_name: String,

    #[arg(long, default_value = "outputs")]
    pub output_root: PathBuf,

    /// Overrides `<output-root>/profiles/<slug>.json`.
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub stdout: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[arg(long, default_value = "")]
    pub profile_name: String,

    /// Blank falls back to the dated placeholder path.
    #[arg(long, default_value = DEFAULT_INPUT_PATH)]
    pub input_path: String,

    #[arg(long, default_value = DEFAULT_TOOL)]
    pub tool: String,

    #[arg(long, default_value = "outputs")]
    pub output_root: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct RunnerArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    #[arg(long, default_value = "run_filter.bat")]
    pub out: PathBuf,

    #[arg(long, default_value_t = false)]
    pub stdout: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[arg(long)]
    pub fields: PathBuf,

    #[command(flatten)]
    pub plan: PlanArgs,

    #[arg(long, default_value = "run_filter.bat")]
    pub runner_path: PathBuf,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PreviewFormat {
    Markdown,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    #[arg(long)]
    pub csv: PathBuf,

    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub max_rows: usize,

    #[arg(long, value_enum, default_value_t = PreviewFormat::Markdown)]
    pub format: PreviewFormat,
}
