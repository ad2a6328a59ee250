use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use zeoclust::engine::config::LigandMode;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "zeoclust - Generate metal-ligand extraframework clusters on a rigid scaffold for catalyst screening.",
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

    /// Set the number of threads for parallel enumeration and building.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enumerate combinations for a scaffold and write one job file per conformer.
    Screen(ScreenArgs),
    /// List the available metals and ligands with their accessible states.
    Catalog(CatalogArgs),
}

/// Arguments for the `screen` subcommand.
#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Path to the run configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Override the output directory from the config file.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Override the ligand mode from the config file.
    #[arg(short, long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Stop after this many distinct combinations.
    #[arg(long, value_name = "INT")]
    pub max_results: Option<usize>,

    /// Run the enumeration and report results without writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `catalog` subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Also list the species defined in this catalog file.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// One ligand species per combination.
    Pure,
    /// Any mix of ligand species per combination.
    Mixed,
}

impl From<ModeArg> for LigandMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Pure => LigandMode::Pure,
            ModeArg::Mixed => LigandMode::Mixed,
        }
    }
}
