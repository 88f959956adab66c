mod check;
mod completions;
mod generate;
mod outdated;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use dtgen_codegen::ProjectLayout;
use eyre::{Context, Result};
use generate::GenerateCommand;
use outdated::OutdatedCommand;

/// Extension trait for exiting on spec errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for dtgen_spec::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "dtgen")]
#[command(version)]
#[command(about = "Generate C++ data classes from TOML specs")]
pub(crate) struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Outdated(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate headers and sources from spec files
    Generate(GenerateCommand),

    /// List (or delete) generated files whose spec no longer exists
    Outdated(OutdatedCommand),

    /// Parse and validate spec files without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Locating the project a command works on.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Any directory inside the project (defaults to the current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

impl ProjectArgs {
    /// The project governing `--root`, found by its `.proj.toml`.
    pub fn layout(&self) -> Result<ProjectLayout> {
        let start = match &self.root {
            Some(root) => absolute(root)?,
            None => std::env::current_dir().wrap_err("Failed to read current directory")?,
        };
        Ok(ProjectLayout::discover(&start).unwrap_or_exit())
    }
}

/// Resolve spec paths given on the command line against the working directory.
pub(crate) fn absolute_all(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    paths.iter().map(|p| absolute(p)).collect()
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).wrap_err_with(|| format!("Failed to resolve {}", path.display()))
}
