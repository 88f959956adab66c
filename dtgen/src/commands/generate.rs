use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{ProjectArgs, absolute_all};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Spec files to generate (defaults to every spec in the project)
    pub files: Vec<PathBuf>,

    /// Do not run clang-format on the generated files
    #[arg(long)]
    pub no_format: bool,

    /// clang-format binary to use
    #[arg(long, default_value = "clang-format")]
    pub clang_format: PathBuf,

    /// Skip specs whose generated files record the same content hash
    #[arg(long)]
    pub skip_unchanged: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let layout = self.project.layout()?;
        let files = absolute_all(&self.files)?;

        let report = ops::generate(
            layout,
            ops::generate::GenerateOptions {
                files: &files,
                clang_format: (!self.no_format).then_some(self.clang_format.as_path()),
                skip_unchanged: self.skip_unchanged,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
