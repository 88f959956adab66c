use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{ProjectArgs, absolute_all};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Spec files to check (defaults to every spec in the project)
    pub files: Vec<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let layout = self.project.layout()?;
        let files = absolute_all(&self.files)?;

        let report = ops::check(&layout, &files);
        report.render(&mut TerminalOutput::new());
        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
