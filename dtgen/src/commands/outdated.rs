use clap::Args;
use eyre::Result;

use super::ProjectArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct OutdatedCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Delete the outdated files instead of only listing them
    #[arg(long)]
    pub delete: bool,
}

impl OutdatedCommand {
    pub fn run(&self) -> Result<()> {
        let layout = self.project.layout()?;
        let report = ops::outdated(&layout, self.delete)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
