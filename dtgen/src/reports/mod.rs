//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod outdated;
mod output;

pub use check::{CheckReport, InvalidSpec};
pub use generate::GenerateReport;
pub use outdated::OutdatedReport;
pub use output::{Report, TerminalOutput};
