//! Outdated command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Generated files with no spec left behind them.
#[derive(Debug)]
pub struct OutdatedReport {
    pub root: PathBuf,
    /// Whether the files were deleted or only listed.
    pub deleted: bool,
    pub files: Vec<PathBuf>,
}

impl Report for OutdatedReport {
    fn render(&self, out: &mut dyn Output) {
        if self.files.is_empty() {
            out.preformatted("No outdated files found.");
            return;
        }

        out.section(if self.deleted { "Deleted" } else { "Outdated" });
        for file in &self.files {
            let path = file.strip_prefix(&self.root).unwrap_or(file);
            if self.deleted {
                out.removed_item(&path.display().to_string());
            } else {
                out.list_item(&path.display().to_string());
            }
        }
    }
}
