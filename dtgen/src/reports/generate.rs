//! Generate command report data structures.

use std::path::{Path, PathBuf};

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Project root; paths are shown relative to it.
    pub root: PathBuf,
    pub result: dtgen_codegen_cpp::GenerateReport,
}

impl GenerateReport {
    /// Whether every spec generated (or was already up to date).
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }

    fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        let result = &self.result;
        if !result.generated.is_empty() {
            out.section("Generated");
            for files in &result.generated {
                out.added_item(&self.display(&files.header));
                out.added_item(&self.display(&files.source));
            }
        }

        if !result.unchanged.is_empty() {
            out.section("Unchanged");
            for spec in &result.unchanged {
                out.list_item(&self.display(spec));
            }
        }

        for failure in &result.failures {
            out.diagnostic(&failure.error);
        }

        if result.generated.is_empty() && result.unchanged.is_empty() && result.failures.is_empty()
        {
            out.preformatted("No spec files found.");
            return;
        }

        out.newline();
        out.preformatted(&format!(
            "{} generated, {} unchanged, {} failed",
            result.generated.len(),
            result.unchanged.len(),
            result.failures.len()
        ));
    }
}
