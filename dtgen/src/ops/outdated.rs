//! Outdated operation - find generated files whose spec is gone.

use dtgen_codegen::{ProjectLayout, find_outdated};
use dtgen_core::remove_file;
use eyre::Result;
use tracing::warn;

use crate::reports::OutdatedReport;

/// Execute the outdated operation, deleting what it finds when `delete` is set.
pub fn outdated(layout: &ProjectLayout, delete: bool) -> Result<OutdatedReport> {
    let files: Vec<_> = find_outdated(layout).collect();
    if delete {
        for file in &files {
            warn!(path = %file.display(), "deleting outdated generated file");
            remove_file(file)?;
        }
    }

    Ok(OutdatedReport {
        root: layout.root().to_path_buf(),
        deleted: delete,
        files,
    })
}

#[cfg(test)]
mod tests {
    use dtgen_spec::ProjectConfig;
    use tempfile::TempDir;

    use super::*;

    fn project() -> (TempDir, ProjectLayout) {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("shape.variant.toml"), "").unwrap();
        std::fs::write(temp.path().join("shape.dtg.h"), "").unwrap();
        std::fs::write(temp.path().join("stale.dtg.h"), "").unwrap();
        let layout = ProjectLayout::new(temp.path(), ProjectConfig::new("geo"));
        (temp, layout)
    }

    #[test]
    fn test_lists_without_deleting() {
        let (temp, layout) = project();
        let report = outdated(&layout, false).unwrap();
        assert_eq!(report.files, vec![temp.path().join("stale.dtg.h")]);
        assert!(temp.path().join("stale.dtg.h").exists());
    }

    #[test]
    fn test_delete_removes_only_outdated() {
        let (temp, layout) = project();
        let report = outdated(&layout, true).unwrap();
        assert!(report.deleted);
        assert_eq!(report.files.len(), 1);
        assert!(!temp.path().join("stale.dtg.h").exists());
        assert!(temp.path().join("shape.dtg.h").exists());
    }
}
