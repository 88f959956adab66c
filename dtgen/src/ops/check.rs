//! Check operation - spec validation without generation.

use std::path::PathBuf;

use dtgen_codegen::ProjectLayout;
use dtgen_spec::AnySpec;

use crate::reports::{CheckReport, InvalidSpec};

/// Execute the check operation.
///
/// Parses every given spec (or every spec in the project when `files` is
/// empty) and collects the diagnostics of the ones that fail.
pub fn check(layout: &ProjectLayout, files: &[PathBuf]) -> CheckReport {
    let specs = if files.is_empty() {
        layout.spec_files()
    } else {
        files.to_vec()
    };

    let mut invalid = Vec::new();
    for spec in &specs {
        if let Err(e) = AnySpec::from_file(spec) {
            invalid.push(InvalidSpec {
                spec: spec.clone(),
                error: miette::Report::new(*e),
            });
        }
    }

    CheckReport {
        checked: specs.len(),
        invalid,
    }
}

#[cfg(test)]
mod tests {
    use dtgen_spec::ProjectConfig;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_reports_only_invalid_specs() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("color.enum.toml");
        let bad = temp.path().join("point.struct.toml");
        std::fs::write(
            &good,
            "namespace = \"paint\"\nname = \"Color\"\nfeatures = []\n[[values]]\nname = \"RED\"\n",
        )
        .unwrap();
        std::fs::write(&bad, "name = \"Point\"\nfeatures = [\"sparkle\"]\n").unwrap();

        let layout = ProjectLayout::new(temp.path(), ProjectConfig::new("paint"));
        let report = check(&layout, &[]);
        assert_eq!(report.checked, 2);
        assert!(!report.is_valid());
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(report.invalid[0].spec, bad);
    }
}
