//! Formatting of freshly written files.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use eyre::{Result, WrapErr, eyre};
use tracing::debug;

/// Formats generated files in place.
pub trait Formatter {
    /// Format `files`, which belong to the project rooted at `root`.
    fn format(&self, root: &Path, files: &[PathBuf]) -> Result<()>;
}

/// Formatter running `clang-format -i`.
///
/// Uses the project's `.clang-format` when the root has one.
#[derive(Debug, Clone)]
pub struct ClangFormat {
    binary: PathBuf,
}

impl ClangFormat {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn style_arg(root: &Path) -> String {
        let style_file = root.join(".clang-format");
        if style_file.is_file() {
            format!("--style=file:{}", style_file.display())
        } else {
            "--style=file".to_string()
        }
    }
}

impl Default for ClangFormat {
    fn default() -> Self {
        Self::new("clang-format")
    }
}

impl Formatter for ClangFormat {
    fn format(&self, root: &Path, files: &[PathBuf]) -> Result<()> {
        if files.is_empty() {
            return Ok(());
        }
        debug!(binary = %self.binary.display(), count = files.len(), "formatting");

        let output = Command::new(&self.binary)
            .arg("-i")
            .arg(Self::style_arg(root))
            .args(files)
            .current_dir(root)
            .output()
            .wrap_err_with(|| format!("Failed to run {}", self.binary.display()))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(eyre!(
                "{} failed on {}:\n{}",
                self.binary.display(),
                files
                    .iter()
                    .map(|f| f.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                String::from_utf8_lossy(&output.stderr)
            ))
        }
    }
}

/// Formatter that leaves files untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFormat;

impl Formatter for NoFormat {
    fn format(&self, _root: &Path, _files: &[PathBuf]) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_style_arg_prefers_project_file() {
        let temp = TempDir::new().unwrap();
        assert_eq!(ClangFormat::style_arg(temp.path()), "--style=file");

        std::fs::write(temp.path().join(".clang-format"), "BasedOnStyle: LLVM\n").unwrap();
        assert_eq!(
            ClangFormat::style_arg(temp.path()),
            format!("--style=file:{}", temp.path().join(".clang-format").display())
        );
    }

    #[test]
    fn test_missing_binary_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.dtg.h");
        std::fs::write(&file, "int x;\n").unwrap();

        let formatter = ClangFormat::new(temp.path().join("no-such-clang-format"));
        let err = formatter.format(temp.path(), &[file]).unwrap_err();
        assert!(err.to_string().contains("no-such-clang-format"));
    }

    #[test]
    fn test_no_format_leaves_files_alone() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.dtg.h");
        std::fs::write(&file, "int   x;\n").unwrap();
        NoFormat.format(temp.path(), &[file.clone()]).unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "int   x;\n");
    }
}
