use std::path::Path;

use eyre::{Context, Result};

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Remove a previously generated file.
pub fn remove_file(path: &Path) -> Result<()> {
    std::fs::remove_file(path).wrap_err_with(|| format!("failed to remove {}", path.display()))
}
