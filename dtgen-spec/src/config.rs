//! Project configuration (`.proj.toml`).

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use dtgen_core::to_guard_identifier;
use serde::Deserialize;
use toml::Spanned;

use crate::{Error, Result, error::SourceContext};

/// Name of the project configuration file. Its directory is the project root.
pub const CONFIG_FILE: &str = ".proj.toml";

/// The subset of the project configuration dtgen reads.
///
/// Unknown keys belong to other tools and are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub project_name: String,
    pub namespace_name: Option<String>,
    /// Prefix of every generated header guard.
    pub ifndef_name: String,
    /// Extension of generated headers, including the leading dot.
    pub header_extension: String,
    /// Top-level directories never searched for specs or generated files.
    pub exclude: Vec<String>,
}

#[derive(Deserialize)]
struct RawConfig {
    project_name: String,
    namespace_name: Option<String>,
    ifndef_name: Option<String>,
    header_extension: Option<Spanned<String>>,
    dtgen_exclude: Option<Vec<String>>,
}

impl ProjectConfig {
    pub const DEFAULT_HEADER_EXTENSION: &'static str = ".h";
    pub const DEFAULT_EXCLUDE: [&'static str; 3] = ["build", "deps", "triton"];

    /// A configuration with defaults for everything but the project name.
    pub fn new(project_name: impl Into<String>) -> Self {
        let project_name = project_name.into();
        Self {
            ifndef_name: to_guard_identifier(&project_name),
            project_name,
            namespace_name: None,
            header_extension: Self::DEFAULT_HEADER_EXTENSION.to_string(),
            exclude: Self::DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a `.proj.toml` file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_config(&content, &path.display().to_string())
    }

    /// Find the project root by walking up from `start` to the nearest `.proj.toml`.
    pub fn find_root(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(CONFIG_FILE).is_file())
            .map(Path::to_path_buf)
    }

    /// Locate and load the configuration governing `start`.
    ///
    /// Returns the project root together with its configuration.
    pub fn discover(start: &Path) -> Result<(PathBuf, Self)> {
        let root = Self::find_root(start).ok_or_else(|| {
            Box::new(Error::ConfigNotFound {
                start: start.to_path_buf(),
                file: CONFIG_FILE,
            })
        })?;
        let config = Self::from_file(root.join(CONFIG_FILE))?;
        Ok((root, config))
    }
}

impl FromStr for ProjectConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, CONFIG_FILE)
    }
}

/// Parse a project configuration with the given filename for error reporting.
pub fn parse_config(content: &str, filename: &str) -> Result<ProjectConfig> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawConfig = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

    let mut config = ProjectConfig::new(raw.project_name);
    config.namespace_name = raw.namespace_name;
    if let Some(ifndef_name) = raw.ifndef_name {
        config.ifndef_name = ifndef_name;
    }
    if let Some(ext) = raw.header_extension {
        if !ext.get_ref().starts_with('.') || ext.get_ref().len() < 2 {
            return Err(ctx.validation_error_at(
                format!("header_extension '{}' must start with '.'", ext.get_ref()),
                ext.span(),
            ));
        }
        config.header_extension = ext.into_inner();
    }
    if let Some(exclude) = raw.dtgen_exclude {
        config.exclude = exclude;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config: ProjectConfig = "project_name = \"my-proj\"".parse().unwrap();
        assert_eq!(config.ifndef_name, "MY_PROJ");
        assert_eq!(config.header_extension, ".h");
        assert_eq!(config.exclude, vec!["build", "deps", "triton"]);
        assert_eq!(config.namespace_name, None);
    }

    #[test]
    fn test_overrides_and_foreign_keys() {
        let src = r#"
project_name = "flexflow"
namespace_name = "FlexFlow"
ifndef_name = "FF"
header_extension = ".hh"
dtgen_exclude = ["vendor"]
fix_compile_commands = true
"#;
        let config: ProjectConfig = src.parse().unwrap();
        assert_eq!(config.ifndef_name, "FF");
        assert_eq!(config.namespace_name.as_deref(), Some("FlexFlow"));
        assert_eq!(config.header_extension, ".hh");
        assert_eq!(config.exclude, vec!["vendor"]);
    }

    #[test]
    fn test_header_extension_needs_dot() {
        let err = "project_name = \"p\"\nheader_extension = \"h\"\n"
            .parse::<ProjectConfig>()
            .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_discover_walks_up() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "project_name = \"p\"\n").unwrap();
        let nested = temp.path().join("lib").join("geo").join("include");
        std::fs::create_dir_all(&nested).unwrap();

        let (root, config) = ProjectConfig::discover(&nested).unwrap();
        assert_eq!(root, temp.path());
        assert_eq!(config.project_name, "p");
    }

    #[test]
    fn test_discover_without_config() {
        let temp = TempDir::new().unwrap();
        let err = ProjectConfig::discover(temp.path()).unwrap_err();
        assert!(matches!(*err, Error::ConfigNotFound { .. }));
    }
}
