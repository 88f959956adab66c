//! Project layout conventions.
//!
//! Generated headers sit next to their spec. A library ("sublib") is the
//! nearest ancestor directory holding both `include/` and `src/`; the source
//! file of a header in a library mirrors the header's library-relative path
//! into `src/`. Specs outside any library get their source next to the header.

use std::path::{Path, PathBuf};

use dtgen_core::to_guard_identifier;
use dtgen_spec::{ProjectConfig, SpecKind};
use miette::Diagnostic;
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

/// Marker between the spec stem and the extension of generated files.
pub const GENERATED_MARKER: &str = ".dtg";

/// Extension of generated source files, including the marker.
pub const SOURCE_SUFFIX: &str = ".dtg.cc";

#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("no generated header found for '{header}'")]
    #[diagnostic(
        code(dtgen::missing_header),
        help("looked for: {searched}; generate the header before its source")
    )]
    MissingHeader { header: PathBuf, searched: String },
}

/// Paths and conventions of one project, rooted at its `.proj.toml`.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    config: ProjectConfig,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Locate the project governing `start` by its `.proj.toml`.
    pub fn discover(start: &Path) -> dtgen_spec::Result<Self> {
        let (root, config) = ProjectConfig::discover(start)?;
        Ok(Self::new(root, config))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Suffix of generated headers, e.g. `.dtg.h`.
    pub fn header_suffix(&self) -> String {
        format!("{GENERATED_MARKER}{}", self.config.header_extension)
    }

    /// Path relative to the project root, or the path itself if outside it.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Header generated from a spec: the spec suffix replaced by `.dtg` plus
    /// the header extension, in the same directory.
    ///
    /// Returns `None` if the path is not a spec file.
    pub fn header_path(&self, spec_path: &Path) -> Option<PathBuf> {
        let kind = SpecKind::from_path(spec_path)?;
        let file_name = spec_path.file_name()?.to_str()?;
        let stem = kind.stem(file_name)?;
        Some(spec_path.with_file_name(format!("{stem}{}", self.header_suffix())))
    }

    /// Source file paired with a generated header.
    pub fn source_path(&self, header_path: &Path) -> PathBuf {
        let stem = self.generated_stem(header_path).unwrap_or_default();
        let file_name = format!("{stem}{SOURCE_SUFFIX}");
        match self.library_relative(header_path) {
            Some((lib, rel)) => lib.join("src").join(rel).with_file_name(file_name),
            None => header_path.with_file_name(file_name),
        }
    }

    /// Path by which generated sources include a header.
    ///
    /// Inside a library this is the path relative to its `include/` or `src/`
    /// directory, and the header must exist in one of them.
    pub fn include_path(&self, header_path: &Path) -> Result<PathBuf, PathError> {
        let (candidates, include) = match self.library_relative(header_path) {
            Some((lib, rel)) => (
                vec![lib.join("include").join(&rel), lib.join("src").join(&rel)],
                rel,
            ),
            None => (
                vec![header_path.to_path_buf()],
                PathBuf::from(header_path.file_name().unwrap_or_default()),
            ),
        };
        if candidates.iter().any(|c| c.is_file()) {
            Ok(include)
        } else {
            Err(PathError::MissingHeader {
                header: header_path.to_path_buf(),
                searched: candidates
                    .iter()
                    .map(|c| c.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
        }
    }

    /// Include guard for a generated header, derived from the project's
    /// `ifndef_name` and the header's root-relative path.
    pub fn header_guard(&self, header_path: &Path) -> String {
        let rel = self.relative(header_path);
        to_guard_identifier(&format!(
            "_{}_{}",
            self.config.ifndef_name,
            rel.display()
        ))
    }

    /// Nearest ancestor within the project holding both `include/` and `src/`.
    pub fn sublib_root(&self, path: &Path) -> Option<PathBuf> {
        path.ancestors()
            .skip(1)
            .take_while(|dir| dir.starts_with(&self.root))
            .find(|dir| dir.join("include").is_dir() && dir.join("src").is_dir())
            .map(Path::to_path_buf)
    }

    /// Whether a file name follows the generated-file convention.
    pub fn is_generated(&self, path: &Path) -> bool {
        self.generated_stem(path).is_some()
    }

    /// Specs that could have produced a generated file: every kind in the
    /// library's `include/` and `src/` trees, plus the file's own directory.
    pub fn possible_spec_paths(&self, generated: &Path) -> Vec<PathBuf> {
        let Some(stem) = self.generated_stem(generated) else {
            return Vec::new();
        };
        let stem = stem.as_str();

        let mut dirs = Vec::new();
        if let Some((lib, rel)) = self.library_relative(generated) {
            let rel_dir = rel.parent().unwrap_or(Path::new("")).to_path_buf();
            dirs.push(lib.join("include").join(&rel_dir));
            dirs.push(lib.join("src").join(&rel_dir));
        }
        if let Some(parent) = generated.parent() {
            if !dirs.iter().any(|d| d == parent) {
                dirs.push(parent.to_path_buf());
            }
        }

        dirs.iter()
            .flat_map(|dir| {
                SpecKind::ALL
                    .iter()
                    .map(move |kind| dir.join(format!("{stem}{}", kind.suffix())))
            })
            .collect()
    }

    /// Whether a path lies in one of the excluded top-level directories.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.relative(path)
            .components()
            .next()
            .and_then(|c| c.as_os_str().to_str())
            .is_some_and(|first| self.config.exclude.iter().any(|e| e == first))
    }

    /// Every spec file under the root, sorted by path.
    pub fn spec_files(&self) -> Vec<PathBuf> {
        self.walk()
            .filter(|path| SpecKind::from_path(path).is_some())
            .collect()
    }

    /// Every generated file under the root, sorted by path.
    pub fn generated_files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.walk().filter(|path| self.is_generated(path))
    }

    fn walk(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e.path()))
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable path");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
    }

    /// File name with the generated suffix removed (`point.dtg.h` -> `point`).
    fn generated_stem(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        [self.header_suffix().as_str(), SOURCE_SUFFIX]
            .into_iter()
            .find_map(|suffix| name.strip_suffix(suffix))
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
    }

    /// The library root and the path relative to its `include/` or `src/`.
    fn library_relative(&self, path: &Path) -> Option<(PathBuf, PathBuf)> {
        let lib = self.sublib_root(path)?;
        let rel = ["include", "src"]
            .into_iter()
            .find_map(|dir| path.strip_prefix(lib.join(dir)).ok())?
            .to_path_buf();
        Some((lib, rel))
    }
}
