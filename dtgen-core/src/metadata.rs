//! Metadata comment embedded in every generated file.

use std::path::Path;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::content_hash;

/// Opening tag of the metadata comment.
pub const METADATA_TAG: &str = "/* dtgen-data";

/// Data recorded about the spec a file was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Content hash of the originating spec file.
    pub generated_from: String,
}

impl Metadata {
    /// Metadata for a file generated from a spec with the given bytes.
    pub fn for_spec(spec: &[u8]) -> Self {
        Self {
            generated_from: content_hash(spec),
        }
    }

    /// Render as a block comment, terminated by a newline.
    pub fn render(&self) -> String {
        // A single string field cannot fail to serialize.
        let json = serde_json::to_string_pretty(self).unwrap_or_default();
        format!("{METADATA_TAG}\n{json}\n*/\n")
    }

    /// Find and decode the metadata comment inside generated file contents.
    ///
    /// Returns `None` if the file has no (or a corrupt) metadata comment.
    pub fn parse(text: &str) -> Option<Self> {
        let mut lines = text.lines().skip_while(|line| line.trim() != METADATA_TAG);
        lines.next()?;
        let json: Vec<&str> = lines.take_while(|line| line.trim() != "*/").collect();
        serde_json::from_str(&json.join("\n")).ok()
    }
}

/// Read the metadata of a generated file, if the file exists.
pub fn read_metadata(path: &Path) -> Result<Option<Metadata>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    Ok(Metadata::parse(&text))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_render() {
        let meta = Metadata {
            generated_from: "abc123".to_string(),
        };
        assert_eq!(
            meta.render(),
            "/* dtgen-data\n{\n  \"generated_from\": \"abc123\"\n}\n*/\n"
        );
    }

    #[test]
    fn test_parse_inside_generated_file() {
        let meta = Metadata::for_spec(b"name = \"Color\"");
        let text = format!(
            "// THIS FILE WAS AUTO-GENERATED BY dtgen. DO NOT MODIFY IT!\n{}\n#ifndef X\n",
            meta.render()
        );
        assert_eq!(Metadata::parse(&text), Some(meta));
    }

    #[test]
    fn test_parse_missing_or_corrupt() {
        assert_eq!(Metadata::parse("#pragma once\n"), None);
        assert_eq!(Metadata::parse("/* dtgen-data\n{ nope\n*/\n"), None);
    }

    #[test]
    fn test_read_metadata() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("color.dtg.h");
        assert_eq!(read_metadata(&path).unwrap(), None);

        let meta = Metadata::for_spec(b"x");
        std::fs::write(&path, meta.render()).unwrap();
        assert_eq!(read_metadata(&path).unwrap(), Some(meta));
    }
}
