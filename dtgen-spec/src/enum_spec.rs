//! Enum specs (`*.enum.toml`).

use std::{path::Path, str::FromStr};

use serde::Deserialize;
use toml::Spanned;

use crate::{
    Error, Feature, FeatureSet, Result, TypeSpec, error::SourceContext, read_spec_file,
};

/// An enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueSpec {
    pub name: String,
    pub json_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    pub namespace: Option<String>,
    pub name: String,
    pub values: Vec<EnumValueSpec>,
    pub features: FeatureSet,
    pub docstring: Option<String>,
}

impl EnumSpec {
    /// Parse an enum spec from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_spec_file(path)?;
        parse_enum_spec(&content, &path.display().to_string())
    }
}

impl FromStr for EnumSpec {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_enum_spec(s, "<string>.enum.toml")
    }
}

impl TypeSpec for EnumSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn features(&self) -> &FeatureSet {
        &self.features
    }

    fn docstring(&self) -> Option<&str> {
        self.docstring.as_deref()
    }
}

#[derive(Deserialize)]
struct RawEnum {
    namespace: Option<String>,
    name: String,
    values: Vec<RawValue>,
    features: Vec<Spanned<String>>,
    docstring: Option<String>,
}

#[derive(Deserialize)]
struct RawValue {
    name: String,
    json_key: Option<String>,
}

/// Parse an enum spec from content with the given filename for error reporting.
pub fn parse_enum_spec(content: &str, filename: &str) -> Result<EnumSpec> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawEnum = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

    if raw.values.is_empty() {
        return Err(ctx.validation_error(format!(
            "enum {} must declare at least one value",
            raw.name
        )));
    }

    Ok(EnumSpec {
        namespace: raw.namespace,
        name: raw.name,
        values: raw
            .values
            .into_iter()
            .map(|v| EnumValueSpec {
                json_key: v.json_key.unwrap_or_else(|| v.name.clone()),
                name: v.name,
            })
            .collect(),
        features: FeatureSet::parse(&raw.features, &Feature::ENUM, &ctx)?,
        docstring: raw.docstring,
    })
}
