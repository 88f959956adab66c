//! Variant specs (`*.variant.toml`).

use std::{path::Path, str::FromStr};

use serde::Deserialize;
use toml::Spanned;

use crate::{
    Error, Feature, FeatureSet, IncludeSpec, Result, TypeSpec, error::SourceContext,
    read_spec_file,
};

/// One arm of a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantValueSpec {
    /// Opaque C++ payload type, echoed verbatim.
    pub ty: String,
    /// Explicitly declared method key, if any.
    pub method_key: Option<String>,
    pub json_key: String,
    pub fmt_key: String,
}

impl VariantValueSpec {
    /// The arm's key: the method key when declared, otherwise the payload type.
    pub fn key(&self) -> &str {
        self.method_key.as_deref().unwrap_or(&self.ty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    pub namespace: Option<String>,
    pub template_params: Vec<String>,
    pub name: String,
    pub values: Vec<VariantValueSpec>,
    pub features: FeatureSet,
    pub explicit_constructors: bool,
    pub includes: Vec<IncludeSpec>,
    pub src_includes: Vec<IncludeSpec>,
    pub docstring: Option<String>,
}

impl VariantSpec {
    /// Parse a variant spec from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_spec_file(path)?;
        parse_variant_spec(&content, &path.display().to_string())
    }

    /// Whether every arm declared a method key (`is_<key>()` accessors are generated).
    pub fn has_method_keys(&self) -> bool {
        self.values.iter().all(|v| v.method_key.is_some())
    }
}

impl FromStr for VariantSpec {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_variant_spec(s, "<string>.variant.toml")
    }
}

impl TypeSpec for VariantSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn template_params(&self) -> &[String] {
        &self.template_params
    }

    fn features(&self) -> &FeatureSet {
        &self.features
    }

    fn includes(&self) -> &[IncludeSpec] {
        &self.includes
    }

    fn src_includes(&self) -> &[IncludeSpec] {
        &self.src_includes
    }

    fn docstring(&self) -> Option<&str> {
        self.docstring.as_deref()
    }
}

#[derive(Deserialize)]
struct RawVariant {
    namespace: Option<String>,
    #[serde(default)]
    template_params: Vec<String>,
    name: String,
    values: Vec<RawArm>,
    features: Vec<Spanned<String>>,
    #[serde(default = "default_explicit_constructors")]
    explicit_constructors: bool,
    #[serde(default)]
    includes: Vec<Spanned<String>>,
    #[serde(default)]
    src_includes: Vec<Spanned<String>>,
    docstring: Option<String>,
}

fn default_explicit_constructors() -> bool {
    true
}

#[derive(Deserialize)]
struct RawArm {
    #[serde(rename = "type")]
    ty: String,
    key: Option<String>,
    json_key: Option<String>,
    fmt_key: Option<String>,
}

/// Parse a variant spec from content with the given filename for error reporting.
pub fn parse_variant_spec(content: &str, filename: &str) -> Result<VariantSpec> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawVariant = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

    let spec = VariantSpec {
        namespace: raw.namespace,
        template_params: raw.template_params,
        name: raw.name,
        values: raw
            .values
            .into_iter()
            .map(|arm| {
                let key = arm.key.clone().unwrap_or_else(|| arm.ty.clone());
                VariantValueSpec {
                    json_key: arm.json_key.unwrap_or_else(|| key.clone()),
                    fmt_key: arm.fmt_key.unwrap_or(key),
                    method_key: arm.key,
                    ty: arm.ty,
                }
            })
            .collect(),
        features: FeatureSet::parse(&raw.features, &Feature::ALL, &ctx)?,
        explicit_constructors: raw.explicit_constructors,
        includes: IncludeSpec::parse_all(&raw.includes, &ctx)?,
        src_includes: IncludeSpec::parse_all(&raw.src_includes, &ctx)?,
        docstring: raw.docstring,
    };
    validate_variant(&spec, &ctx)?;
    Ok(spec)
}

fn validate_variant(spec: &VariantSpec, ctx: &SourceContext) -> Result<()> {
    if spec.values.is_empty() {
        return Err(ctx.validation_error(format!(
            "variant {} must declare at least one value",
            spec.name
        )));
    }

    let (keyed, unkeyed): (Vec<_>, Vec<_>) =
        spec.values.iter().partition(|v| v.method_key.is_some());
    if !keyed.is_empty() && !unkeyed.is_empty() {
        let missing: Vec<&str> = unkeyed.iter().map(|v| v.ty.as_str()).collect();
        return Err(ctx.validation_error(format!(
            "variant {} must give either all or none of its values a key, but [{}] have none",
            spec.name,
            missing.join(", ")
        )));
    }
    Ok(())
}
