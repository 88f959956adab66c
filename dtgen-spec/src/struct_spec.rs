//! Struct specs (`*.struct.toml`).

use std::{path::Path, str::FromStr};

use serde::Deserialize;
use toml::Spanned;

use crate::{
    Error, Feature, FeatureSet, IncludeSpec, Result, TypeSpec, error::SourceContext,
    read_spec_file,
};

/// A field of a struct spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    /// Opaque C++ type, echoed verbatim.
    pub ty: String,
    pub docstring: Option<String>,
    /// Stored behind a pointer so the type may refer to itself.
    pub indirect: bool,
    pub json_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSpec {
    pub namespace: Option<String>,
    pub template_params: Vec<String>,
    pub name: String,
    pub fields: Vec<FieldSpec>,
    pub features: FeatureSet,
    pub includes: Vec<IncludeSpec>,
    pub src_includes: Vec<IncludeSpec>,
    pub post_includes: Vec<IncludeSpec>,
    pub fwd_decls: Vec<String>,
    pub docstring: Option<String>,
}

impl StructSpec {
    /// Parse a struct spec from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_spec_file(path)?;
        parse_struct_spec(&content, &path.display().to_string())
    }

    /// Whether any field is stored indirectly.
    pub fn has_indirect_fields(&self) -> bool {
        self.fields.iter().any(|f| f.indirect)
    }
}

impl FromStr for StructSpec {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_struct_spec(s, "<string>.struct.toml")
    }
}

impl TypeSpec for StructSpec {
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

    fn post_includes(&self) -> &[IncludeSpec] {
        &self.post_includes
    }

    fn fwd_decls(&self) -> &[String] {
        &self.fwd_decls
    }

    fn docstring(&self) -> Option<&str> {
        self.docstring.as_deref()
    }
}

#[derive(Deserialize)]
struct RawStruct {
    namespace: Option<String>,
    #[serde(default)]
    template_params: Vec<String>,
    name: String,
    fields: Vec<RawField>,
    features: Vec<Spanned<String>>,
    #[serde(default)]
    includes: Vec<Spanned<String>>,
    #[serde(default)]
    src_includes: Vec<Spanned<String>>,
    #[serde(default)]
    post_includes: Vec<Spanned<String>>,
    #[serde(default)]
    fwd_decls: Vec<String>,
    docstring: Option<String>,
}

#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    docstring: Option<String>,
    #[serde(default)]
    indirect: bool,
    json_key: Option<String>,
}

/// Parse a struct spec from content with the given filename for error reporting.
pub fn parse_struct_spec(content: &str, filename: &str) -> Result<StructSpec> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawStruct = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

    let spec = StructSpec {
        namespace: raw.namespace,
        template_params: raw.template_params,
        name: raw.name,
        fields: raw
            .fields
            .into_iter()
            .map(|f| FieldSpec {
                json_key: f.json_key.unwrap_or_else(|| f.name.clone()),
                name: f.name,
                ty: f.ty,
                docstring: f.docstring,
                indirect: f.indirect,
            })
            .collect(),
        features: FeatureSet::parse(&raw.features, &Feature::ALL, &ctx)?,
        includes: IncludeSpec::parse_all(&raw.includes, &ctx)?,
        src_includes: IncludeSpec::parse_all(&raw.src_includes, &ctx)?,
        post_includes: IncludeSpec::parse_all(&raw.post_includes, &ctx)?,
        fwd_decls: raw.fwd_decls,
        docstring: raw.docstring,
    };
    validate_struct(&spec, &ctx)?;
    Ok(spec)
}

fn validate_struct(spec: &StructSpec, ctx: &SourceContext) -> Result<()> {
    if spec.features.contains(Feature::Rapidcheck) {
        if let Some(field) = spec.fields.iter().find(|f| f.indirect) {
            return Err(ctx.validation_error(format!(
                "struct {} enables rapidcheck but field '{}' is indirect",
                spec.name, field.name
            )));
        }
    }
    Ok(())
}
