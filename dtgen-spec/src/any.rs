//! Suffix-based dispatch over the three kinds of spec.

use std::path::Path;

use crate::{
    EnumSpec, Error, Result, StructSpec, TypeSpec, VariantSpec, enum_spec::parse_enum_spec,
    read_spec_file, struct_spec::parse_struct_spec, variant_spec::parse_variant_spec,
};

/// The kind of a spec file, determined by its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecKind {
    Struct,
    Enum,
    Variant,
}

impl SpecKind {
    pub const ALL: [SpecKind; 3] = [SpecKind::Struct, SpecKind::Enum, SpecKind::Variant];

    /// File suffix of specs of this kind.
    pub fn suffix(&self) -> &'static str {
        match self {
            SpecKind::Struct => ".struct.toml",
            SpecKind::Enum => ".enum.toml",
            SpecKind::Variant => ".variant.toml",
        }
    }

    /// Determine the kind of a spec file from its name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        SpecKind::ALL
            .into_iter()
            .find(|kind| name.len() > kind.suffix().len() && name.ends_with(kind.suffix()))
    }

    /// File name with the spec suffix removed (`point.struct.toml` -> `point`).
    pub fn stem<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name.strip_suffix(self.suffix())
    }
}

/// A parsed spec of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnySpec {
    Struct(StructSpec),
    Enum(EnumSpec),
    Variant(VariantSpec),
}

impl AnySpec {
    /// Parse a spec file, choosing the parser by its suffix.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let kind = SpecKind::from_path(path).ok_or_else(|| {
            Box::new(Error::UnknownKind {
                path: path.to_path_buf(),
            })
        })?;
        let content = read_spec_file(path)?;
        Self::parse(kind, &content, &path.display().to_string())
    }

    /// Parse spec content of a known kind.
    pub fn parse(kind: SpecKind, content: &str, filename: &str) -> Result<Self> {
        Ok(match kind {
            SpecKind::Struct => AnySpec::Struct(parse_struct_spec(content, filename)?),
            SpecKind::Enum => AnySpec::Enum(parse_enum_spec(content, filename)?),
            SpecKind::Variant => AnySpec::Variant(parse_variant_spec(content, filename)?),
        })
    }

    pub fn kind(&self) -> SpecKind {
        match self {
            AnySpec::Struct(_) => SpecKind::Struct,
            AnySpec::Enum(_) => SpecKind::Enum,
            AnySpec::Variant(_) => SpecKind::Variant,
        }
    }

    /// View the spec through the accessors common to all kinds.
    pub fn as_type_spec(&self) -> &dyn TypeSpec {
        match self {
            AnySpec::Struct(spec) => spec,
            AnySpec::Enum(spec) => spec,
            AnySpec::Variant(spec) => spec,
        }
    }
}
