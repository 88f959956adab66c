//! Spec model and parser for dtgen.
//!
//! A spec is the parsed, validated description of one C++ struct, enum or
//! variant, read from a `*.struct.toml`, `*.enum.toml` or `*.variant.toml`
//! file. Specs are immutable once parsed.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod any;
mod config;
mod enum_spec;
mod error;
mod feature;
mod include;
mod struct_spec;
mod type_spec;
mod variant_spec;

use std::path::Path;

pub use any::{AnySpec, SpecKind};
pub use config::{CONFIG_FILE, ProjectConfig, parse_config};
pub use enum_spec::{EnumSpec, EnumValueSpec, parse_enum_spec};
pub use error::{Error, Result, SourceContext};
pub use feature::{Feature, FeatureSet};
pub use include::IncludeSpec;
pub use struct_spec::{FieldSpec, StructSpec, parse_struct_spec};
pub use type_spec::TypeSpec;
pub use variant_spec::{VariantSpec, VariantValueSpec, parse_variant_spec};

fn read_spec_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
