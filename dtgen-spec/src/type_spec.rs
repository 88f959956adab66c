use crate::{FeatureSet, IncludeSpec};

/// Accessors shared by every kind of spec.
///
/// Renderers are written against this trait so include inference, namespace
/// wrapping and feature ordering are implemented once.
pub trait TypeSpec {
    /// Unqualified type name.
    fn name(&self) -> &str;

    fn namespace(&self) -> Option<&str>;

    fn template_params(&self) -> &[String] {
        &[]
    }

    fn features(&self) -> &FeatureSet;

    /// Includes required by the generated header.
    fn includes(&self) -> &[IncludeSpec] {
        &[]
    }

    /// Includes required only by the generated source file.
    fn src_includes(&self) -> &[IncludeSpec] {
        &[]
    }

    /// Includes emitted after the type definition.
    fn post_includes(&self) -> &[IncludeSpec] {
        &[]
    }

    /// Declarations emitted in the namespace ahead of the type.
    fn fwd_decls(&self) -> &[String] {
        &[]
    }

    fn docstring(&self) -> Option<&str> {
        None
    }

    /// Whether the type has template parameters.
    fn is_generic(&self) -> bool {
        !self.template_params().is_empty()
    }
}
