//! C++ code generation for dtgen specs.
//!
//! One [`SpecRenderer`](dtgen_codegen::SpecRenderer) per kind of spec, and a
//! [`Generator`] that writes the rendered header and source for every spec of
//! a project.

mod common;
mod enum_renderer;
mod generator;
mod naming;
mod struct_renderer;
mod variant_renderer;

pub use enum_renderer::EnumRenderer;
pub use generator::{GenerateReport, GeneratedFiles, Generator, Outcome, SpecFailure};
pub use naming::{fresh_typevar, qualified_typename, template_args, unqualified_typename};
pub use struct_renderer::StructRenderer;
pub use variant_renderer::VariantRenderer;
