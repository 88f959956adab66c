//! Language-level code generation utilities for dtgen.
//!
//! # Module Organization
//!
//! - [`builder`] - Scope-safe C++ emission (CodeBuilder, FunctionSpec, Indent)
//! - [`IncludeCollector`] - Include tracking and deduplication
//! - [`FeatureRegistry`] - Per-kind mapping of features to emitters
//! - [`SpecRenderer`] - The renderer trait shared by struct, enum and variant
//! - [`ProjectLayout`] - Output paths, header guards and spec discovery
//! - [`find_outdated`] - Generated files whose spec no longer exists
//! - [`Formatter`] - Formatting of freshly written files

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
mod format;
mod includes;
mod layout;
mod outdated;
mod registry;
mod renderer;

pub use format::{ClangFormat, Formatter, NoFormat};
pub use includes::IncludeCollector;
pub use layout::{GENERATED_MARKER, PathError, ProjectLayout, SOURCE_SUFFIX};
pub use outdated::find_outdated;
pub use registry::{Emit, FeatureEmitter, FeatureRegistry};
pub use renderer::SpecRenderer;
