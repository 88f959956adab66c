//! C++ code building blocks.
//!
//! - [`CodeBuilder`] - Fluent API for building indented code with scope guards
//! - [`FunctionSpec`] - Declarative function declarations and definitions
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod function;
mod indent;

pub use code_builder::CodeBuilder;
pub use function::{FunctionSpec, ParamSpec};
pub use indent::Indent;
