//! Core utilities and types for the dtgen data-class generator.
//!
//! This crate provides the file, digest and naming helpers shared by the
//! spec parser, the code generators and the command line front end.

mod digest;
mod file;
mod metadata;
mod utils;

pub use digest::content_hash;
// File operations
pub use file::{remove_file, write_file};
pub use metadata::{METADATA_TAG, Metadata, read_metadata};
// String utilities
pub use utils::{c_string_literal, fold_identifier, to_guard_identifier};
