//! Core operations.
//!
//! The business logic behind each command, kept apart from argument parsing
//! and output rendering.

pub mod check;
pub mod generate;
pub mod outdated;

pub use check::check;
pub use generate::generate;
pub use outdated::outdated;
