//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// A spec that failed to parse or validate.
#[derive(Debug)]
pub struct InvalidSpec {
    pub spec: PathBuf,
    pub error: miette::Report,
}

/// Report data from spec validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Number of specs checked.
    pub checked: usize,
    pub invalid: Vec<InvalidSpec>,
}

impl CheckReport {
    /// Whether the check passed (no invalid specs).
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for invalid in &self.invalid {
            out.diagnostic(&invalid.error);
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} spec(s) are valid", self.checked));
        } else {
            out.newline();
            out.preformatted(&format!(
                "{} of {} spec(s) are invalid",
                self.invalid.len(),
                self.checked
            ));
        }
    }
}
