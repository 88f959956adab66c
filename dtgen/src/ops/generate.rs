//! Generate operation - write `.dtg.h`/`.dtg.cc` pairs for spec files.

use std::path::{Path, PathBuf};

use dtgen_codegen::{ClangFormat, ProjectLayout};
use dtgen_codegen_cpp::Generator;
use eyre::Result;

use crate::reports::GenerateReport;

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Specs to generate. Empty means every spec under the project root.
    pub files: &'a [PathBuf],
    /// clang-format binary, or `None` to leave output unformatted.
    pub clang_format: Option<&'a Path>,
    /// Skip specs whose outputs already record the spec's hash.
    pub skip_unchanged: bool,
}

/// Execute the generate operation.
pub fn generate(layout: ProjectLayout, opts: GenerateOptions) -> Result<GenerateReport> {
    let root = layout.root().to_path_buf();
    let mut generator = Generator::new(layout).skip_unchanged(opts.skip_unchanged);
    if let Some(binary) = opts.clang_format {
        generator = generator.with_formatter(ClangFormat::new(binary));
    }

    let result = if opts.files.is_empty() {
        generator.run_all()?
    } else {
        generator.run(opts.files)?
    };

    Ok(GenerateReport { root, result })
}
