//! Turns spec files into generated header and source files on disk.

use std::path::{Path, PathBuf};

use dtgen_codegen::{Formatter, NoFormat, ProjectLayout, SpecRenderer, builder::CodeBuilder};
use dtgen_core::{Metadata, c_string_literal, read_metadata, write_file};
use dtgen_spec::{AnySpec, Error as SpecError, SpecKind};
use eyre::Result;
use tracing::{debug, info};

use crate::{EnumRenderer, StructRenderer, VariantRenderer};

/// Files written for one spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub spec: PathBuf,
    pub header: PathBuf,
    pub source: PathBuf,
}

/// A spec that could not be generated. Other specs are unaffected.
#[derive(Debug)]
pub struct SpecFailure {
    pub spec: PathBuf,
    pub error: miette::Report,
}

/// What happened to a single spec.
#[derive(Debug)]
pub enum Outcome {
    Generated(GeneratedFiles),
    /// Both outputs already carry the spec's content hash.
    Unchanged,
    Failed(miette::Report),
}

/// Result of generating a batch of specs.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub generated: Vec<GeneratedFiles>,
    pub unchanged: Vec<PathBuf>,
    pub failures: Vec<SpecFailure>,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generates C++ data classes for the specs of one project.
pub struct Generator {
    layout: ProjectLayout,
    formatter: Box<dyn Formatter>,
    skip_unchanged: bool,
    structs: StructRenderer,
    enums: EnumRenderer,
    variants: VariantRenderer,
}

impl Generator {
    pub fn new(layout: ProjectLayout) -> Self {
        Self {
            layout,
            formatter: Box::new(NoFormat),
            skip_unchanged: false,
            structs: StructRenderer::new(),
            enums: EnumRenderer::new(),
            variants: VariantRenderer::new(),
        }
    }

    /// Format written files with `formatter`.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Leave outputs alone when their metadata matches the spec's hash.
    pub fn skip_unchanged(mut self, skip: bool) -> Self {
        self.skip_unchanged = skip;
        self
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Generate every spec under the project root.
    pub fn run_all(&self) -> Result<GenerateReport> {
        self.run(&self.layout.spec_files())
    }

    /// Generate the given specs, then format everything that was written.
    ///
    /// Spec-level failures are collected into the report; IO and formatter
    /// failures abort the batch.
    pub fn run(&self, specs: &[PathBuf]) -> Result<GenerateReport> {
        info!(count = specs.len(), "generating specs");
        let mut report = GenerateReport::default();
        for spec in specs {
            match self.generate(spec)? {
                Outcome::Generated(files) => report.generated.push(files),
                Outcome::Unchanged => report.unchanged.push(spec.clone()),
                Outcome::Failed(error) => report.failures.push(SpecFailure {
                    spec: spec.clone(),
                    error,
                }),
            }
        }

        let written: Vec<PathBuf> = report
            .generated
            .iter()
            .flat_map(|g| [g.header.clone(), g.source.clone()])
            .collect();
        self.formatter.format(self.layout.root(), &written)?;

        info!(
            generated = report.generated.len(),
            unchanged = report.unchanged.len(),
            failed = report.failures.len(),
            "generation finished"
        );
        Ok(report)
    }

    /// Generate the header and source for one spec. Does not format.
    pub fn generate(&self, spec_path: &Path) -> Result<Outcome> {
        let Some(kind) = SpecKind::from_path(spec_path) else {
            return Ok(failed(SpecError::UnknownKind {
                path: spec_path.to_path_buf(),
            }));
        };
        let Some(header) = self.layout.header_path(spec_path) else {
            return Ok(failed(SpecError::UnknownKind {
                path: spec_path.to_path_buf(),
            }));
        };
        let source = self.layout.source_path(&header);

        let content = match std::fs::read_to_string(spec_path) {
            Ok(content) => content,
            Err(e) => return Ok(failed(*SpecError::io(spec_path, e))),
        };
        let metadata = Metadata::for_spec(content.as_bytes());

        if self.skip_unchanged
            && read_metadata(&header)?.as_ref() == Some(&metadata)
            && read_metadata(&source)?.as_ref() == Some(&metadata)
        {
            debug!(spec = %spec_path.display(), "spec unchanged, skipping");
            return Ok(Outcome::Unchanged);
        }

        let filename = slash_path(self.layout.relative(spec_path));
        let spec = match AnySpec::parse(kind, &content, &filename) {
            Ok(spec) => spec,
            Err(e) => return Ok(failed(*e)),
        };

        write_file(&header, &self.header_file(spec_path, &header, &metadata, &spec))?;
        let include = match self.layout.include_path(&header) {
            Ok(include) => include,
            Err(e) => return Ok(failed(e)),
        };
        write_file(
            &source,
            &self.source_file(spec_path, &include, &metadata, &spec),
        )?;

        info!(spec = %filename, header = %header.display(), "generated");
        Ok(Outcome::Generated(GeneratedFiles {
            spec: spec_path.to_path_buf(),
            header,
            source,
        }))
    }

    fn header_file(
        &self,
        spec_path: &Path,
        header: &Path,
        metadata: &Metadata,
        spec: &AnySpec,
    ) -> String {
        let guard = self.layout.header_guard(header);
        let mut body = CodeBuilder::cpp();
        match spec {
            AnySpec::Struct(spec) => self.structs.render_header(spec, &mut body),
            AnySpec::Enum(spec) => self.enums.render_header(spec, &mut body),
            AnySpec::Variant(spec) => self.variants.render_header(spec, &mut body),
        }
        format!(
            "{}{}\n#ifndef {guard}\n#define {guard}\n\n{}\n#endif // {guard}\n",
            self.disclaimer(spec_path),
            metadata.render(),
            body.build()
        )
    }

    fn source_file(
        &self,
        spec_path: &Path,
        include: &Path,
        metadata: &Metadata,
        spec: &AnySpec,
    ) -> String {
        let mut body = CodeBuilder::cpp();
        match spec {
            AnySpec::Struct(spec) => self.structs.render_source(spec, &mut body),
            AnySpec::Enum(spec) => self.enums.render_source(spec, &mut body),
            AnySpec::Variant(spec) => self.variants.render_source(spec, &mut body),
        }
        format!(
            "{}{}\n#include {}\n{}",
            self.disclaimer(spec_path),
            metadata.render(),
            c_string_literal(&slash_path(include)),
            body.build()
        )
    }

    fn disclaimer(&self, spec_path: &Path) -> String {
        format!(
            "// THIS FILE WAS AUTO-GENERATED BY dtgen. DO NOT MODIFY IT!\n\
             // If you would like to modify this datatype, instead modify\n\
             // {}\n",
            slash_path(self.layout.relative(spec_path))
        )
    }
}

fn failed(error: impl miette::Diagnostic + Send + Sync + 'static) -> Outcome {
    Outcome::Failed(miette::Report::new(error))
}

/// Path with `/` separators, as written in `#include` lines and comments.
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
