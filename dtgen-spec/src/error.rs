use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for spec operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "point.struct.toml");
/// ctx.validation_error("variant Shape must declare at least one value");
/// ctx.unknown_feature("eqq", "eq, ord, hash, json, fmt, rapidcheck", span);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            filename: self.filename.clone(),
            source,
        })
    }

    /// Create an unknown feature error.
    pub fn unknown_feature(
        &self,
        token: impl Into<String>,
        valid: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownFeature {
            src: self.named_source(),
            span: Some(span.into()),
            filename: self.filename.clone(),
            token: token.into(),
            valid: valid.into(),
        })
    }

    /// Create a malformed include error.
    pub fn malformed_include(
        &self,
        include: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::MalformedInclude {
            src: self.named_source(),
            span: Some(span.into()),
            filename: self.filename.clone(),
            include: include.into(),
        })
    }

    /// Create a validation error without a span.
    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            filename: self.filename.clone(),
            message: message.into(),
        })
    }

    /// Create a validation error with a span.
    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: Some(span.into()),
            filename: self.filename.clone(),
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load spec {filename}")]
    #[diagnostic(code(dtgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        filename: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown feature '{token}' in spec {filename}")]
    #[diagnostic(code(dtgen::unknown_feature), help("valid features here are: {valid}"))]
    UnknownFeature {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown feature")]
        span: Option<SourceSpan>,
        filename: String,
        token: String,
        valid: String,
    },

    #[error("malformed include '{include}' in spec {filename}")]
    #[diagnostic(
        code(dtgen::malformed_include),
        help("write system includes as \"<path>\" and local includes as \"path\"")
    )]
    MalformedInclude {
        #[source_code]
        src: NamedSource<String>,
        #[label("malformed include")]
        span: Option<SourceSpan>,
        filename: String,
        include: String,
    },

    #[error("invalid spec {filename}: {message}")]
    #[diagnostic(code(dtgen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        filename: String,
        message: String,
    },

    #[error("unrecognized spec file '{path}'")]
    #[diagnostic(help("spec files end in .struct.toml, .enum.toml or .variant.toml"))]
    UnknownKind { path: PathBuf },

    #[error("no {file} found in '{start}' or any parent directory")]
    #[diagnostic(help("create a {file} with at least a project_name at the project root"))]
    ConfigNotFound { start: PathBuf, file: &'static str },
}

impl Error {
    /// Create an IO error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Name of the file the error refers to.
    pub fn filename(&self) -> String {
        match self {
            Error::Io { path, .. } | Error::UnknownKind { path } => path.display().to_string(),
            Error::ConfigNotFound { start, .. } => start.display().to_string(),
            Error::Parse { filename, .. }
            | Error::UnknownFeature { filename, .. }
            | Error::MalformedInclude { filename, .. }
            | Error::Validation { filename, .. } => filename.clone(),
        }
    }
}
