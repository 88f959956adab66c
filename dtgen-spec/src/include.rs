use std::fmt;

use toml::Spanned;

use crate::{Result, error::SourceContext};

/// An `#include` directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IncludeSpec {
    pub path: String,
    pub system: bool,
}

impl IncludeSpec {
    /// A `#include <path>` directive.
    pub fn system(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            system: true,
        }
    }

    /// A `#include "path"` directive.
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            system: false,
        }
    }

    /// Parse `<path>` as a system include and anything else as a local one.
    ///
    /// Returns `None` for empty paths and unbalanced angle brackets.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let include = match (s.strip_prefix('<'), s.ends_with('>')) {
            (Some(rest), true) => Self::system(&rest[..rest.len() - 1]),
            (None, false) => Self::local(s),
            _ => return None,
        };
        let valid = !include.path.is_empty()
            && !include.path.contains(['<', '>', '"'])
            && !include.path.contains(char::is_whitespace);
        valid.then_some(include)
    }

    pub(crate) fn parse_all(
        raw: &[Spanned<String>],
        ctx: &SourceContext,
    ) -> Result<Vec<IncludeSpec>> {
        raw.iter()
            .map(|s| {
                IncludeSpec::parse(s.get_ref())
                    .ok_or_else(|| ctx.malformed_include(s.get_ref(), s.span()))
            })
            .collect()
    }
}

impl fmt::Display for IncludeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.system {
            write!(f, "#include <{}>", self.path)
        } else {
            write!(f, "#include \"{}\"", self.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_system_and_local() {
        assert_eq!(IncludeSpec::parse("<vector>"), Some(IncludeSpec::system("vector")));
        assert_eq!(
            IncludeSpec::parse("geo/point.dtg.h"),
            Some(IncludeSpec::local("geo/point.dtg.h"))
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(IncludeSpec::parse(""), None);
        assert_eq!(IncludeSpec::parse("<>"), None);
        assert_eq!(IncludeSpec::parse("<vector"), None);
        assert_eq!(IncludeSpec::parse("vector>"), None);
        assert_eq!(IncludeSpec::parse("\"quoted.h\""), None);
        assert_eq!(IncludeSpec::parse("two words.h"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(IncludeSpec::system("tuple").to_string(), "#include <tuple>");
        assert_eq!(
            IncludeSpec::local("utils/fmt.h").to_string(),
            "#include \"utils/fmt.h\""
        );
    }
}
