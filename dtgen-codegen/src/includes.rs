//! Include collection and deduplication.

use dtgen_spec::IncludeSpec;
use indexmap::IndexSet;

use crate::builder::CodeBuilder;

/// Tracks `#include` directives and deduplicates them.
///
/// Maintains first-occurrence order for deterministic output.
///
/// # Example
///
/// ```
/// use dtgen_codegen::IncludeCollector;
/// use dtgen_spec::IncludeSpec;
///
/// let mut includes = IncludeCollector::new();
/// includes.add(IncludeSpec::system("tuple"));
/// includes.add(IncludeSpec::system("functional"));
/// includes.add(IncludeSpec::system("tuple"));
///
/// assert_eq!(includes.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IncludeCollector {
    includes: IndexSet<IncludeSpec>,
}

impl IncludeCollector {
    /// Create a new empty include collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include. Returns `false` if it was already present.
    pub fn add(&mut self, include: IncludeSpec) -> bool {
        self.includes.insert(include)
    }

    /// Add every include from an iterator, keeping first occurrences.
    pub fn extend<'a>(&mut self, includes: impl IntoIterator<Item = &'a IncludeSpec>) {
        for include in includes {
            self.add(include.clone());
        }
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &IncludeCollector) {
        self.extend(other.iter());
    }

    pub fn contains(&self, include: &IncludeSpec) -> bool {
        self.includes.contains(include)
    }

    /// Iterate over the includes in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &IncludeSpec> {
        self.includes.iter()
    }

    pub fn len(&self) -> usize {
        self.includes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
    }

    /// Emit one `#include` line per entry.
    pub fn render(&self, b: &mut CodeBuilder) {
        for include in &self.includes {
            b.push_line(&include.to_string());
        }
    }
}

impl<'a> FromIterator<&'a IncludeSpec> for IncludeCollector {
    fn from_iter<I: IntoIterator<Item = &'a IncludeSpec>>(iter: I) -> Self {
        let mut collector = Self::new();
        collector.extend(iter);
        collector
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_render_preserves_first_occurrence() {
        let mut includes = IncludeCollector::new();
        includes.add(IncludeSpec::local("geo/coord.h"));
        includes.add(IncludeSpec::system("tuple"));
        includes.add(IncludeSpec::local("geo/coord.h"));
        includes.add(IncludeSpec::system("functional"));

        let mut b = CodeBuilder::cpp();
        includes.render(&mut b);
        assert_eq!(
            b.build(),
            "#include \"geo/coord.h\"\n#include <tuple>\n#include <functional>\n"
        );
    }

    #[test]
    fn test_system_and_local_are_distinct() {
        let mut includes = IncludeCollector::new();
        assert!(includes.add(IncludeSpec::system("vector")));
        assert!(includes.add(IncludeSpec::local("vector")));
        assert!(!includes.add(IncludeSpec::system("vector")));
        assert_eq!(includes.len(), 2);
    }

    #[test]
    fn test_merge() {
        let mut a: IncludeCollector = [IncludeSpec::system("string")].iter().collect();
        let b: IncludeCollector = [IncludeSpec::system("sstream"), IncludeSpec::system("string")]
            .iter()
            .collect();
        a.merge(&b);
        let paths: Vec<&str> = a.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["string", "sstream"]);
    }

    fn include_strategy() -> impl Strategy<Value = IncludeSpec> {
        ("[a-c]{1,2}", any::<bool>()).prop_map(|(path, system)| IncludeSpec { path, system })
    }

    proptest! {
        #[test]
        fn dedup_keeps_first_occurrence_order(
            items in proptest::collection::vec(include_strategy(), 0..24)
        ) {
            let collector: IncludeCollector = items.iter().collect();

            let mut expected: Vec<IncludeSpec> = Vec::new();
            for item in &items {
                if !expected.contains(item) {
                    expected.push(item.clone());
                }
            }

            let actual: Vec<IncludeSpec> = collector.iter().cloned().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
