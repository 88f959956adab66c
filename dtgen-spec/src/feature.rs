//! Opt-in derived capabilities.

use std::{collections::BTreeSet, fmt, str::FromStr};

use toml::Spanned;

use crate::{Result, error::SourceContext};

/// A derived capability requested by a spec.
///
/// The declaration order of the variants is the order in which features are
/// emitted into generated code, independent of how a spec lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Eq,
    Ord,
    Hash,
    Json,
    Rapidcheck,
    Fmt,
}

impl Feature {
    /// Every feature, in emission order.
    pub const ALL: [Feature; 6] = [
        Feature::Eq,
        Feature::Ord,
        Feature::Hash,
        Feature::Json,
        Feature::Rapidcheck,
        Feature::Fmt,
    ];

    /// Features an enum spec may request.
    pub const ENUM: [Feature; 4] = [
        Feature::Hash,
        Feature::Json,
        Feature::Rapidcheck,
        Feature::Fmt,
    ];

    /// Token used in spec files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Eq => "eq",
            Feature::Ord => "ord",
            Feature::Hash => "hash",
            Feature::Json => "json",
            Feature::Rapidcheck => "rapidcheck",
            Feature::Fmt => "fmt",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// The set of features requested by a spec.
///
/// Duplicates collapse; iteration always follows emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet(BTreeSet<Feature>);

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature: Feature) -> bool {
        self.0.insert(feature)
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse feature tokens, accepting only those in `allowed`.
    pub(crate) fn parse(
        tokens: &[Spanned<String>],
        allowed: &[Feature],
        ctx: &SourceContext,
    ) -> Result<Self> {
        let mut set = Self::new();
        for token in tokens {
            match token.get_ref().parse::<Feature>() {
                Ok(feature) if allowed.contains(&feature) => {
                    set.insert(feature);
                }
                _ => {
                    let valid = allowed
                        .iter()
                        .map(Feature::as_str)
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(ctx.unknown_feature(token.get_ref(), valid, token.span()));
                }
            }
        }
        Ok(set)
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("eq".parse::<Feature>(), Ok(Feature::Eq));
        assert_eq!("rapidcheck".parse::<Feature>(), Ok(Feature::Rapidcheck));
        assert!("EQ".parse::<Feature>().is_err());
        assert!("serde".parse::<Feature>().is_err());
    }

    #[test]
    fn test_iteration_follows_emission_order() {
        let set: FeatureSet = [Feature::Fmt, Feature::Eq, Feature::Json, Feature::Eq]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Feature::Eq, Feature::Json, Feature::Fmt]
        );
    }

    #[test]
    fn test_rapidcheck_sorts_before_fmt() {
        let set: FeatureSet = [Feature::Fmt, Feature::Rapidcheck].into_iter().collect();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Feature::Rapidcheck, Feature::Fmt]
        );
    }
}
