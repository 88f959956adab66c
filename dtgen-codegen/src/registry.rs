//! Feature-to-emitter registry.
//!
//! Each kind of spec owns one [`FeatureRegistry`] mapping every [`Feature`] it
//! supports to a [`FeatureEmitter`]. Renderers walk the registry in feature
//! emission order instead of branching on the feature set themselves.

use std::collections::BTreeMap;

use dtgen_spec::{Feature, IncludeSpec, TypeSpec};

use crate::builder::CodeBuilder;

/// Emits a fragment of C++ for a spec.
pub type Emit<S> = fn(&S, &mut CodeBuilder);

/// What one feature contributes to the generated files.
///
/// The four emitters land in different places:
///
/// - `member_decls`: inside the type body
/// - `decls`: after the type, in the header (each emitter opens its own namespace)
/// - `member_defs`: inside the spec's namespace, with the other out-of-line members
/// - `defs`: after the member definitions (each emitter opens its own namespace)
pub struct FeatureEmitter<S> {
    header_includes: Vec<IncludeSpec>,
    source_includes: Vec<IncludeSpec>,
    member_decls: Option<Emit<S>>,
    decls: Option<Emit<S>>,
    member_defs: Option<Emit<S>>,
    defs: Option<Emit<S>>,
}

impl<S> Default for FeatureEmitter<S> {
    fn default() -> Self {
        Self {
            header_includes: Vec::new(),
            source_includes: Vec::new(),
            member_decls: None,
            decls: None,
            member_defs: None,
            defs: None,
        }
    }
}

impl<S> FeatureEmitter<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include required by the header.
    pub fn header_include(mut self, include: IncludeSpec) -> Self {
        self.header_includes.push(include);
        self
    }

    /// Add an include required only by the definitions.
    pub fn source_include(mut self, include: IncludeSpec) -> Self {
        self.source_includes.push(include);
        self
    }

    pub fn member_decls(mut self, emit: Emit<S>) -> Self {
        self.member_decls = Some(emit);
        self
    }

    pub fn decls(mut self, emit: Emit<S>) -> Self {
        self.decls = Some(emit);
        self
    }

    pub fn member_defs(mut self, emit: Emit<S>) -> Self {
        self.member_defs = Some(emit);
        self
    }

    pub fn defs(mut self, emit: Emit<S>) -> Self {
        self.defs = Some(emit);
        self
    }

    pub fn header_includes(&self) -> &[IncludeSpec] {
        &self.header_includes
    }

    pub fn source_includes(&self) -> &[IncludeSpec] {
        &self.source_includes
    }
}

/// Registry of feature emitters for one kind of spec.
pub struct FeatureRegistry<S> {
    emitters: BTreeMap<Feature, FeatureEmitter<S>>,
}

impl<S> Default for FeatureRegistry<S> {
    fn default() -> Self {
        Self {
            emitters: BTreeMap::new(),
        }
    }
}

impl<S: TypeSpec> FeatureRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the emitter for a feature, replacing any previous one.
    pub fn register(mut self, feature: Feature, emitter: FeatureEmitter<S>) -> Self {
        self.emitters.insert(feature, emitter);
        self
    }

    pub fn get(&self, feature: Feature) -> Option<&FeatureEmitter<S>> {
        self.emitters.get(&feature)
    }

    /// Features supported by this registry, in emission order.
    pub fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        self.emitters.keys().copied()
    }

    /// Emitters for the features the spec requested, in emission order.
    pub fn enabled<'a>(&'a self, spec: &'a S) -> impl Iterator<Item = &'a FeatureEmitter<S>> {
        spec.features()
            .iter()
            .filter_map(move |feature| self.emitters.get(&feature))
    }

    pub fn header_includes<'a>(&'a self, spec: &'a S) -> impl Iterator<Item = &'a IncludeSpec> {
        self.enabled(spec).flat_map(|e| e.header_includes.iter())
    }

    pub fn source_includes<'a>(&'a self, spec: &'a S) -> impl Iterator<Item = &'a IncludeSpec> {
        self.enabled(spec).flat_map(|e| e.source_includes.iter())
    }

    /// Whether any requested feature defines members out of line.
    pub fn has_member_defs(&self, spec: &S) -> bool {
        self.enabled(spec).any(|e| e.member_defs.is_some())
    }

    /// Emit member declarations, each group preceded by a blank line.
    pub fn emit_member_decls(&self, spec: &S, b: &mut CodeBuilder) {
        self.emit_each(spec, b, |e| e.member_decls);
    }

    /// Emit header declarations, each group preceded by a blank line.
    pub fn emit_decls(&self, spec: &S, b: &mut CodeBuilder) {
        self.emit_each(spec, b, |e| e.decls);
    }

    /// Emit out-of-line member definitions, each group preceded by a blank line.
    pub fn emit_member_defs(&self, spec: &S, b: &mut CodeBuilder) {
        self.emit_each(spec, b, |e| e.member_defs);
    }

    /// Emit free definitions, each group preceded by a blank line.
    pub fn emit_defs(&self, spec: &S, b: &mut CodeBuilder) {
        self.emit_each(spec, b, |e| e.defs);
    }

    fn emit_each(
        &self,
        spec: &S,
        b: &mut CodeBuilder,
        select: impl Fn(&FeatureEmitter<S>) -> Option<Emit<S>>,
    ) {
        for emit in self.enabled(spec).filter_map(select) {
            b.push_blank();
            emit(spec, b);
        }
    }
}

#[cfg(test)]
mod tests {
    use dtgen_spec::EnumSpec;

    use super::*;

    fn color(features: &str) -> EnumSpec {
        format!("name = \"Color\"\nfeatures = {features}\n[[values]]\nname = \"RED\"\n")
            .parse()
            .unwrap()
    }

    fn registry() -> FeatureRegistry<EnumSpec> {
        FeatureRegistry::new()
            .register(
                Feature::Fmt,
                FeatureEmitter::<EnumSpec>::new()
                    .header_include(IncludeSpec::system("string"))
                    .decls(|spec, b| {
                        b.push_line(&format!("// fmt {}", spec.name));
                    }),
            )
            .register(
                Feature::Hash,
                FeatureEmitter::<EnumSpec>::new()
                    .header_include(IncludeSpec::system("functional"))
                    .header_include(IncludeSpec::system("string"))
                    .decls(|spec, b| {
                        b.push_line(&format!("// hash {}", spec.name));
                    }),
            )
    }

    #[test]
    fn test_emission_follows_feature_order() {
        let spec = color("[\"fmt\", \"hash\"]");
        let mut b = CodeBuilder::cpp();
        registry().emit_decls(&spec, &mut b);
        assert_eq!(b.build(), "\n// hash Color\n\n// fmt Color\n");
    }

    #[test]
    fn test_includes_only_for_enabled_features() {
        let spec = color("[\"fmt\"]");
        let registry = registry();
        let paths: Vec<&str> = registry
            .header_includes(&spec)
            .map(|i| i.path.as_str())
            .collect();
        assert_eq!(paths, vec!["string"]);
        assert!(!registry.has_member_defs(&spec));
    }

    #[test]
    fn test_unregistered_feature_is_skipped() {
        let spec = color("[\"json\"]");
        let mut b = CodeBuilder::cpp();
        registry().emit_decls(&spec, &mut b);
        assert!(b.is_empty());
    }
}
