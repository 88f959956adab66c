//! The renderer trait shared by every kind of spec.

use dtgen_spec::{IncludeSpec, TypeSpec};

use crate::{builder::CodeBuilder, includes::IncludeCollector, registry::FeatureRegistry};

/// Renders one kind of spec into a header and a source file body.
///
/// Implementors supply the kind-specific pieces (the type definition, the
/// out-of-line members and the feature registry). Include inference,
/// namespace wrapping, feature ordering and the inlining of generic
/// implementations are shared by the default methods.
pub trait SpecRenderer {
    type Spec: TypeSpec;

    fn registry(&self) -> &FeatureRegistry<Self::Spec>;

    /// Includes every spec of this kind needs in its header.
    fn intrinsic_includes(&self, _spec: &Self::Spec) -> Vec<IncludeSpec> {
        Vec::new()
    }

    /// Emit the type definition. Called inside the spec's namespace.
    fn render_type(&self, spec: &Self::Spec, b: &mut CodeBuilder);

    /// Whether the type has out-of-line members besides feature members.
    fn has_member_defs(&self, _spec: &Self::Spec) -> bool {
        false
    }

    /// Emit out-of-line member definitions. Called inside the spec's namespace
    /// ahead of the feature member definitions.
    fn render_member_defs(&self, _spec: &Self::Spec, _b: &mut CodeBuilder) {}

    /// Header includes: declared, then intrinsic, then per feature.
    ///
    /// Generic specs also pull in the source includes, since their
    /// definitions live in the header.
    fn header_includes(&self, spec: &Self::Spec) -> IncludeCollector {
        let mut includes: IncludeCollector = spec.includes().iter().collect();
        includes.extend(&self.intrinsic_includes(spec));
        includes.extend(self.registry().header_includes(spec));
        if spec.is_generic() {
            includes.merge(&self.source_includes(spec));
        }
        includes
    }

    /// Source includes: declared, then per feature.
    fn source_includes(&self, spec: &Self::Spec) -> IncludeCollector {
        let mut includes: IncludeCollector = spec.src_includes().iter().collect();
        includes.extend(self.registry().source_includes(spec));
        includes
    }

    /// Emit the header body (everything between the header guards).
    fn render_header(&self, spec: &Self::Spec, b: &mut CodeBuilder) {
        let includes = self.header_includes(spec);
        if !includes.is_empty() {
            b.nl_block(|b| includes.render(b));
        }

        b.namespace(spec.namespace(), |b| {
            if !spec.fwd_decls().is_empty() {
                b.nl_block(|b| {
                    for decl in spec.fwd_decls() {
                        b.semicolon(|b| {
                            b.push_raw(decl.trim().trim_end_matches(';'));
                        });
                    }
                });
            }
            if let Some(doc) = spec.docstring() {
                b.doc_comment(doc);
            }
            self.render_type(spec, b);
        });

        if !spec.post_includes().is_empty() {
            b.push_blank();
            spec.post_includes()
                .iter()
                .collect::<IncludeCollector>()
                .render(b);
        }

        self.registry().emit_decls(spec, b);

        if spec.is_generic() {
            self.render_impls(spec, b);
        }
    }

    /// Emit the source body (everything after the include of the header).
    ///
    /// Empty for generic specs.
    fn render_source(&self, spec: &Self::Spec, b: &mut CodeBuilder) {
        if spec.is_generic() {
            return;
        }
        let includes = self.source_includes(spec);
        if !includes.is_empty() {
            includes.render(b);
        }
        self.render_impls(spec, b);
    }

    /// Emit every definition: out-of-line members in the spec's namespace,
    /// then the free feature definitions.
    fn render_impls(&self, spec: &Self::Spec, b: &mut CodeBuilder) {
        if self.has_member_defs(spec) || self.registry().has_member_defs(spec) {
            b.push_blank();
            b.namespace(spec.namespace(), |b| {
                self.render_member_defs(spec, b);
                self.registry().emit_member_defs(spec, b);
            });
        }
        self.registry().emit_defs(spec, b);
    }
}

#[cfg(test)]
mod tests {
    use dtgen_spec::{Feature, StructSpec};

    use super::*;
    use crate::registry::FeatureEmitter;

    /// A renderer emitting one comment per piece, to check placement.
    struct Probe {
        registry: FeatureRegistry<StructSpec>,
    }

    fn eq_member_decls(_: &StructSpec, b: &mut CodeBuilder) {
        b.push_line("// eq member decl");
    }

    fn eq_member_defs(_: &StructSpec, b: &mut CodeBuilder) {
        b.push_line("// eq member def");
    }

    fn hash_decls(_: &StructSpec, b: &mut CodeBuilder) {
        b.push_line("// hash decl");
    }

    fn hash_defs(_: &StructSpec, b: &mut CodeBuilder) {
        b.push_line("// hash def");
    }

    impl Probe {
        fn new() -> Self {
            Self {
                registry: FeatureRegistry::new()
                    .register(
                        Feature::Eq,
                        FeatureEmitter::new()
                            .header_include(IncludeSpec::system("tuple"))
                            .member_decls(eq_member_decls)
                            .member_defs(eq_member_defs),
                    )
                    .register(
                        Feature::Hash,
                        FeatureEmitter::new()
                            .header_include(IncludeSpec::system("functional"))
                            .source_include(IncludeSpec::system("sstream"))
                            .decls(hash_decls)
                            .defs(hash_defs),
                    ),
            }
        }
    }

    impl SpecRenderer for Probe {
        type Spec = StructSpec;

        fn registry(&self) -> &FeatureRegistry<StructSpec> {
            &self.registry
        }

        fn intrinsic_includes(&self, _: &StructSpec) -> Vec<IncludeSpec> {
            vec![IncludeSpec::system("tuple"), IncludeSpec::system("string")]
        }

        fn render_type(&self, spec: &StructSpec, b: &mut CodeBuilder) {
            b.struct_block(&spec.name, &spec.template_params, false, |b| {
                self.registry.emit_member_decls(spec, b);
            });
        }
    }

    fn spec(extra: &str) -> StructSpec {
        format!(
            "namespace = \"geo\"\nname = \"Point\"\nfeatures = [\"hash\", \"eq\"]\n{extra}\n[[fields]]\nname = \"x\"\ntype = \"int\"\n"
        )
        .parse()
        .unwrap()
    }

    #[test]
    fn test_header_include_order() {
        let spec = spec("includes = [\"geo/coord.h\", \"<string>\"]");
        let includes: Vec<String> = Probe::new()
            .header_includes(&spec)
            .iter()
            .map(|i| i.to_string())
            .collect();
        assert_eq!(
            includes,
            vec![
                "#include \"geo/coord.h\"",
                "#include <string>",
                "#include <tuple>",
                "#include <functional>",
            ]
        );
    }

    #[test]
    fn test_non_generic_splits_header_and_source() {
        let spec = spec("");
        let probe = Probe::new();

        let mut header = CodeBuilder::cpp();
        probe.render_header(&spec, &mut header);
        let header = header.build();
        assert!(header.contains("namespace geo {\nstruct Point {\n\n  // eq member decl\n};\n} // namespace geo\n"));
        assert!(header.contains("\n// hash decl\n"));
        assert!(!header.contains("def"));
        assert!(!header.contains("sstream"));

        let mut source = CodeBuilder::cpp();
        probe.render_source(&spec, &mut source);
        assert_eq!(
            source.build(),
            "#include <sstream>\n\nnamespace geo {\n\n// eq member def\n} // namespace geo\n\n// hash def\n"
        );
    }

    #[test]
    fn test_generic_inlines_everything_into_header() {
        let spec = spec("template_params = [\"T\"]");
        let probe = Probe::new();

        let mut header = CodeBuilder::cpp();
        probe.render_header(&spec, &mut header);
        let header = header.build();
        assert!(header.contains("#include <sstream>"));
        assert!(header.contains("template <typename T>\nstruct Point {"));
        assert!(header.contains("// eq member def"));
        assert!(header.contains("// hash def"));

        let mut source = CodeBuilder::cpp();
        probe.render_source(&spec, &mut source);
        assert!(source.is_empty());
    }

    #[test]
    fn test_fwd_decls_docstring_and_post_includes() {
        let spec = spec(
            "fwd_decls = [\"struct Line;\"]\npost_includes = [\"geo/line.dtg.h\"]\ndocstring = \"A point.\"",
        );
        let mut header = CodeBuilder::cpp();
        Probe::new().render_header(&spec, &mut header);
        let header = header.build();
        assert!(header.contains("namespace geo {\nstruct Line;\n\n/**\n * A point.\n */\nstruct Point {"));
        assert!(header.contains("} // namespace geo\n\n#include \"geo/line.dtg.h\"\n"));
    }
}
