//! Enums: an `enum class` whose built-in comparisons cover EQ and ORD.

use dtgen_codegen::{FeatureEmitter, FeatureRegistry, SpecRenderer, builder::CodeBuilder};
use dtgen_core::c_string_literal;
use dtgen_spec::{EnumSpec, Feature, IncludeSpec};

use crate::{common, naming::qualified_typename};

pub struct EnumRenderer {
    registry: FeatureRegistry<EnumSpec>,
}

impl EnumRenderer {
    pub fn new() -> Self {
        let registry = FeatureRegistry::new()
            .register(
                Feature::Hash,
                FeatureEmitter::new()
                    .header_include(IncludeSpec::system("functional"))
                    .decls(hash_decls)
                    .defs(hash_defs),
            )
            .register(
                Feature::Json,
                FeatureEmitter::new()
                    .header_include(IncludeSpec::system("nlohmann/json.hpp"))
                    .source_include(IncludeSpec::system("stdexcept"))
                    .source_include(IncludeSpec::system("string"))
                    .decls(json_decls)
                    .defs(json_defs),
            )
            .register(
                Feature::Rapidcheck,
                FeatureEmitter::new()
                    .header_include(IncludeSpec::system("rapidcheck.h"))
                    .decls(rapidcheck_decls)
                    .defs(rapidcheck_defs),
            )
            .register(
                Feature::Fmt,
                FeatureEmitter::new()
                    .header_include(IncludeSpec::system("string"))
                    .header_include(IncludeSpec::system("ostream"))
                    .header_include(IncludeSpec::system("fmt/format.h"))
                    .source_include(IncludeSpec::system("stdexcept"))
                    .decls(fmt_decls)
                    .defs(fmt_defs),
            );
        Self { registry }
    }
}

impl Default for EnumRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecRenderer for EnumRenderer {
    type Spec = EnumSpec;

    fn registry(&self) -> &FeatureRegistry<EnumSpec> {
        &self.registry
    }

    fn render_type(&self, spec: &EnumSpec, b: &mut CodeBuilder) {
        b.semicolon(|b| {
            b.push_raw(&format!("enum class {}", spec.name));
            b.braces(|b| {
                b.join(&spec.values, ",\n", |b, value| {
                    b.push_raw(&value.name);
                });
            });
        });
    }
}

/// Throw for a value outside the enumerators, e.g. one cast from an integer.
fn throw_unknown_value(spec: &EnumSpec) -> String {
    format!(
        "throw std::runtime_error(\"Unknown {} value \" + std::to_string(static_cast<int>(x)));",
        spec.name
    )
}

fn hash_decls(spec: &EnumSpec, b: &mut CodeBuilder) {
    common::hash_decls(spec, b, &qualified_typename(spec));
}

fn hash_defs(spec: &EnumSpec, b: &mut CodeBuilder) {
    common::hash_def(spec, b, &qualified_typename(spec), |b| {
        b.push_line("return std::hash<int>{}(static_cast<int>(x));");
    });
}

fn json_decls(spec: &EnumSpec, b: &mut CodeBuilder) {
    common::json_decls(spec, b, &qualified_typename(spec));
}

fn json_defs(spec: &EnumSpec, b: &mut CodeBuilder) {
    let q = qualified_typename(spec);
    common::json_defs(
        spec,
        b,
        &q,
        |b| {
            b.push_line("std::string as_str = j.get<std::string>();");
            b.if_chain(
                &spec.values,
                |value| format!("as_str == {}", c_string_literal(&value.json_key)),
                |b, value| {
                    b.push_line(&format!("return {q}::{};", value.name));
                },
                |b| {
                    b.push_line(&format!(
                        "throw std::runtime_error(\"Unknown {} value \" + as_str);",
                        spec.name
                    ));
                },
            );
        },
        |b| {
            b.switch("x", |b| {
                for value in &spec.values {
                    b.case(&format!("{q}::{}", value.name), true, |b| {
                        b.push_line(&format!("j = {};", c_string_literal(&value.json_key)));
                    });
                }
                b.default_case(false, |b| {
                    b.push_line(&throw_unknown_value(spec));
                });
            });
        },
    );
}

fn rapidcheck_decls(spec: &EnumSpec, b: &mut CodeBuilder) {
    common::arbitrary_decls(spec, b);
}

fn rapidcheck_defs(spec: &EnumSpec, b: &mut CodeBuilder) {
    let q = qualified_typename(spec);
    let values: Vec<String> = spec
        .values
        .iter()
        .map(|v| format!("{q}::{}", v.name))
        .collect();
    common::arbitrary_def(
        spec,
        b,
        &format!("gen::element<{q}>({})", values.join(", ")),
    );
}

fn fmt_decls(spec: &EnumSpec, b: &mut CodeBuilder) {
    common::fmt_decls(spec, b, &spec.name);
}

fn fmt_defs(spec: &EnumSpec, b: &mut CodeBuilder) {
    common::fmt_defs(spec, b, &spec.name, |b| {
        b.switch("x", |b| {
            for value in &spec.values {
                b.case(&format!("{}::{}", spec.name, value.name), false, |b| {
                    b.push_line(&format!("return {};", c_string_literal(&value.name)));
                });
            }
            b.default_case(false, |b| {
                b.push_line(&throw_unknown_value(spec));
            });
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(features: &str) -> EnumSpec {
        format!(
            r#"
namespace = "paint"
name = "Color"
features = {features}
docstring = "Primary colors."

[[values]]
name = "RED"

[[values]]
name = "GREEN"
json_key = "green"
"#
        )
        .parse()
        .unwrap()
    }

    fn render(spec: &EnumSpec) -> (String, String) {
        let renderer = EnumRenderer::new();
        let mut header = CodeBuilder::cpp();
        renderer.render_header(spec, &mut header);
        let mut source = CodeBuilder::cpp();
        renderer.render_source(spec, &mut source);
        (header.build(), source.build())
    }

    #[test]
    fn test_enum_class() {
        let (header, source) = render(&color("[]"));
        assert_eq!(
            header,
            "namespace paint {\n/**\n * Primary colors.\n */\nenum class Color {\n  RED,\n  GREEN\n};\n} // namespace paint\n"
        );
        assert!(source.is_empty());
    }

    #[test]
    fn test_hash_casts_to_int() {
        let (header, source) = render(&color(r#"["hash"]"#));
        assert!(header.starts_with("#include <functional>\n\n"));
        assert!(header.contains("  size_t operator()(::paint::Color x) const;\n"));
        assert!(source.contains(
            "size_t hash<::paint::Color>::operator()(::paint::Color x) const {\n  return std::hash<int>{}(static_cast<int>(x));\n}\n"
        ));
    }

    #[test]
    fn test_json_round_trips_json_keys() {
        let (_, source) = render(&color(r#"["json"]"#));
        assert!(source.starts_with("#include <stdexcept>\n#include <string>\n"));
        assert!(source.contains(
            "  if (as_str == \"RED\") {\n    return ::paint::Color::RED;\n  } else if (as_str == \"green\") {\n    return ::paint::Color::GREEN;\n  } else {\n    throw std::runtime_error(\"Unknown Color value \" + as_str);\n  }\n"
        ));
        assert!(source.contains(
            "    case ::paint::Color::GREEN: {\n      j = \"green\";\n      break;\n    }\n"
        ));
        assert!(!source.contains("__type"));
    }

    #[test]
    fn test_fmt_switch() {
        let (header, source) = render(&color(r#"["fmt"]"#));
        assert!(header.contains("namespace paint {\nstd::string format_as(Color x);\nstd::ostream &operator<<(std::ostream &s, Color x);\n} // namespace paint\n"));
        assert!(source.contains("    case Color::RED: {\n      return \"RED\";\n    }\n"));
        assert!(source.contains("throw std::runtime_error(\"Unknown Color value \" + std::to_string(static_cast<int>(x)));"));
        assert!(source.contains("std::ostream &operator<<(std::ostream &s, Color x) {\n  return s << fmt::to_string(x);\n}\n"));
    }

    #[test]
    fn test_rapidcheck_picks_an_element() {
        let (_, source) = render(&color(r#"["rapidcheck"]"#));
        assert!(source.contains(
            "  return gen::element<::paint::Color>(::paint::Color::RED, ::paint::Color::GREEN);\n"
        ));
    }
}
