//! Variants: a tagged union wrapping `std::variant`.
//!
//! The wrapper forwards visitation, membership tests and access to the raw
//! variant, rejecting types outside the alternatives at compile time.

use dtgen_codegen::{
    FeatureEmitter, FeatureRegistry, SpecRenderer,
    builder::{CodeBuilder, FunctionSpec},
};
use dtgen_core::c_string_literal;
use dtgen_spec::{Feature, IncludeSpec, TypeSpec, VariantSpec, VariantValueSpec};

use crate::{
    common,
    naming::{fresh_typevar, qualified_typename, throw_unknown_index, unqualified_typename},
};

const EQ_OPS: [&str; 2] = ["==", "!="];
const ORD_OPS: [&str; 4] = ["<", ">", "<=", ">="];

pub struct VariantRenderer {
    registry: FeatureRegistry<VariantSpec>,
}

impl VariantRenderer {
    pub fn new() -> Self {
        let registry = FeatureRegistry::new()
            .register(
                Feature::Eq,
                FeatureEmitter::new()
                    .member_decls(eq_member_decls)
                    .member_defs(eq_member_defs),
            )
            .register(
                Feature::Ord,
                FeatureEmitter::new()
                    .member_decls(ord_member_decls)
                    .member_defs(ord_member_defs),
            )
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
                    .source_include(IncludeSpec::system("sstream"))
                    .source_include(IncludeSpec::system("stdexcept"))
                    .decls(fmt_decls)
                    .defs(fmt_defs),
            );
        Self { registry }
    }
}

impl Default for VariantRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecRenderer for VariantRenderer {
    type Spec = VariantSpec;

    fn registry(&self) -> &FeatureRegistry<VariantSpec> {
        &self.registry
    }

    fn intrinsic_includes(&self, _spec: &VariantSpec) -> Vec<IncludeSpec> {
        ["cstddef", "stdexcept", "string", "type_traits", "variant"]
            .into_iter()
            .map(IncludeSpec::system)
            .collect()
    }

    fn render_type(&self, spec: &VariantSpec, b: &mut CodeBuilder) {
        let t = fresh_typevar(&spec.template_params, "T");
        b.struct_block(&spec.name, &spec.template_params, false, |b| {
            b.push_line(&format!("{}() = delete;", spec.name));
            for arm in &spec.values {
                b.function_decl(&constructor(spec, arm));
            }

            b.push_blank();
            b.template_prefix(std::slice::from_ref(&t), false);
            let members: Vec<String> = spec
                .values
                .iter()
                .map(|arm| format!("std::is_same_v<{t}, {}>", arm.ty))
                .collect();
            b.push_line(&format!(
                "static constexpr bool {} = {};",
                membership_trait(spec),
                members.join(" || ")
            ));

            b.push_blank();
            render_visit(spec, b, true);
            b.push_blank();
            render_visit(spec, b, false);

            b.push_blank();
            render_access(spec, b, &t);

            b.push_blank();
            b.function_def(
                &FunctionSpec::new("index").returns("size_t").const_(),
                |b| {
                    b.push_line("return this->raw_variant.index();");
                },
            );

            self.registry.emit_member_decls(spec, b);

            if spec.has_method_keys() {
                b.push_blank();
                for arm in &spec.values {
                    b.function_decl(&is_key(spec, arm));
                    b.function_decl(&require_key(spec, arm));
                }
            }

            b.push_blank();
            b.push_line(&format!("{} raw_variant;", raw_variant_type(spec)));
        });
    }

    fn has_member_defs(&self, _spec: &VariantSpec) -> bool {
        true
    }

    fn render_member_defs(&self, spec: &VariantSpec, b: &mut CodeBuilder) {
        b.line_sep(&spec.values, |b, arm| {
            common::member_def(spec, b, &constructor(spec, arm), |_| {});
        });
        if spec.has_method_keys() {
            for arm in &spec.values {
                b.push_blank();
                common::member_def(spec, b, &is_key(spec, arm), |b| {
                    b.push_line(&format!(
                        "return std::holds_alternative<{}>(this->raw_variant);",
                        arm.ty
                    ));
                });
                b.push_blank();
                common::member_def(spec, b, &require_key(spec, arm), |b| {
                    b.push_line(&format!("return std::get<{}>(this->raw_variant);", arm.ty));
                });
            }
        }
    }
}

fn membership_trait(spec: &VariantSpec) -> String {
    format!("IsPartOf{}_v", spec.name)
}

fn raw_variant_type(spec: &VariantSpec) -> String {
    let arms: Vec<&str> = spec.values.iter().map(|arm| arm.ty.as_str()).collect();
    format!("std::variant<{}>", arms.join(", "))
}

fn constructor(spec: &VariantSpec, arm: &VariantValueSpec) -> FunctionSpec {
    FunctionSpec::new(&spec.name)
        .scope(unqualified_typename(spec))
        .param(format!("{} const &", arm.ty), "v")
        .explicit(spec.explicit_constructors)
        .init("raw_variant", "v")
}

fn is_key(spec: &VariantSpec, arm: &VariantValueSpec) -> FunctionSpec {
    FunctionSpec::new(format!("is_{}", arm.key()))
        .scope(unqualified_typename(spec))
        .returns("bool")
        .const_()
}

fn require_key(spec: &VariantSpec, arm: &VariantValueSpec) -> FunctionSpec {
    FunctionSpec::new(format!("require_{}", arm.key()))
        .scope(unqualified_typename(spec))
        .returns(format!("{} const &", arm.ty))
        .const_()
}

/// Both `visit` overloads dispatch on the index, so visitors need not be
/// overloaded on every alternative at once.
fn render_visit(spec: &VariantSpec, b: &mut CodeBuilder, is_const: bool) {
    let return_type = fresh_typevar(&spec.template_params, "ReturnType");
    let visitor = fresh_typevar(&spec.template_params, "Visitor");
    let mut visit = FunctionSpec::new("visit")
        .template(&[&return_type, &visitor])
        .returns(&return_type)
        .param(format!("{visitor} &&"), "v");
    if is_const {
        visit = visit.const_();
    }
    let qualifier = if is_const { " const &" } else { " &" };

    b.function_def(&visit, |b| {
        if spec.is_generic() {
            if let Some((first, rest)) = spec.values.split_first() {
                for arm in rest {
                    b.push_line(&format!(
                        "static_assert(std::is_same_v<std::invoke_result_t<{visitor}, {}{qualifier}>, std::invoke_result_t<{visitor}, {}{qualifier}>>, {});",
                        first.ty,
                        arm.ty,
                        c_string_literal(&format!(
                            "{}::visit() requires the visitor to return the same type for every alternative",
                            spec.name
                        ))
                    ));
                }
            }
        }
        b.switch("this->index()", |b| {
            for (i, arm) in spec.values.iter().enumerate() {
                b.case(&i.to_string(), false, |b| {
                    b.push_line(&format!("return v(this->template get<{}>());", arm.ty));
                });
            }
            b.default_case(false, |b| {
                b.push_line(&throw_unknown_index("this->index()", &spec.name));
            });
        });
    });
}

/// `has<T>()` and both `get<T>()` overloads.
fn render_access(spec: &VariantSpec, b: &mut CodeBuilder, t: &str) {
    let check = |method: &str| {
        let arms: Vec<&str> = spec.values.iter().map(|arm| arm.ty.as_str()).collect();
        format!(
            "static_assert({}<{t}>, {});",
            membership_trait(spec),
            c_string_literal(&format!(
                "{}::{method}() expected one of [{}], received {t}",
                spec.name,
                arms.join(", ")
            ))
        )
    };

    let has = FunctionSpec::new("has").template(&[t]).returns("bool").const_();
    b.function_def(&has, |b| {
        b.push_line(&check("has"));
        b.push_line(&format!("return std::holds_alternative<{t}>(this->raw_variant);"));
    });

    for (return_type, is_const) in [(format!("{t} const &"), true), (format!("{t} &"), false)] {
        let mut get = FunctionSpec::new("get").template(&[t]).returns(return_type);
        if is_const {
            get = get.const_();
        }
        b.push_blank();
        b.function_def(&get, |b| {
            b.push_line(&check("get"));
            b.push_line(&format!("return std::get<{t}>(this->raw_variant);"));
        });
    }
}

fn comparison_decls(spec: &VariantSpec, b: &mut CodeBuilder, ops: &[&str]) {
    for op in ops {
        b.function_decl(&common::comparison_op(spec, op));
    }
}

fn comparison_defs(spec: &VariantSpec, b: &mut CodeBuilder, ops: &[&str]) {
    b.line_sep(ops, |b, op| {
        common::member_def(spec, b, &common::comparison_op(spec, op), |b| {
            b.push_line(&format!(
                "return this->raw_variant {op} other.raw_variant;"
            ));
        });
    });
}

fn eq_member_decls(spec: &VariantSpec, b: &mut CodeBuilder) {
    comparison_decls(spec, b, &EQ_OPS);
}

fn eq_member_defs(spec: &VariantSpec, b: &mut CodeBuilder) {
    comparison_defs(spec, b, &EQ_OPS);
}

fn ord_member_decls(spec: &VariantSpec, b: &mut CodeBuilder) {
    comparison_decls(spec, b, &ORD_OPS);
}

fn ord_member_defs(spec: &VariantSpec, b: &mut CodeBuilder) {
    comparison_defs(spec, b, &ORD_OPS);
}

fn const_ref(spec: &VariantSpec) -> String {
    format!("{} const &", qualified_typename(spec))
}

fn hash_decls(spec: &VariantSpec, b: &mut CodeBuilder) {
    common::hash_decls(spec, b, &const_ref(spec));
}

fn hash_defs(spec: &VariantSpec, b: &mut CodeBuilder) {
    common::hash_def(spec, b, &const_ref(spec), |b| {
        b.push_line("return std::hash<decltype(x.raw_variant)>{}(x.raw_variant);");
    });
}

fn json_decls(spec: &VariantSpec, b: &mut CodeBuilder) {
    common::json_decls(spec, b, &const_ref(spec));
}

fn json_defs(spec: &VariantSpec, b: &mut CodeBuilder) {
    let q = qualified_typename(spec);
    common::json_defs(
        spec,
        b,
        &const_ref(spec),
        |b| {
            b.push_line("std::string key = j.at(\"type\").template get<std::string>();");
            b.if_chain(
                &spec.values,
                |arm| format!("key == {}", c_string_literal(&arm.json_key)),
                |b, arm| {
                    b.push_line(&format!(
                        "return {q}{{j.at(\"value\").template get<{}>()}};",
                        arm.ty
                    ));
                },
                |b| {
                    b.push_line(&format!(
                        "throw std::runtime_error(\"Unknown type key \" + key + \" for type {}\");",
                        spec.name
                    ));
                },
            );
        },
        |b| {
            b.push_line(&format!(
                "j[\"__type\"] = {};",
                c_string_literal(&spec.name)
            ));
            b.switch("x.index()", |b| {
                for (i, arm) in spec.values.iter().enumerate() {
                    b.case(&i.to_string(), true, |b| {
                        b.push_line(&format!(
                            "j[\"type\"] = {};",
                            c_string_literal(&arm.json_key)
                        ));
                        b.push_line(&format!(
                            "j[\"value\"] = x.template get<{}>();",
                            arm.ty
                        ));
                    });
                }
                b.default_case(false, |b| {
                    b.push_line(&throw_unknown_index("x.index()", &spec.name));
                });
            });
        },
    );
}

fn rapidcheck_decls(spec: &VariantSpec, b: &mut CodeBuilder) {
    common::arbitrary_decls(spec, b);
}

fn rapidcheck_defs(spec: &VariantSpec, b: &mut CodeBuilder) {
    let q = qualified_typename(spec);
    let arms: Vec<String> = spec
        .values
        .iter()
        .map(|arm| format!("gen::construct<{q}>(gen::arbitrary<{}>())", arm.ty))
        .collect();
    common::arbitrary_def(spec, b, &format!("gen::oneOf({})", arms.join(", ")));
}

fn fmt_param(spec: &VariantSpec) -> String {
    format!("{} const &", unqualified_typename(spec))
}

fn fmt_decls(spec: &VariantSpec, b: &mut CodeBuilder) {
    common::fmt_decls(spec, b, &fmt_param(spec));
}

fn fmt_defs(spec: &VariantSpec, b: &mut CodeBuilder) {
    common::fmt_defs(spec, b, &fmt_param(spec), |b| {
        b.push_line("std::ostringstream oss;");
        b.switch("x.index()", |b| {
            for (i, arm) in spec.values.iter().enumerate() {
                b.case(&i.to_string(), true, |b| {
                    b.push_line(&format!(
                        "oss << {} << x.template get<{}>() << \">\";",
                        c_string_literal(&format!("<{} {}=", spec.name, arm.fmt_key)),
                        arm.ty
                    ));
                });
            }
            b.default_case(false, |b| {
                b.push_line(&throw_unknown_index("x.index()", &spec.name));
            });
        });
        b.push_line("return oss.str();");
    });
}
