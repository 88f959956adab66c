//! Structs: a product type with an explicit constructor over every field.
//!
//! Indirect fields are stored behind a `std::shared_ptr` so the struct may
//! contain itself, and are read through a `get_<field>()` accessor.

use dtgen_codegen::{
    FeatureEmitter, FeatureRegistry, SpecRenderer,
    builder::{CodeBuilder, FunctionSpec, ParamSpec},
};
use dtgen_core::c_string_literal;
use dtgen_spec::{Feature, FieldSpec, IncludeSpec, StructSpec};

use crate::{
    common,
    naming::{qualified_typename, unqualified_typename},
};

const EQ_OPS: [&str; 2] = ["==", "!="];
const ORD_OPS: [&str; 4] = ["<", ">", "<=", ">="];

pub struct StructRenderer {
    registry: FeatureRegistry<StructSpec>,
}

impl StructRenderer {
    pub fn new() -> Self {
        let registry = FeatureRegistry::new()
            .register(
                Feature::Eq,
                FeatureEmitter::new()
                    .header_include(IncludeSpec::system("tuple"))
                    .member_decls(eq_member_decls)
                    .member_defs(eq_member_defs),
            )
            .register(
                Feature::Ord,
                FeatureEmitter::new()
                    .header_include(IncludeSpec::system("tuple"))
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
                    .decls(fmt_decls)
                    .defs(fmt_defs),
            );
        Self { registry }
    }
}

impl Default for StructRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecRenderer for StructRenderer {
    type Spec = StructSpec;

    fn registry(&self) -> &FeatureRegistry<StructSpec> {
        &self.registry
    }

    fn intrinsic_includes(&self, spec: &StructSpec) -> Vec<IncludeSpec> {
        if spec.has_indirect_fields() {
            vec![IncludeSpec::system("memory")]
        } else {
            Vec::new()
        }
    }

    fn render_type(&self, spec: &StructSpec, b: &mut CodeBuilder) {
        b.struct_block(&spec.name, &spec.template_params, false, |b| {
            if !spec.fields.is_empty() {
                b.push_line(&format!("{}() = delete;", spec.name));
                b.function_decl(&constructor(spec));
            }

            self.registry.emit_member_decls(spec, b);

            if !spec.fields.is_empty() {
                b.push_blank();
            }
            for field in &spec.fields {
                if let Some(doc) = &field.docstring {
                    b.doc_comment(doc);
                }
                if field.indirect {
                    b.function_decl(&accessor(spec, field));
                } else {
                    b.push_line(&format!("{} {};", field.ty, field.name));
                }
            }

            if spec.has_indirect_fields() {
                b.push_blank();
                b.push_dedent();
                b.push_line("private:");
                b.push_indent();
                for field in spec.fields.iter().filter(|f| f.indirect) {
                    b.push_line(&format!("std::shared_ptr<{}> {};", field.ty, field.name));
                }
            }
        });
    }

    fn has_member_defs(&self, spec: &StructSpec) -> bool {
        !spec.fields.is_empty()
    }

    fn render_member_defs(&self, spec: &StructSpec, b: &mut CodeBuilder) {
        common::member_def(spec, b, &constructor(spec), |_| {});
        for field in spec.fields.iter().filter(|f| f.indirect) {
            b.push_blank();
            common::member_def(spec, b, &accessor(spec, field), |b| {
                b.push_line(&format!("return *this->{};", field.name));
            });
        }
    }
}

fn constructor(spec: &StructSpec) -> FunctionSpec {
    let mut ctor = FunctionSpec::new(&spec.name)
        .scope(unqualified_typename(spec))
        .explicit(true)
        .params(
            spec.fields
                .iter()
                .map(|f| ParamSpec::new(format!("{} const &", f.ty), &f.name)),
        );
    for field in &spec.fields {
        let value = if field.indirect {
            format!("std::make_shared<{}>({})", field.ty, field.name)
        } else {
            field.name.clone()
        };
        ctor = ctor.init(&field.name, value);
    }
    ctor
}

fn accessor(spec: &StructSpec, field: &FieldSpec) -> FunctionSpec {
    FunctionSpec::new(format!("get_{}", field.name))
        .scope(unqualified_typename(spec))
        .returns(format!("{} const &", field.ty))
        .const_()
}

/// Read a field through `prefix` (`this->`, `other.`, ...).
fn field_access(prefix: &str, field: &FieldSpec) -> String {
    if field.indirect {
        format!("{prefix}get_{}()", field.name)
    } else {
        format!("{prefix}{}", field.name)
    }
}

fn tie(spec: &StructSpec, prefix: &str) -> String {
    let fields: Vec<String> = spec.fields.iter().map(|f| field_access(prefix, f)).collect();
    format!("std::tie({})", fields.join(", "))
}

fn comparison_decls(spec: &StructSpec, b: &mut CodeBuilder, ops: &[&str]) {
    for op in ops {
        b.function_decl(&common::comparison_op(spec, op));
    }
}

fn comparison_defs(spec: &StructSpec, b: &mut CodeBuilder, ops: &[&str]) {
    let lhs = tie(spec, "this->");
    let rhs = tie(spec, "other.");
    b.line_sep(ops, |b, op| {
        common::member_def(spec, b, &common::comparison_op(spec, op), |b| {
            b.push_line(&format!("return {lhs} {op} {rhs};"));
        });
    });
}

fn eq_member_decls(spec: &StructSpec, b: &mut CodeBuilder) {
    comparison_decls(spec, b, &EQ_OPS);
}

fn eq_member_defs(spec: &StructSpec, b: &mut CodeBuilder) {
    comparison_defs(spec, b, &EQ_OPS);
}

fn ord_member_decls(spec: &StructSpec, b: &mut CodeBuilder) {
    comparison_decls(spec, b, &ORD_OPS);
}

fn ord_member_defs(spec: &StructSpec, b: &mut CodeBuilder) {
    comparison_defs(spec, b, &ORD_OPS);
}

fn const_ref(spec: &StructSpec) -> String {
    format!("{} const &", qualified_typename(spec))
}

fn hash_decls(spec: &StructSpec, b: &mut CodeBuilder) {
    common::hash_decls(spec, b, &const_ref(spec));
}

fn hash_defs(spec: &StructSpec, b: &mut CodeBuilder) {
    common::hash_def(spec, b, &const_ref(spec), |b| {
        b.push_line("size_t result = 0;");
        for field in &spec.fields {
            b.push_line(&format!(
                "result ^= std::hash<{}>{{}}({}) + 0x9e3779b9 + (result << 6) + (result >> 2);",
                field.ty,
                field_access("x.", field)
            ));
        }
        b.push_line("return result;");
    });
}

fn json_decls(spec: &StructSpec, b: &mut CodeBuilder) {
    common::json_decls(spec, b, &const_ref(spec));
}

fn json_defs(spec: &StructSpec, b: &mut CodeBuilder) {
    let q = qualified_typename(spec);
    common::json_defs(
        spec,
        b,
        &const_ref(spec),
        |b| {
            let args: Vec<String> = spec
                .fields
                .iter()
                .map(|f| {
                    format!(
                        "j.at({}).template get<{}>()",
                        c_string_literal(&f.json_key),
                        f.ty
                    )
                })
                .collect();
            b.push_line(&format!("return {q}{{{}}};", args.join(", ")));
        },
        |b| {
            b.push_line(&format!(
                "j[\"__type\"] = {};",
                c_string_literal(&spec.name)
            ));
            for field in &spec.fields {
                b.push_line(&format!(
                    "j[{}] = {};",
                    c_string_literal(&field.json_key),
                    field_access("x.", field)
                ));
            }
        },
    );
}

fn rapidcheck_decls(spec: &StructSpec, b: &mut CodeBuilder) {
    common::arbitrary_decls(spec, b);
}

fn rapidcheck_defs(spec: &StructSpec, b: &mut CodeBuilder) {
    let args: Vec<String> = spec
        .fields
        .iter()
        .map(|f| format!("gen::arbitrary<{}>()", f.ty))
        .collect();
    common::arbitrary_def(
        spec,
        b,
        &format!(
            "gen::construct<{}>({})",
            qualified_typename(spec),
            args.join(", ")
        ),
    );
}

fn fmt_param(spec: &StructSpec) -> String {
    format!("{} const &", unqualified_typename(spec))
}

fn fmt_decls(spec: &StructSpec, b: &mut CodeBuilder) {
    common::fmt_decls(spec, b, &fmt_param(spec));
}

fn fmt_defs(spec: &StructSpec, b: &mut CodeBuilder) {
    common::fmt_defs(spec, b, &fmt_param(spec), |b| {
        b.push_line("std::ostringstream oss;");
        b.push_line(&format!("oss << \"<{}\";", spec.name));
        for field in &spec.fields {
            b.push_line(&format!(
                "oss << \" {}=\" << {};",
                field.name,
                field_access("x.", field)
            ));
        }
        b.push_line("oss << \">\";");
        b.push_line("return oss.str();");
    });
}
