//! Emitters shared by every kind of spec.
//!
//! The hash, JSON, rapidcheck and fmt integrations specialize the same
//! library templates for structs, enums and variants; only the bodies differ.

use dtgen_codegen::builder::{CodeBuilder, FunctionSpec};
use dtgen_spec::TypeSpec;

use crate::naming::{qualified_typename, unqualified_typename};

/// Emit an out-of-line member definition, prefixed by the type's template
/// header when the type is generic.
pub(crate) fn member_def<S: TypeSpec + ?Sized>(
    spec: &S,
    b: &mut CodeBuilder,
    f: &FunctionSpec,
    body: impl FnOnce(&mut CodeBuilder),
) {
    b.template_prefix(spec.template_params(), false);
    b.function_def(f, body);
}

/// `bool operator<op>(T const &other) const`.
pub(crate) fn comparison_op<S: TypeSpec + ?Sized>(spec: &S, op: &str) -> FunctionSpec {
    let ty = unqualified_typename(spec);
    FunctionSpec::new(format!("operator{op}"))
        .scope(&ty)
        .returns("bool")
        .param(format!("{ty} const &"), "other")
        .const_()
}

/// `std::hash<T>::operator()`, taking the value as `param_ty`.
pub(crate) fn hash_operator<S: TypeSpec + ?Sized>(spec: &S, param_ty: &str) -> FunctionSpec {
    FunctionSpec::new("operator()")
        .scope(format!("hash<{}>", qualified_typename(spec)))
        .returns("size_t")
        .param(param_ty, "x")
        .const_()
}

/// Declare the `std::hash` specialization.
pub(crate) fn hash_decls<S: TypeSpec + ?Sized>(spec: &S, b: &mut CodeBuilder, param_ty: &str) {
    let f = hash_operator(spec, param_ty);
    b.namespace(Some("std"), |b| {
        b.struct_block(
            &format!("hash<{}>", qualified_typename(spec)),
            spec.template_params(),
            true,
            |b| {
                b.function_decl(&f);
            },
        );
    });
}

/// Define `std::hash<T>::operator()` with the given body.
pub(crate) fn hash_def<S: TypeSpec + ?Sized>(
    spec: &S,
    b: &mut CodeBuilder,
    param_ty: &str,
    body: impl FnOnce(&mut CodeBuilder),
) {
    let f = hash_operator(spec, param_ty);
    b.namespace(Some("std"), |b| member_def(spec, b, &f, body));
}

/// `adl_serializer<T>::from_json` and `adl_serializer<T>::to_json`.
pub(crate) fn json_functions<S: TypeSpec + ?Sized>(
    spec: &S,
    param_ty: &str,
) -> (FunctionSpec, FunctionSpec) {
    let q = qualified_typename(spec);
    let scope = format!("adl_serializer<{q}>");
    let from_json = FunctionSpec::new("from_json")
        .scope(&scope)
        .returns(&q)
        .param("json const &", "j")
        .static_();
    let to_json = FunctionSpec::new("to_json")
        .scope(&scope)
        .returns("void")
        .param("json &", "j")
        .param(param_ty, "x")
        .static_();
    (from_json, to_json)
}

/// Declare the `nlohmann::adl_serializer` specialization.
pub(crate) fn json_decls<S: TypeSpec + ?Sized>(spec: &S, b: &mut CodeBuilder, param_ty: &str) {
    let (from_json, to_json) = json_functions(spec, param_ty);
    b.namespace(Some("nlohmann"), |b| {
        b.struct_block(
            &format!("adl_serializer<{}>", qualified_typename(spec)),
            spec.template_params(),
            true,
            |b| {
                b.function_decl(&from_json);
                b.function_decl(&to_json);
            },
        );
    });
}

/// Define both serializer functions with the given bodies.
pub(crate) fn json_defs<S: TypeSpec + ?Sized>(
    spec: &S,
    b: &mut CodeBuilder,
    param_ty: &str,
    from_body: impl FnOnce(&mut CodeBuilder),
    to_body: impl FnOnce(&mut CodeBuilder),
) {
    let (from_json, to_json) = json_functions(spec, param_ty);
    b.namespace(Some("nlohmann"), |b| {
        member_def(spec, b, &from_json, from_body);
        b.push_blank();
        member_def(spec, b, &to_json, to_body);
    });
}

/// `rc::Arbitrary<T>::arbitrary`.
fn arbitrary_function<S: TypeSpec + ?Sized>(spec: &S) -> FunctionSpec {
    let q = qualified_typename(spec);
    FunctionSpec::new("arbitrary")
        .scope(format!("Arbitrary<{q}>"))
        .returns(format!("Gen<{q}>"))
        .static_()
}

/// Declare the `rc::Arbitrary` specialization.
pub(crate) fn arbitrary_decls<S: TypeSpec + ?Sized>(spec: &S, b: &mut CodeBuilder) {
    let f = arbitrary_function(spec);
    b.namespace(Some("rc"), |b| {
        b.struct_block(
            &format!("Arbitrary<{}>", qualified_typename(spec)),
            spec.template_params(),
            true,
            |b| {
                b.function_decl(&f);
            },
        );
    });
}

/// Define `rc::Arbitrary<T>::arbitrary` returning `generator`.
pub(crate) fn arbitrary_def<S: TypeSpec + ?Sized>(spec: &S, b: &mut CodeBuilder, generator: &str) {
    let f = arbitrary_function(spec);
    b.namespace(Some("rc"), |b| {
        member_def(spec, b, &f, |b| {
            b.push_line(&format!("return {generator};"));
        });
    });
}

/// `format_as` and `operator<<`, found by ADL in the spec's namespace.
fn fmt_functions<S: TypeSpec + ?Sized>(spec: &S, param_ty: &str) -> (FunctionSpec, FunctionSpec) {
    let format_as = FunctionSpec::new("format_as")
        .template(spec.template_params())
        .returns("std::string")
        .param(param_ty, "x");
    let stream = FunctionSpec::new("operator<<")
        .template(spec.template_params())
        .returns("std::ostream &")
        .param("std::ostream &", "s")
        .param(param_ty, "x");
    (format_as, stream)
}

pub(crate) fn fmt_decls<S: TypeSpec + ?Sized>(spec: &S, b: &mut CodeBuilder, param_ty: &str) {
    let (format_as, stream) = fmt_functions(spec, param_ty);
    b.namespace(spec.namespace(), |b| {
        b.function_decl(&format_as);
        b.function_decl(&stream);
    });
}

/// Define `format_as` with the given body; `operator<<` defers to it.
pub(crate) fn fmt_defs<S: TypeSpec + ?Sized>(
    spec: &S,
    b: &mut CodeBuilder,
    param_ty: &str,
    body: impl FnOnce(&mut CodeBuilder),
) {
    let (format_as, stream) = fmt_functions(spec, param_ty);
    b.namespace(spec.namespace(), |b| {
        b.function_def(&format_as, body);
        b.push_blank();
        b.function_def(&stream, |b| {
            b.push_line("return s << fmt::to_string(x);");
        });
    });
}
