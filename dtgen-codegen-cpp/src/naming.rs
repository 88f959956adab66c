//! C++ naming helpers.

use dtgen_spec::TypeSpec;

/// Template argument list (`<A, B>`), empty for non-generic types.
pub fn template_args(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.join(", "))
    }
}

/// Type name as written inside its own namespace (`Pair<A, B>`).
pub fn unqualified_typename<S: TypeSpec + ?Sized>(spec: &S) -> String {
    format!("{}{}", spec.name(), template_args(spec.template_params()))
}

/// Fully qualified type name (`::geo::Pair<A, B>`), usable from any namespace.
pub fn qualified_typename<S: TypeSpec + ?Sized>(spec: &S) -> String {
    match spec.namespace() {
        Some(ns) => format!("::{ns}::{}", unqualified_typename(spec)),
        None => format!("::{}", unqualified_typename(spec)),
    }
}

/// A type variable named `prefix` that does not collide with `params`,
/// falling back to `prefix0`, `prefix1`, ...
pub fn fresh_typevar(params: &[String], prefix: &str) -> String {
    if !params.iter().any(|p| p == prefix) {
        return prefix.to_string();
    }
    let mut i = 0usize;
    loop {
        let candidate = format!("{prefix}{i}");
        if !params.contains(&candidate) {
            return candidate;
        }
        i += 1;
    }
}

/// `throw` statement for an unrecognized variant index.
pub(crate) fn throw_unknown_index(index_expr: &str, type_name: &str) -> String {
    format!(
        "throw std::runtime_error(\"Unknown index \" + std::to_string({index_expr}) + \" for type {type_name}\");"
    )
}

#[cfg(test)]
mod tests {
    use dtgen_spec::StructSpec;

    use super::*;

    fn params(ps: &[&str]) -> Vec<String> {
        ps.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_typenames() {
        let spec: StructSpec = "namespace = \"geo\"\nname = \"Pair\"\ntemplate_params = [\"L\", \"R\"]\nfeatures = []\nfields = []\n"
            .parse()
            .unwrap();
        assert_eq!(unqualified_typename(&spec), "Pair<L, R>");
        assert_eq!(qualified_typename(&spec), "::geo::Pair<L, R>");

        let global: StructSpec = "name = \"Point\"\nfeatures = []\nfields = []\n"
            .parse()
            .unwrap();
        assert_eq!(unqualified_typename(&global), "Point");
        assert_eq!(qualified_typename(&global), "::Point");
    }

    #[test]
    fn test_fresh_typevar() {
        assert_eq!(fresh_typevar(&[], "T"), "T");
        assert_eq!(fresh_typevar(&params(&["A", "B"]), "T"), "T");
        assert_eq!(fresh_typevar(&params(&["T"]), "T"), "T0");
        assert_eq!(fresh_typevar(&params(&["T", "T0", "T1"]), "T"), "T2");
        assert_eq!(fresh_typevar(&params(&["Visitor"]), "Visitor"), "Visitor0");
    }
}
