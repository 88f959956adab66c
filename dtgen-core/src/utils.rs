//! Shared string utilities for code generation.

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn fold_identifier(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Fold to an identifier and upper-case it (e.g., "my-proj" -> "MY_PROJ").
pub fn to_guard_identifier(s: &str) -> String {
    fold_identifier(s).to_ascii_uppercase()
}

/// Quote a string as a C++ string literal.
pub fn c_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_fold_identifier() {
        assert_eq!(fold_identifier("lib/geo/point.dtg.h"), "lib_geo_point_dtg_h");
        assert_eq!(fold_identifier("already_ok_42"), "already_ok_42");
        assert_eq!(fold_identifier(""), "");
    }

    #[test]
    fn test_to_guard_identifier() {
        assert_eq!(to_guard_identifier("my-proj"), "MY_PROJ");
        assert_eq!(to_guard_identifier("_dtgen_a/b.h"), "_DTGEN_A_B_H");
    }

    #[test]
    fn test_c_string_literal() {
        assert_eq!(c_string_literal("x"), "\"x\"");
        assert_eq!(c_string_literal("a\"b"), "\"a\\\"b\"");
        assert_eq!(c_string_literal("a\\b"), "\"a\\\\b\"");
    }

    proptest! {
        #[test]
        fn guard_identifiers_only_use_guard_alphabet(s in "\\PC*") {
            let guard = to_guard_identifier(&s);
            prop_assert!(guard
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
            prop_assert_eq!(guard.chars().count(), s.chars().count());
        }
    }
}
