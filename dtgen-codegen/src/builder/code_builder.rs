//! Scope-safe builder for emitting C++ source text.

use std::ops::{Deref, DerefMut};

use super::Indent;

/// Fluent API for building indented C++ code.
///
/// Every paired primitive (`braces`, `namespace`, `switch`, ...) takes the
/// body as a closure and writes its closing token from a drop guard, so the
/// close is emitted exactly once however the body exits, including an early
/// `?` return inside the closure or a panic.
///
/// # Example
///
/// ```
/// use dtgen_codegen::builder::CodeBuilder;
///
/// let mut b = CodeBuilder::cpp();
/// b.namespace(Some("geo"), |b| {
///     b.block("int answer()", |b| {
///         b.push_line("return 42;");
///     });
/// });
///
/// assert_eq!(
///     b.build(),
///     "namespace geo {\nint answer() {\n  return 42;\n}\n} // namespace geo\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
    at_line_start: bool,
}

/// How a scope is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeStyle {
    /// Close immediately after the body, on the same line.
    Inline,
    /// Body is indented; close on its own line at the outer level.
    Indented,
    /// Body is not indented; close on its own line.
    Lines,
}

/// Drop guard writing the closing token of a scope.
struct Scope<'a> {
    builder: &'a mut CodeBuilder,
    close: String,
    style: ScopeStyle,
}

impl Deref for Scope<'_> {
    type Target = CodeBuilder;

    fn deref(&self) -> &CodeBuilder {
        self.builder
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut CodeBuilder {
        self.builder
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        match self.style {
            ScopeStyle::Inline => {}
            ScopeStyle::Indented => {
                self.builder.ensure_line_start();
                self.builder.push_dedent();
            }
            ScopeStyle::Lines => {
                self.builder.ensure_line_start();
            }
        }
        self.builder.push_raw(&self.close);
    }
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
            at_line_start: true,
        }
    }

    /// Create a new CodeBuilder with 2-space indentation.
    pub fn cpp() -> Self {
        Self::new(Indent::CPP)
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Add raw text, indenting each line that it starts.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        for (i, part) in s.split('\n').enumerate() {
            if i > 0 {
                self.buffer.push('\n');
                self.at_line_start = true;
            }
            if !part.is_empty() {
                if self.at_line_start {
                    self.write_indent();
                    self.at_line_start = false;
                }
                self.buffer.push_str(part);
            }
        }
        self
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.push_raw(s);
        self.end_line()
    }

    /// Terminate the current line.
    pub fn end_line(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self.at_line_start = true;
        self
    }

    /// Add a blank line, finishing the current line first if needed.
    pub fn push_blank(&mut self) -> &mut Self {
        self.ensure_line_start();
        self.end_line()
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a `/** ... */` doc comment, one ` * ` line per line of `text`.
    pub fn doc_comment(&mut self, text: &str) -> &mut Self {
        self.ensure_line_start();
        self.push_line("/**");
        // A stray `*/` would end the comment early.
        let text = text.replace("*/", "* /");
        for line in text.trim_end().lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {line}"));
            }
        }
        self.push_line(" */")
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    fn scoped<R>(
        &mut self,
        open: &str,
        close: impl Into<String>,
        style: ScopeStyle,
        f: impl FnOnce(&mut CodeBuilder) -> R,
    ) -> R {
        if style == ScopeStyle::Lines {
            self.ensure_line_start();
        }
        self.push_raw(open);
        if style == ScopeStyle::Indented {
            self.ensure_line_start();
            self.push_indent();
        }
        let mut scope = Scope {
            builder: self,
            close: close.into(),
            style,
        };
        f(&mut *scope)
    }

    /// Emit `body;` and end the line.
    pub fn semicolon<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped("", ";\n", ScopeStyle::Inline, f)
    }

    /// Emit the body followed by a blank line.
    pub fn nl_block<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped("", "\n", ScopeStyle::Lines, f)
    }

    /// Emit `{`, the indented body, then `}`; the cursor stays after the `}`.
    pub fn braces<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let open = if self.at_line_start { "{" } else { " {" };
        self.scoped(open, "}", ScopeStyle::Indented, f)
    }

    /// Emit `(body)` inline.
    pub fn parens<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped("(", ")", ScopeStyle::Inline, f)
    }

    /// Emit `<body>` inline.
    pub fn angles<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped("<", ">", ScopeStyle::Inline, f)
    }

    /// Add `header {`, the indented body and a closing `}` line.
    pub fn block<R>(&mut self, header: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.block_with_close(header, "}", f)
    }

    /// Add `header {`, the indented body and a custom closing line.
    pub fn block_with_close<R>(
        &mut self,
        header: &str,
        close: &str,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.scoped(
            &format!("{header} {{"),
            format!("{close}\n"),
            ScopeStyle::Indented,
            f,
        )
    }

    /// Wrap the body in `namespace ns { ... }`, or emit it bare when `ns` is `None`.
    pub fn namespace<R>(&mut self, ns: Option<&str>, f: impl FnOnce(&mut Self) -> R) -> R {
        match ns {
            Some(ns) => self.scoped(
                &format!("namespace {ns} {{\n"),
                format!("}} // namespace {ns}\n"),
                ScopeStyle::Lines,
                f,
            ),
            None => f(self),
        }
    }

    /// Emit a `template <...>` line.
    ///
    /// Nothing is written for an empty parameter list unless `force` is set,
    /// in which case `template <>` introduces an explicit specialization.
    pub fn template_prefix(&mut self, params: &[String], force: bool) -> &mut Self {
        if params.is_empty() && !force {
            return self;
        }
        let params: Vec<String> = params.iter().map(|p| format!("typename {p}")).collect();
        self.push_line(&format!("template <{}>", params.join(", ")))
    }

    /// Emit `struct name { ... };`, optionally prefixed by a template header.
    pub fn struct_block<R>(
        &mut self,
        name: &str,
        template_params: &[String],
        specialization: bool,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.template_prefix(template_params, specialization);
        self.block_with_close(&format!("struct {name}"), "};", f)
    }

    /// Emit `if (cond) { then } else { otherwise }`.
    pub fn if_else(
        &mut self,
        cond: &str,
        then: impl FnOnce(&mut Self),
        otherwise: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.push_raw(&format!("if ({cond})"));
        self.braces(then);
        self.push_raw(" else");
        self.braces(otherwise);
        self.end_line()
    }

    /// Emit an `if` / `else if` chain with one branch per item and a final `else`.
    pub fn if_chain<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        cond: impl Fn(&T) -> String,
        mut then: impl FnMut(&mut Self, T),
        otherwise: impl FnOnce(&mut Self),
    ) -> &mut Self {
        let mut first = true;
        for item in items {
            let keyword = if first { "if" } else { " else if" };
            self.push_raw(&format!("{keyword} ({})", cond(&item)));
            self.braces(|b| then(b, item));
            first = false;
        }
        if !first {
            self.push_raw(" else");
        }
        self.braces(otherwise);
        self.end_line()
    }

    /// Emit `switch (expr) { ... }`.
    pub fn switch<R>(&mut self, expr: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.block(&format!("switch ({expr})"), f)
    }

    /// Emit a braced `case label:` arm, optionally terminated by `break;`.
    pub fn case<R>(
        &mut self,
        label: &str,
        include_break: bool,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.block(&format!("case {label}:"), |b| {
            let result = f(b);
            if include_break {
                b.push_line("break;");
            }
            result
        })
    }

    /// Emit a braced `default:` arm, optionally terminated by `break;`.
    pub fn default_case<R>(&mut self, include_break: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        self.block("default:", |b| {
            let result = f(b);
            if include_break {
                b.push_line("break;");
            }
            result
        })
    }

    // =========================================================================
    // Joiners
    // =========================================================================

    /// Emit each item with `sep` between consecutive items.
    pub fn join<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        sep: &str,
        mut f: impl FnMut(&mut Self, T),
    ) -> &mut Self {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.push_raw(sep);
            }
            f(self, item);
        }
        self
    }

    /// Join items with `, ` (argument and initializer lists).
    pub fn comma_sep<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        f: impl FnMut(&mut Self, T),
    ) -> &mut Self {
        self.join(items, ", ", f)
    }

    /// Join items with `;` and a newline (statement and field lists).
    pub fn stmt_sep<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        f: impl FnMut(&mut Self, T),
    ) -> &mut Self {
        self.join(items, ";\n", f)
    }

    /// Join items with newlines.
    pub fn line_sep<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        f: impl FnMut(&mut Self, T),
    ) -> &mut Self {
        self.join(items, "\n", f)
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Whether nothing has been emitted yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn ensure_line_start(&mut self) {
        if !self.at_line_start {
            self.end_line();
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::cpp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut b = CodeBuilder::cpp();
        b.push_line("int x = 1;");
        assert_eq!(b.build(), "int x = 1;\n");
    }

    #[test]
    fn test_raw_indents_every_started_line() {
        let mut b = CodeBuilder::cpp();
        b.push_indent().push_raw("A,\nB").end_line();
        assert_eq!(b.build(), "  A,\n  B\n");
    }

    #[test]
    fn test_semicolon_after_braces() {
        let mut b = CodeBuilder::cpp();
        b.semicolon(|b| {
            b.push_raw("enum class Color");
            b.braces(|b| {
                b.push_line("RED");
            });
        });
        assert_eq!(b.build(), "enum class Color {\n  RED\n};\n");
    }

    #[test]
    fn test_namespace_absent_is_noop() {
        let mut with = CodeBuilder::cpp();
        with.namespace(Some("geo"), |b| {
            b.push_line("struct Point;");
        });
        assert_eq!(
            with.build(),
            "namespace geo {\nstruct Point;\n} // namespace geo\n"
        );

        let mut without = CodeBuilder::cpp();
        without.namespace(None, |b| {
            b.push_line("struct Point;");
        });
        assert_eq!(without.build(), "struct Point;\n");
    }

    #[test]
    fn test_struct_block_specialization() {
        let mut b = CodeBuilder::cpp();
        b.namespace(Some("std"), |b| {
            b.struct_block("hash<::geo::Point>", &[], true, |b| {
                b.push_line("size_t operator()(::geo::Point const &) const;");
            });
        });
        assert_eq!(
            b.build(),
            "namespace std {\ntemplate <>\nstruct hash<::geo::Point> {\n  size_t operator()(::geo::Point const &) const;\n};\n} // namespace std\n"
        );
    }

    #[test]
    fn test_struct_block_template() {
        let mut b = CodeBuilder::cpp();
        b.struct_block("Pair", &["A".to_string(), "B".to_string()], false, |b| {
            b.push_line("A first;");
        });
        assert_eq!(
            b.build(),
            "template <typename A, typename B>\nstruct Pair {\n  A first;\n};\n"
        );
    }

    #[test]
    fn test_plain_struct_has_no_template_line() {
        let mut b = CodeBuilder::cpp();
        b.struct_block("Point", &[], false, |_| {});
        assert_eq!(b.build(), "struct Point {\n};\n");
    }

    #[test]
    fn test_switch_with_cases() {
        let mut b = CodeBuilder::cpp();
        b.switch("x.index()", |b| {
            b.case("0", true, |b| {
                b.push_line("j = 0;");
            });
            b.default_case(false, |b| {
                b.push_line("throw std::runtime_error(\"bad\");");
            });
        });
        assert_eq!(
            b.build(),
            "switch (x.index()) {\n  case 0: {\n    j = 0;\n    break;\n  }\n  default: {\n    throw std::runtime_error(\"bad\");\n  }\n}\n"
        );
    }

    #[test]
    fn test_if_chain() {
        let mut b = CodeBuilder::cpp();
        b.if_chain(
            ["RED", "GREEN"],
            |v| format!("s == \"{v}\""),
            |b, v| {
                b.push_line(&format!("return Color::{v};"));
            },
            |b| {
                b.push_line("throw 1;");
            },
        );
        assert_eq!(
            b.build(),
            "if (s == \"RED\") {\n  return Color::RED;\n} else if (s == \"GREEN\") {\n  return Color::GREEN;\n} else {\n  throw 1;\n}\n"
        );
    }

    #[test]
    fn test_if_else() {
        let mut b = CodeBuilder::cpp();
        b.if_else(
            "ok",
            |b| {
                b.push_line("a();");
            },
            |b| {
                b.push_line("c();");
            },
        );
        assert_eq!(b.build(), "if (ok) {\n  a();\n} else {\n  c();\n}\n");
    }

    #[test]
    fn test_parens_angles_and_joiners() {
        let mut b = CodeBuilder::cpp();
        b.push_raw("std::tie");
        b.parens(|b| {
            b.comma_sep(["this->x", "this->y"], |b, f| {
                b.push_raw(f);
            });
        });
        b.push_raw(" ");
        b.push_raw("std::variant");
        b.angles(|b| {
            b.comma_sep(["A", "B"], |b, t| {
                b.push_raw(t);
            });
        });
        b.end_line();
        b.stmt_sep(["int x", "int y"], |b, f| {
            b.push_raw(f);
        });
        b.push_raw(";").end_line();
        b.line_sep(["// a", "// b"], |b, c| {
            b.push_raw(c);
        });
        assert_eq!(
            b.build(),
            "std::tie(this->x, this->y) std::variant<A, B>\nint x;\nint y;\n// a\n// b"
        );
    }

    #[test]
    fn test_nl_block_adds_blank_line() {
        let mut b = CodeBuilder::cpp();
        b.nl_block(|b| {
            b.push_raw("#include <tuple>");
        });
        b.push_line("int x;");
        assert_eq!(b.build(), "#include <tuple>\n\nint x;\n");
    }

    #[test]
    fn test_doc_comment() {
        let mut b = CodeBuilder::cpp();
        b.doc_comment("hello\n\nworld\n");
        assert_eq!(b.build(), "/**\n * hello\n *\n * world\n */\n");
    }

    #[test]
    fn test_doc_comment_cannot_close_early() {
        let mut b = CodeBuilder::cpp();
        b.doc_comment("matches /* and */ literally");
        assert_eq!(b.build(), "/**\n * matches /* and * / literally\n */\n");
    }

    #[test]
    fn test_close_written_when_body_returns_early() {
        fn body(b: &mut CodeBuilder) -> Result<(), String> {
            b.push_line("int a;");
            Err::<(), _>("stop".to_string())?;
            b.push_line("int unreachable;");
            Ok(())
        }

        let mut b = CodeBuilder::cpp();
        let result = b.namespace(Some("geo"), |b| b.block("struct A", body));
        assert!(result.is_err());
        assert_eq!(
            b.build(),
            "namespace geo {\nstruct A {\n  int a;\n}\n} // namespace geo\n"
        );
    }

    #[test]
    fn test_close_written_when_body_panics() {
        let mut b = CodeBuilder::cpp();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            b.block("int f()", |b| {
                b.push_line("return 1;");
                panic!("renderer bug");
            })
        }));
        assert!(outcome.is_err());
        assert_eq!(b.as_str(), "int f() {\n  return 1;\n}\n");
        assert_eq!(b.current_indent(), 0);
    }
}
