//! Function declarations and definitions.

use super::CodeBuilder;

/// A declarative specification for a C++ function or member function.
///
/// The same spec renders both the declaration (inside the class) and the
/// out-of-line definition (qualified by [`FunctionSpec::scope`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSpec {
    /// Function name (`operator==`, `format_as`, or the class name for constructors).
    pub name: String,
    /// Qualifier used by out-of-line definitions (e.g. `Point` or `hash<::geo::Point>`).
    pub scope: Option<String>,
    /// Return type; `None` for constructors.
    pub return_type: Option<String>,
    pub params: Vec<ParamSpec>,
    /// Template parameters of the function itself.
    pub template_params: Vec<String>,
    pub is_static: bool,
    pub is_explicit: bool,
    pub is_const: bool,
    /// Member initializers, as `(member, expression)` pairs.
    pub initializers: Vec<(String, String)>,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub ty: String,
    /// Empty for unnamed parameters in declarations.
    pub name: String,
}

impl ParamSpec {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }

    fn render(&self) -> String {
        if self.name.is_empty() {
            self.ty.clone()
        } else {
            attach(&self.ty, &self.name)
        }
    }
}

impl FunctionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the qualifier used by out-of-line definitions.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set return type.
    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a parameter.
    pub fn param(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::new(ty, name));
        self
    }

    /// Add multiple parameters.
    pub fn params(mut self, params: impl IntoIterator<Item = ParamSpec>) -> Self {
        self.params.extend(params);
        self
    }

    /// Make this a function template.
    pub fn template<P: AsRef<str>>(mut self, params: &[P]) -> Self {
        self.template_params = params.iter().map(|p| p.as_ref().to_string()).collect();
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark as `explicit` when `explicit` is true.
    pub fn explicit(mut self, explicit: bool) -> Self {
        self.is_explicit = explicit;
        self
    }

    pub fn const_(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// Add a member initializer.
    pub fn init(mut self, member: impl Into<String>, expr: impl Into<String>) -> Self {
        self.initializers.push((member.into(), expr.into()));
        self
    }

    fn signature(&self, definition: bool) -> String {
        let out_of_line = definition && self.scope.is_some();
        let mut sig = String::new();
        if !out_of_line {
            if self.is_static {
                sig.push_str("static ");
            }
            if self.is_explicit {
                sig.push_str("explicit ");
            }
        }
        let name = match (&self.scope, definition) {
            (Some(scope), true) => format!("{scope}::{}", self.name),
            _ => self.name.clone(),
        };
        match &self.return_type {
            Some(ty) => sig.push_str(&attach(ty, &name)),
            None => sig.push_str(&name),
        }
        let params: Vec<String> = self.params.iter().map(ParamSpec::render).collect();
        sig.push('(');
        sig.push_str(&params.join(", "));
        sig.push(')');
        if self.is_const {
            sig.push_str(" const");
        }
        sig
    }
}

/// Join a type and a name, omitting the space after `&` and `*`.
fn attach(ty: &str, name: &str) -> String {
    if ty.ends_with('&') || ty.ends_with('*') {
        format!("{ty}{name}")
    } else {
        format!("{ty} {name}")
    }
}

impl CodeBuilder {
    /// Emit a function declaration.
    pub fn function_decl(&mut self, f: &FunctionSpec) -> &mut Self {
        self.template_prefix(&f.template_params, false);
        let sig = f.signature(false);
        self.semicolon(|b| {
            b.push_raw(&sig);
        });
        self
    }

    /// Emit a function definition with the given body.
    ///
    /// Out-of-line definitions (those with a scope) drop `static` and `explicit`.
    pub fn function_def<R>(&mut self, f: &FunctionSpec, body: impl FnOnce(&mut Self) -> R) -> R {
        self.template_prefix(&f.template_params, false);
        let mut header = f.signature(true);
        if !f.initializers.is_empty() {
            let inits: Vec<String> = f
                .initializers
                .iter()
                .map(|(member, expr)| format!("{member}({expr})"))
                .collect();
            header.push_str(" : ");
            header.push_str(&inits.join(", "));
        }
        self.block(&header, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut CodeBuilder)) -> String {
        let mut b = CodeBuilder::cpp();
        f(&mut b);
        b.build()
    }

    #[test]
    fn test_operator_decl_omits_names() {
        let op = FunctionSpec::new("operator==")
            .returns("bool")
            .param("Point const &", "")
            .const_();
        let code = render(|b| {
            b.function_decl(&op);
        });
        assert_eq!(code, "bool operator==(Point const &) const;\n");
    }

    #[test]
    fn test_explicit_constructor() {
        let ctor = FunctionSpec::new("Point")
            .scope("Point")
            .param("int const &", "x")
            .param("int const &", "y")
            .explicit(true)
            .init("x", "x")
            .init("y", "y");

        let decl = render(|b| {
            b.function_decl(&ctor);
        });
        assert_eq!(decl, "explicit Point(int const &x, int const &y);\n");

        let def = render(|b| {
            b.function_def(&ctor, |_| {});
        });
        assert_eq!(
            def,
            "Point::Point(int const &x, int const &y) : x(x), y(y) {\n}\n"
        );
    }

    #[test]
    fn test_static_decl_and_scoped_def() {
        let f = FunctionSpec::new("from_json")
            .scope("adl_serializer<::geo::Point>")
            .returns("::geo::Point")
            .param("json const &", "j")
            .static_();

        let decl = render(|b| {
            b.function_decl(&f);
        });
        assert_eq!(decl, "static ::geo::Point from_json(json const &j);\n");

        let def = render(|b| {
            b.function_def(&f, |b| {
                b.push_line("return ::geo::Point{};");
            });
        });
        assert_eq!(
            def,
            "::geo::Point adl_serializer<::geo::Point>::from_json(json const &j) {\n  return ::geo::Point{};\n}\n"
        );
    }

    #[test]
    fn test_reference_return_type() {
        let f = FunctionSpec::new("operator<<")
            .returns("std::ostream &")
            .param("std::ostream &", "s")
            .param("Color", "x");
        let def = render(|b| {
            b.function_def(&f, |b| {
                b.push_line("return s << fmt::to_string(x);");
            });
        });
        assert_eq!(
            def,
            "std::ostream &operator<<(std::ostream &s, Color x) {\n  return s << fmt::to_string(x);\n}\n"
        );
    }

    #[test]
    fn test_member_template_inline_def() {
        let f = FunctionSpec::new("has")
            .template(&["T"])
            .returns("bool")
            .const_();
        let def = render(|b| {
            b.function_def(&f, |b| {
                b.push_line("return true;");
            });
        });
        assert_eq!(
            def,
            "template <typename T>\nbool has() const {\n  return true;\n}\n"
        );
    }
}
