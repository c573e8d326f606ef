//! Go type expressions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::PackageMap;

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `<-chan T`
    Recv,
    /// `chan<- T`
    Send,
}

/// A resolved type reference.
///
/// A `TypeExpr` knows how to render itself as source text for a given
/// package map and output package. Types declared in the output package
/// render unqualified; foreign types are prefixed with their alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// Built-in type such as `int`, `string`, `error` or `any`.
    Predeclared { name: String },
    /// Declared type, optionally from another package.
    Named {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        package: Option<String>,
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        type_args: Vec<TypeExpr>,
    },
    /// Reference to a type parameter of the enclosing interface.
    TypeParam { name: String },
    Pointer { elem: Box<TypeExpr> },
    Slice { elem: Box<TypeExpr> },
    Array { len: u64, elem: Box<TypeExpr> },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    Func {
        #[serde(default)]
        params: Vec<TypeExpr>,
        #[serde(default)]
        results: Vec<TypeExpr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variadic: Option<Box<TypeExpr>>,
    },
    /// `interface{}`
    EmptyInterface,
    /// `struct{}`
    EmptyStruct,
}

impl TypeExpr {
    pub fn predeclared(name: impl Into<String>) -> Self {
        Self::Predeclared { name: name.into() }
    }

    /// The canonical `error` type.
    pub fn error() -> Self {
        Self::predeclared("error")
    }

    /// The canonical `context.Context` type.
    pub fn context() -> Self {
        Self::named(Some("context"), "Context")
    }

    pub fn named(package: Option<&str>, name: impl Into<String>) -> Self {
        Self::Named {
            package: package.map(str::to_string),
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn type_param(name: impl Into<String>) -> Self {
        Self::TypeParam { name: name.into() }
    }

    pub fn pointer(elem: TypeExpr) -> Self {
        Self::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: TypeExpr) -> Self {
        Self::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: TypeExpr) -> Self {
        Self::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    /// Returns true for the canonical error type.
    pub fn is_error_like(&self) -> bool {
        matches!(self, Self::Predeclared { name } if name == "error")
    }

    /// Returns true for `context.Context`.
    pub fn is_cancellation_context(&self) -> bool {
        matches!(
            self,
            Self::Named { package: Some(package), name, type_args }
                if package == "context" && name == "Context" && type_args.is_empty()
        )
    }

    /// All import paths referenced by this type, sorted.
    pub fn packages(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_packages(&mut out);
        out
    }

    /// Add every import path referenced by this type to `out`.
    pub fn collect_packages(&self, out: &mut BTreeSet<String>) {
        match self {
            Self::Predeclared { .. }
            | Self::TypeParam { .. }
            | Self::EmptyInterface
            | Self::EmptyStruct => {}
            Self::Named {
                package, type_args, ..
            } => {
                if let Some(package) = package {
                    out.insert(package.clone());
                }
                for arg in type_args {
                    arg.collect_packages(out);
                }
            }
            Self::Pointer { elem }
            | Self::Slice { elem }
            | Self::Array { elem, .. }
            | Self::Chan { elem, .. } => elem.collect_packages(out),
            Self::Map { key, value } => {
                key.collect_packages(out);
                value.collect_packages(out);
            }
            Self::Func {
                params,
                results,
                variadic,
            } => {
                for ty in params.iter().chain(results) {
                    ty.collect_packages(out);
                }
                if let Some(variadic) = variadic {
                    variadic.collect_packages(out);
                }
            }
        }
    }

    /// Render as Go source text.
    ///
    /// `output_package` is the import path of the package the generated
    /// file belongs to; named types from that package are left unqualified.
    pub fn render(&self, packages: &PackageMap, output_package: &str) -> String {
        let mut out = String::new();
        self.write_to(&mut out, packages, output_package);
        out
    }

    fn write_to(&self, out: &mut String, packages: &PackageMap, output_package: &str) {
        match self {
            Self::Predeclared { name } | Self::TypeParam { name } => out.push_str(name),
            Self::Named {
                package,
                name,
                type_args,
            } => {
                if let Some(package) = package.as_deref()
                    && package != output_package
                {
                    out.push_str(&packages.qualifier(package));
                    out.push('.');
                }
                out.push_str(name);
                if !type_args.is_empty() {
                    out.push('[');
                    write_list(out, type_args, packages, output_package);
                    out.push(']');
                }
            }
            Self::Pointer { elem } => {
                out.push('*');
                elem.write_to(out, packages, output_package);
            }
            Self::Slice { elem } => {
                out.push_str("[]");
                elem.write_to(out, packages, output_package);
            }
            Self::Array { len, elem } => {
                out.push_str(&format!("[{}]", len));
                elem.write_to(out, packages, output_package);
            }
            Self::Map { key, value } => {
                out.push_str("map[");
                key.write_to(out, packages, output_package);
                out.push(']');
                value.write_to(out, packages, output_package);
            }
            Self::Chan { dir, elem } => {
                match dir {
                    ChanDir::Both => out.push_str("chan "),
                    ChanDir::Recv => out.push_str("<-chan "),
                    ChanDir::Send => out.push_str("chan<- "),
                }
                // `chan <-chan T` would parse as `chan<- chan T`
                let needs_parens = *dir == ChanDir::Both
                    && matches!(
                        elem.as_ref(),
                        Self::Chan {
                            dir: ChanDir::Recv,
                            ..
                        }
                    );
                if needs_parens {
                    out.push('(');
                }
                elem.write_to(out, packages, output_package);
                if needs_parens {
                    out.push(')');
                }
            }
            Self::Func {
                params,
                results,
                variadic,
            } => {
                out.push_str("func(");
                write_list(out, params, packages, output_package);
                if let Some(variadic) = variadic {
                    if !params.is_empty() {
                        out.push_str(", ");
                    }
                    out.push_str("...");
                    variadic.write_to(out, packages, output_package);
                }
                out.push(')');
                match results.as_slice() {
                    [] => {}
                    [single] => {
                        out.push(' ');
                        single.write_to(out, packages, output_package);
                    }
                    many => {
                        out.push_str(" (");
                        write_list(out, many, packages, output_package);
                        out.push(')');
                    }
                }
            }
            Self::EmptyInterface => out.push_str("interface{}"),
            Self::EmptyStruct => out.push_str("struct{}"),
        }
    }
}

fn write_list(out: &mut String, types: &[TypeExpr], packages: &PackageMap, output_package: &str) {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        ty.write_to(out, packages, output_package);
    }
}
