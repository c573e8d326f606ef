//! Type and signature rendering shared by every artifact.

use implgen_codegen::language::IdentifierAllocator;
use implgen_manifest::{ArtifactKind, GeneratedNames, TraceStrategy};
use implgen_model::{Interface, Method, PackageMap, TypeExpr, TypeParam};
use indexmap::IndexMap;

/// Everything needed to render types for one generated file.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Import path -> alias for every package the file imports
    pub packages: &'a PackageMap,
    /// Import path of the generated file; its types render unqualified
    pub output_package: &'a str,
    /// Interface name -> generated type name
    pub overrides: &'a IndexMap<String, String>,
    /// Type parameters of the interface being rendered
    pub type_params: &'a [TypeParam],
}

impl<'a> RenderContext<'a> {
    pub fn new(
        packages: &'a PackageMap,
        output_package: &'a str,
        overrides: &'a IndexMap<String, String>,
    ) -> Self {
        Self {
            packages,
            output_package,
            overrides,
            type_params: &[],
        }
    }

    /// The context for the declarations generated from `interface`.
    pub fn scoped<'b>(&self, interface: &'b Interface) -> RenderContext<'b>
    where
        'a: 'b,
    {
        RenderContext {
            packages: self.packages,
            output_package: self.output_package,
            overrides: self.overrides,
            type_params: &interface.type_params,
        }
    }

    pub fn render_type(&self, ty: &TypeExpr) -> String {
        ty.render(self.packages, self.output_package)
    }

    /// Qualifier for a runtime package, e.g. `gomock` or `stdprometheus`.
    pub fn qualifier(&self, path: &str) -> String {
        self.packages.qualifier(path)
    }

    /// Declaration names for `interface` in the given mode.
    pub fn names(
        &self,
        kind: ArtifactKind,
        strategy: TraceStrategy,
        interface: &Interface,
    ) -> GeneratedNames {
        kind.generated_names(
            &interface.name,
            strategy,
            self.overrides.get(&interface.name).map(String::as_str),
        )
    }

    /// An allocator for one generated scope.
    ///
    /// Package aliases and type parameter names are taken up front so
    /// locals never shadow a name the signature refers to.
    pub fn allocator(&self) -> IdentifierAllocator {
        IdentifierAllocator::new(
            self.packages
                .iter()
                .map(|(_, alias)| alias)
                .chain(self.type_params.iter().map(|tp| tp.name.as_str())),
        )
    }

    /// Type parameters with constraints, e.g. `[K comparable, V any]`.
    pub fn type_params_long(&self, interface: &Interface) -> String {
        if interface.type_params.is_empty() {
            return String::new();
        }
        let params: Vec<String> = interface
            .type_params
            .iter()
            .map(|tp| format!("{} {}", tp.name, self.render_type(&tp.constraint)))
            .collect();
        format!("[{}]", params.join(", "))
    }

    /// Type parameter names only, e.g. `[K, V]`.
    pub fn type_params_short(&self, interface: &Interface) -> String {
        if interface.type_params.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = interface
            .type_params
            .iter()
            .map(|tp| tp.name.as_str())
            .collect();
        format!("[{}]", names.join(", "))
    }
}

/// How a parameter list is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamStyle {
    /// `a, b int, c string`
    Named,
    /// `int, int, string`
    TypesOnly,
}

/// The rendered shape of one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Parameter names, the variadic one last.
    pub arg_names: Vec<String>,
    /// Parameter types; the variadic one is written `...T`.
    pub arg_types: Vec<String>,
    pub result_types: Vec<String>,
    pub variadic: bool,
    /// The first parameter is a `context.Context`.
    pub takes_context: bool,
    /// Position of the error-like result, if any.
    pub error_index: Option<usize>,
}

impl Signature {
    /// Render `method`, naming parameters through `ids`.
    ///
    /// Missing, empty and blank names become `arg<i>`.
    pub fn new(method: &Method, ctx: &RenderContext<'_>, ids: &mut IdentifierAllocator) -> Self {
        let mut arg_names = Vec::with_capacity(method.arity());
        let mut arg_types = Vec::with_capacity(method.arity());

        for (i, param) in method.params.iter().enumerate() {
            arg_names.push(allocate_param(param.suggested_name(), i, ids));
            arg_types.push(ctx.render_type(&param.ty));
        }
        if let Some(param) = &method.variadic {
            arg_names.push(allocate_param(param.suggested_name(), method.params.len(), ids));
            arg_types.push(format!("...{}", ctx.render_type(&param.ty)));
        }

        let sig = Self {
            arg_names,
            arg_types,
            result_types: method.returns.iter().map(|ty| ctx.render_type(ty)).collect(),
            variadic: method.is_variadic(),
            takes_context: method.takes_context(),
            error_index: method.error_index(),
        };
        tracing::trace!(method = %method.name, ty = %sig.func_type(), "rendered signature");
        sig
    }

    /// The parameter list, without parentheses.
    ///
    /// In named style consecutive parameters of the same type share it.
    pub fn params(&self, style: ParamStyle) -> String {
        match style {
            ParamStyle::TypesOnly => self.arg_types.join(", "),
            ParamStyle::Named => {
                let mut parts = Vec::with_capacity(self.arg_names.len());
                for (i, name) in self.arg_names.iter().enumerate() {
                    let ty = &self.arg_types[i];
                    if self.arg_types.get(i + 1) == Some(ty) {
                        parts.push(name.clone());
                    } else {
                        parts.push(format!("{} {}", name, ty));
                    }
                }
                parts.join(", ")
            }
        }
    }

    /// The result clause: empty, ` T` or ` (A, B)`.
    pub fn results(&self) -> String {
        match self.result_types.as_slice() {
            [] => String::new(),
            [single] => format!(" {}", single),
            many => format!(" ({})", many.join(", ")),
        }
    }

    /// Arguments for forwarding the call, spreading the variadic one.
    pub fn call_args(&self) -> String {
        match self.arg_names.split_last() {
            Some((last, fixed)) if self.variadic => fixed
                .iter()
                .cloned()
                .chain(std::iter::once(format!("{}...", last)))
                .collect::<Vec<_>>()
                .join(", "),
            _ => self.arg_names.join(", "),
        }
    }

    /// Names of the non-variadic parameters.
    pub fn fixed_names(&self) -> &[String] {
        if self.variadic {
            &self.arg_names[..self.arg_names.len() - 1]
        } else {
            &self.arg_names
        }
    }

    pub fn variadic_name(&self) -> Option<&str> {
        if self.variadic {
            self.arg_names.last().map(String::as_str)
        } else {
            None
        }
    }

    /// The method's type, e.g. `func(int, ...string) error`.
    pub fn func_type(&self) -> String {
        format!("func({}){}", self.params(ParamStyle::TypesOnly), self.results())
    }

    /// `Name(params) results`, as written in an interface body.
    pub fn method_spec(&self, name: &str) -> String {
        format!("{}({}){}", name, self.params(ParamStyle::Named), self.results())
    }
}

fn allocate_param(suggested: Option<&str>, index: usize, ids: &mut IdentifierAllocator) -> String {
    match suggested {
        Some(name) => ids.allocate(name),
        None => ids.allocate(&format!("arg{}", index)),
    }
}
