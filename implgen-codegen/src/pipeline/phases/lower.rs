//! Lower phase - turns manifest declarations into the interface model.
//!
//! Type strings are parsed against each interface's scope and embedded
//! interfaces are expanded, so renderers only ever see flat method lists.

use eyre::{Result, bail, eyre};
use implgen_manifest::{
    InterfaceDecl, Manifest, MethodDecl, ParamType, parse_param_type, parse_type,
};
use implgen_model::{Interface, Method, Parameter, TypeParam};

use crate::pipeline::{CompilationContext, Diagnostic, Phase};

/// Phase that lowers the selected interfaces of a manifest.
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Resolve types and expand embedded interfaces"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut interfaces = Vec::new();
        for (name, decl) in ctx.manifest.selected_interfaces() {
            let mut lowerer = Lowerer::new(&ctx.manifest);
            let interface = lowerer.interface(name, decl)?;
            if lowerer.diagnostics.is_empty() {
                interfaces.push(interface);
            }
            ctx.diagnostics.append(&mut lowerer.diagnostics);
        }

        if ctx.has_errors() {
            bail!("lowering failed with {} error(s)", ctx.error_count());
        }

        tracing::debug!(count = interfaces.len(), "lowered interfaces");
        ctx.interfaces = Some(interfaces);
        Ok(())
    }
}

struct Lowerer<'a> {
    manifest: &'a Manifest,
    /// Interfaces being expanded, outermost first.
    stack: Vec<&'a str>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lowerer<'a> {
    fn new(manifest: &'a Manifest) -> Self {
        Self {
            manifest,
            stack: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn interface(&mut self, name: &'a str, decl: &'a InterfaceDecl) -> Result<Interface> {
        let scope = self.manifest.type_scope(decl);

        let mut interface = Interface::new(name);
        if let Some(package) = &self.manifest.generate.source_package {
            interface = interface.package(package);
        }
        for tp in &decl.type_params {
            let constraint = parse_type(&tp.constraint, &scope)
                .map_err(|e| eyre!("constraint of '{}' in '{}': {}", tp.name, name, e))?;
            interface = interface.type_param(TypeParam::new(&tp.name, constraint));
        }

        let mut methods = Vec::new();
        self.collect_methods(name, decl, &mut methods)?;
        interface.methods = methods;
        Ok(interface)
    }

    /// Append the methods of `decl` and everything it embeds to `methods`.
    fn collect_methods(
        &mut self,
        name: &'a str,
        decl: &'a InterfaceDecl,
        methods: &mut Vec<Method>,
    ) -> Result<()> {
        self.stack.push(name);

        for (method_name, method_decl) in &decl.methods {
            let method = self.method(name, decl, method_name, method_decl)?;
            self.merge(name, method, methods);
        }

        for embed in &decl.embeds {
            let Some(embed_decl) = self.manifest.interfaces.get(embed) else {
                bail!("interface '{}' embeds unknown interface '{}'", name, embed);
            };

            if let Some(start) = self.stack.iter().position(|n| *n == embed.as_str()) {
                let mut cycle: Vec<&str> = self.stack[start..].to_vec();
                cycle.push(embed);
                self.diagnostics.push(
                    Diagnostic::error(
                        "lower",
                        format!("embedding cycle: {}", cycle.join(" -> ")),
                    )
                    .at(format!("interfaces.{}.embeds", name)),
                );
                continue;
            }

            if !embed_decl.type_params.is_empty() {
                self.diagnostics.push(
                    Diagnostic::error(
                        "lower",
                        format!(
                            "interface '{}' embeds generic interface '{}', which is not supported",
                            name, embed
                        ),
                    )
                    .at(format!("interfaces.{}.embeds", name)),
                );
                continue;
            }

            self.collect_methods(embed, embed_decl, methods)?;
        }

        self.stack.pop();
        Ok(())
    }

    fn method(
        &self,
        interface: &str,
        decl: &InterfaceDecl,
        name: &str,
        method_decl: &MethodDecl,
    ) -> Result<Method> {
        let scope = self.manifest.type_scope(decl);
        let mut method = Method::new(name);

        for param in &method_decl.params {
            let parsed = parse_param_type(&param.ty, &scope).map_err(|e| {
                eyre!("parameter type '{}' in '{}.{}': {}", param.ty, interface, name, e)
            })?;
            let build = |ty| match &param.name {
                Some(param_name) => Parameter::new(param_name, ty),
                None => Parameter::unnamed(ty),
            };
            method = match parsed {
                ParamType::Fixed(ty) => method.param(build(ty)),
                ParamType::Variadic(ty) => method.variadic(build(ty)),
            };
        }

        for ret in &method_decl.returns {
            let ty = parse_type(ret, &scope)
                .map_err(|e| eyre!("return type '{}' in '{}.{}': {}", ret, interface, name, e))?;
            method = method.returns(ty);
        }

        Ok(method)
    }

    /// Add `method` unless an identical one is already present.
    fn merge(&mut self, from: &str, method: Method, methods: &mut Vec<Method>) {
        let Some(index) = methods.iter().position(|m| m.name == method.name) else {
            methods.push(method);
            return;
        };

        if !same_signature(&methods[index], &method) {
            let outer = self.stack.first().copied().unwrap_or(from);
            self.diagnostics.push(
                Diagnostic::error(
                    "lower",
                    format!(
                        "method '{}' from '{}' conflicts with another method of the same name in '{}'",
                        method.name, from, outer
                    ),
                )
                .at(format!("interfaces.{}.methods.{}", from, method.name)),
            );
        }
    }
}

/// Signatures match when types agree; parameter names are irrelevant.
fn same_signature(a: &Method, b: &Method) -> bool {
    let types = |m: &Method| {
        m.params
            .iter()
            .map(|p| p.ty.clone())
            .collect::<Vec<_>>()
    };
    types(a) == types(b)
        && a.variadic.as_ref().map(|p| &p.ty) == b.variadic.as_ref().map(|p| &p.ty)
        && a.returns == b.returns
}
