//! gomock test doubles.
//!
//! For each interface this emits the mock type, its expectation recorder,
//! a constructor, the `EXPECT()` accessor and, per method in name order, a
//! base method dispatching to the controller plus a recorder method
//! registering an expectation.

use implgen_codegen::{
    builder::{CodeFragment, Renderable},
    generation::ImportCollector,
};
use implgen_manifest::{ArtifactKind, TraceStrategy};
use implgen_model::{Interface, Method};

use crate::{
    ArtifactRenderer, Field, Func, ParamStyle, RenderContext, Signature, Struct,
    runtime::{GOMOCK, REFLECT},
};

/// Renders gomock mocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRenderer;

/// Names and qualifiers shared by every declaration of one mock.
struct MockNames {
    mock: String,
    recorder: String,
    /// `[K comparable, V any]`
    long_tp: String,
    /// `[K, V]`
    short_tp: String,
    gomock: String,
    reflect: String,
}

impl ArtifactRenderer for MockRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Mock
    }

    fn runtime_imports(&self, interface: &Interface, imports: &mut ImportCollector) {
        imports.add(GOMOCK);
        if !interface.methods.is_empty() {
            imports.add(REFLECT);
        }
    }

    fn render(&self, interface: &Interface, ctx: &RenderContext<'_>) -> Vec<CodeFragment> {
        let ctx = &ctx.scoped(interface);
        let generated = ctx.names(ArtifactKind::Mock, TraceStrategy::default(), interface);
        let recorder = generated
            .recorder
            .unwrap_or_else(|| format!("{}MockRecorder", generated.type_name));
        let names = MockNames {
            mock: generated.type_name,
            recorder,
            long_tp: ctx.type_params_long(interface),
            short_tp: ctx.type_params_short(interface),
            gomock: ctx.qualifier(GOMOCK),
            reflect: ctx.qualifier(REFLECT),
        };
        tracing::debug!(interface = %interface.name, mock = %names.mock, "rendering mock");

        let mut fragments = vec![
            CodeFragment::sequence(mock_struct(interface, &names)),
            CodeFragment::blank(),
            CodeFragment::sequence(recorder_struct(&names)),
            CodeFragment::blank(),
            CodeFragment::sequence(constructor(&names).to_fragments()),
            CodeFragment::blank(),
            CodeFragment::sequence(expect(&names).to_fragments()),
        ];

        for method in interface.sorted_methods() {
            tracing::trace!(method = %method.name, "rendering mock method");
            fragments.push(CodeFragment::blank());
            fragments.extend(base_method(method, &names, ctx).to_fragments());
            fragments.push(CodeFragment::blank());
            fragments.extend(recorder_method(method, &names, ctx).to_fragments());
        }

        fragments
    }
}

fn mock_struct(interface: &Interface, names: &MockNames) -> Vec<CodeFragment> {
    Struct::new(&names.mock)
        .doc(format!("{} is a mock of {} interface.", names.mock, interface.name))
        .type_params(&names.long_tp)
        .field(Field::new("ctrl", format!("*{}.Controller", names.gomock)))
        .field(Field::new(
            "recorder",
            format!("*{}{}", names.recorder, names.short_tp),
        ))
        .to_fragments()
}

fn recorder_struct(names: &MockNames) -> Vec<CodeFragment> {
    // The recorder only points back at its mock; the mock owns it.
    Struct::new(&names.recorder)
        .doc(format!("{} is the mock recorder for {}.", names.recorder, names.mock))
        .type_params(&names.long_tp)
        .field(Field::new("mock", format!("*{}{}", names.mock, names.short_tp)))
        .to_fragments()
}

fn constructor(names: &MockNames) -> Func {
    Func::new(format!("New{}", names.mock))
        .doc(format!("New{} creates a new mock instance.", names.mock))
        .type_params(&names.long_tp)
        .params(format!("ctrl *{}.Controller", names.gomock))
        .results(format!(" *{}{}", names.mock, names.short_tp))
        .body_line(format!("mock := &{}{}{{ctrl: ctrl}}", names.mock, names.short_tp))
        .body_line(format!(
            "mock.recorder = &{}{}{{mock}}",
            names.recorder, names.short_tp
        ))
        .body_line("return mock")
}

fn expect(names: &MockNames) -> Func {
    Func::new("EXPECT")
        .doc("EXPECT returns an object that allows the caller to indicate expected use.")
        .receiver(format!("m *{}{}", names.mock, names.short_tp))
        .results(format!(" *{}{}", names.recorder, names.short_tp))
        .body_line("return m.recorder")
}

/// The method implementing the interface: dispatch to the controller and
/// unpack its results.
fn base_method(method: &Method, names: &MockNames, ctx: &RenderContext<'_>) -> Func {
    let mut ids = ctx.allocator();
    let sig = Signature::new(method, ctx, &mut ids);
    let recv = ids.allocate("m");

    let mut func = Func::new(&method.name)
        .doc(format!("{} mocks base method.", method.name))
        .receiver(format!("{} *{}{}", recv, names.mock, names.short_tp))
        .params(sig.params(ParamStyle::Named))
        .results(sig.results())
        .body_line(format!("{}.ctrl.T.Helper()", recv));

    let call_args = match sig.variadic_name() {
        None => sig
            .arg_names
            .iter()
            .map(|name| format!(", {}", name))
            .collect::<String>(),
        Some(rest) => {
            // The variadic values may be of any type, so copy them one by one.
            let varargs = ids.allocate("varargs");
            let elem = ids.allocate("a");
            func = func
                .body_line(format!(
                    "{} := []interface{{}}{{{}}}",
                    varargs,
                    sig.fixed_names().join(", ")
                ))
                .body_fragment(CodeFragment::braced(
                    format!("for _, {} := range {} {{", elem, rest),
                    vec![CodeFragment::line(format!(
                        "{} = append({}, {})",
                        varargs, varargs, elem
                    ))],
                ));
            format!(", {}...", varargs)
        }
    };

    let call = format!("{}.ctrl.Call({}, \"{}\"{})", recv, recv, method.name, call_args);
    if sig.result_types.is_empty() {
        return func.body_line(call);
    }

    let ret = ids.allocate("ret");
    func = func.body_line(format!("{} := {}", ret, call));

    // Two-value assertion: a nil or mistyped result yields the zero value.
    let mut ret_names = Vec::with_capacity(sig.result_types.len());
    for (i, ty) in sig.result_types.iter().enumerate() {
        let name = ids.allocate(&format!("ret{}", i));
        func = func.body_line(format!("{}, _ := {}[{}].({})", name, ret, i, ty));
        ret_names.push(name);
    }
    func.body_line(format!("return {}", ret_names.join(", ")))
}

/// The recorder method: same name, wildcard parameters, registers an
/// expectation carrying the method's type.
fn recorder_method(method: &Method, names: &MockNames, ctx: &RenderContext<'_>) -> Func {
    let mut ids = ctx.allocator();
    let sig = Signature::new(method, ctx, &mut ids);
    let recv = ids.allocate("mr");

    let mut params = Vec::new();
    if !sig.fixed_names().is_empty() {
        params.push(format!("{} interface{{}}", sig.fixed_names().join(", ")));
    }
    if let Some(rest) = sig.variadic_name() {
        params.push(format!("{} ...interface{{}}", rest));
    }

    let mut func = Func::new(&method.name)
        .doc(format!(
            "{} indicates an expected call of {}.",
            method.name, method.name
        ))
        .receiver(format!("{} *{}{}", recv, names.recorder, names.short_tp))
        .params(params.join(", "))
        .results(format!(" *{}.Call", names.gomock))
        .body_line(format!("{}.mock.ctrl.T.Helper()", recv));

    let call_args = match sig.variadic_name() {
        None => sig
            .arg_names
            .iter()
            .map(|name| format!(", {}", name))
            .collect::<String>(),
        // A lone variadic parameter can be passed straight through.
        Some(rest) if sig.arg_names.len() == 1 => format!(", {}...", rest),
        Some(rest) => {
            let varargs = ids.allocate("varargs");
            func = func.body_line(format!(
                "{} := append([]interface{{}}{{{}}}, {}...)",
                varargs,
                sig.fixed_names().join(", "),
                rest
            ));
            format!(", {}...", varargs)
        }
    };

    func.body_line(format!(
        "return {recv}.mock.ctrl.RecordCallWithMethodType({recv}.mock, \"{name}\", {reflect}.TypeOf((*{mock}{tp})(nil).{name}){args})",
        recv = recv,
        name = method.name,
        reflect = names.reflect,
        mock = names.mock,
        tp = names.short_tp,
        args = call_args,
    ))
}

#[cfg(test)]
mod tests {
    use implgen_codegen::builder::CodeBuilder;
    use implgen_model::{PackageMap, Parameter, TypeExpr};
    use indexmap::IndexMap;

    use super::*;

    fn packages() -> PackageMap {
        let mut packages = PackageMap::new();
        packages.insert(GOMOCK, "gomock");
        packages.insert(REFLECT, "reflect");
        packages
    }

    fn names() -> MockNames {
        MockNames {
            mock: "MockLogger".into(),
            recorder: "MockLoggerMockRecorder".into(),
            long_tp: String::new(),
            short_tp: String::new(),
            gomock: "gomock".into(),
            reflect: "reflect".into(),
        }
    }

    fn build(func: &Func) -> String {
        let mut builder = CodeBuilder::go();
        builder.emit(func);
        builder.build()
    }

    fn render_with(
        method: &Method,
        f: fn(&Method, &MockNames, &RenderContext<'_>) -> Func,
    ) -> String {
        let packages = packages();
        let overrides = IndexMap::new();
        let ctx = RenderContext::new(&packages, "", &overrides);
        build(&f(method, &names(), &ctx))
    }

    fn string() -> TypeExpr {
        TypeExpr::predeclared("string")
    }

    #[test]
    fn test_base_method_without_results_discards_call() {
        let method = Method::new("Flush");
        let out = render_with(&method, base_method);
        assert!(out.contains("\tm.ctrl.Call(m, \"Flush\")\n"));
        assert!(!out.contains("ret"));
    }

    #[test]
    fn test_base_method_unpacks_results() {
        let method = Method::new("Get")
            .param(Parameter::new("key", string()))
            .returns(string())
            .returns(TypeExpr::error());
        let out = render_with(&method, base_method);

        assert!(out.contains("\tret := m.ctrl.Call(m, \"Get\", key)\n"));
        assert!(out.contains("\tret0, _ := ret[0].(string)\n"));
        assert!(out.contains("\tret1, _ := ret[1].(error)\n"));
        assert!(out.contains("\treturn ret0, ret1\n"));
    }

    #[test]
    fn test_base_method_collects_varargs() {
        let method = Method::new("Log")
            .param(Parameter::new("format", string()))
            .variadic(Parameter::new("args", TypeExpr::EmptyInterface));
        let out = render_with(&method, base_method);

        assert!(out.contains("\tvarargs := []interface{}{format}\n"));
        assert!(out.contains("\tfor _, a := range args {\n\t\tvarargs = append(varargs, a)\n\t}\n"));
        assert!(out.contains("\tm.ctrl.Call(m, \"Log\", varargs...)\n"));
    }

    #[test]
    fn test_locals_avoid_parameter_names() {
        let method = Method::new("Swap")
            .param(Parameter::new("m", string()))
            .param(Parameter::new("ret", string()))
            .returns(string());
        let out = render_with(&method, base_method);

        assert!(out.contains("func (m2 *MockLogger) Swap(m, ret string) string {"));
        assert!(out.contains("\tret2 := m2.ctrl.Call(m2, \"Swap\", m, ret)\n"));
        assert!(out.contains("\tret0, _ := ret2[0].(string)\n"));
    }

    #[test]
    fn test_recorder_spreads_lone_variadic() {
        let method = Method::new("Log").variadic(Parameter::new("args", TypeExpr::EmptyInterface));
        let out = render_with(&method, recorder_method);

        assert!(out.contains("func (mr *MockLoggerMockRecorder) Log(args ...interface{}) *gomock.Call {"));
        assert!(out.contains(
            "\treturn mr.mock.ctrl.RecordCallWithMethodType(mr.mock, \"Log\", reflect.TypeOf((*MockLogger)(nil).Log), args...)\n"
        ));
        assert!(!out.contains("varargs"));
    }

    #[test]
    fn test_recorder_builds_temporary_list() {
        let method = Method::new("Logf")
            .param(Parameter::new("level", TypeExpr::predeclared("int")))
            .param(Parameter::new("format", string()))
            .variadic(Parameter::new("args", TypeExpr::EmptyInterface));
        let out = render_with(&method, recorder_method);

        assert!(out.contains("Logf(level, format interface{}, args ...interface{}) *gomock.Call {"));
        assert!(out.contains("\tvarargs := append([]interface{}{level, format}, args...)\n"));
        assert!(out.ends_with("(nil).Logf), varargs...)\n}\n"));
    }

    #[test]
    fn test_recorder_without_params() {
        let out = render_with(&Method::new("Close"), recorder_method);
        assert!(out.contains("Close() *gomock.Call {"));
        assert!(out.contains("reflect.TypeOf((*MockLogger)(nil).Close))\n"));
    }

    #[test]
    fn test_method_pairs_per_method() {
        let intf = Interface::new("Logger")
            .method(Method::new("Sync"))
            .method(Method::new("Flush"))
            .method(Method::new("Close"));
        let packages = packages();
        let overrides = IndexMap::new();
        let ctx = RenderContext::new(&packages, "", &overrides);

        let mut builder = CodeBuilder::go();
        builder.emit(&MockRenderer.render(&intf, &ctx));
        let out = builder.build();

        assert_eq!(out.matches("mocks base method.").count(), 3);
        assert_eq!(out.matches("indicates an expected call of").count(), 3);
        assert_eq!(out.matches("creates a new mock instance.").count(), 1);
        assert_eq!(out.matches(") EXPECT() ").count(), 1);

        let close = out.find("// Close mocks").unwrap();
        let flush = out.find("// Flush mocks").unwrap();
        let sync = out.find("// Sync mocks").unwrap();
        assert!(close < flush && flush < sync);
    }

    #[test]
    fn test_runtime_imports() {
        let mut imports = ImportCollector::new();
        MockRenderer.runtime_imports(&Interface::new("Marker"), &mut imports);
        assert!(imports.has(GOMOCK));
        assert!(!imports.has(REFLECT));

        MockRenderer.runtime_imports(
            &Interface::new("Closer").method(Method::new("Close")),
            &mut imports,
        );
        assert!(imports.has(REFLECT));
    }
}
