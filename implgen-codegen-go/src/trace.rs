//! OpenTelemetry tracing decorators.
//!
//! Two span strategies exist and a run uses exactly one of them:
//!
//! - [`TraceStrategy::ContextAware`]: the decorator holds only a delegate
//!   typed by a mirror interface. Methods taking a `context.Context` first
//!   get a span from a per-call tracer and record a non-nil error on it;
//!   other methods pass straight through.
//! - [`TraceStrategy::Unconditional`]: the decorator holds the delegate
//!   (typed as the original interface) and a tracer created once. Every
//!   method gets a span and returns the delegate's results directly.

use implgen_codegen::{
    builder::{CodeFragment, Renderable},
    generation::ImportCollector,
};
use implgen_manifest::{ArtifactKind, TraceStrategy};
use implgen_model::{Interface, Method};

use crate::{
    ArtifactRenderer, Field, Func, InterfaceType, ParamStyle, RenderContext, Signature, Struct,
    runtime::{CONTEXT, OTEL, OTEL_CODES, OTEL_TRACE},
};

/// Renders tracing decorators with one [`TraceStrategy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceRenderer {
    strategy: TraceStrategy,
}

struct TraceNames {
    decorator: String,
    long_tp: String,
    short_tp: String,
    otel: String,
}

impl TraceRenderer {
    pub fn new(strategy: TraceStrategy) -> Self {
        Self { strategy }
    }
}

impl ArtifactRenderer for TraceRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Trace
    }

    fn runtime_imports(&self, interface: &Interface, imports: &mut ImportCollector) {
        match self.strategy {
            TraceStrategy::ContextAware => {
                let traced: Vec<&Method> = interface
                    .methods
                    .iter()
                    .filter(|m| m.takes_context())
                    .collect();
                if !traced.is_empty() {
                    imports.add(OTEL);
                }
                if traced.iter().any(|m| m.error_index().is_some()) {
                    imports.add(OTEL_CODES);
                }
            }
            TraceStrategy::Unconditional => {
                imports.add(OTEL);
                imports.add(OTEL_TRACE);
                if interface.methods.iter().any(|m| !m.takes_context()) {
                    imports.add(CONTEXT);
                }
                // The delegate is typed as the original interface.
                imports.extend(interface.as_type().packages());
            }
        }
    }

    fn render(&self, interface: &Interface, ctx: &RenderContext<'_>) -> Vec<CodeFragment> {
        let ctx = &ctx.scoped(interface);
        let generated = ctx.names(ArtifactKind::Trace, self.strategy, interface);
        let names = TraceNames {
            decorator: generated.type_name,
            long_tp: ctx.type_params_long(interface),
            short_tp: ctx.type_params_short(interface),
            otel: ctx.qualifier(OTEL),
        };
        tracing::debug!(
            interface = %interface.name,
            decorator = %names.decorator,
            strategy = %self.strategy,
            "rendering trace decorator"
        );

        match self.strategy {
            TraceStrategy::ContextAware => {
                let mirror = generated
                    .mirror
                    .unwrap_or_else(|| format!("Traced{}", interface.name));
                render_context_aware(interface, &names, &mirror, ctx)
            }
            TraceStrategy::Unconditional => render_unconditional(interface, &names, ctx),
        }
    }
}

/// Mirror interface used as the delegate type.
pub(crate) fn mirror_interface(
    interface: &Interface,
    mirror: &str,
    family: &str,
    ctx: &RenderContext<'_>,
) -> InterfaceType {
    let mut decl = InterfaceType::new(mirror)
        .doc(format!(
            "{} mirrors {} and is the delegate type of its {} decorator.",
            mirror, interface.name, family
        ))
        .type_params(ctx.type_params_long(interface));
    for method in interface.sorted_methods() {
        let mut ids = ctx.allocator();
        decl = decl.method(Signature::new(method, ctx, &mut ids).method_spec(&method.name));
    }
    decl
}

fn render_context_aware(
    interface: &Interface,
    names: &TraceNames,
    mirror: &str,
    ctx: &RenderContext<'_>,
) -> Vec<CodeFragment> {
    let delegate_ty = format!("{}{}", mirror, names.short_tp);

    let decorator = Struct::new(&names.decorator)
        .doc(format!(
            "{} is a tracing decorator of {} interface.",
            names.decorator, interface.name
        ))
        .type_params(&names.long_tp)
        .field(Field::new("delegate", &delegate_ty));

    let constructor = Func::new(format!("New{}", names.decorator))
        .doc(format!("New{} creates a new trace decorator instance.", names.decorator))
        .type_params(&names.long_tp)
        .params(format!("delegate {}", delegate_ty))
        .results(format!(" *{}{}", names.decorator, names.short_tp))
        .body_line(format!(
            "return &{}{}{{delegate: delegate}}",
            names.decorator, names.short_tp
        ));

    let mut fragments = vec![
        CodeFragment::sequence(mirror_interface(interface, mirror, "tracing", ctx).to_fragments()),
        CodeFragment::blank(),
        CodeFragment::sequence(decorator.to_fragments()),
        CodeFragment::blank(),
        CodeFragment::sequence(constructor.to_fragments()),
    ];
    for method in interface.sorted_methods() {
        tracing::trace!(method = %method.name, "rendering traced method");
        fragments.push(CodeFragment::blank());
        fragments.extend(context_aware_method(method, names, ctx).to_fragments());
    }
    fragments
}

fn context_aware_method(method: &Method, names: &TraceNames, ctx: &RenderContext<'_>) -> Func {
    let mut ids = ctx.allocator();
    let sig = Signature::new(method, ctx, &mut ids);
    let recv = ids.allocate("t");

    let mut func = Func::new(&method.name)
        .doc(format!("{} traced base method.", method.name))
        .receiver(format!("{} *{}{}", recv, names.decorator, names.short_tp))
        .params(sig.params(ParamStyle::Named))
        .results(sig.results());

    let call = format!("{}.delegate.{}({})", recv, method.name, sig.call_args());

    let span = if sig.takes_context {
        let ctx_arg = &sig.arg_names[0];
        let tracer = ids.allocate("tracer");
        let span = ids.allocate("span");
        func = func
            .body_line(format!(
                "{} := {}.Tracer(\"{}\")",
                tracer, names.otel, names.decorator
            ))
            .body_line(format!(
                "{}, {} := {}.Start({}, \"{}\")",
                ctx_arg, span, tracer, ctx_arg, method.name
            ))
            .body_line(format!("defer {}.End()", span));
        Some(span)
    } else {
        None
    };

    if sig.result_types.is_empty() {
        return func.body_line(call);
    }

    let rets: Vec<String> = sig.result_types.iter().map(|_| ids.allocate("ret")).collect();
    func = func.body_line(format!("{} := {}", rets.join(", "), call));

    if let (Some(span), Some(index)) = (&span, sig.error_index) {
        let err = &rets[index];
        func = func.body_fragment(CodeFragment::braced(
            format!("if {} != nil {{", err),
            vec![
                CodeFragment::line(format!("{}.RecordError({})", span, err)),
                CodeFragment::line(format!(
                    "{}.SetStatus({}.Error, {}.Error())",
                    span,
                    ctx.qualifier(OTEL_CODES),
                    err
                )),
            ],
        ));
    }

    func.body_line(format!("return {}", rets.join(", ")))
}

fn render_unconditional(
    interface: &Interface,
    names: &TraceNames,
    ctx: &RenderContext<'_>,
) -> Vec<CodeFragment> {
    let delegate_ty = ctx.render_type(&interface.as_type());
    let trace = ctx.qualifier(OTEL_TRACE);

    let decorator = Struct::new(&names.decorator)
        .doc(format!(
            "{} is a tracing decorator of {} interface.",
            names.decorator, interface.name
        ))
        .type_params(&names.long_tp)
        .field(Field::new("delegate", &delegate_ty))
        .field(Field::new("tracer", format!("{}.Tracer", trace)));

    let constructor = Func::new(format!("New{}", names.decorator))
        .doc(format!("New{} creates a new trace decorator instance.", names.decorator))
        .type_params(&names.long_tp)
        .params(format!("delegate {}", delegate_ty))
        .results(format!(" *{}{}", names.decorator, names.short_tp))
        .body_fragment(CodeFragment::braced(
            format!("return &{}{}{{", names.decorator, names.short_tp),
            vec![
                CodeFragment::line("delegate: delegate,"),
                CodeFragment::line(format!(
                    "tracer:   {}.Tracer(\"{}\"),",
                    names.otel, names.decorator
                )),
            ],
        ));

    let mut fragments = vec![
        CodeFragment::sequence(decorator.to_fragments()),
        CodeFragment::blank(),
        CodeFragment::sequence(constructor.to_fragments()),
    ];
    for method in interface.sorted_methods() {
        tracing::trace!(method = %method.name, "rendering traced method");
        fragments.push(CodeFragment::blank());
        fragments.extend(unconditional_method(method, names, ctx).to_fragments());
    }
    fragments
}

fn unconditional_method(method: &Method, names: &TraceNames, ctx: &RenderContext<'_>) -> Func {
    let mut ids = ctx.allocator();
    let sig = Signature::new(method, ctx, &mut ids);
    let recv = ids.allocate("t");
    let span = ids.allocate("span");

    let start = if sig.takes_context {
        let ctx_arg = &sig.arg_names[0];
        format!(
            "{}, {} := {}.tracer.Start({}, \"{}\")",
            ctx_arg, span, recv, ctx_arg, method.name
        )
    } else {
        format!(
            "_, {} := {}.tracer.Start({}.Background(), \"{}\")",
            span,
            recv,
            ctx.qualifier(CONTEXT),
            method.name
        )
    };

    let call = format!("{}.delegate.{}({})", recv, method.name, sig.call_args());
    let call = if sig.result_types.is_empty() {
        call
    } else {
        format!("return {}", call)
    };

    Func::new(&method.name)
        .doc(format!("{} traced base method.", method.name))
        .receiver(format!("{} *{}{}", recv, names.decorator, names.short_tp))
        .params(sig.params(ParamStyle::Named))
        .results(sig.results())
        .body_line(start)
        .body_line(format!("defer {}.End()", span))
        .body_line(call)
}
