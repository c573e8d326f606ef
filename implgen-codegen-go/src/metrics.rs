//! go-kit metrics decorators recording call durations in a Prometheus
//! histogram labeled by outcome.

use implgen_codegen::{
    builder::{CodeFragment, Renderable},
    generation::ImportCollector,
};
use implgen_core::to_snake_case;
use implgen_manifest::{ArtifactKind, TraceStrategy};
use implgen_model::{Interface, Method};

use crate::{
    ArtifactRenderer, Field, Func, ParamStyle, RenderContext, Signature, Struct,
    runtime::{KIT_METRICS, KIT_PROMETHEUS, STD_PROMETHEUS, STD_PROMETHEUS_ALIAS, TIME},
    trace::mirror_interface,
};

/// Label value for methods without an error-like result.
const NO_ERROR_LABEL: &str = "N/A";

/// Renders metrics decorators.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsRenderer;

impl ArtifactRenderer for MetricsRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Metrics
    }

    fn runtime_imports(&self, interface: &Interface, imports: &mut ImportCollector) {
        imports.add(KIT_METRICS);
        imports.add(KIT_PROMETHEUS);
        imports.add_aliased(STD_PROMETHEUS, STD_PROMETHEUS_ALIAS);
        if !interface.methods.is_empty() {
            imports.add(TIME);
        }
    }

    fn render(&self, interface: &Interface, ctx: &RenderContext<'_>) -> Vec<CodeFragment> {
        let ctx = &ctx.scoped(interface);
        let generated = ctx.names(ArtifactKind::Metrics, TraceStrategy::default(), interface);
        let decorator = generated.type_name;
        let mirror = generated
            .mirror
            .unwrap_or_else(|| format!("Metrics{}", interface.name));
        let long_tp = ctx.type_params_long(interface);
        let short_tp = ctx.type_params_short(interface);
        let delegate_ty = format!("{}{}", mirror, short_tp);
        tracing::debug!(interface = %interface.name, %decorator, "rendering metrics decorator");

        let decl = Struct::new(&decorator)
            .doc(format!(
                "{} is a metrics decorator of {} interface.",
                decorator, interface.name
            ))
            .type_params(&long_tp)
            .field(Field::new("delegate", &delegate_ty))
            .field(Field::new(
                "duration",
                format!("{}.Histogram", ctx.qualifier(KIT_METRICS)),
            ));

        let mut fragments = vec![
            CodeFragment::sequence(
                mirror_interface(interface, &mirror, "metrics", ctx).to_fragments(),
            ),
            CodeFragment::blank(),
            CodeFragment::sequence(decl.to_fragments()),
            CodeFragment::blank(),
            CodeFragment::sequence(
                constructor(interface, &decorator, &long_tp, &short_tp, &delegate_ty, ctx)
                    .to_fragments(),
            ),
        ];
        for method in interface.sorted_methods() {
            fragments.push(CodeFragment::blank());
            fragments.extend(metrics_method(method, &decorator, &short_tp, ctx).to_fragments());
        }
        fragments
    }
}

fn constructor(
    interface: &Interface,
    decorator: &str,
    long_tp: &str,
    short_tp: &str,
    delegate_ty: &str,
    ctx: &RenderContext<'_>,
) -> Func {
    let std = ctx.qualifier(STD_PROMETHEUS);
    let opts = [
        ("Subsystem", format!("\"{}\"", to_snake_case(&interface.name))),
        ("Name", "\"duration_seconds\"".to_string()),
        (
            "Help",
            format!("\"Seconds spent in {} method calls.\"", interface.name),
        ),
        ("Buckets", format!("{}.DefBuckets", std)),
    ];
    let width = opts.iter().map(|(key, _)| key.len() + 1).max().unwrap_or(0);
    let opts = opts
        .iter()
        .map(|(key, value)| {
            CodeFragment::line(format!("{:<width$} {},", format!("{}:", key), value, width = width))
        })
        .collect();

    Func::new(format!("New{}", decorator))
        .doc(format!("New{} creates a new metrics decorator instance.", decorator))
        .type_params(long_tp)
        .params(format!("delegate {}", delegate_ty))
        .results(format!(" *{}{}", decorator, short_tp))
        .body_fragment(CodeFragment::block(
            format!(
                "histogram := {}.NewHistogramFrom({}.HistogramOpts{{",
                ctx.qualifier(KIT_PROMETHEUS),
                std
            ),
            opts,
            Some("}, []string{\"error\"})".to_string()),
        ))
        .body_fragment(CodeFragment::braced(
            format!("return &{}{}{{", decorator, short_tp),
            vec![
                CodeFragment::line("delegate: delegate,"),
                CodeFragment::line("duration: histogram,"),
            ],
        ))
}

fn metrics_method(
    method: &Method,
    decorator: &str,
    short_tp: &str,
    ctx: &RenderContext<'_>,
) -> Func {
    let mut ids = ctx.allocator();
    let sig = Signature::new(method, ctx, &mut ids);
    let recv = ids.allocate("t");
    let begin = ids.allocate("begin");
    let took = ids.allocate("took");
    let time = ctx.qualifier(TIME);

    let mut func = Func::new(&method.name)
        .doc(format!("{} metrics base method.", method.name))
        .receiver(format!("{} *{}{}", recv, decorator, short_tp))
        .params(sig.params(ParamStyle::Named))
        .results(sig.results())
        .body_line(format!("{} := {}.Now()", begin, time));

    let call = format!("{}.delegate.{}({})", recv, method.name, sig.call_args());
    let rets: Vec<String> = sig.result_types.iter().map(|_| ids.allocate("ret")).collect();
    func = if rets.is_empty() {
        func.body_line(call)
    } else {
        func.body_line(format!("{} := {}", rets.join(", "), call))
    };
    func = func.body_line(format!("{} := {}.Since({})", took, time, begin));

    let label = match sig.error_index {
        Some(index) => {
            let failed = ids.allocate("failed");
            func = func
                .body_line(format!("{} := \"false\"", failed))
                .body_fragment(CodeFragment::braced(
                    format!("if {} != nil {{", rets[index]),
                    vec![CodeFragment::line(format!("{} = \"true\"", failed))],
                ));
            failed
        }
        None => format!("\"{}\"", NO_ERROR_LABEL),
    };
    func = func.body_line(format!(
        "{}.duration.With(\"error\", {}).Observe({}.Seconds())",
        recv, label, took
    ));

    if rets.is_empty() {
        func
    } else {
        func.body_line(format!("return {}", rets.join(", ")))
    }
}
