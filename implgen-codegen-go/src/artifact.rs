//! The renderer interface shared by the three artifact families.

use implgen_codegen::{builder::CodeFragment, generation::ImportCollector};
use implgen_manifest::{ArtifactKind, TraceStrategy};
use implgen_model::Interface;

use crate::{MetricsRenderer, MockRenderer, RenderContext, TraceRenderer};

/// Renders one artifact family for a single interface.
///
/// Rendering never fails: the interface model is validated before it gets
/// here.
pub trait ArtifactRenderer {
    fn kind(&self) -> ArtifactKind;

    /// Add the packages the rendered code refers to for `interface`.
    ///
    /// Go rejects unused imports, so only packages the output actually uses
    /// are added. Packages of the interface's own types are added by
    /// [`type_imports`].
    fn runtime_imports(&self, interface: &Interface, imports: &mut ImportCollector);

    /// Render every declaration for `interface`, separated by blank lines.
    fn render(&self, interface: &Interface, ctx: &RenderContext<'_>) -> Vec<CodeFragment>;
}

/// The renderer for a mode.
pub fn renderer_for(kind: ArtifactKind, strategy: TraceStrategy) -> Box<dyn ArtifactRenderer> {
    match kind {
        ArtifactKind::Mock => Box::new(MockRenderer),
        ArtifactKind::Trace => Box::new(TraceRenderer::new(strategy)),
        ArtifactKind::Metrics => Box::new(MetricsRenderer),
    }
}

/// Add every package referenced by the types of `interface`.
pub fn type_imports(interface: &Interface, imports: &mut ImportCollector) {
    for tp in &interface.type_params {
        imports.extend(tp.constraint.packages());
    }
    for method in &interface.methods {
        for param in method.params.iter().chain(method.variadic.as_ref()) {
            imports.extend(param.ty.packages());
        }
        for ret in &method.returns {
            imports.extend(ret.packages());
        }
    }
}
