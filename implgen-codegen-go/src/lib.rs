//! Go generator for implgen.
//!
//! Renders gomock mocks, OpenTelemetry tracing decorators and go-kit
//! metrics decorators from the lowered interface model.

mod artifact;
mod generator;
mod metrics;
mod mock;
mod signature;
mod trace;

pub mod files;
pub mod go_ast;
pub mod runtime;

pub use artifact::{ArtifactRenderer, renderer_for, type_imports};
pub use files::{GENERATED_HEADER, GoSource};
pub use generator::Generator;
pub use go_ast::{Field, Func, InterfaceType, Struct};
pub use implgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use metrics::MetricsRenderer;
pub use mock::MockRenderer;
pub use signature::{ParamStyle, RenderContext, Signature};
pub use trace::TraceRenderer;
