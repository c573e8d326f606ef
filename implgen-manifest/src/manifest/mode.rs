//! Artifact family and trace strategy selection.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The family of artifacts to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Call-recording test double with an expectation recorder
    #[default]
    Mock,
    /// OpenTelemetry tracing decorator
    Trace,
    /// Prometheus duration histogram decorator
    Metrics,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [Self::Mock, Self::Trace, Self::Metrics];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Mock => "mock",
            ArtifactKind::Trace => "trace",
            ArtifactKind::Metrics => "metrics",
        }
    }

    /// Prefix of the generated type name, e.g. `Mock` in `MockService`.
    pub fn type_prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Mock => "Mock",
            ArtifactKind::Trace => "Traced",
            ArtifactKind::Metrics => "Metrics",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "mocks" => Ok(ArtifactKind::Mock),
            "trace" | "tracing" => Ok(ArtifactKind::Trace),
            "metrics" => Ok(ArtifactKind::Metrics),
            _ => Err(format!(
                "unknown mode '{}', expected 'mock', 'trace' or 'metrics'",
                s
            )),
        }
    }
}

/// Names of the Go declarations generated for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedNames {
    /// The generated concrete type
    pub type_name: String,
    /// Interface mirroring the original, used as the delegate type
    pub mirror: Option<String>,
    /// Expectation recorder type (mocks only)
    pub recorder: Option<String>,
}

impl GeneratedNames {
    /// Every package-level name this artifact declares.
    pub fn declared(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.type_name.as_str())
            .chain(self.mirror.as_deref())
            .chain(self.recorder.as_deref())
    }
}

impl ArtifactKind {
    /// Names generated for `interface`, honoring an explicit type name.
    ///
    /// Decorators default to `<Prefix><Name>Impl` so the mirror interface
    /// can keep `<Prefix><Name>`.
    pub fn generated_names(
        &self,
        interface: &str,
        strategy: TraceStrategy,
        type_name: Option<&str>,
    ) -> GeneratedNames {
        let prefixed = format!("{}{}", self.type_prefix(), interface);
        match self {
            ArtifactKind::Mock => {
                let type_name = type_name.map_or(prefixed, str::to_string);
                GeneratedNames {
                    recorder: Some(format!("{}MockRecorder", type_name)),
                    type_name,
                    mirror: None,
                }
            }
            ArtifactKind::Trace | ArtifactKind::Metrics => {
                let mirror = match (self, strategy) {
                    (ArtifactKind::Trace, TraceStrategy::Unconditional) => None,
                    _ => Some(prefixed.clone()),
                };
                GeneratedNames {
                    type_name: type_name.map_or_else(|| format!("{}Impl", prefixed), str::to_string),
                    mirror,
                    recorder: None,
                }
            }
        }
    }
}

/// How the tracing decorator opens spans.
///
/// The two strategies are alternatives; a run uses exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraceStrategy {
    /// Spans only for methods whose first parameter is a `context.Context`;
    /// errors are recorded on the span.
    #[default]
    ContextAware,
    /// A span for every method, using a tracer held by the decorator.
    Unconditional,
}

impl TraceStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceStrategy::ContextAware => "context-aware",
            TraceStrategy::Unconditional => "unconditional",
        }
    }
}

impl fmt::Display for TraceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TraceStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "context-aware" | "a" => Ok(TraceStrategy::ContextAware),
            "unconditional" | "b" => Ok(TraceStrategy::Unconditional),
            _ => Err(format!(
                "unknown trace strategy '{}', expected 'context-aware' or 'unconditional'",
                s
            )),
        }
    }
}
