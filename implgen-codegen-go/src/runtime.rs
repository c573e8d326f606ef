//! Import paths of the Go packages generated code calls into.

pub const GOMOCK: &str = "go.uber.org/mock/gomock";
pub const REFLECT: &str = "reflect";
pub const CONTEXT: &str = "context";
pub const TIME: &str = "time";

pub const OTEL: &str = "go.opentelemetry.io/otel";
pub const OTEL_CODES: &str = "go.opentelemetry.io/otel/codes";
pub const OTEL_TRACE: &str = "go.opentelemetry.io/otel/trace";

pub const KIT_METRICS: &str = "github.com/go-kit/kit/metrics";
pub const KIT_PROMETHEUS: &str = "github.com/go-kit/kit/metrics/prometheus";
pub const STD_PROMETHEUS: &str = "github.com/prometheus/client_golang/prometheus";
/// Alias keeping the client library apart from the go-kit adapter.
pub const STD_PROMETHEUS_ALIAS: &str = "stdprometheus";
