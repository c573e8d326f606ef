//! Snapshot tests for Go code generation.
//!
//! Each test lowers a manifest through the pipeline and renders the whole
//! generated file. Run `cargo insta review` after intentional changes.

use std::str::FromStr;

use implgen_codegen::pipeline::Pipeline;
use implgen_codegen_go::{Generator, LanguageCodegen};
use implgen_manifest::Manifest;

/// Lower `manifest_toml` and render the single generated file.
fn generate(manifest_toml: &str) -> String {
    let manifest = Manifest::from_str(manifest_toml).expect("Failed to parse manifest");
    let mut ctx = Pipeline::new()
        .run(manifest)
        .expect("Pipeline should succeed");
    let interfaces = ctx.take_interfaces().expect("lowered interfaces");

    let files = Generator::new(&ctx.manifest, &interfaces).preview();
    assert_eq!(files.len(), 1);
    files.into_iter().next().map(|f| f.content).unwrap_or_default()
}

const STORE: &str = r#"
[imports]
post = "example.com/app/post"

[interfaces.Store.methods.Get]
params = [{ name = "ctx", type = "context.Context" }, { name = "id", type = "int" }]
returns = ["*post.Post", "error"]

[interfaces.Store.methods.Len]
returns = ["int"]
"#;

fn with_generate(generate_section: &str) -> String {
    format!("[generate]\n{}\n{}", generate_section, STORE)
}

#[test]
fn test_mock_file() {
    let out = generate(&with_generate(
        r#"
source = "post.go"
package = "mock_post"
self_package = "example.com/app/post/mock_post"
"#,
    ));

    insta::assert_snapshot!(out, @r#"
// Code generated by implgen. DO NOT EDIT.
// Source: post.go

// Package mock_post is a generated GoMock package.
package mock_post

import (
	context "context"
	post "example.com/app/post"
	gomock "go.uber.org/mock/gomock"
	reflect "reflect"
)

// MockStore is a mock of Store interface.
type MockStore struct {
	ctrl     *gomock.Controller
	recorder *MockStoreMockRecorder
}

// MockStoreMockRecorder is the mock recorder for MockStore.
type MockStoreMockRecorder struct {
	mock *MockStore
}

// NewMockStore creates a new mock instance.
func NewMockStore(ctrl *gomock.Controller) *MockStore {
	mock := &MockStore{ctrl: ctrl}
	mock.recorder = &MockStoreMockRecorder{mock}
	return mock
}

// EXPECT returns an object that allows the caller to indicate expected use.
func (m *MockStore) EXPECT() *MockStoreMockRecorder {
	return m.recorder
}

// Get mocks base method.
func (m *MockStore) Get(ctx context.Context, id int) (*post.Post, error) {
	m.ctrl.T.Helper()
	ret := m.ctrl.Call(m, "Get", ctx, id)
	ret0, _ := ret[0].(*post.Post)
	ret1, _ := ret[1].(error)
	return ret0, ret1
}

// Get indicates an expected call of Get.
func (mr *MockStoreMockRecorder) Get(ctx, id interface{}) *gomock.Call {
	mr.mock.ctrl.T.Helper()
	return mr.mock.ctrl.RecordCallWithMethodType(mr.mock, "Get", reflect.TypeOf((*MockStore)(nil).Get), ctx, id)
}

// Len mocks base method.
func (m *MockStore) Len() int {
	m.ctrl.T.Helper()
	ret := m.ctrl.Call(m, "Len")
	ret0, _ := ret[0].(int)
	return ret0
}

// Len indicates an expected call of Len.
func (mr *MockStoreMockRecorder) Len() *gomock.Call {
	mr.mock.ctrl.T.Helper()
	return mr.mock.ctrl.RecordCallWithMethodType(mr.mock, "Len", reflect.TypeOf((*MockStore)(nil).Len))
}
"#);
}

#[test]
fn test_trace_context_aware_file() {
    let out = generate(&with_generate(
        r#"
mode = "trace"
package = "tracing"
"#,
    ));

    insta::assert_snapshot!(out, @r#"
// Code generated by implgen. DO NOT EDIT.

// Package tracing is a generated tracing decorator package.
package tracing

import (
	context "context"
	post "example.com/app/post"
	otel "go.opentelemetry.io/otel"
	codes "go.opentelemetry.io/otel/codes"
)

// TracedStore mirrors Store and is the delegate type of its tracing decorator.
type TracedStore interface {
	Get(ctx context.Context, id int) (*post.Post, error)
	Len() int
}

// TracedStoreImpl is a tracing decorator of Store interface.
type TracedStoreImpl struct {
	delegate TracedStore
}

// NewTracedStoreImpl creates a new trace decorator instance.
func NewTracedStoreImpl(delegate TracedStore) *TracedStoreImpl {
	return &TracedStoreImpl{delegate: delegate}
}

// Get traced base method.
func (t *TracedStoreImpl) Get(ctx context.Context, id int) (*post.Post, error) {
	tracer := otel.Tracer("TracedStoreImpl")
	ctx, span := tracer.Start(ctx, "Get")
	defer span.End()
	ret, ret2 := t.delegate.Get(ctx, id)
	if ret2 != nil {
		span.RecordError(ret2)
		span.SetStatus(codes.Error, ret2.Error())
	}
	return ret, ret2
}

// Len traced base method.
func (t *TracedStoreImpl) Len() int {
	ret := t.delegate.Len()
	return ret
}
"#);
}

#[test]
fn test_trace_unconditional_file() {
    let out = generate(&with_generate(
        r#"
mode = "trace"
trace_strategy = "unconditional"
package = "tracing"
source_package = "example.com/app/store"
write_package_comment = false
"#,
    ));

    insta::assert_snapshot!(out, @r#"
// Code generated by implgen. DO NOT EDIT.

package tracing

import (
	context "context"
	post "example.com/app/post"
	store "example.com/app/store"
	otel "go.opentelemetry.io/otel"
	trace "go.opentelemetry.io/otel/trace"
)

// TracedStoreImpl is a tracing decorator of Store interface.
type TracedStoreImpl struct {
	delegate store.Store
	tracer   trace.Tracer
}

// NewTracedStoreImpl creates a new trace decorator instance.
func NewTracedStoreImpl(delegate store.Store) *TracedStoreImpl {
	return &TracedStoreImpl{
		delegate: delegate,
		tracer:   otel.Tracer("TracedStoreImpl"),
	}
}

// Get traced base method.
func (t *TracedStoreImpl) Get(ctx context.Context, id int) (*post.Post, error) {
	ctx, span := t.tracer.Start(ctx, "Get")
	defer span.End()
	return t.delegate.Get(ctx, id)
}

// Len traced base method.
func (t *TracedStoreImpl) Len() int {
	_, span := t.tracer.Start(context.Background(), "Len")
	defer span.End()
	return t.delegate.Len()
}
"#);
}

#[test]
fn test_metrics_file() {
    let out = generate(&with_generate(
        r#"
mode = "metrics"
package = "metering"
write_package_comment = false
"#,
    ));

    insta::assert_snapshot!(out, @r#"
// Code generated by implgen. DO NOT EDIT.

package metering

import (
	context "context"
	post "example.com/app/post"
	metrics "github.com/go-kit/kit/metrics"
	prometheus "github.com/go-kit/kit/metrics/prometheus"
	stdprometheus "github.com/prometheus/client_golang/prometheus"
	time "time"
)

// MetricsStore mirrors Store and is the delegate type of its metrics decorator.
type MetricsStore interface {
	Get(ctx context.Context, id int) (*post.Post, error)
	Len() int
}

// MetricsStoreImpl is a metrics decorator of Store interface.
type MetricsStoreImpl struct {
	delegate MetricsStore
	duration metrics.Histogram
}

// NewMetricsStoreImpl creates a new metrics decorator instance.
func NewMetricsStoreImpl(delegate MetricsStore) *MetricsStoreImpl {
	histogram := prometheus.NewHistogramFrom(stdprometheus.HistogramOpts{
		Subsystem: "store",
		Name:      "duration_seconds",
		Help:      "Seconds spent in Store method calls.",
		Buckets:   stdprometheus.DefBuckets,
	}, []string{"error"})
	return &MetricsStoreImpl{
		delegate: delegate,
		duration: histogram,
	}
}

// Get metrics base method.
func (t *MetricsStoreImpl) Get(ctx context.Context, id int) (*post.Post, error) {
	begin := time.Now()
	ret, ret2 := t.delegate.Get(ctx, id)
	took := time.Since(begin)
	failed := "false"
	if ret2 != nil {
		failed = "true"
	}
	t.duration.With("error", failed).Observe(took.Seconds())
	return ret, ret2
}

// Len metrics base method.
func (t *MetricsStoreImpl) Len() int {
	begin := time.Now()
	ret := t.delegate.Len()
	took := time.Since(begin)
	t.duration.With("error", "N/A").Observe(took.Seconds())
	return ret
}
"#);
}

#[test]
fn test_generic_variadic_mock() {
    let out = generate(
        r#"
[generate]
package = "mocks"

[interfaces.Cache]
type_params = [{ name = "K", constraint = "comparable" }, { name = "V" }]

[interfaces.Cache.methods.Evict]
params = [{ name = "keys", type = "...K" }]

[interfaces.Cache.methods.Load]
params = [{ name = "key", type = "K" }, { name = "fallbacks", type = "...V" }]
returns = ["V", "bool"]
"#,
    );

    assert!(out.contains("type MockCache[K comparable, V any] struct {"));
    assert!(out.contains("func NewMockCache[K comparable, V any](ctrl *gomock.Controller) *MockCache[K, V] {"));
    assert!(out.contains("func (m *MockCache[K, V]) Evict(keys ...K) {"));
    assert!(out.contains("func (mr *MockCacheMockRecorder[K, V]) Evict(keys ...interface{}) *gomock.Call {"));
    assert!(out.contains("reflect.TypeOf((*MockCache[K, V])(nil).Evict), keys...)"));
    assert!(out.contains("\tvarargs := append([]interface{}{key}, fallbacks...)\n"));
    assert!(out.contains("\tret0, _ := ret[0].(V)\n\tret1, _ := ret[1].(bool)\n"));
}

#[test]
fn test_name_override_and_multiple_interfaces() {
    let out = generate(
        r#"
[generate]
mode = "metrics"
package = "metering"
write_package_comment = false

[names]
Reader = "InstrumentedReader"

[interfaces.Reader.methods.Read]
params = [{ name = "p", type = "[]byte" }]
returns = ["int", "error"]

[interfaces.Writer.methods.Write]
params = [{ type = "[]byte" }]
returns = ["int", "error"]
"#,
    );

    assert!(out.contains("type InstrumentedReader struct {"));
    assert!(out.contains("type MetricsReader interface {"));
    assert!(out.contains("type MetricsWriterImpl struct {"));
    assert!(out.contains("func (t *MetricsWriterImpl) Write(arg0 []byte) (int, error) {"));
    assert!(out.contains("Subsystem: \"writer\","));
    // One import block shared by both decorators.
    assert_eq!(out.matches("import (").count(), 1);
}

#[test]
fn test_output_ignores_method_declaration_order() {
    let forward = generate(
        r#"
[interfaces.Queue.methods.Push]
params = [{ name = "v", type = "int" }]

[interfaces.Queue.methods.Pop]
returns = ["int", "bool"]
"#,
    );
    let reversed = generate(
        r#"
[interfaces.Queue.methods.Pop]
returns = ["int", "bool"]

[interfaces.Queue.methods.Push]
params = [{ name = "v", type = "int" }]
"#,
    );

    assert_eq!(forward, reversed);
    assert!(forward.find("func (m *MockQueue) Pop()") < forward.find("func (m *MockQueue) Push("));
}
