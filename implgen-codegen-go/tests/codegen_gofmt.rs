//! Integration tests that run `gofmt` over generated files.
//!
//! Skipped when no Go toolchain is on PATH.

use std::{process::Command, str::FromStr};

use implgen_codegen::pipeline::Pipeline;
use implgen_codegen_go::{Generator, LanguageCodegen};
use implgen_manifest::Manifest;
use tempfile::TempDir;

fn gofmt_available() -> bool {
    Command::new("gofmt")
        .arg("-h")
        .output()
        .is_ok()
}

/// Generate a file and check gofmt parses it and leaves it unchanged.
fn assert_gofmt_clean(manifest_toml: &str) {
    if !gofmt_available() {
        eprintln!("gofmt not found, skipping");
        return;
    }

    let manifest = Manifest::from_str(manifest_toml).expect("Failed to parse manifest");
    let mut ctx = Pipeline::new().run(manifest).expect("Pipeline should succeed");
    let interfaces = ctx.take_interfaces().expect("lowered interfaces");

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = Generator::new(&ctx.manifest, &interfaces)
        .generate(temp_dir.path())
        .expect("Failed to generate code");
    let path = &result.written[0];

    let output = Command::new("gofmt")
        .arg("-l")
        .arg("-e")
        .arg(path)
        .output()
        .expect("Failed to run gofmt");

    let content = std::fs::read_to_string(path).unwrap_or_default();
    assert!(
        output.status.success(),
        "gofmt rejected generated code:\n{}\n\n{}",
        String::from_utf8_lossy(&output.stderr),
        content
    );
    assert!(
        output.stdout.is_empty(),
        "generated code is not gofmt-formatted:\n{}",
        content
    );
}

const SERVICE: &str = r#"
[imports]
user = "example.com/app/user"

[interfaces.Service]
type_params = [{ name = "T", constraint = "any" }]

[interfaces.Service.methods.Create]
params = [{ name = "ctx", type = "context.Context" }, { name = "author", type = "*user.User" }, { name = "item", type = "T" }]
returns = ["T", "error"]

[interfaces.Service.methods.Log]
params = [{ name = "format", type = "string" }, { name = "args", type = "...interface{}" }]

[interfaces.Service.methods.Watch]
params = [{ name = "ctx", type = "context.Context" }]
returns = ["<-chan map[string][]T"]
"#;

#[test]
fn test_mock_is_gofmt_clean() {
    assert_gofmt_clean(&format!("[generate]\npackage = \"mocks\"\n{}", SERVICE));
}

#[test]
fn test_trace_context_aware_is_gofmt_clean() {
    assert_gofmt_clean(&format!(
        "[generate]\nmode = \"trace\"\npackage = \"tracing\"\n{}",
        SERVICE
    ));
}

#[test]
fn test_trace_unconditional_is_gofmt_clean() {
    assert_gofmt_clean(&format!(
        "[generate]\nmode = \"trace\"\ntrace_strategy = \"unconditional\"\npackage = \"tracing\"\nsource_package = \"example.com/app/svc\"\n{}",
        SERVICE
    ));
}

#[test]
fn test_metrics_is_gofmt_clean() {
    assert_gofmt_clean(&format!(
        "[generate]\nmode = \"metrics\"\npackage = \"metering\"\n{}",
        SERVICE
    ));
}
