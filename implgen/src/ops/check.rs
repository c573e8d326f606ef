//! Check operation - manifest validation.

use std::path::Path;

use implgen_codegen::pipeline::{Diagnostic, Pipeline};
use implgen_manifest::Manifest;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline and keeps every diagnostic, including those of a
/// failed phase.
pub fn check(manifest: &Manifest, config_path: &Path) -> CheckReport {
    let (ctx, err) = Pipeline::new().check(manifest.clone());

    let mut diagnostics = ctx.diagnostics;
    if let Some(err) = err {
        tracing::debug!(error = %err, "validation failed");
        if !diagnostics.iter().any(|d| d.severity.is_error()) {
            diagnostics.push(Diagnostic::error("pipeline", format!("{:#}", err)));
        }
    }

    CheckReport {
        config_path: config_path.to_path_buf(),
        mode: manifest.generate.mode,
        interfaces: ctx
            .interfaces
            .unwrap_or_default()
            .into_iter()
            .map(|i| i.name)
            .collect(),
        diagnostics,
    }
}
