//! Check command report data structures.

use std::path::PathBuf;

use implgen_codegen::pipeline::{Diagnostic, Severity};
use implgen_manifest::ArtifactKind;
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Configured artifact family.
    pub mode: ArtifactKind,
    /// Interfaces that would be generated; empty when validation failed.
    pub interfaces: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for diag in &self.diagnostics {
            let text = match &diag.location {
                Some(loc) => format!("{}\n  --> {}", diagnostic_line(diag), loc),
                None => diagnostic_line(diag),
            };
            match diag.severity {
                Severity::Error | Severity::Warning => out.warning(&text),
                Severity::Info => out.preformatted(&text),
            }
        }

        if !self.is_valid() {
            return;
        }
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.key_value("Mode", self.mode.as_str());
        out.section(&format!(
            "Interfaces ({})",
            self.interfaces.len()
        ));
        for name in &self.interfaces {
            out.list_item(name);
        }
    }
}

fn diagnostic_line(diag: &Diagnostic) -> String {
    match diag.lint {
        Some(lint) => format!("{}[{}]: {}", diag.severity, lint, diag.message),
        None => format!("{}: {}", diag.severity, diag.message),
    }
}
