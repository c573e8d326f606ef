//! Generate command report data structures.

use std::path::PathBuf;

use implgen_manifest::ArtifactKind;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Artifact family generated.
    pub mode: ArtifactKind,
    /// Interfaces rendered, in manifest order.
    pub interfaces: Vec<String>,
    /// Warning diagnostics from the pipeline.
    pub warnings: Vec<String>,
    pub result: GenerationResult,
}

/// Where the generated code went.
#[derive(Debug)]
pub enum GenerationResult {
    /// The file was written, or already up to date.
    Written {
        written: Vec<PathBuf>,
        unchanged: Vec<PathBuf>,
    },
    /// No destination: the file goes to stdout.
    Stdout(String),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Stdout(content) => out.raw(content),
            GenerationResult::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.raw(&file.content);
                }
                out.divider("Summary");
                out.preformatted(&format!(
                    "{} file(s) would be generated for {} interface(s)",
                    files.len(),
                    self.interfaces.len()
                ));
            }
            GenerationResult::Written { written, unchanged } => {
                for path in written {
                    out.key_value("Generated", &path.display().to_string());
                }
                for path in unchanged {
                    out.key_value("Unchanged", &path.display().to_string());
                }
                out.newline();
                out.section(&format!(
                    "{} ({})",
                    capitalize(self.mode.as_str()),
                    self.interfaces.len()
                ));
                for name in &self.interfaces {
                    out.list_item(name);
                }
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
