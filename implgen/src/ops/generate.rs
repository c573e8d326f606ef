//! Generate operation - render and write the Go file.

use std::path::Path;

use eyre::{Context, Result};
use implgen_codegen::pipeline::Pipeline;
use implgen_codegen_go::{Generator, LanguageCodegen};
use implgen_manifest::Manifest;

use crate::reports::{GenerateReport, GenerationResult, PreviewFile};

/// Execute the generate operation.
///
/// Without a destination the file is returned for printing instead of
/// being written. Relative destinations resolve against `base_dir`.
pub fn generate(manifest: Manifest, base_dir: &Path, dry_run: bool) -> Result<GenerateReport> {
    let (mut ctx, err) = Pipeline::new().check(manifest);
    if let Some(err) = err {
        let details: Vec<String> = ctx.errors().map(ToString::to_string).collect();
        return Err(err).wrap_err(format!("Validation failed\n  {}", details.join("\n  ")));
    }

    let warnings = ctx.warnings().map(ToString::to_string).collect();
    let interfaces = ctx.take_interfaces()?;
    let generator = Generator::new(&ctx.manifest, &interfaces);

    let result = if dry_run {
        GenerationResult::Preview(
            generator
                .preview()
                .into_iter()
                .map(|f| PreviewFile {
                    path: f.path,
                    content: f.content,
                })
                .collect(),
        )
    } else if ctx.manifest.generate.destination.is_none() {
        GenerationResult::Stdout(generator.render())
    } else {
        let written = generator
            .generate(base_dir)
            .wrap_err("Failed to generate code")?;
        GenerationResult::Written {
            written: written.written,
            unchanged: written.unchanged,
        }
    };

    Ok(GenerateReport {
        mode: ctx.manifest.generate.mode,
        interfaces: interfaces.into_iter().map(|i| i.name).collect(),
        warnings,
        result,
    })
}
