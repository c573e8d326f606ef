use std::path::{Path, PathBuf};

use eyre::Result;
use implgen_codegen::{
    builder::CodeFragment,
    generation::ImportCollector,
    language::{GenerateResult, LanguageCodegen, PreviewFile},
};
use implgen_core::{GeneratedFile, WriteResult};
use implgen_manifest::{ArtifactKind, Manifest};
use implgen_model::Interface;

use crate::{GoSource, RenderContext, renderer_for, type_imports};

/// Go code generator producing one file per run with the configured
/// artifact family for every lowered interface.
pub struct Generator<'a> {
    manifest: &'a Manifest,
    interfaces: &'a [Interface],
}

impl LanguageCodegen for Generator<'_> {
    fn preview(&self) -> Vec<PreviewFile> {
        let source = self.source_file();
        vec![PreviewFile {
            path: source.relative_path().display().to_string(),
            content: source.render(),
        }]
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let source = self.source_file();
        let path = source.path(output_dir);

        let mut result = GenerateResult::default();
        match source.write(output_dir)? {
            WriteResult::Written => result.written.push(path),
            WriteResult::Unchanged => result.unchanged.push(path),
        }
        Ok(result)
    }
}

impl<'a> Generator<'a> {
    pub fn new(manifest: &'a Manifest, interfaces: &'a [Interface]) -> Self {
        Self {
            manifest,
            interfaces,
        }
    }

    /// File name used when no destination is configured, e.g. `mock_gen.go`.
    pub fn default_file_name(kind: ArtifactKind) -> String {
        format!("{}_gen.go", kind.as_str())
    }

    /// Output path relative to the output directory.
    pub fn output_path(&self) -> PathBuf {
        match &self.manifest.generate.destination {
            Some(destination) => destination.clone(),
            None => PathBuf::from(Self::default_file_name(self.manifest.generate.mode)),
        }
    }

    /// Render the whole generated file in memory.
    pub fn render(&self) -> String {
        self.source_file().render()
    }

    fn source_file(&self) -> GoSource {
        let config = &self.manifest.generate;
        let renderer = renderer_for(config.mode, config.trace_strategy);

        let mut imports = ImportCollector::new();
        for interface in self.interfaces {
            renderer.runtime_imports(interface, &mut imports);
            type_imports(interface, &mut imports);
        }
        let packages = imports.resolve(config.output_package());
        tracing::debug!(
            mode = %config.mode,
            interfaces = self.interfaces.len(),
            imports = packages.len(),
            "rendering go source"
        );

        let ctx = RenderContext::new(&packages, config.output_package(), &self.manifest.names);
        let mut body = Vec::new();
        for (i, interface) in self.interfaces.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::blank());
            }
            body.extend(renderer.render(interface, &ctx));
        }

        let mut file = GoSource::new(self.output_path(), config.package_name())
            .imports(packages)
            .body(body);
        if let Some(source) = &config.source {
            file = file.source(source);
        }
        if config.write_package_comment {
            file = file.package_comment(family(config.mode));
        }
        file
    }
}

/// How the package comment describes the generated code.
fn family(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Mock => "GoMock",
        ArtifactKind::Trace => "tracing decorator",
        ArtifactKind::Metrics => "metrics decorator",
    }
}

#[cfg(test)]
mod tests {
    use implgen_codegen::pipeline::Pipeline;
    use tempfile::TempDir;

    use super::*;

    fn lower(src: &str) -> (Manifest, Vec<Interface>) {
        let manifest: Manifest = src.parse().expect("valid manifest");
        let mut ctx = Pipeline::new().run(manifest).expect("pipeline should succeed");
        let interfaces = ctx.take_interfaces().unwrap();
        (ctx.manifest, interfaces)
    }

    const MANIFEST: &str = r#"
[generate]
mode = "mock"
source_package = "example.com/app/post"
self_package = "example.com/app/post/mock_post"

[interfaces.Service.methods.Get]
params = [{ name = "ctx", type = "context.Context" }, { name = "id", type = "int" }]
returns = ["*Post", "error"]
"#;

    #[test]
    fn test_default_output_path() {
        let (manifest, interfaces) = lower(MANIFEST);
        let generator = Generator::new(&manifest, &interfaces);

        assert_eq!(generator.output_path(), PathBuf::from("mock_gen.go"));
        let preview = generator.preview();
        assert_eq!(preview.len(), 1);
        assert_eq!(preview[0].path, "mock_gen.go");
    }

    #[test]
    fn test_imports_are_used() {
        let (manifest, interfaces) = lower(MANIFEST);
        let out = Generator::new(&manifest, &interfaces).render();

        assert!(out.contains("package mock_post\n"));
        assert!(out.contains("\tcontext \"context\"\n"));
        assert!(out.contains("\tpost \"example.com/app/post\"\n"));
        assert!(out.contains("\tgomock \"go.uber.org/mock/gomock\"\n"));
        assert!(out.contains("Get(ctx context.Context, id int) (*post.Post, error)"));
    }

    #[test]
    fn test_generate_writes_once() {
        let (manifest, interfaces) = lower(MANIFEST);
        let generator = Generator::new(&manifest, &interfaces);
        let temp = TempDir::new().unwrap();

        let first = generator.generate(temp.path()).unwrap();
        assert_eq!(first.written, vec![temp.path().join("mock_gen.go")]);

        let second = generator.generate(temp.path()).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.unchanged.len(), 1);
    }
}
