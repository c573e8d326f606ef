use std::path::{Path, PathBuf};

use implgen_codegen::builder::{CodeBuilder, CodeFragment};
use implgen_core::{FileRules, GeneratedFile};
use implgen_model::PackageMap;

/// First line of every generated file, recognized by Go tooling.
pub const GENERATED_HEADER: &str = "// Code generated by implgen. DO NOT EDIT.";

/// A generated Go source file.
#[derive(Debug, Clone)]
pub struct GoSource {
    path: PathBuf,
    package: String,
    source: Option<String>,
    /// Describes the file in the package comment, e.g. `GoMock`
    family: Option<String>,
    imports: PackageMap,
    body: Vec<CodeFragment>,
}

impl GoSource {
    pub fn new(path: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
            source: None,
            family: None,
            imports: PackageMap::new(),
            body: Vec::new(),
        }
    }

    /// Note the declaring source in the header.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Emit `// Package <pkg> is a generated <family> package.`
    pub fn package_comment(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn imports(mut self, imports: PackageMap) -> Self {
        self.imports = imports;
        self
    }

    pub fn body(mut self, body: Vec<CodeFragment>) -> Self {
        self.body = body;
        self
    }

    /// Path relative to the output directory.
    pub fn relative_path(&self) -> &Path {
        &self.path
    }
}

impl GeneratedFile for GoSource {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    fn rules(&self) -> FileRules {
        FileRules::if_changed()
    }

    fn render(&self) -> String {
        let mut builder = CodeBuilder::go();
        builder.push_line(GENERATED_HEADER);
        if let Some(source) = &self.source {
            builder.push_comment(&format!("Source: {}", source));
        }
        builder.push_blank();

        if let Some(family) = &self.family {
            builder.push_comment(&format!(
                "Package {} is a generated {} package.",
                self.package, family
            ));
        }
        builder.push_line(&format!("package {}", self.package));

        if !self.imports.is_empty() {
            builder.push_blank();
            builder.apply_fragment(CodeFragment::block(
                "import (",
                self.imports
                    .iter()
                    .map(|(path, alias)| CodeFragment::line(format!("{} \"{}\"", alias, path)))
                    .collect(),
                Some(")".to_string()),
            ));
        }

        if !self.body.is_empty() {
            builder.push_blank();
            for fragment in self.body.iter().cloned() {
                builder.apply_fragment(fragment);
            }
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use implgen_core::WriteResult;

    #[test]
    fn test_render_full_file() {
        let mut imports = PackageMap::new();
        imports.insert("reflect", "reflect");
        imports.insert("go.uber.org/mock/gomock", "gomock");

        let file = GoSource::new("mock_gen.go", "mock_post")
            .source("post.go")
            .package_comment("GoMock")
            .imports(imports)
            .body(vec![CodeFragment::line("type MockService struct{}")]);

        insta::assert_snapshot!(file.render(), @r#"
// Code generated by implgen. DO NOT EDIT.
// Source: post.go

// Package mock_post is a generated GoMock package.
package mock_post

import (
	gomock "go.uber.org/mock/gomock"
	reflect "reflect"
)

type MockService struct{}
"#);
    }

    #[test]
    fn test_render_without_imports_or_comment() {
        let file = GoSource::new("mock_gen.go", "mocks");
        assert_eq!(
            file.render(),
            "// Code generated by implgen. DO NOT EDIT.\n\npackage mocks\n"
        );
    }

    #[test]
    fn test_write_skips_unchanged() {
        let temp = TempDir::new().unwrap();
        let file = GoSource::new("gen/mock_gen.go", "mocks");

        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Unchanged);
        assert!(temp.path().join("gen").join("mock_gen.go").exists());
    }
}
