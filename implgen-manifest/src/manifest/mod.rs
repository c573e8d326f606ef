//! Manifest types and parsing for implgen.toml files.

mod file;
mod mode;
mod parse;
mod validate;

use std::path::PathBuf;

pub use file::ImplgenToml;
use implgen_model::default_package_name;
use indexmap::IndexMap;
pub use mode::{ArtifactKind, GeneratedNames, TraceStrategy};
pub use parse::parse_manifest;
use serde::Deserialize;
pub use validate::{GO_KEYWORDS, ParseContext, is_go_keyword, validate_identifier};

use crate::types::TypeScope;

/// Root manifest for implgen.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Output settings
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Generated type name overrides (interface name → type name)
    #[serde(default)]
    pub names: IndexMap<String, String>,

    /// Package qualifiers usable in type strings (qualifier → import path)
    #[serde(default)]
    pub imports: IndexMap<String, String>,

    /// Interfaces in declaration order
    #[serde(default)]
    pub interfaces: IndexMap<String, InterfaceDecl>,
}

impl Manifest {
    /// Interfaces to generate, in declaration order.
    ///
    /// When `generate.interfaces` is set only the listed ones are returned;
    /// the others remain available as embedding targets.
    pub fn selected_interfaces(&self) -> Vec<(&str, &InterfaceDecl)> {
        match &self.generate.interfaces {
            Some(selected) => self
                .interfaces
                .iter()
                .filter(|(name, _)| selected.contains(name))
                .map(|(name, decl)| (name.as_str(), decl))
                .collect(),
            None => self
                .interfaces
                .iter()
                .map(|(name, decl)| (name.as_str(), decl))
                .collect(),
        }
    }

    /// Names of the declarations generated for `interface` in the configured mode.
    pub fn generated_names(&self, interface: &str) -> GeneratedNames {
        self.generate.mode.generated_names(
            interface,
            self.generate.trace_strategy,
            self.names.get(interface).map(String::as_str),
        )
    }

    /// Names visible to the type strings of an interface.
    pub fn type_scope<'a>(&'a self, decl: &'a InterfaceDecl) -> TypeScope<'a> {
        TypeScope::new(&self.imports, self.generate.source_package.as_deref())
            .with_type_params(decl.type_params.iter().map(|tp| tp.name.as_str()))
    }
}

/// The `[generate]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Artifact family to emit
    #[serde(default)]
    pub mode: ArtifactKind,

    /// Span strategy used in trace mode
    #[serde(default)]
    pub trace_strategy: TraceStrategy,

    /// Package name of the generated file
    pub package: Option<String>,

    /// Import path of the generated file's package
    pub self_package: Option<String>,

    /// Import path of the package declaring the interfaces
    pub source_package: Option<String>,

    /// Source file noted in the generated header
    pub source: Option<String>,

    /// Output file; stdout when absent
    pub destination: Option<PathBuf>,

    /// Emit a `// Package x is a generated ...` comment
    #[serde(default = "default_true")]
    pub write_package_comment: bool,

    /// Restrict generation to these interfaces
    pub interfaces: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            mode: ArtifactKind::default(),
            trace_strategy: TraceStrategy::default(),
            package: None,
            self_package: None,
            source_package: None,
            source: None,
            destination: None,
            write_package_comment: true,
            interfaces: None,
        }
    }
}

impl GenerateConfig {
    /// Package name of the generated file.
    ///
    /// Defaults to `mock_<source package name>`, or `mocks` without a
    /// source package.
    pub fn package_name(&self) -> String {
        if let Some(package) = &self.package {
            return package.clone();
        }
        match &self.source_package {
            Some(source) => format!("mock_{}", default_package_name(source)),
            None => "mocks".to_string(),
        }
    }

    /// Import path the generated code lives in; empty when unknown.
    pub fn output_package(&self) -> &str {
        self.self_package.as_deref().unwrap_or_default()
    }
}

/// An `[interfaces.<Name>]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceDecl {
    #[serde(default)]
    pub type_params: Vec<TypeParamDecl>,

    /// Interfaces from this manifest whose methods are included
    #[serde(default)]
    pub embeds: Vec<String>,

    #[serde(default)]
    pub methods: IndexMap<String, MethodDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeParamDecl {
    pub name: String,
    #[serde(default = "default_constraint")]
    pub constraint: String,
}

fn default_constraint() -> String {
    "any".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDecl {
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default)]
    pub returns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDecl {
    pub name: Option<String>,
    /// Go type; `...T` marks the variadic parameter
    #[serde(rename = "type")]
    pub ty: String,
}
