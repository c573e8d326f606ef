//! `implgen.toml` parsing for the implgen generator.
//!
//! The manifest declares interfaces with Go type strings. Parsing validates
//! names and types and reports failures as [`miette`] diagnostics pointing
//! into the file; turning declarations into the interface model happens in
//! the code generation pipeline.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
pub mod types;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    ArtifactKind, GO_KEYWORDS, GenerateConfig, GeneratedNames, ImplgenToml, InterfaceDecl, Manifest, MethodDecl,
    ParamDecl, ParseContext, TraceStrategy, TypeParamDecl, is_go_keyword, parse_manifest,
    validate_identifier,
};
pub use types::{ParamType, TypeError, TypeScope, parse_param_type, parse_type};
