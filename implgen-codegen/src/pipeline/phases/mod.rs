//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs lints over the manifest
//! - [`LowerPhase`] - builds the interface model from the manifest

mod lower;
mod validate;

pub use lower::LowerPhase;
pub use validate::{
    EmptyInterfaceLint, GeneratedNameCollisionLint, IdentifierNamingLint, Lint, LintInfo,
    RecorderCollisionLint, UnexportedMethodLint, UnknownOverrideLint, ValidatePhase,
};
