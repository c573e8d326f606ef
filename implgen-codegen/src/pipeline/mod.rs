//! Compilation pipeline for code generation.
//!
//! The [`Pipeline`] takes a parsed manifest through explicit phases:
//!
//! - validate: lints over the manifest, collecting [`Diagnostic`]s
//! - lower: type resolution and embed expansion into [`implgen_model`]
//! - any phases added by the caller
//!
//! # Example
//!
//! ```ignore
//! use implgen_codegen::pipeline::{Pipeline, Severity};
//!
//! let mut ctx = Pipeline::new().run(manifest)?;
//!
//! for diag in &ctx.diagnostics {
//!     if matches!(diag.severity, Severity::Warning) {
//!         eprintln!("{}", diag);
//!     }
//! }
//!
//! let interfaces = ctx.take_interfaces()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use runner::Pipeline;
