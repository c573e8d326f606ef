//! Interface model types for the implgen generator.
//!
//! This crate provides the language-level description of the interfaces
//! that the renderers consume. The model is built once by a front end
//! (see `implgen-manifest`) and read by every renderer invocation.
//!
//! # Architecture
//!
//! ```text
//! implgen.toml → implgen-manifest (parsing) → implgen-model (interfaces) → codegen
//! ```
//!
//! The model types are designed to be:
//! - Fully expanded (embedded interfaces are resolved before rendering)
//! - Typed (error and context recognition are predicates on [`TypeExpr`])
//! - Self-contained (no dependencies beyond serde)

mod interface;
mod package;
mod types;

pub use interface::{Interface, Method, Parameter, TypeParam};
pub use package::{PackageMap, default_package_name};
pub use types::{ChanDir, TypeExpr};
