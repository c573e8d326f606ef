//! Core utilities and types for the implgen generator.
//!
//! This crate provides fundamental types and utilities used across
//! the implgen workspace.

mod file;
mod utils;

// File operations
pub use file::{FileRules, GeneratedFile, Overwrite, WriteResult};
// String utilities
pub use utils::to_snake_case;
