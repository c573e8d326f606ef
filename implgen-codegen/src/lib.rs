//! Shared code generation utilities for the implgen generator.
//!
//! This crate provides the language-agnostic half of generation, used by
//! the Go generator in `implgen-codegen-go`.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`generation`] - Import collection and alias resolution
//! - [`language`] - The generator trait and identifier allocation
//! - [`pipeline`] - Validate and lower phases from manifest to interface model

pub mod builder;
pub mod generation;
pub mod language;
pub mod pipeline;
