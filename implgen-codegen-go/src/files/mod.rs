//! Files written by the Go generator.

mod go_source;

pub use go_source::{GENERATED_HEADER, GoSource};
