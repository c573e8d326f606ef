//! Command operations, separated from argument parsing and rendering.
//!
//! Each operation returns a report that the command renders.

mod check;
mod generate;

pub use check::check;
pub use generate::generate;
