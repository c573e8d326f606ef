//! Output management utilities.
//!
//! - [`ImportCollector`] - Import path tracking and alias assignment

mod imports;

pub use imports::ImportCollector;
