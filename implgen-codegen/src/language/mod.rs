//! Language-specific abstractions.
//!
//! - [`LanguageCodegen`] - Main trait for language code generators
//! - [`NamingConvention`] - Language-specific naming rules
//! - [`IdentifierAllocator`] - Collision-free local names
//! - [`GenerateResult`] - Result of code generation
//! - [`PreviewFile`] - Generated file preview

mod naming;
mod traits;

pub use naming::{GO_NAMING, IdentifierAllocator, NamingConvention};
pub use traits::{GenerateResult, LanguageCodegen, PreviewFile};
