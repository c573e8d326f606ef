//! Go declaration builders.
//!
//! - [`Func`] - functions and methods
//! - [`Struct`] / [`Field`] - struct types with aligned fields
//! - [`InterfaceType`] - interface types

mod func;
mod interfaces;
mod structs;

pub use func::Func;
pub use interfaces::InterfaceType;
pub use structs::{Field, Struct};
