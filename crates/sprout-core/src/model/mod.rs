//! Structural model produced by analysis.
//!
//! Every record here is built once per analysis call and never mutated
//! afterwards; the builder-style constructors exist for callers that
//! assemble descriptors by hand (tests, other front ends).

mod class;
mod function;
mod import;
mod structure;

pub use class::ClassDescriptor;
pub use function::{FunctionDescriptor, ParameterDescriptor};
pub use import::ImportDescriptor;
pub use structure::CodeStructure;
