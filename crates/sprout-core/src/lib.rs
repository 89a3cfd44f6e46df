//! # sprout-core
//!
//! Core types shared across all sprout crates.
//!
//! This crate provides the foundational records that flow through the
//! analysis and generation pipeline:
//! - Structural model: parameter, function, class and import descriptors and
//!   the per-file `CodeStructure`
//! - Recognized source languages
//! - Explicit analysis rules consumed by the analyzer
//! - Synthesized sample values and the ordered `TestData` mapping
//! - Generated `TestCase` records handed to the renderer

pub mod language;
pub mod model;
pub mod rules;
pub mod sample;
pub mod test_case;

pub use language::Language;
pub use model::{
    ClassDescriptor, CodeStructure, FunctionDescriptor, ImportDescriptor, ParameterDescriptor,
};
pub use rules::AnalysisRules;
pub use sample::{Binding, SampleValue, TestData};
pub use test_case::TestCase;
