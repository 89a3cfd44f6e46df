//! # sprout-gen
//!
//! Heuristic test scaffolding from sprout's structural model.
//!
//! - [`TestDataSynthesizer`] maps parameter names to sample values through an
//!   ordered rule table, with an injectable random source.
//! - [`TestCaseBuilder`] composes happy-path and edge cases for functions and
//!   per-method cases for classes.
//! - [`TemplateRenderer`] writes the cases out as a pytest module.
//!
//! ```
//! use sprout_core::FunctionDescriptor;
//! use sprout_gen::{TemplateRenderer, TestCaseBuilder};
//!
//! let f = FunctionDescriptor::new("total").with_parameters(["items"]);
//! let cases = TestCaseBuilder::with_seed(7).generate_test_cases(Some(&f), 3)?;
//! let module = TemplateRenderer::new().render_module(&cases);
//! assert!(module.contains("def test_total_empty_input():"));
//! # Ok::<(), sprout_gen::GeneratorError>(())
//! ```

pub mod assertions;
pub mod builder;
pub mod class_cases;
pub mod error;
pub mod renderer;
pub mod synthesizer;

pub use assertions::RuntimeCheck;
pub use builder::{DEFAULT_CASE_COUNT, TestCaseBuilder, ensure_unique_names};
pub use class_cases::MethodRole;
pub use error::GeneratorError;
pub use renderer::TemplateRenderer;
pub use synthesizer::{Heuristic, TestDataSynthesizer};
