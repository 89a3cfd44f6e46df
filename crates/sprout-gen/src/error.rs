//! Generator error types for sprout-gen.

/// Errors raised before any test synthesis work starts.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// No function was given, or it has no name.
    #[error("No target function to generate tests for")]
    NullTarget,
}
