//! Test module naming conventions.
//!
//! Used by the CLI to skip existing test modules when generating. Content
//! based detection lives in the analyzer (`CodeStructure::is_test_file`).

/// Returns `true` if `file_name` follows pytest's module naming:
/// `test_*.py`, `*_test.py`, or `conftest.py`.
///
/// Comparison is case-insensitive.
///
/// # Examples
///
/// ```
/// use sprout_parser::is_test_module_name;
/// assert!(is_test_module_name("test_cart.py"));
/// assert!(is_test_module_name("cart_test.py"));
/// assert!(!is_test_module_name("cart.py"));
/// ```
#[must_use]
pub fn is_test_module_name(file_name: &str) -> bool {
    let name = file_name.to_lowercase();
    let Some(stem) = name.strip_suffix(".py") else {
        return false;
    };
    stem == "conftest"
        || stem.strip_prefix("test_").is_some_and(|rest| !rest.is_empty())
        || stem.strip_suffix("_test").is_some_and(|rest| !rest.is_empty())
}
