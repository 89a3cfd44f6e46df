//! Analysis rules consumed by the structural analyzer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default maximum number of lines a definition may span.
const fn default_max_function_length() -> usize {
    50
}

const fn default_check_docstrings() -> bool {
    true
}

/// Options recognized by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct AnalysisRules {
    /// A function whose definition spans more lines than this is flagged
    /// with `exceeds_length_limit`.
    #[serde(default = "default_max_function_length")]
    pub max_function_length: usize,

    /// Collect undocumented classes and functions into
    /// `CodeStructure::missing_docstrings`.
    #[serde(default = "default_check_docstrings")]
    pub check_docstrings: bool,
}

impl Default for AnalysisRules {
    fn default() -> Self {
        Self {
            max_function_length: default_max_function_length(),
            check_docstrings: default_check_docstrings(),
        }
    }
}
