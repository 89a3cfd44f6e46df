//! Test generation settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default number of cases per function.
const fn default_count() -> usize {
    3
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct GenerationConfig {
    /// Minimum number of cases generated per function.
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Fixed seed for reproducible sample data. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            seed: None,
        }
    }
}
