//! Recognized source languages.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A language sprout recognizes by name.
///
/// Only [`Language::Python`] has a parser; the others are declared so callers
/// get a typed "unsupported" answer instead of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Python,
    TypeScript,
}

impl Language {
    /// Whether a parser exists for this language.
    #[must_use]
    pub const fn is_implemented(self) -> bool {
        matches!(self, Self::Python)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Python => "python",
            Self::TypeScript => "typescript",
        };
        write!(f, "{s}")
    }
}
