use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One imported module.
///
/// `import a.b as c` yields module `a.b` with names `{c}`;
/// `from a.b import x, y` yields module `a.b` with names `{x, y}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImportDescriptor {
    pub module: String,
    pub names: BTreeSet<String>,
    pub is_from_import: bool,
}

impl ImportDescriptor {
    /// First segment of the module path, ignoring relative-import dots.
    ///
    /// Returns `None` for `from . import x`.
    #[must_use]
    pub fn root_module(&self) -> Option<&str> {
        self.module
            .trim_start_matches('.')
            .split('.')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}
