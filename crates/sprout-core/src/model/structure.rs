use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ClassDescriptor, FunctionDescriptor, ImportDescriptor};
use crate::Language;

/// The structural model of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CodeStructure {
    pub language: Language,
    /// Functions with no enclosing class, in source order. Methods are
    /// reported on their class.
    pub functions: Vec<FunctionDescriptor>,
    /// Classes at any nesting depth, in source order.
    pub classes: Vec<ClassDescriptor>,
    pub imports: Vec<ImportDescriptor>,
    /// Root module names only (`os`, never `os.path`).
    pub dependencies: BTreeSet<String>,
    pub is_test_file: bool,
    pub module_docstring: Option<String>,
    /// Qualified names (`Class.method`) lacking a docstring. Empty unless
    /// docstring checking is enabled.
    pub missing_docstrings: Vec<String>,
}

impl CodeStructure {
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Top-level functions followed by every class method.
    pub fn all_functions(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.functions
            .iter()
            .chain(self.classes.iter().flat_map(|c| c.methods.iter()))
    }

    /// Whether the file defines nothing and imports nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty() && self.imports.is_empty()
    }
}
