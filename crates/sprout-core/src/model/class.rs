use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::FunctionDescriptor;

/// A class definition and the methods defined directly in its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassDescriptor {
    pub name: String,
    pub methods: Vec<FunctionDescriptor>,
    /// Base class expressions as written, keyword arguments excluded.
    pub base_classes: Vec<String>,
    pub docstring: Option<String>,
    pub is_test_class: bool,
    pub start_line: u32,
    pub end_line: u32,
}

impl ClassDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            base_classes: Vec::new(),
            docstring: None,
            is_test_class: false,
            start_line: 0,
            end_line: 0,
        }
    }

    /// Append a method; the descriptor is marked as a method.
    #[must_use]
    pub fn with_method(mut self, method: FunctionDescriptor) -> Self {
        self.methods.push(method.as_method());
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_classes.push(base.into());
        self
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// The `__init__` method, if defined.
    #[must_use]
    pub fn constructor(&self) -> Option<&FunctionDescriptor> {
        self.method("__init__")
    }
}
