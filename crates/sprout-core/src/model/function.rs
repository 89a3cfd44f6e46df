use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single named parameter of a function definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterDescriptor {
    pub name: String,
    /// Annotation text, e.g. `float` or `List[int]`.
    pub type_hint: Option<String>,
    /// Default value source text, e.g. `0.1`.
    pub default_value: Option<String>,
}

impl ParameterDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            default_value: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, type_hint: impl Into<String>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }
}

/// A function or method definition.
///
/// `complexity` is always at least 1.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FunctionDescriptor {
    pub name: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: Option<String>,
    pub docstring: Option<String>,
    pub complexity: u32,
    pub is_async: bool,
    pub is_generator: bool,
    pub is_coroutine: bool,
    pub is_property: bool,
    pub is_static: bool,
    pub is_class_method: bool,
    pub exceeds_length_limit: bool,
    /// Defined directly in a class body.
    pub is_method: bool,
    /// Decorator expressions without the leading `@`.
    pub decorators: Vec<String>,
    /// Source text of the whole definition.
    pub body: String,
    pub start_line: u32,
    pub end_line: u32,
}

impl FunctionDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            docstring: None,
            complexity: 1,
            is_async: false,
            is_generator: false,
            is_coroutine: false,
            is_property: false,
            is_static: false,
            is_class_method: false,
            exceeds_length_limit: false,
            is_method: false,
            decorators: Vec::new(),
            body: String::new(),
            start_line: 0,
            end_line: 0,
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Append untyped parameters by name.
    #[must_use]
    pub fn with_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters
            .extend(names.into_iter().map(ParameterDescriptor::new));
        self
    }

    #[must_use]
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    #[must_use]
    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    /// Mark as `async def`; coroutines are exactly the async functions.
    #[must_use]
    pub const fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self.is_coroutine = true;
        self
    }

    #[must_use]
    pub const fn as_method(mut self) -> Self {
        self.is_method = true;
        self
    }

    #[must_use]
    pub const fn has_docstring(&self) -> bool {
        self.docstring.is_some()
    }

    /// Parameters a caller passes explicitly: the receiver (`self` / `cls`)
    /// of a non-static method is dropped.
    #[must_use]
    pub fn call_parameters(&self) -> &[ParameterDescriptor] {
        if self.is_method && !self.is_static && !self.parameters.is_empty() {
            &self.parameters[1..]
        } else {
            &self.parameters
        }
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
