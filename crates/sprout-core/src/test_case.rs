//! Generated test case records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::TestData;

/// One generated test function, ready for rendering.
///
/// `body` holds unindented Python statements separated by `\n`; nested
/// blocks carry their own relative indentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TestCase {
    pub test_name: String,
    /// Name of the function or method under test.
    pub function_name: String,
    pub parameters: TestData,
    pub body: String,
    pub description: String,
    pub docstring: Option<String>,
    /// Render as an `async def` test driven by pytest-asyncio.
    #[serde(default)]
    pub is_async: bool,
}

impl TestCase {
    /// Rename the case. Used only when padding a batch to keep names unique.
    pub fn rename(&mut self, test_name: impl Into<String>) {
        self.test_name = test_name.into();
    }
}
