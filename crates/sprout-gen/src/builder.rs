//! Composition of pytest cases from function descriptors.
//!
//! A batch for one function is the happy-path case, then the edge cases in a
//! fixed order (empty input, type error, and for numeric-looking parameters
//! negative and zero input), then happy-path variants until the requested
//! count is reached. Names are made unique across the batch last.

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;
use sprout_core::{FunctionDescriptor, SampleValue, TestCase, TestData};

use crate::assertions::{RuntimeCheck, is_collection_annotation, is_numeric_annotation};
use crate::error::GeneratorError;
use crate::synthesizer::TestDataSynthesizer;

/// Parameter name fragments that suggest a numeric argument.
pub const NUMERIC_INDICATORS: &[&str] =
    &["price", "rate", "amount", "total", "quantity", "num", "count"];

/// Parameter name fragments that suggest a collection argument.
pub const COLLECTION_INDICATORS: &[&str] =
    &["items", "list", "values", "elements", "entries", "records"];

/// Default batch size for [`TestCaseBuilder::generate_test_cases`].
pub const DEFAULT_CASE_COUNT: usize = 3;

/// Builds [`TestCase`]s, drawing sample data from its synthesizer.
#[derive(Debug, Clone)]
pub struct TestCaseBuilder<R = StdRng> {
    pub(crate) synthesizer: TestDataSynthesizer<R>,
}

impl TestCaseBuilder<StdRng> {
    #[must_use]
    pub fn new() -> Self {
        Self::from_synthesizer(TestDataSynthesizer::new())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_synthesizer(TestDataSynthesizer::with_seed(seed))
    }
}

impl Default for TestCaseBuilder<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TestCaseBuilder<R> {
    pub const fn from_synthesizer(synthesizer: TestDataSynthesizer<R>) -> Self {
        Self { synthesizer }
    }

    /// Happy-path case with freshly synthesized arguments.
    ///
    /// # Errors
    /// [`GeneratorError::NullTarget`] when the function has no name.
    pub fn generate_test_case(
        &mut self,
        function: &FunctionDescriptor,
    ) -> Result<TestCase, GeneratorError> {
        require_named(function)?;
        Ok(self.happy_path(function))
    }

    /// Happy path, every applicable edge case, then padding up to `count`.
    ///
    /// The mandatory cases are never dropped, so the result may be longer
    /// than `count`.
    ///
    /// # Errors
    /// [`GeneratorError::NullTarget`] when `function` is absent or unnamed.
    pub fn generate_test_cases(
        &mut self,
        function: Option<&FunctionDescriptor>,
        count: usize,
    ) -> Result<Vec<TestCase>, GeneratorError> {
        let function = function.ok_or(GeneratorError::NullTarget)?;
        require_named(function)?;

        let mut cases = vec![self.happy_path(function)];
        cases.extend(self.generate_edge_cases(function));
        while cases.len() < count {
            let mut variant = self.happy_path(function);
            variant.rename(format!("test_{}_{}", function.name, cases.len()));
            cases.push(variant);
        }
        ensure_unique_names(&mut cases);

        tracing::debug!(function = %function.name, cases = cases.len(), "generated test cases");
        Ok(cases)
    }

    /// Edge cases for `function`, in fixed order.
    #[must_use]
    pub fn generate_edge_cases(&self, function: &FunctionDescriptor) -> Vec<TestCase> {
        let mut cases = vec![empty_input_case(function), type_error_case(function)];
        if has_numeric_parameters(function) {
            cases.push(negative_input_case(function));
            cases.push(zero_input_case(function));
        }
        cases
    }

    fn happy_path(&mut self, function: &FunctionDescriptor) -> TestCase {
        let data = self.synthesizer.synthesize(function);
        let call = invocation(function, &function.name, &data);

        let mut body = vec![format!("result = {call}")];
        if function.is_generator {
            body.push("assert isinstance(result, list)".to_string());
        } else {
            let check = RuntimeCheck::for_annotation(function.return_type.as_deref(), None);
            body.extend(check.assertion("result"));
            if is_numeric_annotation(function.return_type.as_deref()) {
                body.push("assert result >= 0".to_string());
            }
        }

        TestCase {
            test_name: format!("test_{}", function.name),
            function_name: function.name.clone(),
            parameters: data,
            body: body.join("\n"),
            description: format!("Test {} with valid input", function.name),
            docstring: Some(happy_path_docstring(function)),
            is_async: function.is_async,
        }
    }
}

fn require_named(function: &FunctionDescriptor) -> Result<(), GeneratorError> {
    if function.name.trim().is_empty() {
        return Err(GeneratorError::NullTarget);
    }
    Ok(())
}

fn happy_path_docstring(function: &FunctionDescriptor) -> String {
    let name = &function.name;
    let mut doc = format!(
        "Test {name} functionality.\n\nTests the {name} function with valid input data."
    );
    if let Some(original) = &function.docstring {
        doc.push_str("\nOriginal function: ");
        doc.push_str(original);
    }
    doc
}

/// Expression calling `callee` with `data`; awaited or drained as needed so
/// the expression always yields a value.
pub(crate) fn invocation(function: &FunctionDescriptor, callee: &str, data: &TestData) -> String {
    let call = format!("{callee}({})", data.keyword_arguments());
    match (function.is_async, function.is_generator) {
        (true, true) => format!("[item async for item in {call}]"),
        (true, false) => format!("await {call}"),
        (false, true) => format!("list({call})"),
        (false, false) => call,
    }
}

/// `with pytest.raises(...)` block around one invocation.
pub(crate) fn raises_block(exceptions: &str, setup: &[String], expression: &str) -> String {
    let mut lines = setup.to_vec();
    lines.push(format!("with pytest.raises({exceptions}):"));
    lines.push(format!("    {expression}"));
    lines.join("\n")
}

/// Every call parameter bound to the same value.
pub(crate) fn uniform_data(function: &FunctionDescriptor, value: &SampleValue) -> TestData {
    function
        .call_parameters()
        .iter()
        .map(|p| (p.name.clone(), value.clone()))
        .collect()
}

pub(crate) fn has_numeric_parameters(function: &FunctionDescriptor) -> bool {
    function.call_parameters().iter().any(|p| {
        let name = p.name.to_lowercase();
        NUMERIC_INDICATORS.iter().any(|ind| name.contains(ind))
    })
}

fn suggests_collection(name: &str, annotation: Option<&str>) -> bool {
    let lowered = name.to_lowercase();
    COLLECTION_INDICATORS.iter().any(|ind| lowered.contains(ind))
        || annotation.is_some_and(is_collection_annotation)
}

fn edge_case(
    function: &FunctionDescriptor,
    suffix: &str,
    data: TestData,
    body: String,
    description: &str,
    docstring: &str,
) -> TestCase {
    TestCase {
        test_name: format!("test_{}_{suffix}", function.name),
        function_name: function.name.clone(),
        parameters: data,
        body,
        description: description.to_string(),
        docstring: Some(docstring.to_string()),
        is_async: function.is_async,
    }
}

fn empty_input_case(function: &FunctionDescriptor) -> TestCase {
    let data: TestData = function
        .call_parameters()
        .iter()
        .map(|p| {
            let empty = if suggests_collection(&p.name, p.type_hint.as_deref()) {
                SampleValue::List(Vec::new())
            } else {
                SampleValue::Str(String::new())
            };
            (p.name.clone(), empty)
        })
        .collect();
    let body = raises_block("ValueError", &[], &invocation(function, &function.name, &data));
    edge_case(
        function,
        "empty_input",
        data,
        body,
        "Test with empty input",
        "Test handling of empty input values.",
    )
}

fn type_error_case(function: &FunctionDescriptor) -> TestCase {
    let data = uniform_data(function, &SampleValue::None);
    let body = raises_block(
        "(TypeError, ValueError)",
        &[],
        &invocation(function, &function.name, &data),
    );
    edge_case(
        function,
        "type_error",
        data,
        body,
        "Test with invalid types",
        "Test handling of invalid input types.",
    )
}

fn negative_input_case(function: &FunctionDescriptor) -> TestCase {
    let data = uniform_data(function, &SampleValue::Int(-1));
    let body = raises_block("ValueError", &[], &invocation(function, &function.name, &data));
    edge_case(
        function,
        "negative_input",
        data,
        body,
        "Test with negative input",
        "Test handling of negative input values.",
    )
}

fn zero_input_case(function: &FunctionDescriptor) -> TestCase {
    let data = uniform_data(function, &SampleValue::Int(0));
    let body = invocation(function, &function.name, &data);
    edge_case(
        function,
        "zero_input",
        data,
        body,
        "Test with zero input",
        "Test handling of zero input values.",
    )
}

/// Rename colliding cases by appending their batch index until every name
/// in the batch is distinct.
pub fn ensure_unique_names(cases: &mut [TestCase]) {
    let mut seen = HashSet::new();
    for (index, case) in cases.iter_mut().enumerate() {
        if !seen.contains(&case.test_name) {
            seen.insert(case.test_name.clone());
            continue;
        }
        let mut candidate = format!("{}_{index}", case.test_name);
        while seen.contains(&candidate) {
            candidate.push_str(&format!("_{index}"));
        }
        case.rename(candidate.clone());
        seen.insert(candidate);
    }
}
