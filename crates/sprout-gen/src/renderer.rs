//! pytest source rendering.

use sprout_core::TestCase;

const INDENT: &str = "    ";
const FRAMEWORK_IMPORT: &str = "import pytest";

/// Serializes test cases as pytest source.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// One test function. No trailing newline.
    #[must_use]
    pub fn render(&self, case: &TestCase) -> String {
        let mut out = String::new();
        if case.is_async {
            out.push_str("@pytest.mark.asyncio\nasync ");
        }
        out.push_str("def ");
        out.push_str(&case.test_name);
        out.push_str("():\n");

        if let Some(doc) = case.docstring.as_deref().filter(|d| !d.trim().is_empty()) {
            out.push_str(&render_docstring(doc));
            out.push('\n');
        }

        let body = if case.body.trim().is_empty() {
            "pass"
        } else {
            case.body.as_str()
        };
        out.push_str(&indent(body));
        out
    }

    /// `import pytest` followed by every case, in order.
    #[must_use]
    pub fn render_module(&self, cases: &[TestCase]) -> String {
        self.assemble(FRAMEWORK_IMPORT.to_string(), cases)
    }

    /// As [`render_module`](Self::render_module), also importing the
    /// targets from `module`. Class cases import their class.
    #[must_use]
    pub fn render_module_for(&self, module: &str, cases: &[TestCase]) -> String {
        let mut targets: Vec<&str> = Vec::new();
        for case in cases {
            let target = case
                .function_name
                .split_once('.')
                .map_or(case.function_name.as_str(), |(owner, _)| owner);
            if !targets.contains(&target) {
                targets.push(target);
            }
        }

        let mut header = FRAMEWORK_IMPORT.to_string();
        if !targets.is_empty() {
            header.push_str(&format!("\n\nfrom {module} import {}", targets.join(", ")));
        }
        self.assemble(header, cases)
    }

    fn assemble(&self, header: String, cases: &[TestCase]) -> String {
        let mut out = header;
        for case in cases {
            out.push_str("\n\n\n");
            out.push_str(&self.render(case));
        }
        out.push('\n');
        out
    }
}

/// Docstring block, indented one level. Multi-line docstrings close on
/// their own line.
fn render_docstring(doc: &str) -> String {
    let escaped = escape_docstring(doc);
    let mut lines = escaped.lines();
    let first = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.collect();

    if rest.is_empty() {
        return format!("{INDENT}\"\"\"{first}\"\"\"");
    }
    let mut out = format!("{INDENT}\"\"\"{first}\n");
    for line in rest {
        if !line.trim().is_empty() {
            out.push_str(INDENT);
            out.push_str(line);
        }
        out.push('\n');
    }
    out.push_str(INDENT);
    out.push_str("\"\"\"");
    out
}

/// Escape what would end or corrupt a triple-quoted string: backslashes,
/// runs of three or more quotes, and quotes touching the closing delimiter.
fn escape_docstring(doc: &str) -> String {
    let doubled = doc.replace('\\', "\\\\");
    let mut escaped = String::with_capacity(doubled.len() + 8);
    let mut rest = doubled.as_str();
    while let Some(start) = rest.find('"') {
        escaped.push_str(&rest[..start]);
        let run = rest[start..].len() - rest[start..].trim_start_matches('"').len();
        let closes = start + run == rest.len();
        let quote = if run >= 3 || closes { "\\\"" } else { "\"" };
        escaped.push_str(&quote.repeat(run));
        rest = &rest[start + run..];
    }
    escaped.push_str(rest);
    escaped
}

fn indent(body: &str) -> String {
    body.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sprout_core::TestData;

    use super::*;

    fn case(name: &str, body: &str, docstring: Option<&str>) -> TestCase {
        TestCase {
            test_name: name.to_string(),
            function_name: "add".to_string(),
            parameters: TestData::new(),
            body: body.to_string(),
            description: String::new(),
            docstring: docstring.map(str::to_string),
            is_async: false,
        }
    }

    #[test]
    fn renders_single_case() {
        let rendered = TemplateRenderer::new().render(&case(
            "test_add",
            "result = add(a=1)\nassert isinstance(result, int)",
            Some("Test add."),
        ));
        assert_eq!(
            rendered,
            "def test_add():\n    \"\"\"Test add.\"\"\"\n    result = add(a=1)\n    assert isinstance(result, int)"
        );
    }

    #[test]
    fn nested_blocks_keep_relative_indent() {
        let rendered = TemplateRenderer::new().render(&case(
            "test_add_empty_input",
            "with pytest.raises(ValueError):\n    add(a='')",
            None,
        ));
        assert_eq!(
            rendered,
            "def test_add_empty_input():\n    with pytest.raises(ValueError):\n        add(a='')"
        );
    }

    #[test]
    fn multiline_docstring_is_indented() {
        let rendered = TemplateRenderer::new().render(&case(
            "test_add",
            "add()",
            Some("Test add functionality.\n\nOriginal function: Adds."),
        ));
        assert_eq!(
            rendered,
            "def test_add():\n    \"\"\"Test add functionality.\n\n    Original function: Adds.\n    \"\"\"\n    add()"
        );
    }

    #[test]
    fn docstring_quotes_and_backslashes_escaped() {
        assert_eq!(escape_docstring(r#"Use """ here"#), r#"Use \"\"\" here"#);
        assert_eq!(escape_docstring(r"C:\path"), r"C:\\path");
        assert_eq!(escape_docstring(r#"ends with "quote""#), r#"ends with "quote\""#);
        assert_eq!(escape_docstring(r#"say "hi" twice"#), r#"say "hi" twice"#);
    }

    #[test]
    fn escaped_quote_at_end_stays_escaped() {
        assert_eq!(escape_docstring(r#"trailing \""#), r#"trailing \\\""#);
        assert_eq!(escape_docstring(r#"two quotes """#), r#"two quotes \"\""#);

        let rendered = TemplateRenderer::new().render(&case("test_q", "q()", Some(r#"Ends \""#)));
        assert!(
            rendered.starts_with(r#"def test_q():
    """Ends \\\""""#),
            "{rendered}"
        );
    }

    #[test]
    fn async_case_is_marked() {
        let mut c = case("test_fetch", "result = await fetch()", None);
        c.is_async = true;
        let rendered = TemplateRenderer::new().render(&c);
        assert!(rendered.starts_with("@pytest.mark.asyncio\nasync def test_fetch():\n"));
    }

    #[test]
    fn empty_body_renders_pass() {
        let rendered = TemplateRenderer::new().render(&case("test_noop", "", None));
        assert_eq!(rendered, "def test_noop():\n    pass");
    }

    #[test]
    fn module_joins_cases_in_order() {
        let cases = [case("test_a", "a()", None), case("test_b", "b()", None)];
        let module = TemplateRenderer::new().render_module(&cases);
        assert_eq!(
            module,
            "import pytest\n\n\ndef test_a():\n    a()\n\n\ndef test_b():\n    b()\n"
        );
    }

    #[test]
    fn module_for_imports_targets_once() {
        let mut init = case("test_cart_init", "Cart()", None);
        init.function_name = "Cart.__init__".to_string();
        let cases = [case("test_add", "add()", None), case("test_add_2", "add()", None), init];
        let module = TemplateRenderer::new().render_module_for("shop.cart", &cases);
        assert!(module.starts_with("import pytest\n\nfrom shop.cart import add, Cart\n\n\ndef test_add():"));
    }

    #[test]
    fn empty_module_is_just_the_import() {
        assert_eq!(TemplateRenderer::new().render_module(&[]), "import pytest\n");
    }
}
