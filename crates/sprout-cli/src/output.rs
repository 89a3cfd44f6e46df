use std::fmt::Write as _;

use serde::Serialize;
use sprout_core::CodeStructure;

/// Render a serializable value as pretty JSON.
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Human-readable summary of one analyzed file.
pub fn structure_summary(path: &str, structure: &CodeStructure) -> String {
    let mut out = String::new();
    let kind = if structure.is_test_file { " (test module)" } else { "" };
    let _ = writeln!(out, "{path}{kind}");

    if !structure.dependencies.is_empty() {
        let deps: Vec<&str> = structure.dependencies.iter().map(String::as_str).collect();
        let _ = writeln!(out, "  dependencies: {}", deps.join(", "));
    }

    for function in &structure.functions {
        let _ = writeln!(out, "  {}", function_line(function));
    }
    for class in &structure.classes {
        let bases = if class.base_classes.is_empty() {
            String::new()
        } else {
            format!("({})", class.base_classes.join(", "))
        };
        let _ = writeln!(out, "  class {}{bases}  [lines {}-{}]", class.name, class.start_line, class.end_line);
        for method in &class.methods {
            let _ = writeln!(out, "    {}", function_line(method));
        }
    }

    if !structure.missing_docstrings.is_empty() {
        let _ = writeln!(out, "  missing docstrings: {}", structure.missing_docstrings.join(", "));
    }
    out
}

fn function_line(function: &sprout_core::FunctionDescriptor) -> String {
    let mut flags = Vec::new();
    if function.is_async {
        flags.push("async");
    }
    if function.is_generator {
        flags.push("generator");
    }
    if function.is_property {
        flags.push("property");
    }
    if function.is_static {
        flags.push("static");
    }
    if function.is_class_method {
        flags.push("classmethod");
    }
    if function.exceeds_length_limit {
        flags.push("too long");
    }

    let params: Vec<&str> = function.parameters.iter().map(|p| p.name.as_str()).collect();
    let returns = function
        .return_type
        .as_deref()
        .map(|r| format!(" -> {r}"))
        .unwrap_or_default();
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" {{{}}}", flags.join(", "))
    };
    format!(
        "def {}({}){returns}  complexity={}{flags}",
        function.name,
        params.join(", "),
        function.complexity
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_functions_and_classes() {
        let structure = sprout_parser::analyze(
            "import os\n\nasync def fetch(url) -> bytes:\n    return b''\n\nclass Cart(Base):\n    def total(self):\n        return 0\n",
        )
        .unwrap();
        let summary = structure_summary("shop.py", &structure);

        assert!(summary.starts_with("shop.py\n"));
        assert!(summary.contains("  dependencies: os\n"));
        assert!(summary.contains("  def fetch(url) -> bytes  complexity=1 {async}\n"));
        assert!(summary.contains("  class Cart(Base)  [lines 6-8]\n"));
        assert!(summary.contains("    def total(self)  complexity=1\n"));
        assert!(summary.contains("missing docstrings: fetch, Cart, Cart.total"));
    }
}
