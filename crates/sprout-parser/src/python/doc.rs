use ast_grep_core::Node;

/// Docstring of a definition: the first statement of its `body` when that
/// statement is a bare string literal.
pub(super) fn extract_docstring<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<String> {
    let body = node.field("body")?;
    first_statement_docstring(&body)
}

/// Module docstring: the first statement of the module.
pub(super) fn extract_module_docstring<D: ast_grep_core::Doc>(root: &Node<D>) -> Option<String> {
    first_statement_docstring(root)
}

fn first_statement_docstring<D: ast_grep_core::Doc>(container: &Node<D>) -> Option<String> {
    let first = container
        .children()
        .find(|c| c.kind().as_ref() != "comment")?;
    if first.kind().as_ref() != "expression_statement" {
        return None;
    }

    let mut parts = first.children();
    let string_node = parts.next()?;
    if string_node.kind().as_ref() != "string" || parts.next().is_some() {
        return None;
    }

    string_literal_value(&string_node.text()).map(|raw| clean_docstring(&raw))
}

/// Strip prefix and quotes from a string literal.
///
/// Returns `None` for bytes and f-strings, which never act as docstrings.
pub(super) fn string_literal_value(literal: &str) -> Option<String> {
    let prefix_len = literal
        .find(|c: char| c == '"' || c == '\'')
        .unwrap_or(literal.len());
    let prefix = literal[..prefix_len].to_ascii_lowercase();
    if prefix.contains('b') || prefix.contains('f') {
        return None;
    }

    let quoted = &literal[prefix_len..];
    let inner = ["\"\"\"", "'''", "\"", "'"].iter().find_map(|quote| {
        quoted
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })?;
    Some(inner.to_string())
}

/// Normalize docstring indentation the way `inspect.cleandoc` does.
pub(super) fn clean_docstring(raw: &str) -> String {
    let expanded = raw.replace('\t', "        ");
    let lines: Vec<&str> = expanded.lines().collect();
    let Some((first, rest)) = lines.split_first() else {
        return String::new();
    };

    let margin = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    cleaned.push(first.trim().to_string());
    for line in rest {
        let dedented = line.get(margin..).unwrap_or_else(|| line.trim_start());
        cleaned.push(dedented.trim_end().to_string());
    }

    while cleaned.last().is_some_and(String::is_empty) {
        cleaned.pop();
    }
    let leading_blank = cleaned.iter().take_while(|l| l.is_empty()).count();
    cleaned.drain(..leading_blank);
    cleaned.join("\n")
}
