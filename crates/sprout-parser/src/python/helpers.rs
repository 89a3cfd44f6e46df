use std::collections::BTreeSet;

use ast_grep_core::Node;
use sprout_core::{ImportDescriptor, ParameterDescriptor};

use crate::tree::Decorator;

const PUNCTUATION: &[&str] = &["(", ")", ",", ":"];

fn is_punctuation(kind: &str) -> bool {
    PUNCTUATION.contains(&kind)
}

/// 1-based start line.
pub(super) fn start_line<D: ast_grep_core::Doc>(node: &Node<D>) -> u32 {
    node.start_pos().line() as u32 + 1
}

/// 1-based end line.
pub(super) fn end_line<D: ast_grep_core::Doc>(node: &Node<D>) -> u32 {
    node.end_pos().line() as u32 + 1
}

pub(super) fn field_text<D: ast_grep_core::Doc>(node: &Node<D>, field: &str) -> Option<String> {
    node.field(field).map(|n| n.text().to_string())
}

/// `async def` / `async for` / `async with` all lead with an `async` token.
pub(super) fn starts_with_async<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    node.children()
        .next()
        .is_some_and(|c| c.kind().as_ref() == "async")
}

pub(super) fn extract_decorators<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<Decorator> {
    node.children()
        .filter(|c| c.kind().as_ref() == "decorator")
        .map(|c| {
            let text = c.text().trim_start_matches('@').trim().to_string();
            let simple_name = c
                .children()
                .find(|e| e.kind().as_ref() != "@")
                .filter(|e| e.kind().as_ref() == "identifier")
                .map(|e| e.text().to_string());
            Decorator { text, simple_name }
        })
        .collect()
}

/// Named parameters in declaration order.
///
/// `*args`, `**kwargs` and the bare `*` / `/` separators are skipped:
/// they cannot be bound by keyword in a generated call.
pub(super) fn extract_parameters<D: ast_grep_core::Doc>(
    node: &Node<D>,
) -> Vec<ParameterDescriptor> {
    let Some(params) = node.field("parameters") else {
        return Vec::new();
    };

    let mut parameters = Vec::new();
    for child in params.children() {
        let kind = child.kind();
        match kind.as_ref() {
            "identifier" => parameters.push(ParameterDescriptor::new(child.text().to_string())),
            "typed_parameter" => {
                let Some(name) = child
                    .children()
                    .next()
                    .filter(|n| n.kind().as_ref() == "identifier")
                else {
                    continue;
                };
                parameters.push(ParameterDescriptor {
                    name: name.text().to_string(),
                    type_hint: field_text(&child, "type"),
                    default_value: None,
                });
            }
            "default_parameter" | "typed_default_parameter" => {
                let Some(name) = field_text(&child, "name") else {
                    continue;
                };
                parameters.push(ParameterDescriptor {
                    name,
                    type_hint: field_text(&child, "type"),
                    default_value: field_text(&child, "value"),
                });
            }
            _ => {}
        }
    }
    parameters
}

/// Base classes as written; keyword arguments such as `metaclass=ABCMeta`
/// are dropped.
pub(super) fn extract_base_classes<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<String> {
    let Some(superclasses) = node.field("superclasses") else {
        return Vec::new();
    };
    superclasses
        .children()
        .filter(|c| {
            let k = c.kind();
            !is_punctuation(k.as_ref()) && k.as_ref() != "keyword_argument"
        })
        .map(|c| c.text().to_string())
        .collect()
}

/// Expand one import statement into descriptors.
pub(super) fn extract_imports<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<ImportDescriptor> {
    match node.kind().as_ref() {
        "import_statement" => plain_imports(node),
        "import_from_statement" => {
            let module = field_text(node, "module_name").unwrap_or_default();
            vec![from_import(node, module)]
        }
        "future_import_statement" => vec![from_import(node, "__future__".to_string())],
        _ => Vec::new(),
    }
}

/// `import a.b, c as d`: one descriptor per imported module.
fn plain_imports<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<ImportDescriptor> {
    node.children()
        .filter_map(|child| {
            let kind = child.kind();
            let (module, bound) = match kind.as_ref() {
                "dotted_name" => {
                    let text = child.text().to_string();
                    (text.clone(), text)
                }
                "aliased_import" => {
                    let module = field_text(&child, "name")?;
                    let alias = field_text(&child, "alias").unwrap_or_else(|| module.clone());
                    (module, alias)
                }
                _ => return None,
            };
            Some(ImportDescriptor {
                module,
                names: BTreeSet::from([bound]),
                is_from_import: false,
            })
        })
        .collect()
}

/// `from module import a, b as c` (names after the `import` keyword).
fn from_import<D: ast_grep_core::Doc>(node: &Node<D>, module: String) -> ImportDescriptor {
    let mut names = BTreeSet::new();
    let mut after_import = false;
    for child in node.children() {
        let kind = child.kind();
        match kind.as_ref() {
            "import" => after_import = true,
            _ if !after_import => {}
            "dotted_name" => {
                names.insert(child.text().to_string());
            }
            "aliased_import" => {
                if let Some(name) = field_text(&child, "name") {
                    names.insert(name);
                }
            }
            "wildcard_import" => {
                names.insert("*".to_string());
            }
            _ => {}
        }
    }
    ImportDescriptor {
        module,
        names,
        is_from_import: true,
    }
}
