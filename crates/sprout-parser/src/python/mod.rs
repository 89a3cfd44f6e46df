//! Python lowering: ast-grep tree -> arena [`SyntaxTree`].
//!
//! Walks the whole concrete tree once. Every node is checked for tree-sitter
//! error recovery (an `ERROR` node or a zero-width missing token) and for
//! Python 2 forms the grammar still accepts; the first one found aborts
//! lowering with [`ParserError::Syntax`]. Leaf tokens are
//! not stored. Definition payloads are captured here so the arena owns all
//! the text the analyzer needs.

mod doc;
mod helpers;

#[cfg(test)]
mod tests;

use ast_grep_core::Node;
use sprout_core::Language;

use crate::error::ParserError;
use crate::tree::{ClassNode, Decorator, FunctionNode, NodeId, NodeKind, SyntaxTree};

use doc::{extract_docstring, extract_module_docstring};
use helpers::{
    end_line, extract_base_classes, extract_decorators, extract_imports, extract_parameters,
    field_text, start_line, starts_with_async,
};

/// Lower a parsed module into an arena tree.
///
/// # Errors
/// Returns [`ParserError::Syntax`] at the first error-recovery node.
pub(crate) fn lower<D: ast_grep_core::Doc>(root: &Node<D>) -> Result<SyntaxTree, ParserError> {
    let mut tree = SyntaxTree::new(Language::Python);
    lower_node(root, None, Vec::new(), &mut tree)?;
    Ok(tree)
}

fn lower_node<D: ast_grep_core::Doc>(
    node: &Node<D>,
    parent: Option<NodeId>,
    decorators: Vec<Decorator>,
    tree: &mut SyntaxTree,
) -> Result<NodeId, ParserError> {
    check_recovered(node)?;
    check_python3(node)?;

    let kind = classify(node, decorators);
    let wraps_definition = matches!(kind, NodeKind::Decorated);
    let id = tree.push(kind, parent, start_line(node), end_line(node));

    // Decorators travel down to the definition they wrap.
    let mut pending = if wraps_definition {
        extract_decorators(node)
    } else {
        Vec::new()
    };

    for child in node.children() {
        if child.children().next().is_none() {
            check_recovered(&child)?;
            continue;
        }
        let child_kind = child.kind();
        let inherited = match child_kind.as_ref() {
            "function_definition" | "class_definition" => std::mem::take(&mut pending),
            _ => Vec::new(),
        };
        lower_node(&child, Some(id), inherited, tree)?;
    }
    Ok(id)
}

/// Reject tree-sitter error recovery: `ERROR` nodes and zero-width tokens
/// inserted for missing syntax.
fn check_recovered<D: ast_grep_core::Doc>(node: &Node<D>) -> Result<(), ParserError> {
    let kind = node.kind();
    if kind.as_ref() == "ERROR" {
        let snippet: String = node.text().lines().next().unwrap_or("").chars().take(40).collect();
        return Err(ParserError::Syntax {
            line: start_line(node),
            message: format!("invalid syntax near `{}`", snippet.trim()),
        });
    }
    if node.children().next().is_none() && node.text().is_empty() && node.parent().is_some() {
        return Err(ParserError::Syntax {
            line: start_line(node),
            message: format!("missing `{}`", kind.as_ref()),
        });
    }
    Ok(())
}

/// Reject constructs tree-sitter-python parses cleanly but Python 3 does
/// not compile.
fn check_python3<D: ast_grep_core::Doc>(node: &Node<D>) -> Result<(), ParserError> {
    let message = match node.kind().as_ref() {
        "print_statement" => Some("`print` statement; call `print(...)` instead"),
        "exec_statement" => Some("`exec` statement; call `exec(...)` instead"),
        "named_expression" if is_statement_level(node) => {
            Some("assignment expression must be parenthesized here")
        }
        // `f(x for x in a, b)` lands here: the grammar folds `, b` into the
        // comprehension iterable.
        "for_in_clause" if node.children().any(|child| child.kind().as_ref() == ",") => {
            Some("comprehension iterable must be parenthesized")
        }
        _ => None,
    };
    match message {
        Some(message) => Err(ParserError::Syntax {
            line: start_line(node),
            message: message.to_string(),
        }),
        None => Ok(()),
    }
}

fn is_statement_level<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    node.parent().is_some_and(|parent| {
        matches!(
            parent.kind().as_ref(),
            "expression_statement" | "assignment" | "augmented_assignment"
        )
    })
}

fn classify<D: ast_grep_core::Doc>(node: &Node<D>, decorators: Vec<Decorator>) -> NodeKind {
    match node.kind().as_ref() {
        "module" => NodeKind::Module {
            docstring: extract_module_docstring(node),
        },
        "function_definition" => NodeKind::Function(FunctionNode {
            name: field_text(node, "name").unwrap_or_default(),
            parameters: extract_parameters(node),
            return_type: field_text(node, "return_type"),
            is_async: starts_with_async(node),
            decorators,
            docstring: extract_docstring(node),
            source: node.text().to_string(),
        }),
        "class_definition" => NodeKind::Class(ClassNode {
            name: field_text(node, "name").unwrap_or_default(),
            bases: extract_base_classes(node),
            decorators,
            docstring: extract_docstring(node),
        }),
        "decorated_definition" => NodeKind::Decorated,
        "block" => NodeKind::Block,
        "import_statement" | "import_from_statement" | "future_import_statement" => {
            NodeKind::Import(extract_imports(node))
        }
        "if_statement" => NodeKind::If,
        "elif_clause" => NodeKind::Elif,
        "for_statement" => NodeKind::For {
            is_async: starts_with_async(node),
        },
        "while_statement" => NodeKind::While,
        "except_clause" | "except_group_clause" => NodeKind::ExceptHandler,
        "with_statement" => NodeKind::With {
            is_async: starts_with_async(node),
        },
        "boolean_operator" => NodeKind::BoolOp,
        // Leaf `await` / `yield` keywords never reach here; these are the
        // expression nodes that wrap them.
        "await" => NodeKind::Await,
        "yield" => NodeKind::Yield,
        _ => NodeKind::Other,
    }
}
