use ast_grep_language::{LanguageExt, SupportLang};

use super::*;


fn lower_source(source: &str) -> SyntaxTree {
    let root = SupportLang::Python.ast_grep(source);
    lower(&root.root()).expect("lowering should succeed")
}

fn lower_err(source: &str) -> ParserError {
    let root = SupportLang::Python.ast_grep(source);
    lower(&root.root()).expect_err("lowering should fail")
}

fn functions(tree: &SyntaxTree) -> Vec<&FunctionNode> {
    tree.iter()
        .filter_map(|(_, n)| match &n.kind {
            NodeKind::Function(f) => Some(f),
            _ => None,
        })
        .collect()
}

fn count_kind(tree: &SyntaxTree, pred: impl Fn(&NodeKind) -> bool) -> usize {
    tree.iter().filter(|(_, n)| pred(&n.kind)).count()
}
