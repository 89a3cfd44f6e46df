//! # sprout-parser
//!
//! ast-grep-based Python parsing and structural analysis for sprout.
//!
//! Source text is parsed with the tree-sitter Python grammar, checked for
//! error recovery, and lowered into a flat arena [`SyntaxTree`]. The
//! [`StructuralAnalyzer`] then walks that tree once to produce a
//! [`CodeStructure`].
//!
//! ```
//! let structure = sprout_parser::analyze("import os.path\n\ndef f(x):\n    return x\n")?;
//! assert_eq!(structure.functions[0].name, "f");
//! assert!(structure.dependencies.contains("os"));
//! # Ok::<(), sprout_parser::ParserError>(())
//! ```

pub mod analyzer;
pub mod error;
pub mod parser;
mod python;
pub mod test_files;
pub mod tree;

pub use analyzer::{StructuralAnalyzer, analyze_with};
pub use error::ParserError;
pub use parser::{SourceParser, detect_language};
pub use test_files::is_test_module_name;
pub use tree::{NodeId, NodeKind, SyntaxNode, SyntaxTree};

use sprout_core::{AnalysisRules, CodeStructure};

/// Parse and analyze Python source with default rules.
///
/// # Errors
/// [`ParserError::EmptyInput`] for blank text, [`ParserError::Syntax`] for
/// malformed source.
pub fn analyze(source: &str) -> Result<CodeStructure, ParserError> {
    analyze_with_rules(source, &AnalysisRules::default())
}

/// Parse and analyze Python source under explicit rules.
///
/// # Errors
/// Same as [`analyze`].
pub fn analyze_with_rules(
    source: &str,
    rules: &AnalysisRules,
) -> Result<CodeStructure, ParserError> {
    let tree = SourceParser::python().parse(source)?;
    Ok(analyze_with(&tree, rules))
}

/// Parse and analyze raw bytes with default rules.
///
/// # Errors
/// [`ParserError::InputType`] for non-text input, then as [`analyze`].
pub fn analyze_bytes(bytes: &[u8]) -> Result<CodeStructure, ParserError> {
    let tree = SourceParser::python().parse_bytes(bytes)?;
    Ok(analyze_with(&tree, &AnalysisRules::default()))
}
