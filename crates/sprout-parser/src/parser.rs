//! ast-grep wrapper and language detection from file extensions.

use ast_grep_language::{LanguageExt, SupportLang};
use sprout_core::Language;

use crate::error::ParserError;
use crate::python;
use crate::tree::SyntaxTree;

/// Detect the source language from a file path extension.
///
/// Returns `None` for unrecognized extensions. A recognized language is not
/// necessarily parseable; see [`Language::is_implemented`].
#[must_use]
pub fn detect_language(file_path: &str) -> Option<Language> {
    let ext = std::path::Path::new(file_path).extension()?.to_str()?;
    match ext {
        "py" | "pyi" => Some(Language::Python),
        "ts" | "tsx" => Some(Language::TypeScript),
        _ => None,
    }
}

/// Turns source text into a [`SyntaxTree`].
///
/// Stateless apart from the target language; every call parses from scratch.
#[derive(Debug, Clone, Copy)]
pub struct SourceParser {
    language: Language,
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::python()
    }
}

impl SourceParser {
    #[must_use]
    pub const fn python() -> Self {
        Self {
            language: Language::Python,
        }
    }

    /// A parser for `language`.
    ///
    /// # Errors
    /// Returns [`ParserError::UnsupportedLanguage`] when no grammar is wired
    /// up for the language.
    pub fn for_language(language: Language) -> Result<Self, ParserError> {
        if !language.is_implemented() {
            tracing::warn!(%language, "parser requested for unsupported language");
            return Err(ParserError::UnsupportedLanguage(language.to_string()));
        }
        Ok(Self { language })
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Parse source text.
    ///
    /// # Errors
    /// - [`ParserError::EmptyInput`] for empty or whitespace-only text.
    /// - [`ParserError::Syntax`] when the text does not follow the grammar.
    pub fn parse(&self, source: &str) -> Result<SyntaxTree, ParserError> {
        if source.trim().is_empty() {
            return Err(ParserError::EmptyInput);
        }
        match self.language {
            Language::Python => {
                let grep = SupportLang::Python.ast_grep(source);
                python::lower(&grep.root())
            }
            other => Err(ParserError::UnsupportedLanguage(other.to_string())),
        }
    }

    /// Parse raw bytes, rejecting anything that is not text.
    ///
    /// # Errors
    /// [`ParserError::InputType`] for invalid UTF-8 or embedded NUL bytes,
    /// then anything [`SourceParser::parse`] returns.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<SyntaxTree, ParserError> {
        let source = std::str::from_utf8(bytes).map_err(|e| {
            ParserError::InputType(format!("invalid UTF-8 at byte {}", e.valid_up_to()))
        })?;
        if let Some(offset) = source.find('\0') {
            return Err(ParserError::InputType(format!(
                "NUL byte at offset {offset}"
            )));
        }
        self.parse(source)
    }
}
