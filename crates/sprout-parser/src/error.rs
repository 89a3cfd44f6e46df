//! Parser error types for sprout-parser.

/// Errors that can occur while turning source text into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    /// The text does not conform to the language grammar.
    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: u32, message: String },

    /// The text is empty or whitespace-only.
    #[error("Source is empty")]
    EmptyInput,

    /// The input is not text (invalid UTF-8 or binary content).
    #[error("Source is not text: {0}")]
    InputType(String),

    /// The language is recognized but has no parser.
    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),
}
