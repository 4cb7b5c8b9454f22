//! Highlighting errors.

use syntect::parsing::{ParsingError, ScopeError};

/// Error returned by the highlighter factory or a highlighting call.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// The theme is not bundled, or was not loaded into this highlighter.
    #[error("Theme `{0}` not found")]
    UnknownTheme(String),
    /// The language is not bundled, or was not loaded into this highlighter.
    #[error("Language `{0}` not found, you may need to load it first")]
    UnknownLanguage(String),
    /// The highlighter was created without any theme.
    #[error("At least one theme is required")]
    NoThemes,
    /// The grammar failed while tokenizing a line.
    #[error("Tokenizer error: {0}")]
    Parsing(#[from] ParsingError),
    /// Scope stack became inconsistent while tokenizing.
    #[error("Scope stack error: {0}")]
    Scope(#[from] ScopeError),
}
