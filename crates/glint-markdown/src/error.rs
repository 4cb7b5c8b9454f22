//! Error type for the markdown highlighting plugin.

use glint_highlight::HighlightError;

use crate::meta::MetaParseError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Theme or language loading failed while creating the highlighter.
    #[error("Failed to initialize highlighter: {0}")]
    Init(#[source] HighlightError),
    /// The fence metadata parser rejected a block's attribute string.
    #[error("Failed to parse code fence metadata: {0}")]
    MetaParse(#[source] MetaParseError),
    /// The engine failed to highlight a block.
    #[error("Failed to highlight code block: {0}")]
    Highlight(#[source] HighlightError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Init and render failures share a source type; each call site picks its
    // variant explicitly.
    static_assertions::assert_not_impl_any!(Error: From<HighlightError>);

    #[test]
    fn test_init_and_highlight_messages() {
        assert_eq!(
            Error::Init(HighlightError::NoThemes).to_string(),
            "Failed to initialize highlighter: At least one theme is required"
        );
        assert_eq!(
            Error::Highlight(HighlightError::NoThemes).to_string(),
            "Failed to highlight code block: At least one theme is required"
        );
    }
}
