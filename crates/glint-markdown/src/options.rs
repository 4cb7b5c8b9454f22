//! Global configuration for code fence highlighting.

use std::fmt;
use std::sync::Arc;

use glint_highlight::{DEFAULT_TABINDEX, Meta, ThemeSelection, Transformer};

use crate::meta::MetaParser;

/// Class added to emphasized lines when [`HighlightLines::Enabled`] is `true`.
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "highlighted";

/// Line emphasis setting.
///
/// `{1,3-5}` in a fence's attribute string marks lines for emphasis; this
/// setting controls whether that happens and which class is used.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum HighlightLines {
    /// `true` uses [`DEFAULT_HIGHLIGHT_CLASS`], `false` disables emphasis.
    Enabled(bool),
    /// Use the given class name. An empty name disables emphasis.
    Class(String),
}

impl HighlightLines {
    /// Class name to add to emphasized lines, or `None` when disabled.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Enabled(true) => Some(DEFAULT_HIGHLIGHT_CLASS),
            Self::Enabled(false) => None,
            Self::Class(class) if class.is_empty() => None,
            Self::Class(class) => Some(class),
        }
    }

    /// Whether line emphasis is enabled.
    pub fn is_enabled(&self) -> bool {
        self.class_name().is_some()
    }
}

impl Default for HighlightLines {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

impl From<bool> for HighlightLines {
    fn from(enabled: bool) -> Self {
        Self::Enabled(enabled)
    }
}

impl From<&str> for HighlightLines {
    fn from(class: &str) -> Self {
        Self::Class(class.to_owned())
    }
}

impl From<String> for HighlightLines {
    fn from(class: String) -> Self {
        Self::Class(class)
    }
}

/// Options for [`MarkdownHighlight`](crate::MarkdownHighlight).
///
/// Built once before initialization and read-only afterwards; every code
/// block derives its own [`CodeOptions`](glint_highlight::CodeOptions) from it.
#[derive(Clone)]
pub struct MarkdownHighlightOptions {
    /// Single theme, or themes keyed by role.
    pub themes: ThemeSelection,
    /// Role whose colors are emitted directly in multi-theme mode.
    pub default_color: Option<String>,
    /// Languages to load; `None` loads every bundled grammar.
    pub langs: Option<Vec<String>>,
    /// Line emphasis setting.
    pub highlight_lines: HighlightLines,
    /// Parser turning the fence attribute string into metadata.
    pub parse_meta_string: Option<Arc<dyn MetaParser>>,
    /// Base metadata merged into every block's metadata.
    pub meta: Meta,
    /// Transformers run before the built-in ones on every block.
    pub transformers: Option<Vec<Arc<dyn Transformer>>>,
    /// `tabindex` attribute on `<pre>`; `None` omits it.
    pub tabindex: Option<String>,
}

impl MarkdownHighlightOptions {
    /// Create options with defaults for everything but the theme selection.
    #[must_use]
    pub fn new(themes: ThemeSelection) -> Self {
        Self {
            themes,
            default_color: None,
            langs: None,
            highlight_lines: HighlightLines::default(),
            parse_meta_string: None,
            meta: Meta::new(),
            transformers: None,
            tabindex: Some(DEFAULT_TABINDEX.to_owned()),
        }
    }

    /// Restrict loaded languages.
    #[must_use]
    pub fn with_langs<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.langs = Some(langs.into_iter().map(Into::into).collect());
        self
    }

    /// Set the line emphasis setting (`true`, `false` or a class name).
    #[must_use]
    pub fn with_highlight_lines(mut self, highlight_lines: impl Into<HighlightLines>) -> Self {
        self.highlight_lines = highlight_lines.into();
        self
    }

    /// Set the fence metadata parser.
    #[must_use]
    pub fn with_meta_parser(mut self, parser: impl MetaParser + 'static) -> Self {
        self.parse_meta_string = Some(Arc::new(parser));
        self
    }

    /// Set the base metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Append a base transformer.
    #[must_use]
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformers
            .get_or_insert_with(Vec::new)
            .push(Arc::new(transformer));
        self
    }

    /// Set the role used for plain colors in multi-theme mode.
    #[must_use]
    pub fn with_default_color(mut self, role: impl Into<String>) -> Self {
        self.default_color = Some(role.into());
        self
    }

    /// Set or remove the `tabindex` attribute on `<pre>`.
    #[must_use]
    pub fn with_tabindex(mut self, tabindex: Option<String>) -> Self {
        self.tabindex = tabindex;
        self
    }
}

impl fmt::Debug for MarkdownHighlightOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let transformers: Option<Vec<&str>> = self
            .transformers
            .as_ref()
            .map(|list| list.iter().map(|t| t.name()).collect());
        f.debug_struct("MarkdownHighlightOptions")
            .field("themes", &self.themes)
            .field("default_color", &self.default_color)
            .field("langs", &self.langs)
            .field("highlight_lines", &self.highlight_lines)
            .field("parse_meta_string", &self.parse_meta_string.is_some())
            .field("meta", &self.meta)
            .field("transformers", &transformers)
            .field("tabindex", &self.tabindex)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_lines_default() {
        let setting = HighlightLines::default();
        assert!(setting.is_enabled());
        assert_eq!(setting.class_name(), Some("highlighted"));
    }

    #[test]
    fn test_highlight_lines_disabled() {
        assert_eq!(HighlightLines::from(false).class_name(), None);
    }

    #[test]
    fn test_highlight_lines_custom_class() {
        assert_eq!(HighlightLines::from("focus").class_name(), Some("focus"));
    }

    #[test]
    fn test_highlight_lines_empty_class_disables() {
        let setting = HighlightLines::from(String::new());
        assert!(!setting.is_enabled());
    }

    #[test]
    fn test_options_defaults() {
        let options = MarkdownHighlightOptions::new(ThemeSelection::single("InspiredGitHub"));
        assert_eq!(options.highlight_lines, HighlightLines::Enabled(true));
        assert!(options.langs.is_none());
        assert!(options.parse_meta_string.is_none());
        assert!(options.transformers.is_none());
        assert_eq!(options.tabindex.as_deref(), Some("0"));
    }

    #[test]
    fn test_options_builder() {
        let options = MarkdownHighlightOptions::new(ThemeSelection::single("InspiredGitHub"))
            .with_langs(["rust", "python"])
            .with_highlight_lines("hl")
            .with_default_color("dark")
            .with_tabindex(None);
        assert_eq!(
            options.langs,
            Some(vec!["rust".to_owned(), "python".to_owned()])
        );
        assert_eq!(options.highlight_lines.class_name(), Some("hl"));
        assert_eq!(options.default_color.as_deref(), Some("dark"));
        assert!(options.tabindex.is_none());
    }
}
