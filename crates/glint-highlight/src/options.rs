//! Options accepted by the highlighter factory and per-call rendering.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::transformer::Transformer;

/// Free-form metadata attached to a highlighting call.
///
/// Transformers can read it through [`TransformContext`](crate::TransformContext).
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// Default value of the `tabindex` attribute on the `<pre>` element.
pub const DEFAULT_TABINDEX: &str = "0";

/// Theme selection: one theme, or several themes keyed by role.
///
/// Roles are free-form names such as `light` and `dark`. In the multi-theme
/// form one role supplies the plain `color` values and the others are emitted
/// as CSS variables (see [`CodeOptions::default_color`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThemeSelection {
    /// A single theme name.
    Single(String),
    /// Theme role → theme name.
    Multiple(BTreeMap<String, String>),
}

impl ThemeSelection {
    /// Create a single-theme selection.
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        Self::Single(name.into())
    }

    /// Create a multi-theme selection from `(role, theme)` pairs.
    #[must_use]
    pub fn multiple<I, R, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, T)>,
        R: Into<String>,
        T: Into<String>,
    {
        Self::Multiple(
            pairs
                .into_iter()
                .map(|(role, theme)| (role.into(), theme.into()))
                .collect(),
        )
    }
}

/// Options for [`Highlighter::new`](crate::Highlighter::new).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlighterOptions {
    /// Theme names to load.
    pub themes: Vec<String>,
    /// Language identifiers to load (extension or case-insensitive name).
    pub langs: Vec<String>,
}

/// Options for a single highlighting call.
#[derive(Clone)]
pub struct CodeOptions {
    /// Language identifier of the code.
    pub lang: String,
    /// Theme(s) to render with. Every theme must have been loaded.
    pub themes: ThemeSelection,
    /// Role whose colors are emitted directly in multi-theme mode.
    ///
    /// Defaults to `light` if present, otherwise the first role.
    pub default_color: Option<String>,
    /// Value of the `tabindex` attribute on `<pre>`; `None` omits it.
    pub tabindex: Option<String>,
    /// Metadata available to transformers.
    pub meta: Meta,
    /// Transformers applied in order while the tree is built.
    pub transformers: Vec<Arc<dyn Transformer>>,
}

impl CodeOptions {
    /// Create options with the given language and theme selection.
    #[must_use]
    pub fn new(lang: impl Into<String>, themes: ThemeSelection) -> Self {
        Self {
            lang: lang.into(),
            themes,
            default_color: None,
            tabindex: Some(DEFAULT_TABINDEX.to_owned()),
            meta: Meta::new(),
            transformers: Vec::new(),
        }
    }

    /// Append a transformer to the chain.
    #[must_use]
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformers.push(Arc::new(transformer));
        self
    }

    /// Names of the transformers in chain order.
    pub fn transformer_names(&self) -> Vec<&str> {
        self.transformers.iter().map(|t| t.name()).collect()
    }
}

impl fmt::Debug for CodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeOptions")
            .field("lang", &self.lang)
            .field("themes", &self.themes)
            .field("default_color", &self.default_color)
            .field("tabindex", &self.tabindex)
            .field("meta", &self.meta)
            .field("transformers", &self.transformer_names())
            .finish()
    }
}
