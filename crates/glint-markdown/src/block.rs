//! Per-block option building and rendering.

use std::fmt;
use std::sync::Arc;

use glint_highlight::{CodeOptions, Highlighter, Transformer};
use glint_renderer::{HighlightHook, HookError};

use crate::error::Error;
use crate::meta::merge_meta;
use crate::options::{DEFAULT_HIGHLIGHT_CLASS, MarkdownHighlightOptions};
use crate::transformers::{BlockClassTransformer, LineClassTransformer};

/// Language used for fences without a language.
pub const DEFAULT_LANG: &str = "text";

/// Inputs available to a built-in transformer factory.
struct BlockInput<'a> {
    options: &'a MarkdownHighlightOptions,
    lang: &'a str,
    attrs: &'a str,
}

/// A built-in transformer, appended after the base transformers when enabled.
struct ChainStep {
    enabled: fn(&MarkdownHighlightOptions) -> bool,
    build: fn(&BlockInput<'_>) -> Arc<dyn Transformer>,
}

/// Built-in transformers in chain order.
const BUILTIN_CHAIN: &[ChainStep] = &[
    ChainStep {
        enabled: line_emphasis_enabled,
        build: line_class_transformer,
    },
    ChainStep {
        enabled: always,
        build: block_class_transformer,
    },
];

fn line_emphasis_enabled(options: &MarkdownHighlightOptions) -> bool {
    options.highlight_lines.is_enabled()
}

fn always(_: &MarkdownHighlightOptions) -> bool {
    true
}

fn line_class_transformer(input: &BlockInput<'_>) -> Arc<dyn Transformer> {
    let class_name = input
        .options
        .highlight_lines
        .class_name()
        .unwrap_or(DEFAULT_HIGHLIGHT_CLASS);
    Arc::new(LineClassTransformer::from_attrs(input.attrs, class_name))
}

fn block_class_transformer(input: &BlockInput<'_>) -> Arc<dyn Transformer> {
    Arc::new(BlockClassTransformer::new(input.lang))
}

/// Renders fenced code blocks with a shared highlighter.
///
/// Cheap to clone. Stateless between calls: every block gets fresh
/// [`CodeOptions`] built from the shared options.
#[derive(Clone)]
pub struct BlockRenderer {
    highlighter: Arc<Highlighter>,
    options: Arc<MarkdownHighlightOptions>,
}

impl BlockRenderer {
    pub fn new(highlighter: Arc<Highlighter>, options: Arc<MarkdownHighlightOptions>) -> Self {
        Self {
            highlighter,
            options,
        }
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn options(&self) -> &MarkdownHighlightOptions {
        &self.options
    }

    /// Build the highlighting options for one code block.
    ///
    /// An empty `lang` becomes [`DEFAULT_LANG`]. Metadata is the base
    /// metadata, overlaid with the parsed attribute string, with the raw
    /// attribute string under `__raw`. Transformers are the base list
    /// followed by the enabled built-ins; the base list is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MetaParse`] if the metadata parser fails.
    pub fn code_options(&self, code: &str, lang: &str, attrs: &str) -> Result<CodeOptions, Error> {
        let options = self.options.as_ref();
        let lang = if lang.is_empty() { DEFAULT_LANG } else { lang };

        let parsed = match &options.parse_meta_string {
            Some(parser) => parser.parse(attrs, code, lang).map_err(Error::MetaParse)?,
            None => None,
        };

        let input = BlockInput {
            options,
            lang,
            attrs,
        };
        let mut transformers = options.transformers.clone().unwrap_or_default();
        transformers.extend(
            BUILTIN_CHAIN
                .iter()
                .filter(|step| (step.enabled)(options))
                .map(|step| (step.build)(&input)),
        );

        Ok(CodeOptions {
            lang: lang.to_owned(),
            themes: options.themes.clone(),
            default_color: options.default_color.clone(),
            tabindex: options.tabindex.clone(),
            meta: merge_meta(&options.meta, parsed, attrs),
            transformers,
        })
    }

    /// Render one code block to HTML.
    ///
    /// # Errors
    ///
    /// Fails if the metadata parser fails or the language or a theme is not
    /// loaded.
    pub fn render(&self, code: &str, lang: &str, attrs: &str) -> Result<String, Error> {
        let options = self.code_options(code, lang, attrs)?;
        tracing::trace!(
            lang = %options.lang,
            transformers = ?options.transformer_names(),
            "Highlighting code block"
        );
        self.highlighter
            .code_to_html(code, &options)
            .map_err(Error::Highlight)
    }
}

impl HighlightHook for BlockRenderer {
    fn highlight(&self, code: &str, lang: &str, attrs: &str) -> Result<String, HookError> {
        Ok(self.render(code, lang, attrs)?)
    }
}

impl fmt::Debug for BlockRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRenderer")
            .field("highlighter", &self.highlighter)
            .field("options", &self.options)
            .finish()
    }
}
