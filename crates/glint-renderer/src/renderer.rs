//! Markdown renderer with a replaceable highlight hook.

use std::fmt;
use std::sync::Arc;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use pulldown_cmark_escape::{escape_html, escape_html_body_text};

use crate::fence::split_fence_info;
use crate::hook::{HighlightHook, HookError, Plugin};

/// Error returned by [`MarkdownRenderer::render`].
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The highlight hook failed for a code block.
    #[error("Failed to highlight code block {index} (language `{lang}`): {source}")]
    Highlight {
        /// Zero-based index of the code block in the document.
        index: usize,
        /// Language from the fence info string.
        lang: String,
        /// Error returned by the hook.
        #[source]
        source: HookError,
    },
}

/// Code block collected between start and end events.
struct PendingCodeBlock {
    /// Info string for fenced blocks, `None` for indented blocks.
    fence: Option<String>,
    content: String,
}

/// Markdown to HTML renderer.
///
/// Everything except code blocks is rendered by `pulldown-cmark`. Fenced
/// code blocks go through the highlight hook when one is registered with
/// [`set_highlight`](Self::set_highlight).
pub struct MarkdownRenderer {
    highlight: Option<Arc<dyn HighlightHook>>,
    gfm: bool,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled and no highlight hook.
    #[must_use]
    pub fn new() -> Self {
        Self {
            highlight: None,
            gfm: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Register the highlight hook, replacing any previous one.
    pub fn set_highlight(&mut self, hook: impl HighlightHook + 'static) {
        if self.highlight.is_some() {
            tracing::debug!("Replacing existing highlight hook");
        }
        self.highlight = Some(Arc::new(hook));
    }

    /// Whether a highlight hook is registered.
    pub fn has_highlight(&self) -> bool {
        self.highlight.is_some()
    }

    /// Install a plugin.
    pub fn use_plugin(&mut self, plugin: impl Plugin) -> &mut Self {
        plugin.apply(self);
        self
    }

    /// Builder-style [`use_plugin`](Self::use_plugin).
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Plugin) -> Self {
        plugin.apply(&mut self);
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown to HTML.
    ///
    /// For each fenced code block the hook's output is used as follows:
    /// - output starting with `<pre` is inserted verbatim
    /// - other non-empty output is wrapped in `<pre><code class="language-…">`
    /// - empty output falls back to the escaped default rendering
    ///
    /// Indented code blocks, and all code blocks when no hook is registered,
    /// use the escaped default rendering.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Highlight`] if the hook fails; no partial output
    /// is produced.
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let mut events: Vec<Event<'_>> = Vec::new();
        let mut pending: Option<PendingCodeBlock> = None;
        let mut code_block_index = 0;

        for event in Parser::new_ext(markdown, self.parser_options()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let fence = match kind {
                        CodeBlockKind::Fenced(info) => Some(info.into_string()),
                        CodeBlockKind::Indented => None,
                    };
                    pending = Some(PendingCodeBlock {
                        fence,
                        content: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = pending.take() {
                        let html = self.code_block(block, code_block_index)?;
                        code_block_index += 1;
                        events.push(Event::Html(html.into()));
                    }
                }
                Event::Text(text) if pending.is_some() => {
                    if let Some(block) = pending.as_mut() {
                        block.content.push_str(&text);
                    }
                }
                other => events.push(other),
            }
        }

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());
        Ok(html)
    }

    fn code_block(&self, block: PendingCodeBlock, index: usize) -> Result<String, RenderError> {
        let PendingCodeBlock { fence, content } = block;
        let Some(info) = fence else {
            return Ok(default_code_block("", &content));
        };
        let (lang, attrs) = split_fence_info(&info);

        let Some(hook) = &self.highlight else {
            return Ok(default_code_block(lang, &content));
        };

        tracing::trace!(index, lang, attrs, "Highlighting code block");
        let highlighted =
            hook.highlight(&content, lang, attrs)
                .map_err(|source| RenderError::Highlight {
                    index,
                    lang: lang.to_owned(),
                    source,
                })?;

        if highlighted.is_empty() {
            Ok(default_code_block(lang, &content))
        } else if highlighted.starts_with("<pre") {
            Ok(highlighted)
        } else {
            Ok(wrap_code_block(lang, &highlighted))
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MarkdownRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkdownRenderer")
            .field("highlight", &self.highlight.is_some())
            .field("gfm", &self.gfm)
            .finish()
    }
}

/// Render a code block without highlighting, escaped the way `pulldown-cmark`
/// escapes code text.
fn default_code_block(lang: &str, content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    escape_html_body_text(&mut escaped, content).unwrap();
    wrap_code_block(lang, &escaped)
}

/// Wrap already-escaped markup in `<pre><code>`.
fn wrap_code_block(lang: &str, inner: &str) -> String {
    let mut out = String::with_capacity(inner.len() + 48);
    if lang.is_empty() {
        out.push_str("<pre><code>");
    } else {
        out.push_str(r#"<pre><code class="language-"#);
        escape_html(&mut out, lang).unwrap();
        out.push_str(r#"">"#);
    }
    out.push_str(inner);
    out.push_str("</code></pre>");
    out
}
