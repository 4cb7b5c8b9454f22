//! Renderer plugin wiring.

use std::sync::Arc;

use glint_highlight::Highlighter;
use glint_renderer::{MarkdownRenderer, Plugin};

use crate::block::BlockRenderer;
use crate::error::Error;
use crate::init::create_highlighter;
use crate::options::MarkdownHighlightOptions;

/// Highlights fenced code blocks of a [`MarkdownRenderer`].
///
/// Creating the plugin loads every configured theme and language; applying
/// it replaces the renderer's highlight hook.
///
/// ```
/// use glint_highlight::ThemeSelection;
/// use glint_markdown::{MarkdownHighlight, MarkdownHighlightOptions};
/// use glint_renderer::MarkdownRenderer;
///
/// let options = MarkdownHighlightOptions::new(ThemeSelection::single("InspiredGitHub"))
///     .with_langs(["rust"]);
/// let renderer = MarkdownRenderer::new().with_plugin(MarkdownHighlight::new(options)?);
///
/// let html = renderer.render("```rust {1}\nfn main() {}\n```")?;
/// assert!(html.contains(r#"<span class="line highlighted">"#));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownHighlight {
    blocks: BlockRenderer,
}

impl MarkdownHighlight {
    /// Load the highlighter for `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Init`] if no theme is named or a theme or language
    /// cannot be loaded.
    pub fn new(options: MarkdownHighlightOptions) -> Result<Self, Error> {
        let highlighter = create_highlighter(&options).map_err(Error::Init)?;
        Ok(Self {
            blocks: BlockRenderer::new(Arc::new(highlighter), Arc::new(options)),
        })
    }

    pub fn block_renderer(&self) -> &BlockRenderer {
        &self.blocks
    }

    pub fn highlighter(&self) -> &Highlighter {
        self.blocks.highlighter()
    }
}

impl Plugin for MarkdownHighlight {
    fn apply(self, renderer: &mut MarkdownRenderer) {
        renderer.set_highlight(self.blocks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_highlight::{Meta, ThemeSelection};
    use glint_renderer::{HookError, RenderError};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use crate::meta::{FenceAttrsMetaParser, MetaParseError};

    fn options() -> MarkdownHighlightOptions {
        MarkdownHighlightOptions::new(ThemeSelection::single("InspiredGitHub"))
            .with_langs(["rust"])
    }

    fn render(options: MarkdownHighlightOptions, markdown: &str) -> Result<String, RenderError> {
        let plugin = MarkdownHighlight::new(options).unwrap();
        MarkdownRenderer::new().with_plugin(plugin).render(markdown)
    }

    #[test]
    fn test_new_unknown_theme() {
        let err =
            MarkdownHighlight::new(MarkdownHighlightOptions::new(ThemeSelection::single("nope")))
                .unwrap_err();
        assert!(matches!(err, Error::Init(_)));
        assert_eq!(
            err.to_string(),
            "Failed to initialize highlighter: Theme `nope` not found"
        );
    }

    #[test]
    fn test_new_unknown_language() {
        let err = MarkdownHighlight::new(options().with_langs(["no-such-lang"])).unwrap_err();
        assert!(matches!(err, Error::Init(_)));
    }

    #[test]
    fn test_new_loads_all_languages_by_default() {
        let plugin =
            MarkdownHighlight::new(MarkdownHighlightOptions::new(ThemeSelection::single(
                "InspiredGitHub",
            )))
            .unwrap();
        assert!(plugin.highlighter().loaded_languages().count() > 10);
    }

    #[test]
    fn test_apply_installs_hook() {
        let mut renderer = MarkdownRenderer::new();
        assert!(!renderer.has_highlight());
        renderer.use_plugin(MarkdownHighlight::new(options()).unwrap());
        assert!(renderer.has_highlight());
    }

    #[test]
    fn test_apply_replaces_existing_hook() {
        let mut renderer = MarkdownRenderer::new();
        renderer.set_highlight(
            |_code: &str, _lang: &str, _attrs: &str| -> Result<String, HookError> {
                Ok("<pre>old</pre>".to_owned())
            },
        );
        renderer.use_plugin(MarkdownHighlight::new(options()).unwrap());

        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(!html.contains("old"));
        assert!(html.contains("shiki"));
    }

    #[test]
    fn test_render_document() {
        let markdown = "# Title\n\n```rust {2}\nlet a = 1;\nlet b = 2;\n```\n\nAfter.\n";
        let html = render(options(), markdown).unwrap();

        assert!(html.starts_with("<h1>Title</h1>\n"));
        assert!(html.contains(r#"<pre class="shiki inspiredgithub""#));
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert_eq!(html.matches(r#"<span class="line highlighted">"#).count(), 1);
        assert!(html.contains("<p>After.</p>"));
    }

    #[test]
    fn test_render_fence_without_language() {
        let html = render(options(), "```\nplain <text>\n```\n").unwrap();
        assert!(html.contains(r#"<code class="language-text">"#));
        assert!(html.contains("plain &lt;text&gt;"));
    }

    #[test]
    fn test_render_indented_block_is_not_highlighted() {
        let html = render(options(), "    let a = 1;\n").unwrap();
        assert!(!html.contains("shiki"));
        assert!(html.contains("<pre><code>let a = 1;\n</code></pre>"));
    }

    #[test]
    fn test_render_unloaded_language_fails_block() {
        let err = render(options(), "```python\nprint(1)\n```\n").unwrap_err();
        let RenderError::Highlight { lang, .. } = &err;
        assert_eq!(lang, "python");
    }

    #[test]
    fn test_render_meta_parser_error_fails_block() {
        let options = options().with_meta_parser(
            |_attrs: &str, _code: &str, _lang: &str| -> Result<Option<Meta>, MetaParseError> {
                Err("invalid".into())
            },
        );
        assert!(render(options, "```rust\nx\n```\n").is_err());
    }

    #[test]
    fn test_render_meta_visible_to_transformers() {
        use glint_highlight::{Element, TransformContext, Transformer};

        struct TitleAttr;

        impl Transformer for TitleAttr {
            fn name(&self) -> &str {
                "test:title"
            }

            fn pre(&self, cx: &TransformContext<'_>, node: &mut Element) {
                if let Some(Value::String(title)) = cx.meta.get("title") {
                    node.set_property("data-title", title.as_str());
                }
            }
        }

        let options = options()
            .with_meta_parser(FenceAttrsMetaParser)
            .with_transformer(TitleAttr);
        let html = render(options, "```rust {1} title=\"main.rs\"\nfn main() {}\n```\n").unwrap();

        assert!(html.contains(r#"data-title="main.rs""#));
        assert!(html.contains(r#"<span class="line highlighted">"#));
    }

    #[test]
    fn test_render_raw_meta_is_attribute_string() {
        use glint_highlight::{Element, TransformContext, Transformer};

        struct RawAttr;

        impl Transformer for RawAttr {
            fn name(&self) -> &str {
                "test:raw"
            }

            fn pre(&self, cx: &TransformContext<'_>, node: &mut Element) {
                if let Some(Value::String(raw)) = cx.meta.get("__raw") {
                    node.set_property("data-raw", raw.as_str());
                }
            }
        }

        let options = options()
            .with_meta(match json!({"__raw": "base"}) {
                Value::Object(map) => map,
                _ => unreachable!(),
            })
            .with_transformer(RawAttr);
        let html = render(options, "```rust {1,3}\nx\n```\n").unwrap();

        assert!(html.contains(r#"data-raw="{1,3}""#));
    }
}
