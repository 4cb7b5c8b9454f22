//! Highlight hook and plugin traits.

use crate::renderer::MarkdownRenderer;

/// Error type returned by a [`HighlightHook`].
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Callback that renders one fenced code block.
///
/// Called once per fence in document order with the block content, the
/// language (first word of the info string, possibly empty) and the rest of
/// the info string. See [`MarkdownRenderer::render`] for how the returned
/// markup is inserted.
pub trait HighlightHook: Send + Sync {
    /// Render a code block to HTML.
    fn highlight(&self, code: &str, lang: &str, attrs: &str) -> Result<String, HookError>;
}

impl<F> HighlightHook for F
where
    F: Fn(&str, &str, &str) -> Result<String, HookError> + Send + Sync,
{
    fn highlight(&self, code: &str, lang: &str, attrs: &str) -> Result<String, HookError> {
        self(code, lang, attrs)
    }
}

/// Extension that configures a renderer.
///
/// # Example
///
/// ```
/// use glint_renderer::{HookError, MarkdownRenderer, Plugin};
///
/// struct Shout;
///
/// impl Plugin for Shout {
///     fn apply(self, renderer: &mut MarkdownRenderer) {
///         renderer.set_highlight(
///             |code: &str, _lang: &str, _attrs: &str| -> Result<String, HookError> {
///                 Ok(code.to_uppercase())
///             },
///         );
///     }
/// }
///
/// let html = MarkdownRenderer::new()
///     .with_plugin(Shout)
///     .render("```\nhi\n```")?;
/// assert_eq!(html, "<pre><code>HI\n</code></pre>");
/// # Ok::<(), glint_renderer::RenderError>(())
/// ```
pub trait Plugin {
    /// Install the plugin into `renderer`.
    fn apply(self, renderer: &mut MarkdownRenderer);
}
