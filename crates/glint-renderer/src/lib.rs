//! Markdown renderer with a pluggable code highlight hook.
//!
//! [`MarkdownRenderer`] renders CommonMark (plus GFM extensions) to HTML with
//! `pulldown-cmark`. Fenced code blocks are handed to a single
//! [`HighlightHook`], registered directly with
//! [`MarkdownRenderer::set_highlight`] or by a [`Plugin`].
//!
//! # Example
//!
//! ```
//! use glint_renderer::{HookError, MarkdownRenderer};
//!
//! let mut renderer = MarkdownRenderer::new();
//! renderer.set_highlight(|code: &str, lang: &str, _attrs: &str| -> Result<String, HookError> {
//!     Ok(format!("<pre data-lang=\"{lang}\">{}</pre>", code.len()))
//! });
//!
//! let html = renderer.render("```rust\nfn main() {}\n```")?;
//! assert_eq!(html, "<pre data-lang=\"rust\">13</pre>");
//! # Ok::<(), glint_renderer::RenderError>(())
//! ```

mod fence;
mod hook;
mod renderer;

pub use fence::split_fence_info;
pub use hook::{HighlightHook, HookError, Plugin};
pub use renderer::{MarkdownRenderer, RenderError};
