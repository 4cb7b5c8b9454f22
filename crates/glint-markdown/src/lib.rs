//! Syntax-highlighted fenced code blocks for [`glint_renderer`].
//!
//! [`MarkdownHighlight`] is a renderer [`Plugin`](glint_renderer::Plugin)
//! that creates one [`Highlighter`](glint_highlight::Highlighter) up front and
//! renders every fenced code block with it.
//!
//! For each block it:
//! - defaults an empty language to `text`
//! - merges base metadata, metadata parsed from the fence attribute string,
//!   and the raw attribute string (under `__raw`)
//! - runs the configured transformers, then adds a class to the lines named
//!   by a `{1,3-5}` group and sets `language-<lang>` on the `<code>` element
//!
//! A fence opened with `` ```rust {1,3} title="main.rs" `` is highlighted as
//! Rust, with lines 1 and 3 carrying the `highlighted` class.
//!
//! Rendering is all-or-nothing: a failing block fails the whole document.

mod block;
mod error;
mod init;
mod lines;
mod meta;
mod options;
mod plugin;
mod transformers;

pub use block::{BlockRenderer, DEFAULT_LANG};
pub use error::Error;
pub use init::{create_highlighter, resolve_languages, resolve_theme_names};
pub use lines::{HighlightedLines, parse_highlight_lines};
pub use meta::{FenceAttrsMetaParser, MetaParseError, MetaParser, RAW_META_KEY, merge_meta};
pub use options::{DEFAULT_HIGHLIGHT_CLASS, HighlightLines, MarkdownHighlightOptions};
pub use plugin::MarkdownHighlight;
pub use transformers::{
    BLOCK_CLASS_TRANSFORMER, BlockClassTransformer, LINE_CLASS_TRANSFORMER, LineClassTransformer,
};
