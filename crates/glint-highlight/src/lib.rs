//! Syntax highlighting engine with an inspectable element tree.
//!
//! [`Highlighter`] tokenizes code with the bundled `syntect` grammars and
//! themes and builds a small HTML element tree (`pre > code > span.line >
//! span`). [`Transformer`]s are called while the tree is built and may
//! rewrite any node before it is serialized.
//!
//! # Example
//!
//! ```
//! use glint_highlight::{CodeOptions, Highlighter, HighlighterOptions, ThemeSelection};
//!
//! let highlighter = Highlighter::new(HighlighterOptions {
//!     themes: vec!["InspiredGitHub".to_owned()],
//!     langs: vec!["rust".to_owned()],
//! })?;
//!
//! let options = CodeOptions::new("rust", ThemeSelection::single("InspiredGitHub"));
//! let html = highlighter.code_to_html("fn main() {}", &options)?;
//! assert!(html.starts_with(r#"<pre class="shiki inspiredgithub""#));
//! # Ok::<(), glint_highlight::HighlightError>(())
//! ```

mod error;
mod hast;
mod highlighter;
mod options;
mod style;
mod transformer;

pub use error::HighlightError;
pub use hast::{Element, Node, add_class, escape_html};
pub use highlighter::{Highlighter, bundled_languages, bundled_themes};
pub use options::{CodeOptions, DEFAULT_TABINDEX, HighlighterOptions, Meta, ThemeSelection};
pub use transformer::{TransformContext, Transformer};
