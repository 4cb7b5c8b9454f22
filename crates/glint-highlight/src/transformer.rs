//! Tree transformer hooks.
//!
//! A [`Transformer`] is called by the highlighter while it builds the element
//! tree. Hooks run in chain order at each step:
//!
//! 1. [`span`](Transformer::span) for every token of a line
//! 2. [`line`](Transformer::line) once the line's tokens are in place
//! 3. [`code`](Transformer::code) on the `<code>` element
//! 4. [`pre`](Transformer::pre) on the root `<pre>` element
//! 5. [`postprocess`](Transformer::postprocess) on the serialized HTML
//!
//! Line numbers are 1-based; token columns are 0-based character offsets.

use crate::hast::Element;
use crate::options::Meta;

/// Per-call data passed to every hook.
#[derive(Clone, Copy, Debug)]
pub struct TransformContext<'a> {
    /// Language identifier the code is highlighted as.
    pub lang: &'a str,
    /// Metadata from [`CodeOptions::meta`](crate::CodeOptions::meta).
    pub meta: &'a Meta,
}

/// Callbacks invoked during tree construction.
///
/// All hooks default to no-ops.
pub trait Transformer: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Visit a token `<span>`.
    fn span(&self, _cx: &TransformContext<'_>, _node: &mut Element, _line: usize, _col: usize) {}

    /// Visit a `<span class="line">` element.
    fn line(&self, _cx: &TransformContext<'_>, _node: &mut Element, _line: usize) {}

    /// Visit the `<code>` element.
    fn code(&self, _cx: &TransformContext<'_>, _node: &mut Element) {}

    /// Visit the root `<pre>` element.
    fn pre(&self, _cx: &TransformContext<'_>, _node: &mut Element) {}

    /// Rewrite the serialized HTML.
    fn postprocess(&self, _cx: &TransformContext<'_>, html: String) -> String {
        html
    }
}
