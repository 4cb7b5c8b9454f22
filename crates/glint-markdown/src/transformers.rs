//! Built-in transformers appended to every block's chain.

use glint_highlight::{Element, TransformContext, Transformer};

use crate::lines::{HighlightedLines, parse_highlight_lines};

/// Name of [`LineClassTransformer`].
pub const LINE_CLASS_TRANSFORMER: &str = "glint-markdown:line-class";

/// Name of [`BlockClassTransformer`].
pub const BLOCK_CLASS_TRANSFORMER: &str = "glint-markdown:block-class";

/// Adds a class to emphasized lines.
///
/// Lines are chosen by the `{...}` group of the fence attribute string. Other
/// classes on the line are kept.
#[derive(Clone, Debug)]
pub struct LineClassTransformer {
    lines: Option<HighlightedLines>,
    class_name: String,
}

impl LineClassTransformer {
    pub fn new(lines: Option<HighlightedLines>, class_name: impl Into<String>) -> Self {
        Self {
            lines,
            class_name: class_name.into(),
        }
    }

    /// Build from a fence attribute string.
    pub fn from_attrs(attrs: &str, class_name: impl Into<String>) -> Self {
        Self::new(parse_highlight_lines(attrs), class_name)
    }

    pub fn lines(&self) -> Option<&HighlightedLines> {
        self.lines.as_ref()
    }
}

impl Transformer for LineClassTransformer {
    fn name(&self) -> &str {
        LINE_CLASS_TRANSFORMER
    }

    fn line(&self, _cx: &TransformContext<'_>, node: &mut Element, line: usize) {
        if let Some(lines) = &self.lines
            && lines.contains(line)
        {
            node.add_class(&self.class_name);
        }
    }
}

/// Sets the `<code>` element's class to `language-<lang>`.
///
/// Replaces any class set earlier in the chain.
#[derive(Clone, Debug)]
pub struct BlockClassTransformer {
    class: String,
}

impl BlockClassTransformer {
    pub fn new(lang: &str) -> Self {
        Self {
            class: format!("language-{lang}"),
        }
    }
}

impl Transformer for BlockClassTransformer {
    fn name(&self) -> &str {
        BLOCK_CLASS_TRANSFORMER
    }

    fn code(&self, _cx: &TransformContext<'_>, node: &mut Element) {
        node.set_property("class", self.class.as_str());
    }
}
