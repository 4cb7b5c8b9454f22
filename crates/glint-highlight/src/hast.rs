//! Minimal HTML element tree built by the highlighter.
//!
//! Transformers receive mutable references to [`Element`] nodes while the
//! tree is being built, then the finished tree is serialized with
//! [`Element::to_html`].

use std::fmt::Write;

/// A node in the highlighted tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// An element with a tag, properties and children.
    Element(Element),
    /// A text node (escaped on serialization).
    Text(String),
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Element(element) => element.write_html(out),
            Self::Text(text) => out.push_str(&escape_html(text)),
        }
    }
}

/// An HTML element.
///
/// Properties keep their insertion order so that serialization is
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name (e.g., `pre`, `code`, `span`).
    pub tag: String,
    /// Attributes in insertion order.
    pub properties: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element without properties or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style [`set_property`](Self::set_property).
    #[must_use]
    pub fn with_property(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_property(name, value);
        self
    }

    /// Get a property value by name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set a property, replacing any existing value in place.
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.properties.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.properties.push((name.to_owned(), value)),
        }
    }

    /// Remove a property, returning its previous value.
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let index = self.properties.iter().position(|(key, _)| key == name)?;
        Some(self.properties.remove(index).1)
    }

    /// Iterate over the whitespace-separated entries of the `class` property.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.property("class").unwrap_or("").split_whitespace()
    }

    /// Check whether the element carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add classes to the element without removing existing ones.
    ///
    /// `class` may contain several whitespace-separated names. Names already
    /// present are not duplicated.
    pub fn add_class(&mut self, class: &str) {
        let mut classes: Vec<String> = self.classes().map(str::to_owned).collect();
        for name in class.split_whitespace() {
            if !classes.iter().any(|c| c == name) {
                classes.push(name.to_owned());
            }
        }
        if !classes.is_empty() {
            self.set_property("class", classes.join(" "));
        }
    }

    /// Append a child node.
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Iterate over direct element children.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(element) => element.collect_text(out),
                Node::Text(value) => out.push_str(value),
            }
        }
    }

    /// Serialize the element and its descendants to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(256);
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.properties {
            write!(out, r#" {name}="{}""#, escape_html(value)).unwrap();
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        write!(out, "</{}>", self.tag).unwrap();
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// Add classes to an element (free-function form of [`Element::add_class`]).
pub fn add_class(element: &mut Element, class: &str) {
    element.add_class(class);
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_class_to_empty_element() {
        let mut span = Element::new("span");
        span.add_class("line");
        assert_eq!(span.property("class"), Some("line"));
    }

    #[test]
    fn test_add_class_keeps_existing() {
        let mut span = Element::new("span").with_property("class", "line diff");
        span.add_class("highlighted");
        assert_eq!(span.property("class"), Some("line diff highlighted"));
    }

    #[test]
    fn test_add_class_does_not_duplicate() {
        let mut span = Element::new("span").with_property("class", "line highlighted");
        span.add_class("highlighted");
        assert_eq!(span.property("class"), Some("line highlighted"));
    }

    #[test]
    fn test_add_class_multiple_names() {
        let mut span = Element::new("span").with_property("class", "line");
        add_class(&mut span, "a  b line");
        assert_eq!(span.property("class"), Some("line a b"));
    }

    #[test]
    fn test_set_property_replaces_in_place() {
        let mut pre = Element::new("pre")
            .with_property("class", "shiki")
            .with_property("tabindex", "0");
        pre.set_property("class", "other");
        assert_eq!(
            pre.properties,
            vec![
                ("class".to_owned(), "other".to_owned()),
                ("tabindex".to_owned(), "0".to_owned())
            ]
        );
    }

    #[test]
    fn test_remove_property() {
        let mut code = Element::new("code").with_property("class", "x");
        assert_eq!(code.remove_property("class"), Some("x".to_owned()));
        assert_eq!(code.remove_property("class"), None);
    }

    #[test]
    fn test_to_html_escapes_text_and_attributes() {
        let mut span = Element::new("span").with_property("title", r#"a "b""#);
        span.push(Node::text("<T> & U"));
        assert_eq!(
            span.to_html(),
            r#"<span title="a &quot;b&quot;">&lt;T&gt; &amp; U</span>"#
        );
    }

    #[test]
    fn test_text_content_nested() {
        let mut code = Element::new("code");
        let mut line = Element::new("span");
        line.push(Node::text("fn"));
        line.push(Node::text(" main"));
        code.push(line.into());
        code.push(Node::text("\n"));
        assert_eq!(code.text_content(), "fn main\n");
        assert_eq!(code.child_elements().count(), 1);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }
}
