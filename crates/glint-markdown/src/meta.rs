//! Fence attribute string metadata.

use glint_highlight::Meta;
use serde_json::Value;

/// Metadata key holding the raw fence attribute string.
///
/// Always set last, so neither base metadata nor a parser can override it.
pub const RAW_META_KEY: &str = "__raw";

/// Error type returned by a [`MetaParser`].
pub type MetaParseError = Box<dyn std::error::Error + Send + Sync>;

/// Turns a fence attribute string into metadata.
///
/// Called once per code block with the attribute string, the block content
/// and the resolved language. `Ok(None)` means "no metadata".
pub trait MetaParser: Send + Sync {
    /// Parse the attribute string of one code block.
    ///
    /// # Errors
    ///
    /// Any error aborts rendering of the block.
    fn parse(&self, attrs: &str, code: &str, lang: &str) -> Result<Option<Meta>, MetaParseError>;
}

impl<F> MetaParser for F
where
    F: Fn(&str, &str, &str) -> Result<Option<Meta>, MetaParseError> + Send + Sync,
{
    fn parse(&self, attrs: &str, code: &str, lang: &str) -> Result<Option<Meta>, MetaParseError> {
        self(attrs, code, lang)
    }
}

/// Merge block metadata: `base`, then `parsed`, then the raw attribute string.
///
/// Later sources win on key collisions.
pub fn merge_meta(base: &Meta, parsed: Option<Meta>, raw: &str) -> Meta {
    let mut meta = base.clone();
    if let Some(parsed) = parsed {
        meta.extend(parsed);
    }
    meta.insert(RAW_META_KEY.to_owned(), Value::String(raw.to_owned()));
    meta
}

/// Parser for `key=value` fence attributes.
///
/// Supports unquoted values, single- or double-quoted values (which may
/// contain whitespace) and bare flags, which become `true`. `{...}` groups
/// (line ranges) are skipped.
///
/// ```text
/// {1,3} title="main.rs" open   →  {"title": "main.rs", "open": true}
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FenceAttrsMetaParser;

impl MetaParser for FenceAttrsMetaParser {
    fn parse(&self, attrs: &str, _code: &str, _lang: &str) -> Result<Option<Meta>, MetaParseError> {
        let meta = parse_fence_attrs(attrs);
        Ok((!meta.is_empty()).then_some(meta))
    }
}

fn parse_fence_attrs(attrs: &str) -> Meta {
    let mut meta = Meta::new();
    let mut rest = attrs.trim_start();

    while let Some(first) = rest.chars().next() {
        if first == '{' {
            rest = rest.find('}').map_or("", |end| &rest[end + 1..]);
        } else {
            let key_end = rest
                .find(|c: char| c.is_whitespace() || c == '=')
                .unwrap_or(rest.len());
            let key = &rest[..key_end];
            rest = &rest[key_end..];

            let value = if let Some(after_eq) = rest.strip_prefix('=') {
                let (value, remaining) = take_value(after_eq);
                rest = remaining;
                Value::String(value.to_owned())
            } else {
                Value::Bool(true)
            };
            if !key.is_empty() {
                meta.insert(key.to_owned(), value);
            }
        }
        rest = rest.trim_start();
    }

    meta
}

/// Split one attribute value off `input`, returning `(value, remaining)`.
fn take_value(input: &str) -> (&str, &str) {
    if let Some(quote) = input.chars().next().filter(|&c| c == '"' || c == '\'') {
        let body = &input[1..];
        return match body.find(quote) {
            Some(end) => (&body[..end], &body[end + 1..]),
            None => (body, ""),
        };
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    (&input[..end], &input[end..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn meta(value: Value) -> Meta {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_merge_meta_precedence() {
        let base = meta(json!({"a": 1, "b": 1}));
        let parsed = meta(json!({"b": 2, "c": 2}));

        let merged = merge_meta(&base, Some(parsed), "{1}");

        assert_eq!(
            Value::Object(merged),
            json!({"a": 1, "b": 2, "c": 2, "__raw": "{1}"})
        );
    }

    #[test]
    fn test_merge_meta_raw_cannot_be_overridden() {
        let base = meta(json!({"__raw": "base"}));
        let parsed = meta(json!({"__raw": "parsed"}));

        let merged = merge_meta(&base, Some(parsed), "actual");

        assert_eq!(merged[RAW_META_KEY], json!("actual"));
    }

    #[test]
    fn test_merge_meta_without_parsed() {
        let merged = merge_meta(&Meta::new(), None, "");
        assert_eq!(Value::Object(merged), json!({"__raw": ""}));
    }

    #[test]
    fn test_merge_meta_does_not_mutate_base() {
        let base = meta(json!({"a": 1}));
        let _ = merge_meta(&base, Some(meta(json!({"a": 2}))), "x");
        assert_eq!(Value::Object(base), json!({"a": 1}));
    }

    #[test]
    fn test_closure_parser() {
        let parser = |attrs: &str, _code: &str, lang: &str| -> Result<Option<Meta>, MetaParseError> {
            Ok(Some(meta(json!({"attrs": attrs, "lang": lang}))))
        };
        let parsed = parser.parse("{1}", "x", "rust").unwrap().unwrap();
        assert_eq!(
            Value::Object(parsed),
            json!({"attrs": "{1}", "lang": "rust"})
        );
    }

    #[test]
    fn test_fence_attrs_key_values_and_flags() {
        let parsed = FenceAttrsMetaParser
            .parse(r#"{1,3} title="main.rs" open lines=10"#, "", "rust")
            .unwrap()
            .unwrap();
        assert_eq!(
            Value::Object(parsed),
            json!({"title": "main.rs", "open": true, "lines": "10"})
        );
    }

    #[test]
    fn test_fence_attrs_quoted_whitespace() {
        let parsed = parse_fence_attrs(r#"title="a b  c" caption='x "y"'"#);
        assert_eq!(
            Value::Object(parsed),
            json!({"title": "a b  c", "caption": "x \"y\""})
        );
    }

    #[test]
    fn test_fence_attrs_unterminated_quote() {
        let parsed = parse_fence_attrs(r#"title="open ended"#);
        assert_eq!(Value::Object(parsed), json!({"title": "open ended"}));
    }

    #[test]
    fn test_fence_attrs_empty_value() {
        let parsed = parse_fence_attrs("title= open");
        assert_eq!(Value::Object(parsed), json!({"title": "", "open": true}));
    }

    #[test]
    fn test_fence_attrs_only_ranges() {
        assert!(FenceAttrsMetaParser.parse("{1-3}", "", "rust").unwrap().is_none());
        assert!(FenceAttrsMetaParser.parse("", "", "rust").unwrap().is_none());
    }

    #[test]
    fn test_fence_attrs_unclosed_brace() {
        let parsed = parse_fence_attrs("open {1,2");
        assert_eq!(Value::Object(parsed), json!({"open": true}));
    }
}
