//! `{1,3-5}` line range parsing.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

static LINE_RANGES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([\d,-]+)\}").unwrap());

/// 1-based line numbers named by a `{...}` group.
///
/// Entries are kept as the inclusive ranges they were written as, so a group
/// like `{1-18446744073709551615}` costs one range regardless of its width.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightedLines {
    ranges: Vec<RangeInclusive<usize>>,
}

impl HighlightedLines {
    /// Whether `line` falls in any entry.
    pub fn contains(&self, line: usize) -> bool {
        self.ranges.iter().any(|range| range.contains(&line))
    }

    /// True when no entry names a line.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Entries in the order they were written. Reversed and unparseable
    /// entries are not included.
    pub fn ranges(&self) -> &[RangeInclusive<usize>] {
        &self.ranges
    }
}

/// Parse the first `{...}` line range group in a fence attribute string.
///
/// Returns `None` when the string is empty or contains no group. Otherwise
/// returns the named lines, which may be empty: entries are comma-separated
/// single numbers or `start-end` inclusive ranges, and reversed ranges or
/// unparseable entries contribute nothing.
///
/// ```
/// use glint_markdown::parse_highlight_lines;
///
/// let lines = parse_highlight_lines("{1,3-4} title=\"a.rs\"").unwrap();
/// assert!(lines.contains(1) && lines.contains(4));
/// assert!(!lines.contains(2));
/// assert!(parse_highlight_lines("title=\"a.rs\"").is_none());
/// ```
#[must_use]
pub fn parse_highlight_lines(attrs: &str) -> Option<HighlightedLines> {
    if attrs.is_empty() {
        return None;
    }

    let group = LINE_RANGES_RE.captures(attrs)?.get(1)?.as_str();
    let mut ranges = Vec::new();
    for entry in group.split(',') {
        let bounds: Vec<&str> = entry.split('-').collect();
        let range = match bounds.as_slice() {
            [single] => single.parse::<usize>().ok().map(|line| line..=line),
            [start, end, ..] => match (start.parse::<usize>(), end.parse::<usize>()) {
                (Ok(start), Ok(end)) => Some(start..=end),
                _ => None,
            },
            [] => None,
        };
        if let Some(range) = range.filter(|range| !range.is_empty()) {
            ranges.push(range);
        }
    }

    Some(HighlightedLines { ranges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Lines 1 through 20 that the parsed group names.
    fn parse(attrs: &str) -> Option<Vec<usize>> {
        parse_highlight_lines(attrs)
            .map(|lines| (1..=20).filter(|&line| lines.contains(line)).collect())
    }

    #[test]
    fn test_empty_attrs() {
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_no_group() {
        assert_eq!(parse("title=\"a.ts\""), None);
        assert_eq!(parse("{a,b}"), None);
    }

    #[test]
    fn test_single_lines() {
        assert_eq!(parse("{1,3}"), Some(vec![1, 3]));
    }

    #[test]
    fn test_ranges_and_singles() {
        assert_eq!(parse("{1,3-5,9}"), Some(vec![1, 3, 4, 5, 9]));
    }

    #[test]
    fn test_overlapping_entries_deduplicate() {
        assert_eq!(parse("{2-4,3,4-5}"), Some(vec![2, 3, 4, 5]));
    }

    #[test]
    fn test_ranges_kept_as_written() {
        let lines = parse_highlight_lines("{2-4,7}").unwrap();
        assert_eq!(lines.ranges(), &[2..=4, 7..=7]);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let lines = parse_highlight_lines("{5-3}").unwrap();
        assert!(lines.is_empty());
        assert_eq!(parse("{5-3}"), Some(vec![]));
    }

    #[test]
    fn test_unparseable_entries_are_skipped() {
        assert_eq!(parse("{-}"), Some(vec![]));
        assert_eq!(parse("{,2,}"), Some(vec![2]));
        assert_eq!(parse("{3-}"), Some(vec![]));
    }

    #[test]
    fn test_extra_range_bounds_are_ignored() {
        assert_eq!(parse("{1-3-9}"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_group_anywhere_in_attrs() {
        assert_eq!(parse("title=\"x\" {2}"), Some(vec![2]));
    }

    #[test]
    fn test_first_group_wins() {
        assert_eq!(parse("{1} {4}"), Some(vec![1]));
    }

    #[test]
    fn test_unbounded_range_is_not_expanded() {
        let lines = parse_highlight_lines("{1-18446744073709551615}").unwrap();
        assert_eq!(lines.ranges(), &[1..=usize::MAX]);
        assert!(lines.contains(1));
        assert!(lines.contains(usize::MAX));
        assert!(!lines.contains(0));
    }

    #[test]
    fn test_out_of_range_number_is_skipped() {
        assert_eq!(parse("{2,99999999999999999999999}"), Some(vec![2]));
    }
}
