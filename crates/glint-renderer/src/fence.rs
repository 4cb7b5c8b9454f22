//! Fence info string handling.

/// Split a fence info string into language and attribute string.
///
/// The language is the first whitespace-delimited word. The attribute string
/// is everything after the whitespace that follows it, passed on verbatim.
///
/// ```text
/// "ts {1,3} title=\"a.ts\""  →  ("ts", "{1,3} title=\"a.ts\"")
/// ```
#[must_use]
pub fn split_fence_info(info: &str) -> (&str, &str) {
    let info = info.trim();
    match info.find(char::is_whitespace) {
        Some(end) => (&info[..end], info[end..].trim_start()),
        None => (info, ""),
    }
}
