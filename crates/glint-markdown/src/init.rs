//! Highlighter creation from plugin options.

use glint_highlight::{
    HighlightError, Highlighter, HighlighterOptions, ThemeSelection, bundled_languages,
};

use crate::options::MarkdownHighlightOptions;

/// Distinct, non-empty theme names referenced by a theme selection.
///
/// Order is first appearance (role order for a multi-theme selection).
pub fn resolve_theme_names(themes: &ThemeSelection) -> Vec<String> {
    let candidates: Vec<&String> = match themes {
        ThemeSelection::Single(name) => vec![name],
        ThemeSelection::Multiple(map) => map.values().collect(),
    };

    let mut names: Vec<String> = Vec::with_capacity(candidates.len());
    for name in candidates {
        if !name.is_empty() && !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

/// Languages to load: the given list, or every bundled grammar.
pub fn resolve_languages(langs: Option<&[String]>) -> Vec<String> {
    langs.map_or_else(bundled_languages, <[String]>::to_vec)
}

/// Create a highlighter loaded with the themes and languages in `options`.
///
/// # Errors
///
/// Fails if no theme is named or a theme or language is not bundled.
pub fn create_highlighter(
    options: &MarkdownHighlightOptions,
) -> Result<Highlighter, HighlightError> {
    let themes = resolve_theme_names(&options.themes);
    let langs = resolve_languages(options.langs.as_deref());

    tracing::debug!(?themes, langs = langs.len(), "Creating highlighter");

    Highlighter::new(HighlighterOptions { themes, langs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_single_theme() {
        assert_eq!(
            resolve_theme_names(&ThemeSelection::single("InspiredGitHub")),
            vec!["InspiredGitHub"]
        );
    }

    #[test]
    fn test_resolve_multiple_themes_dedup_and_skip_empty() {
        let themes = ThemeSelection::multiple([
            ("dark", "base16-ocean.dark"),
            ("dim", "base16-ocean.dark"),
            ("light", "InspiredGitHub"),
            ("none", ""),
        ]);
        assert_eq!(
            resolve_theme_names(&themes),
            vec!["base16-ocean.dark", "InspiredGitHub"]
        );
    }

    #[test]
    fn test_resolve_empty_single_theme() {
        assert!(resolve_theme_names(&ThemeSelection::single("")).is_empty());
    }

    #[test]
    fn test_resolve_languages_defaults_to_bundled() {
        let all = resolve_languages(None);
        assert_eq!(all, bundled_languages());
        assert!(all.iter().any(|lang| lang == "Rust"));
    }

    #[test]
    fn test_resolve_languages_explicit() {
        let langs = vec!["rust".to_owned()];
        assert_eq!(resolve_languages(Some(&langs)), vec!["rust"]);
    }

    #[test]
    fn test_create_highlighter() {
        let options = MarkdownHighlightOptions::new(ThemeSelection::single("InspiredGitHub"))
            .with_langs(["rust"]);
        let highlighter = create_highlighter(&options).unwrap();
        assert_eq!(highlighter.loaded_themes(), vec!["InspiredGitHub"]);
        assert_eq!(highlighter.loaded_languages().collect::<Vec<_>>(), vec!["Rust"]);
    }

    #[test]
    fn test_create_highlighter_unknown_theme() {
        let options = MarkdownHighlightOptions::new(ThemeSelection::single("no-such-theme"));
        let err = create_highlighter(&options).unwrap_err();
        assert!(matches!(err, HighlightError::UnknownTheme(name) if name == "no-such-theme"));
    }

    #[test]
    fn test_create_highlighter_unknown_language() {
        let options = MarkdownHighlightOptions::new(ThemeSelection::single("InspiredGitHub"))
            .with_langs(["no-such-lang"]);
        let err = create_highlighter(&options).unwrap_err();
        assert!(matches!(err, HighlightError::UnknownLanguage(_)));
    }

    #[test]
    fn test_create_highlighter_without_themes() {
        let options = MarkdownHighlightOptions::new(ThemeSelection::single(""));
        let err = create_highlighter(&options).unwrap_err();
        assert!(matches!(err, HighlightError::NoThemes));
    }
}
