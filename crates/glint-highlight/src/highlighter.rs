//! The highlighter: theme/grammar registry plus tree construction.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::LazyLock;

use syntect::easy::ScopeRegionIterator;
use syntect::highlighting::{Highlighter as StyleResolver, Style, Theme, ThemeSet};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

use crate::error::HighlightError;
use crate::hast::{Element, Node};
use crate::options::{CodeOptions, HighlighterOptions, ThemeSelection};
use crate::style::{ThemeSlot, pre_style, theme_slug, token_style};
use crate::transformer::TransformContext;

static BUNDLED_SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static BUNDLED_THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Language identifiers that are always available and never tokenized.
const PLAIN_TEXT_LANGS: &[&str] = &["text", "txt", "plain", "plaintext"];

/// Role used for plain colors in multi-theme mode when none is configured.
const DEFAULT_COLOR_ROLE: &str = "light";

type Result<T> = std::result::Result<T, HighlightError>;

/// Names of every bundled language grammar.
pub fn bundled_languages() -> Vec<String> {
    BUNDLED_SYNTAXES
        .syntaxes()
        .iter()
        .map(|syntax| syntax.name.clone())
        .collect()
}

/// Names of every bundled theme.
pub fn bundled_themes() -> Vec<String> {
    BUNDLED_THEMES.themes.keys().cloned().collect()
}

fn is_plain_text(lang: &str) -> bool {
    PLAIN_TEXT_LANGS
        .iter()
        .any(|alias| alias.eq_ignore_ascii_case(lang))
}

/// A run of text sharing one style per theme slot.
struct ThemedToken {
    content: String,
    styles: Vec<Style>,
}

/// Highlighter bound to a fixed set of themes and languages.
///
/// Created once with [`Highlighter::new`], then shared (it is `Send + Sync`)
/// and used for any number of [`code_to_html`](Self::code_to_html) calls.
pub struct Highlighter {
    syntaxes: &'static SyntaxSet,
    themes: HashMap<String, Theme>,
    /// Grammar names (as in [`SyntaxReference::name`]) loaded for use.
    languages: BTreeSet<String>,
}

impl Highlighter {
    /// Load the requested themes and languages.
    ///
    /// Languages are matched by file extension first, then by
    /// case-insensitive grammar name (`rs`, `rust` and `Rust` are equivalent).
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::NoThemes`] for an empty theme list, and
    /// [`HighlightError::UnknownTheme`] / [`HighlightError::UnknownLanguage`]
    /// for names missing from the bundled sets.
    pub fn new(options: HighlighterOptions) -> Result<Self> {
        if options.themes.is_empty() {
            return Err(HighlightError::NoThemes);
        }

        let mut themes = HashMap::with_capacity(options.themes.len());
        for name in options.themes {
            let theme = BUNDLED_THEMES
                .themes
                .get(&name)
                .ok_or_else(|| HighlightError::UnknownTheme(name.clone()))?;
            themes.insert(name, theme.clone());
        }

        let syntaxes: &'static SyntaxSet = &BUNDLED_SYNTAXES;
        let mut languages = BTreeSet::new();
        for lang in &options.langs {
            if is_plain_text(lang) {
                continue;
            }
            let syntax = syntaxes
                .find_syntax_by_token(lang)
                .ok_or_else(|| HighlightError::UnknownLanguage(lang.clone()))?;
            languages.insert(syntax.name.clone());
        }

        tracing::debug!(
            themes = themes.len(),
            languages = languages.len(),
            "Highlighter loaded"
        );

        Ok(Self {
            syntaxes,
            themes,
            languages,
        })
    }

    /// Names of the loaded themes (sorted).
    pub fn loaded_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Grammar names of the loaded languages (sorted).
    pub fn loaded_languages(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(String::as_str)
    }

    /// Highlight `code` and return the `<pre>` element tree.
    ///
    /// One trailing newline is ignored, so `"a\n"` renders a single line.
    ///
    /// # Errors
    ///
    /// Fails if the language or a theme was not loaded, or if tokenizing fails.
    pub fn code_to_hast(&self, code: &str, options: &CodeOptions) -> Result<Element> {
        let syntax = self.syntax_for(&options.lang)?;
        let slots = self.theme_slots(options)?;
        let resolvers: Vec<StyleResolver<'_>> =
            slots.iter().map(|slot| StyleResolver::new(slot.theme)).collect();
        let lines = self.tokenize(code, syntax, &resolvers)?;

        let cx = TransformContext {
            lang: &options.lang,
            meta: &options.meta,
        };

        let mut code_el = Element::new("code");
        for (index, tokens) in lines.into_iter().enumerate() {
            let line = index + 1;
            if index > 0 {
                code_el.push(Node::text("\n"));
            }

            let mut line_el = Element::new("span").with_property("class", "line");
            let mut col = 0;
            for token in tokens {
                let mut span =
                    Element::new("span").with_property("style", token_style(&slots, &token.styles));
                let width = token.content.chars().count();
                span.push(Node::Text(token.content));
                for transformer in &options.transformers {
                    transformer.span(&cx, &mut span, line, col);
                }
                col += width;
                line_el.push(span.into());
            }

            for transformer in &options.transformers {
                transformer.line(&cx, &mut line_el, line);
            }
            code_el.push(line_el.into());
        }

        for transformer in &options.transformers {
            transformer.code(&cx, &mut code_el);
        }

        let mut pre = Element::new("pre").with_property("class", pre_class(&slots));
        let style = pre_style(&slots);
        if !style.is_empty() {
            pre.set_property("style", style);
        }
        if let Some(tabindex) = &options.tabindex {
            pre.set_property("tabindex", tabindex.as_str());
        }
        pre.push(code_el.into());

        for transformer in &options.transformers {
            transformer.pre(&cx, &mut pre);
        }

        Ok(pre)
    }

    /// Highlight `code` and serialize it to HTML.
    ///
    /// Runs every transformer's `postprocess` hook on the serialized output.
    ///
    /// # Errors
    ///
    /// See [`code_to_hast`](Self::code_to_hast).
    pub fn code_to_html(&self, code: &str, options: &CodeOptions) -> Result<String> {
        let pre = self.code_to_hast(code, options)?;
        let cx = TransformContext {
            lang: &options.lang,
            meta: &options.meta,
        };
        Ok(options
            .transformers
            .iter()
            .fold(pre.to_html(), |html, transformer| {
                transformer.postprocess(&cx, html)
            }))
    }

    fn syntax_for(&self, lang: &str) -> Result<&SyntaxReference> {
        if is_plain_text(lang) {
            return Ok(self.syntaxes.find_syntax_plain_text());
        }
        self.syntaxes
            .find_syntax_by_token(lang)
            .filter(|syntax| self.languages.contains(&syntax.name))
            .ok_or_else(|| HighlightError::UnknownLanguage(lang.to_owned()))
    }

    fn theme(&self, name: &str) -> Result<&Theme> {
        self.themes
            .get(name)
            .ok_or_else(|| HighlightError::UnknownTheme(name.to_owned()))
    }

    /// Resolve the theme selection into render slots, plain-color slot first.
    fn theme_slots<'a>(&'a self, options: &'a CodeOptions) -> Result<Vec<ThemeSlot<'a>>> {
        match &options.themes {
            ThemeSelection::Single(name) => Ok(vec![ThemeSlot {
                role: None,
                name,
                theme: self.theme(name)?,
            }]),
            ThemeSelection::Multiple(map) => {
                let entries: Vec<(&str, &str)> = map
                    .iter()
                    .filter(|(_, theme)| !theme.is_empty())
                    .map(|(role, theme)| (role.as_str(), theme.as_str()))
                    .collect();
                let &(first_role, _) = entries.first().ok_or(HighlightError::NoThemes)?;

                let has_role = |role: &str| entries.iter().any(|(r, _)| *r == role);
                let default_role = options
                    .default_color
                    .as_deref()
                    .filter(|role| has_role(*role))
                    .or_else(|| has_role(DEFAULT_COLOR_ROLE).then_some(DEFAULT_COLOR_ROLE))
                    .unwrap_or(first_role);

                let mut slots = Vec::with_capacity(entries.len());
                for &(role, name) in &entries {
                    let slot = ThemeSlot {
                        role: (role != default_role).then_some(role),
                        name,
                        theme: self.theme(name)?,
                    };
                    if slot.role.is_none() {
                        slots.insert(0, slot);
                    } else {
                        slots.push(slot);
                    }
                }
                Ok(slots)
            }
        }
    }

    /// Split `code` into lines of merged tokens, one style per resolver.
    fn tokenize(
        &self,
        code: &str,
        syntax: &SyntaxReference,
        resolvers: &[StyleResolver<'_>],
    ) -> Result<Vec<Vec<ThemedToken>>> {
        let code = code.strip_suffix('\n').unwrap_or(code);
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut lines = Vec::new();

        for raw_line in code.split('\n') {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            // The bundled grammars expect newline-terminated input.
            let input = format!("{line}\n");
            let ops = state.parse_line(&input, self.syntaxes)?;

            let mut tokens: Vec<ThemedToken> = Vec::new();
            for (region, op) in ScopeRegionIterator::new(&ops, &input) {
                stack.apply(op)?;
                let text = region.strip_suffix('\n').unwrap_or(region);
                if text.is_empty() {
                    continue;
                }
                let styles: Vec<Style> = resolvers
                    .iter()
                    .map(|resolver| resolver.style_for_stack(stack.as_slice()))
                    .collect();
                match tokens.last_mut() {
                    Some(last) if last.styles == styles => last.content.push_str(text),
                    _ => tokens.push(ThemedToken {
                        content: text.to_owned(),
                        styles,
                    }),
                }
            }
            lines.push(tokens);
        }

        Ok(lines)
    }
}

impl fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Highlighter")
            .field("themes", &self.loaded_themes())
            .field("languages", &self.languages)
            .finish_non_exhaustive()
    }
}

fn pre_class(slots: &[ThemeSlot<'_>]) -> String {
    let slugs: Vec<String> = slots.iter().map(|slot| theme_slug(slot.name)).collect();
    if slots.len() > 1 {
        format!("shiki shiki-themes {}", slugs.join(" "))
    } else {
        format!("shiki {}", slugs.join(" "))
    }
}
