//! CSS generation from syntect styles.

use std::fmt::Write;

use syntect::highlighting::{Color, FontStyle, Style};

/// Format a color as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
pub(crate) fn css_color(color: Color) -> String {
    if color.a == 0xff {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    } else {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            color.r, color.g, color.b, color.a
        )
    }
}

/// Turn a theme name into a class-name-safe slug.
///
/// `Solarized (dark)` → `solarized-dark`, `base16-ocean.dark` → `base16-ocean-dark`.
pub(crate) fn theme_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// A theme resolved for rendering, paired with the role it fills.
///
/// `role` is `None` for the colors emitted as plain CSS properties and
/// `Some(role)` for themes emitted as `--shiki-<role>` variables.
pub(crate) struct ThemeSlot<'a> {
    pub(crate) role: Option<&'a str>,
    pub(crate) name: &'a str,
    pub(crate) theme: &'a syntect::highlighting::Theme,
}

/// Inline style for a token rendered with one style per theme slot.
pub(crate) fn token_style(slots: &[ThemeSlot<'_>], styles: &[Style]) -> String {
    let mut css = String::new();
    for (slot, style) in slots.iter().zip(styles) {
        let prefix = slot.role.map(|role| format!("--shiki-{role}"));
        push_declaration(
            &mut css,
            prefix.as_deref(),
            "color",
            "",
            &css_color(style.foreground),
        );
        if style.font_style.contains(FontStyle::ITALIC) {
            push_declaration(&mut css, prefix.as_deref(), "font-style", "-font-style", "italic");
        }
        if style.font_style.contains(FontStyle::BOLD) {
            push_declaration(&mut css, prefix.as_deref(), "font-weight", "-font-weight", "bold");
        }
        if style.font_style.contains(FontStyle::UNDERLINE) {
            push_declaration(
                &mut css,
                prefix.as_deref(),
                "text-decoration",
                "-text-decoration",
                "underline",
            );
        }
    }
    css
}

/// Inline style for the `<pre>` element (background and foreground per slot).
pub(crate) fn pre_style(slots: &[ThemeSlot<'_>]) -> String {
    let mut css = String::new();
    for slot in slots {
        let settings = &slot.theme.settings;
        let prefix = slot.role.map(|role| format!("--shiki-{role}"));
        if let Some(background) = settings.background {
            push_declaration(
                &mut css,
                prefix.as_deref(),
                "background-color",
                "-bg",
                &css_color(background),
            );
        }
        if let Some(foreground) = settings.foreground {
            push_declaration(&mut css, prefix.as_deref(), "color", "", &css_color(foreground));
        }
    }
    css
}

/// Append `property:value;` or, for variable slots, `<prefix><suffix>:value;`.
fn push_declaration(
    css: &mut String,
    variable_prefix: Option<&str>,
    property: &str,
    variable_suffix: &str,
    value: &str,
) {
    if !css.is_empty() {
        css.push(';');
    }
    match variable_prefix {
        Some(prefix) => write!(css, "{prefix}{variable_suffix}:{value}").unwrap(),
        None => write!(css, "{property}:{value}").unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_css_color_opaque() {
        let color = Color {
            r: 0xf9,
            g: 0x75,
            b: 0x83,
            a: 0xff,
        };
        assert_eq!(css_color(color), "#f97583");
    }

    #[test]
    fn test_css_color_translucent() {
        let color = Color {
            r: 0,
            g: 0x10,
            b: 0xff,
            a: 0x80,
        };
        assert_eq!(css_color(color), "#0010ff80");
    }

    #[test]
    fn test_theme_slug() {
        assert_eq!(theme_slug("InspiredGitHub"), "inspiredgithub");
        assert_eq!(theme_slug("Solarized (dark)"), "solarized-dark");
        assert_eq!(theme_slug("base16-ocean.dark"), "base16-ocean-dark");
        assert_eq!(theme_slug("  --x--  "), "x");
    }

    #[test]
    fn test_push_declaration_variable_slot() {
        let mut css = String::new();
        push_declaration(&mut css, None, "color", "", "#000000");
        push_declaration(&mut css, Some("--shiki-dark"), "color", "", "#ffffff");
        push_declaration(&mut css, Some("--shiki-dark"), "background-color", "-bg", "#111111");
        assert_eq!(
            css,
            "color:#000000;--shiki-dark:#ffffff;--shiki-dark-bg:#111111"
        );
    }
}
