//! Configuration management for glint.
//!
//! Parses `glint.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! theme = "InspiredGitHub"          # or a [themes] table of role = theme
//! langs = ["rust", "python"]        # omit to load every bundled grammar
//! highlight_lines = "highlighted"   # true, false or a class name
//! parse_meta = "attrs"              # parse key=value fence attributes
//! tabindex = "0"                    # "" omits the attribute
//!
//! [meta]
//! project = "docs"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glint_highlight::{Meta, ThemeSelection};
use glint_markdown::{FenceAttrsMetaParser, HighlightLines, MarkdownHighlightOptions};
use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "glint.toml";

/// Theme used when no configuration file is found.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the theme. Replaces a `[themes]` table.
    pub theme: Option<String>,
    /// Override the languages to load.
    pub langs: Option<Vec<String>>,
    /// Override line emphasis.
    pub highlight_lines: Option<HighlightLines>,
    /// Override GFM extensions.
    pub gfm: Option<bool>,
}

/// Built-in fence metadata parsers selectable from config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaParserKind {
    /// `key=value`, quoted values and bare flags.
    Attrs,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Single theme name.
    pub theme: Option<String>,
    /// Theme names keyed by role (`light`, `dark`, ...).
    pub themes: Option<BTreeMap<String, String>>,
    /// Role whose colors are emitted directly when `themes` is used.
    pub default_color: Option<String>,
    /// Languages to load. `None` loads every bundled grammar.
    pub langs: Option<Vec<String>>,
    /// Line emphasis: `true`, `false` or a class name.
    pub highlight_lines: HighlightLines,
    /// Fence metadata parser.
    pub parse_meta: Option<MetaParserKind>,
    /// Base metadata for every code block.
    pub meta: Meta,
    /// `tabindex` on `<pre>`. Empty omits the attribute.
    pub tabindex: String,
    /// Enable GFM extensions (tables, strikethrough, task lists).
    pub gfm: bool,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            themes: None,
            default_color: None,
            langs: None,
            highlight_lines: HighlightLines::default(),
            parse_meta: None,
            meta: Meta::new(),
            tabindex: glint_highlight::DEFAULT_TABINDEX.to_owned(),
            gfm: true,
            config_path: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `glint.toml` in current directory and parents,
    /// falling back to [`DEFAULT_THEME`] when none is found.
    ///
    /// CLI settings are applied after loading, and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::with_default_theme()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(theme) = &settings.theme {
            self.theme = Some(theme.clone());
            self.themes = None;
        }
        if let Some(langs) = &settings.langs {
            self.langs = Some(langs.clone());
        }
        if let Some(highlight_lines) = &settings.highlight_lines {
            self.highlight_lines.clone_from(highlight_lines);
        }
        if let Some(gfm) = settings.gfm {
            self.gfm = gfm;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        discover_config_from(&current)
    }

    /// Default configuration used when no config file exists.
    fn with_default_theme() -> Self {
        Self {
            theme: Some(DEFAULT_THEME.to_owned()),
            ..Self::default()
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Exactly one of `theme` and `themes` must be set, theme names and
    /// language entries must be non-empty, and `default_color` must name a
    /// configured role.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_themes()?;
        if let Some(langs) = &self.langs {
            for lang in langs {
                require_non_empty(lang, "langs entry")?;
            }
        }
        Ok(())
    }

    fn validate_themes(&self) -> Result<(), ConfigError> {
        match self.theme_selection()? {
            ThemeSelection::Single(theme) => require_non_empty(&theme, "theme"),
            ThemeSelection::Multiple(themes) => {
                if themes.is_empty() {
                    return Err(ConfigError::Validation("themes cannot be empty".to_owned()));
                }
                for (role, theme) in &themes {
                    require_non_empty(theme, &format!("themes.{role}"))?;
                }
                if let Some(role) = &self.default_color
                    && !themes.contains_key(role)
                {
                    return Err(ConfigError::Validation(format!(
                        "default_color `{role}` is not a role in themes"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Theme selection described by `theme` or `themes`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if neither or both are set.
    pub fn theme_selection(&self) -> Result<ThemeSelection, ConfigError> {
        match (&self.theme, &self.themes) {
            (Some(theme), None) => Ok(ThemeSelection::Single(theme.clone())),
            (None, Some(themes)) => Ok(ThemeSelection::Multiple(themes.clone())),
            (Some(_), Some(_)) => Err(ConfigError::Validation(
                "theme and themes are mutually exclusive".to_owned(),
            )),
            (None, None) => Err(ConfigError::Validation(
                "either theme or themes must be set".to_owned(),
            )),
        }
    }

    /// Build highlighting options from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the theme selection is invalid.
    pub fn highlight_options(&self) -> Result<MarkdownHighlightOptions, ConfigError> {
        let mut options = MarkdownHighlightOptions::new(self.theme_selection()?)
            .with_highlight_lines(self.highlight_lines.clone())
            .with_meta(self.meta.clone())
            .with_tabindex((!self.tabindex.is_empty()).then(|| self.tabindex.clone()));
        options.langs.clone_from(&self.langs);
        options.default_color.clone_from(&self.default_color);
        if let Some(MetaParserKind::Attrs) = self.parse_meta {
            options = options.with_meta_parser(FenceAttrsMetaParser);
        }
        Ok(options)
    }
}

/// Search for `glint.toml` in `start` and its parents.
pub fn discover_config_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
