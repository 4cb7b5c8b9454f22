//! `glint render` command implementation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use glint_config::{CliSettings, Config};
use glint_markdown::{HighlightLines, MarkdownHighlight};
use glint_renderer::MarkdownRenderer;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin, also with `-`).
    input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Theme name (overrides config).
    #[arg(short, long, env = "GLINT_THEME")]
    theme: Option<String>,

    /// Language to load, repeatable (overrides config).
    #[arg(short, long = "lang")]
    langs: Vec<String>,

    /// Class added to `{1,3-5}` emphasized lines (overrides config).
    #[arg(long, conflicts_with = "no_highlight_lines")]
    highlight_class: Option<String>,

    /// Disable line emphasis.
    #[arg(long)]
    no_highlight_lines: bool,

    /// Disable GFM extensions.
    #[arg(long)]
    no_gfm: bool,

    /// Path to configuration file (default: auto-discover glint.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        let markdown = read_input(self.input.as_deref())?;
        let html = render_markdown(&config, &markdown)?;

        match &self.output {
            Some(path) => {
                fs::write(path, &html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        let highlight_lines = if self.no_highlight_lines {
            Some(HighlightLines::Enabled(false))
        } else {
            self.highlight_class.clone().map(HighlightLines::Class)
        };

        CliSettings {
            theme: self.theme.clone(),
            langs: (!self.langs.is_empty()).then(|| self.langs.clone()),
            highlight_lines,
            gfm: self.no_gfm.then_some(false),
        }
    }
}

/// Render `markdown` with a highlighter built from `config`.
fn render_markdown(config: &Config, markdown: &str) -> Result<String, CliError> {
    let plugin = MarkdownHighlight::new(config.highlight_options()?)?;
    tracing::info!(
        themes = ?plugin.highlighter().loaded_themes(),
        languages = plugin.highlighter().loaded_languages().count(),
        "Highlighter ready"
    );

    let renderer = MarkdownRenderer::new()
        .with_gfm(config.gfm)
        .with_plugin(plugin);
    Ok(renderer.render(markdown)?)
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => io::read_to_string(io::stdin()),
    }
}
