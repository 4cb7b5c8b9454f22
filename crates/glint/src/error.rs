//! CLI error types.

use glint_config::ConfigError;
use glint_renderer::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Highlight(#[from] glint_markdown::Error),

    #[error("{0}")]
    Render(#[from] RenderError),
}
