//! CLI error types.

use mdview_config::ConfigError;
use mdview_renderer::ConvertError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Conversion failed: {0}")]
    Convert(#[from] ConvertError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
