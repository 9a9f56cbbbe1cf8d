//! CLI error types.

use waymark_config::ConfigError;
use waymark_index::IndexError;
use waymark_nav::SidebarError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Sidebars(#[from] SidebarError),

    #[error("{0}")]
    Index(#[from] IndexError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
