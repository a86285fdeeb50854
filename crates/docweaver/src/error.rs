//! CLI error types.

use dw_config::ConfigError;
use dw_publish::PublishError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Publish(#[from] PublishError),

    #[error("{0}")]
    Failed(String),
}
