use std::io;

use thiserror::Error;

use crate::core::config::ConfigError;

/// Errors that end the program with a non-zero exit status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("terminal backend error: {0}")]
    Backend(String),
    #[error("{0}")]
    Editor(String),
}
