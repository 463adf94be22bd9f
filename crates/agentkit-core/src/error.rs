use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitError {
    #[error("unknown tool '{0}': expected one of claude, cursor, aider")]
    UnknownTool(String),

    #[error("invalid link name '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidLinkName(String),

    #[error("input directory does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, KitError>;
