use thiserror::Error;

#[derive(Error, Debug)]
pub enum CosmoselectError {
    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Integration failure: {0}")]
    Integration(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CosmoselectError>;
