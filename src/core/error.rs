use thiserror::Error;

#[derive(Error, Debug)]
pub enum SowgridError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown object in scenario: {0}")]
    UnknownObject(String),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SowgridError>;
