use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Environment not ready: {0}")]
    NotReady(String),

    #[error("Environment closed")]
    Closed,

    #[error("Quit requested")]
    QuitRequested,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),
}
