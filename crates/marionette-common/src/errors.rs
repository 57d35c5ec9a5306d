use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MarionetteError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("bridge error: {0}")]
    Bridge(String),

    #[error("widget error: {0}")]
    Widget(String),

    #[error("selector error: {0}")]
    Selector(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("{0}")]
    Other(String),
}
