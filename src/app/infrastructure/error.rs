use thiserror::Error;

#[derive(Error, Debug)]
pub enum UiError {
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

/// Convenience type alias for Results with UiError
pub type Result<T> = std::result::Result<T, UiError>;
