use thiserror::Error;

#[derive(Error, Debug)]
pub enum FractalTreeError {
    #[error("Invalid parameter: unknown gene '{0}'")]
    InvalidParameter(String),

    #[error("Malformed strand: {0}")]
    MalformedStrand(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FractalTreeError>;
