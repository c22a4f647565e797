use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("index {index} out of range for {len} item(s)")]
    OutOfRange { index: usize, len: usize },
    #[error("access denied")]
    PermissionDenied,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShopError>;
