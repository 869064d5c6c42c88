use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config file not found: {0}")]
    ConfigNotFound(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid unit pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid area bounds: min {min} must be below max {max}")]
    Bounds { min: f64, max: f64 },

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
