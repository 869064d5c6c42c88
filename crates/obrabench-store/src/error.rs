use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table file not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    Delimiter(char),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("table is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
