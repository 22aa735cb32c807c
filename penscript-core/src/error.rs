use thiserror::Error;

#[derive(Error, Debug)]
pub enum PenscriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid object reference: {0}")]
    InvalidReference(String),

    #[error("Compression error: {0}")]
    CompressionError(String),
}

pub type Result<T> = std::result::Result<T, PenscriptError>;
