use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridPackError {
    #[error("Invalid canvas dimensions: {width}x{height} (both must be positive)")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, GridPackError>;
