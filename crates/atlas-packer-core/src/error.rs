use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("invalid dimensions: width and height must be greater than 0 (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unsupported option: {0}")]
    UnsupportedOption(String),

    /// Search exhaustion: no admissible atlas size fits every input. A normal,
    /// recoverable outcome; the caller decides whether to relax constraints.
    #[error("out of space: no atlas within {max_width}x{max_height} fits all {count} images")]
    OutOfSpace {
        max_width: u32,
        max_height: u32,
        count: usize,
    },
}

pub type Result<T> = std::result::Result<T, AtlasError>;
