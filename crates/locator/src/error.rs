use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Intensity range is inverted: low {low} > high {high}")]
    InvalidRange { low: u8, high: u8 },

    #[error("Median kernel size must be odd and non-zero, got {0}")]
    InvalidKernelSize(u32),

    #[error("Size band is inverted: min_side {min_side} > max_side {max_side}")]
    InvalidSizeBounds { min_side: u32, max_side: u32 },

    #[error("Mask is not binary: value {value} at ({x}, {y})")]
    NonBinaryMask { value: u8, x: u32, y: u32 },

    #[error("Rectangle thickness must be at least 1")]
    ZeroThickness,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LocatorError>;
