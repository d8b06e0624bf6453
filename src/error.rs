use std::collections::TryReserveError;

use thiserror::Error;

/// Result type alias for operations that may fail with [`VectorizeError`].
pub type VectorizeResult<T> = std::result::Result<T, VectorizeError>;

/// Error types that can occur while vectorizing a bitmap.
///
/// Any error aborts the whole call; no stage hands back a partial result.
#[derive(Debug, Error)]
pub enum VectorizeError {
    /// Width or height is zero, or the pixel count does not fit in memory.
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// The pixel buffer length does not match the declared dimensions.
    #[error("Pixel buffer holds {found} bytes, expected {expected}")]
    BufferLength { expected: usize, found: usize },
    /// An image-sized working buffer (grayscale, mask or visited plane) could
    /// not be reserved. Contour point vectors grow normally, so exhausting
    /// memory there aborts instead of returning this error.
    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
    /// Writing into the output sink failed.
    #[error("Failed to emit vector output: {0}")]
    Emit(#[from] std::fmt::Error),
    /// Image loading, decoding, or encoding error.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
    /// File system I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
