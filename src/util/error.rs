//! Error types for screenmatch.

use thiserror::Error;

/// Result alias for screenmatch operations.
pub type ScreenMatchResult<T> = std::result::Result<T, MatchError>;

/// Errors that can occur when matching images.
///
/// A search that simply finds nothing is not an error; it is reported as
/// `Ok(None)` or an empty vector by the matching functions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// The search image is larger than the source image in some axis.
    #[error(
        "search image {search_width}x{search_height} does not fit in source image {source_width}x{source_height}"
    )]
    SizeMismatch {
        search_width: usize,
        search_height: usize,
        source_width: usize,
        source_height: usize,
    },
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than one row of samples.
    #[error("stride {stride} is smaller than row length {row_len}")]
    InvalidStride { row_len: usize, stride: usize },
    /// Backing buffer cannot hold the described image.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Channel count other than 1, 3 or 4.
    #[error("unsupported channel count {channels}")]
    UnsupportedChannels { channels: usize },
    /// Requested ROI lies outside the image.
    #[error("roi ({x}, {y}, {width}x{height}) is outside image {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Image decoding failed.
    #[cfg(feature = "image-io")]
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
