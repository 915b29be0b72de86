//! Image views and owned buffers.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer of interleaved `u8`
//! samples. Color images are RGB (or RGBA, alpha ignored) in row-major order.
//! The stride counts samples between the starts of consecutive rows, so a
//! stride larger than `width * channels` represents padded rows. ROI slices
//! are zero-copy views into the same backing slice and retain the original
//! stride.

use crate::geometry::Resolution;
use crate::util::{MatchError, ScreenMatchResult};

#[cfg(feature = "image-io")]
pub mod io;
mod owned;

pub use owned::OwnedImage;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a contiguous view with `stride == width * channels`.
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> ScreenMatchResult<Self> {
        let stride = width
            .checked_mul(channels)
            .ok_or(MatchError::InvalidDimensions { width, height })?;
        Self::new(data, width, height, channels, stride)
    }

    /// Creates a contiguous single-channel view.
    pub fn from_gray(data: &'a [u8], width: usize, height: usize) -> ScreenMatchResult<Self> {
        Self::from_slice(data, width, height, 1)
    }

    /// Creates a view with an explicit stride in samples.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
    ) -> ScreenMatchResult<Self> {
        check_channels(channels)?;
        let needed = required_len(width, height, channels, stride)?;
        if data.len() < needed {
            return Err(MatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved samples per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the stride in samples between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the samples of pixel `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y
            .checked_mul(self.stride)?
            .checked_add(x.checked_mul(self.channels)?)?;
        self.data.get(start..start + self.channels)
    }

    /// Returns the samples of row `y`, `width * channels` long.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.channels)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(&self, x: usize, y: usize, width: usize, height: usize) -> ScreenMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(MatchError::InvalidDimensions { width, height });
        }

        let out_of_bounds = MatchError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or(out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or(out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y * self.stride + x * self.channels;
        let data = self.data.get(start..).ok_or(MatchError::BufferTooSmall {
            needed: start.saturating_add(1),
            got: self.data.len(),
        })?;

        ImageView::new(data, width, height, self.channels, self.stride)
    }

    /// Converts to a single-channel luminance image.
    ///
    /// Gray views are copied unchanged; color views use BT.601 weights on the
    /// first three samples of each pixel.
    pub fn to_luma(&self) -> OwnedImage {
        OwnedImage::luma_from_view(*self)
    }

    /// Extracts channel `channel` as a single-channel image.
    pub fn channel_plane(&self, channel: usize) -> ScreenMatchResult<OwnedImage> {
        if channel >= self.channels {
            return Err(MatchError::UnsupportedChannels { channels: channel + 1 });
        }
        Ok(OwnedImage::plane_from_view(*self, channel))
    }
}

fn check_channels(channels: usize) -> ScreenMatchResult<()> {
    match channels {
        1 | 3 | 4 => Ok(()),
        _ => Err(MatchError::UnsupportedChannels { channels }),
    }
}

fn required_len(
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
) -> ScreenMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(MatchError::InvalidDimensions { width, height });
    }
    let row_len = width
        .checked_mul(channels)
        .ok_or(MatchError::InvalidDimensions { width, height })?;
    if stride < row_len {
        return Err(MatchError::InvalidStride { row_len, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(MatchError::InvalidDimensions { width, height })
}
