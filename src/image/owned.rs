//! Owned contiguous image buffers and channel conversions.

use crate::image::ImageView;
use crate::util::math::luma_u8;
use crate::util::{MatchError, ScreenMatchResult};

/// Owned contiguous image buffer with interleaved samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
}

impl OwnedImage {
    /// Wraps a contiguous buffer of exactly `width * height * channels` samples.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> ScreenMatchResult<Self> {
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(MatchError::InvalidDimensions { width, height })?;
        // Validates dimensions, channel count and minimum length.
        ImageView::from_slice(&data, width, height, channels)?;
        if data.len() != needed {
            return Err(MatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_>) -> Self {
        let row_len = view.width() * view.channels();
        let mut data = Vec::with_capacity(row_len * view.height());
        for y in 0..view.height() {
            if let Some(row) = view.row(y) {
                data.extend_from_slice(row);
            }
        }
        Self {
            data,
            width: view.width(),
            height: view.height(),
            channels: view.channels(),
        }
    }

    pub(crate) fn luma_from_view(view: ImageView<'_>) -> Self {
        if view.channels() == 1 {
            return Self::from_view(view);
        }
        let channels = view.channels();
        let mut data = Vec::with_capacity(view.width() * view.height());
        for y in 0..view.height() {
            if let Some(row) = view.row(y) {
                data.extend(
                    row.chunks_exact(channels)
                        .map(|px| luma_u8(px[0], px[1], px[2])),
                );
            }
        }
        Self {
            data,
            width: view.width(),
            height: view.height(),
            channels: 1,
        }
    }

    pub(crate) fn plane_from_view(view: ImageView<'_>, channel: usize) -> Self {
        let channels = view.channels();
        let mut data = Vec::with_capacity(view.width() * view.height());
        for y in 0..view.height() {
            if let Some(row) = view.row(y) {
                data.extend(row.chunks_exact(channels).map(|px| px[channel]));
            }
        }
        Self {
            data,
            width: view.width(),
            height: view.height(),
            channels: 1,
        }
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.width * self.channels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the contiguous sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
