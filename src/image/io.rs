//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{MatchError, ScreenMatchResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> ScreenMatchResult<ImageView<'_>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize, 1)
}

/// Creates a borrowed view from an RGB image buffer.
pub fn view_from_rgb_image(img: &image::RgbImage) -> ScreenMatchResult<ImageView<'_>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize, 3)
}

/// Creates an owned image from a dynamic image, keeping color.
///
/// Gray inputs stay single-channel; everything else is converted to RGB.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> ScreenMatchResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    match img {
        image::DynamicImage::ImageLuma8(gray) => {
            OwnedImage::new(gray.as_raw().clone(), width, height, 1)
        }
        other => OwnedImage::new(other.to_rgb8().into_raw(), width, height, 3),
    }
}

/// Loads an image from disk as an owned gray or RGB image.
pub fn load_image<P: AsRef<Path>>(path: P) -> ScreenMatchResult<OwnedImage> {
    let img = image::open(path).map_err(|err| MatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
