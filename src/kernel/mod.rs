//! Correlation kernel implementations.
//!
//! Kernels score a single-channel template plan against every valid placement
//! in a single-channel image. Scores are zero-mean normalized cross
//! correlation in `[-1, 1]`; a flat image window scores 0. A flat template has
//! no correlation with anything and is scored by level agreement instead, so a
//! solid-color search image still finds its own color.

use crate::image::ImageView;
use crate::search::response::ResponseSurface;
use crate::template::{TemplatePlan, FLAT_VARIANCE};
use crate::util::{MatchError, ScreenMatchResult};

mod integral;
pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

pub(crate) use integral::WindowSums;

/// Kernel trait for scoring placements and building response surfaces.
pub trait Kernel {
    /// Computes the score at a single placement (top-left coordinates).
    ///
    /// Returns `f32::NEG_INFINITY` for placements outside the valid range.
    fn score_at(image: ImageView<'_>, plan: &TemplatePlan, x: usize, y: usize) -> f32;

    /// Scores every valid placement and returns the response surface.
    fn response(image: ImageView<'_>, plan: &TemplatePlan)
        -> ScreenMatchResult<ResponseSurface>;
}

/// Validates a kernel input pair and returns the placement grid size.
pub(crate) fn placement_grid(
    image: ImageView<'_>,
    plan: &TemplatePlan,
) -> ScreenMatchResult<(usize, usize)> {
    if image.channels() != 1 {
        return Err(MatchError::UnsupportedChannels {
            channels: image.channels(),
        });
    }
    if image.width() < plan.width() || image.height() < plan.height() {
        return Err(MatchError::SizeMismatch {
            search_width: plan.width(),
            search_height: plan.height(),
            source_width: image.width(),
            source_height: image.height(),
        });
    }
    Ok((
        image.width() - plan.width() + 1,
        image.height() - plan.height() + 1,
    ))
}

/// ZNCC of `plan` against the window whose top-left is `(x, y)`.
///
/// The caller guarantees the window lies inside `image`.
pub(crate) fn zncc_at(
    image: ImageView<'_>,
    plan: &TemplatePlan,
    sums: &WindowSums,
    x: usize,
    y: usize,
) -> f32 {
    if plan.is_flat() {
        return level_similarity(image, plan, x, y);
    }
    let tpl_width = plan.width();
    let tpl_height = plan.height();
    let var_i = sums.centered_square_sum(x, y, tpl_width, tpl_height);
    if var_i <= FLAT_VARIANCE {
        return 0.0;
    }

    let data = image.as_slice();
    let stride = image.stride();
    let t_prime = plan.t_prime();
    let mut dot = 0.0f64;
    for ty in 0..tpl_height {
        let start = (y + ty) * stride + x;
        let img_row = &data[start..start + tpl_width];
        let tpl_row = &t_prime[ty * tpl_width..(ty + 1) * tpl_width];
        for (&t, &value) in tpl_row.iter().zip(img_row) {
            dot += t * f64::from(value);
        }
    }

    let score = dot / (plan.var_t() * var_i).sqrt();
    if score.is_finite() {
        score as f32
    } else {
        0.0
    }
}

/// `1 - mean(|window - level|) / 255` for a flat template at `(x, y)`.
///
/// Matches the flat-channel fallback of color confidence, so both confidence
/// strategies agree on solid-color search images.
pub(crate) fn level_similarity(
    image: ImageView<'_>,
    plan: &TemplatePlan,
    x: usize,
    y: usize,
) -> f32 {
    let level = plan.mean();
    let data = image.as_slice();
    let stride = image.stride();
    let tpl_width = plan.width();
    let mut total = 0.0f64;
    for ty in 0..plan.height() {
        let start = (y + ty) * stride + x;
        total += data[start..start + tpl_width]
            .iter()
            .map(|&v| (f64::from(v) - level).abs())
            .sum::<f64>();
    }
    let count = (tpl_width * plan.height()) as f64;
    (1.0 - total / count / 255.0) as f32
}
