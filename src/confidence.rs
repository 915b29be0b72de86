//! Confidence scoring strategies.
//!
//! The correlation peak is always found on luminance. `Grayscale` trusts that
//! peak value; `Color` re-scores the matched window channel by channel so a
//! window with the right shape but the wrong colors is rejected.

use crate::image::{ImageView, OwnedImage};
use crate::kernel::scalar::ZnccScalar;
use crate::kernel::Kernel;
use crate::search::response::Peak;
use crate::template::TemplatePlan;
use crate::util::math::clamp_unit;
use crate::util::{MatchError, ScreenMatchResult};

/// How the confidence of a located peak is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfidenceStrategy {
    /// Luminance correlation peak value.
    #[default]
    Grayscale,
    /// Minimum per-channel correlation of the matched window.
    Color,
}

impl ConfidenceStrategy {
    pub fn from_color_check(color_check: bool) -> Self {
        if color_check {
            Self::Color
        } else {
            Self::Grayscale
        }
    }

    /// Confidence in `[0, 1]` for `peak` found by matching `search` in `source`.
    pub fn confidence(
        self,
        source: ImageView<'_>,
        search: ImageView<'_>,
        peak: Peak,
    ) -> ScreenMatchResult<f32> {
        match self {
            Self::Grayscale => Ok(clamp_unit(peak.score)),
            Self::Color => {
                let window = source.roi(peak.x, peak.y, search.width(), search.height())?;
                color_confidence(window, search)
            }
        }
    }
}

/// Scores two equally sized images channel by channel and keeps the worst.
///
/// Color inputs compare the R, G and B planes; if either image is
/// single-channel both are compared on luminance. A channel that is flat in
/// either image has no defined correlation and is scored by its mean absolute
/// difference instead.
pub fn color_confidence(window: ImageView<'_>, search: ImageView<'_>) -> ScreenMatchResult<f32> {
    if window.size() != search.size() {
        return Err(MatchError::SizeMismatch {
            search_width: search.width(),
            search_height: search.height(),
            source_width: window.width(),
            source_height: window.height(),
        });
    }

    let planes: Vec<(OwnedImage, OwnedImage)> = if window.channels() >= 3 && search.channels() >= 3
    {
        (0..3)
            .map(|c| Ok((window.channel_plane(c)?, search.channel_plane(c)?)))
            .collect::<ScreenMatchResult<_>>()?
    } else {
        vec![(window.to_luma(), search.to_luma())]
    };

    let worst = planes
        .iter()
        .map(|(win, tpl)| channel_similarity(win.view(), tpl.view()))
        .fold(f32::INFINITY, f32::min);
    Ok(clamp_unit(worst))
}

fn channel_similarity(window: ImageView<'_>, tpl: ImageView<'_>) -> f32 {
    let tpl_plan = TemplatePlan::from_view(tpl);
    let window_plan = TemplatePlan::from_view(window);
    if tpl_plan.is_flat() || window_plan.is_flat() {
        return 1.0 - mean_abs_diff(window, tpl) / 255.0;
    }
    ZnccScalar::score_at(window, &tpl_plan, 0, 0)
}

fn mean_abs_diff(a: ImageView<'_>, b: ImageView<'_>) -> f32 {
    let mut total = 0u64;
    for y in 0..a.height() {
        if let (Some(ra), Some(rb)) = (a.row(y), b.row(y)) {
            total += ra
                .iter()
                .zip(rb)
                .map(|(&p, &q)| u64::from(p.abs_diff(q)))
                .sum::<u64>();
        }
    }
    total as f32 / (a.width() * a.height()) as f32
}
