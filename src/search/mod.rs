//! Template search over full images and predicted areas.
//!
//! [`Matcher`] bundles the matching configuration and the area predictor.
//! `single` finds the best placement, `multi` enumerates placements with
//! suppression, and `area` narrows the search to a predicted box.

pub(crate) mod area;
pub(crate) mod multi;
pub mod response;
pub(crate) mod single;

use crate::confidence::ConfidenceStrategy;
use crate::geometry::{Point, Region, Resolution};
use crate::image::ImageView;
#[cfg(feature = "rayon")]
use crate::kernel::rayon::ZnccRayon;
use crate::kernel::scalar::ZnccScalar;
use crate::kernel::Kernel;
use crate::predict::{Predictor, PredictorConfig, RecordedPosition};
use crate::target::TargetPos;
use crate::template::TemplatePlan;
use crate::trace::{trace_event, trace_span};
use crate::util::{MatchError, ScreenMatchResult};
use response::ResponseSurface;

/// Default acceptance threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.8;
/// Default result cap for [`Matcher::match_all`].
pub const DEFAULT_MAX_COUNT: usize = 10;

/// Matching configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchConfig {
    /// Minimum confidence in `(0, 1]` for a placement to count as a match.
    pub threshold: f32,
    /// Score the matched window per color channel instead of on luminance.
    pub color_check: bool,
    /// Maximum number of results from `match_all`.
    pub max_count: usize,
    /// Compute the response surface on the rayon pool (requires `rayon`).
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            color_check: false,
            max_count: DEFAULT_MAX_COUNT,
            parallel: false,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> ScreenMatchResult<()> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(MatchError::InvalidConfig("threshold must be in (0, 1]"));
        }
        Ok(())
    }

    pub fn strategy(&self) -> ConfidenceStrategy {
        ConfidenceStrategy::from_color_check(self.color_check)
    }
}

/// A located search image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    center: Point,
    region: Region,
    confidence: f32,
}

impl MatchResult {
    /// Builds the result for a `width x height` match with top-left `(x, y)`.
    pub(crate) fn from_placement(
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        confidence: f32,
    ) -> Self {
        let top_left = Point::new(x as i64, y as i64);
        Self {
            center: top_left.offset((width / 2) as i64, (height / 2) as i64),
            region: Region::from_top_left(top_left, width, height),
            confidence,
        }
    }

    /// Center of the match; the default click point.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Corners in order top-left, bottom-left, bottom-right, top-right.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Confidence in `[0, 1]`.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Point of the region selected by `pos`.
    pub fn target_point(&self, pos: TargetPos) -> Point {
        pos.point_in(&self.region)
    }

    pub(crate) fn offset(&self, dx: i64, dy: i64) -> Self {
        Self {
            center: self.center.offset(dx, dy),
            region: self.region.offset(dx, dy),
            confidence: self.confidence,
        }
    }
}

/// Template matcher with its configuration and predictor.
///
/// Holds no per-call state; one matcher can serve any number of calls,
/// including concurrent ones.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    cfg: MatchConfig,
    predictor: Predictor,
}

impl Matcher {
    /// Creates a matcher with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the matching configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replaces the predictor configuration.
    pub fn with_predictor(mut self, cfg: PredictorConfig) -> Self {
        self.predictor = Predictor::new(cfg);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// Computes the luminance ZNCC surface of `search` over `source`.
    pub fn response_surface(
        &self,
        source: ImageView<'_>,
        search: ImageView<'_>,
    ) -> ScreenMatchResult<ResponseSurface> {
        ensure_fits(source, search)?;
        let _span = trace_span!(
            "response_surface",
            source_w = source.width(),
            source_h = source.height(),
            search_w = search.width(),
            search_h = search.height()
        )
        .entered();

        let source_luma = source.to_luma();
        let search_luma = search.to_luma();
        let plan = TemplatePlan::from_view(search_luma.view());
        if plan.is_flat() {
            trace_event!("flat_search_image", mean = plan.mean());
        }

        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                return ZnccRayon::response(source_luma.view(), &plan);
            }
        }
        ZnccScalar::response(source_luma.view(), &plan)
    }
}

/// Fails with `SizeMismatch` unless `search` fits inside `source`.
pub(crate) fn ensure_fits(source: ImageView<'_>, search: ImageView<'_>) -> ScreenMatchResult<()> {
    if search.width() > source.width() || search.height() > source.height() {
        return Err(MatchError::SizeMismatch {
            search_width: search.width(),
            search_height: search.height(),
            source_width: source.width(),
            source_height: source.height(),
        });
    }
    Ok(())
}

fn matcher_for(threshold: f32, color_check: bool, max_count: usize) -> Matcher {
    Matcher::new().with_config(MatchConfig {
        threshold,
        color_check,
        max_count,
        ..MatchConfig::default()
    })
}

/// Finds the best match of `search` in `source`.
///
/// Returns `Ok(None)` when the best confidence is below `threshold`.
pub fn match_template(
    source: ImageView<'_>,
    search: ImageView<'_>,
    threshold: f32,
    color_check: bool,
) -> ScreenMatchResult<Option<MatchResult>> {
    matcher_for(threshold, color_check, DEFAULT_MAX_COUNT).match_template(source, search)
}

/// Finds up to `max_count` distinct matches in discovery order.
pub fn match_all(
    source: ImageView<'_>,
    search: ImageView<'_>,
    threshold: f32,
    color_check: bool,
    max_count: usize,
) -> ScreenMatchResult<Vec<MatchResult>> {
    matcher_for(threshold, color_check, max_count).match_all(source, search)
}

/// Searches only the area predicted from a recorded position.
///
/// Uses the default threshold and deviation; build a [`Matcher`] to change
/// them.
pub fn match_in_predicted_area(
    source: ImageView<'_>,
    search: ImageView<'_>,
    recorded: Option<RecordedPosition>,
    record: Option<Resolution>,
) -> ScreenMatchResult<Option<MatchResult>> {
    Matcher::new().match_in_predicted_area(source, search, recorded, record)
}
