//! Resolution-independent click positions and predicted search areas.
//!
//! A recorded position is the offset of a point from the screen center with
//! both axes divided by the recording *width*. Using one scale factor keeps
//! the mapping isotropic when the same UI is replayed on a screen with a
//! different aspect ratio: horizontal layouts scale with width, and vertical
//! offsets from the center scale by the same factor.

use crate::geometry::{Point, Resolution, SearchArea};
use crate::util::math::round_to;
use crate::util::{MatchError, ScreenMatchResult};

/// Half-extent margin added around the predicted box by default, in pixels.
pub const DEFAULT_DEVIATION: f64 = 100.0;

/// Offset from the screen center normalized by the recording width.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RecordedPosition {
    pub delta_x: f64,
    pub delta_y: f64,
}

impl RecordedPosition {
    pub const fn new(delta_x: f64, delta_y: f64) -> Self {
        Self { delta_x, delta_y }
    }
}

/// Predictor configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredictorConfig {
    /// Margin in pixels added to each half-extent of the predicted box.
    pub deviation: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            deviation: DEFAULT_DEVIATION,
        }
    }
}

impl PredictorConfig {
    pub fn validate(&self) -> ScreenMatchResult<()> {
        if !self.deviation.is_finite() || self.deviation < 0.0 {
            return Err(MatchError::InvalidConfig(
                "deviation must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Converts click positions between resolutions and predicts search boxes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Predictor {
    cfg: PredictorConfig,
}

impl Predictor {
    pub fn new(cfg: PredictorConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.cfg
    }

    /// Normalizes `pos` on a `record` sized screen, rounded to 3 decimals.
    pub fn to_recorded_position(pos: Point, record: Resolution) -> RecordedPosition {
        let w = record.width as f64;
        let h = record.height as f64;
        let delta_x = (pos.x as f64 - w * 0.5) / w;
        let delta_y = (pos.y as f64 - h * 0.5) / w;
        RecordedPosition {
            delta_x: round_to(delta_x, 3),
            delta_y: round_to(delta_y, 3),
        }
    }

    /// Maps a recorded position onto a `target` sized screen.
    pub fn predict_xy(recorded: RecordedPosition, target: Resolution) -> (f64, f64) {
        let w = target.width as f64;
        let h = target.height as f64;
        (recorded.delta_x * w + w * 0.5, recorded.delta_y * w + h * 0.5)
    }

    /// Same as [`Predictor::predict_xy`], rounded to the nearest pixel.
    pub fn predict_point(recorded: RecordedPosition, target: Resolution) -> Point {
        let (x, y) = Self::predict_xy(recorded, target);
        Point::new(x.round() as i64, y.round() as i64)
    }

    /// Predicts the box on `target` in which the search image should appear.
    ///
    /// With a known `record` resolution the search image size is first scaled
    /// from the recording screen to the target screen. The returned box is not
    /// clamped to the target bounds.
    pub fn predict_area(
        &self,
        recorded: RecordedPosition,
        search_size: (usize, usize),
        record: Option<Resolution>,
        target: Resolution,
    ) -> SearchArea {
        let (x, y) = Self::predict_xy(recorded, target);
        let (search_w, search_h) = (search_size.0 as f64, search_size.1 as f64);
        let (half_w, half_h) = match record {
            Some(rec) if rec.width > 0 && rec.height > 0 => (
                (search_w * target.width as f64 / (2.0 * rec.width as f64)).trunc(),
                (search_h * target.height as f64 / (2.0 * rec.height as f64)).trunc(),
            ),
            _ => ((search_w / 2.0).trunc(), (search_h / 2.0).trunc()),
        };
        let radius_x = half_w + self.cfg.deviation;
        let radius_y = half_h + self.cfg.deviation;
        SearchArea {
            xmin: x - radius_x,
            ymin: y - radius_y,
            xmax: x + radius_x,
            ymax: y + radius_y,
        }
    }
}
