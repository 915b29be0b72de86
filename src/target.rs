//! Reusable search targets for automation scripts.
//!
//! A [`Target`] carries everything recorded alongside a search image: the
//! acceptance threshold, the click position within the matched region, the
//! position and resolution the image was captured at, and whether colors must
//! agree. [`Target::locate`] tries the predicted area first and falls back to
//! the whole screen.

use crate::geometry::{Point, Region, Resolution};
use crate::image::ImageView;
use crate::predict::RecordedPosition;
use crate::search::{MatchConfig, MatchResult, Matcher};
use crate::trace::trace_event;
use crate::util::{MatchError, ScreenMatchResult};

/// Position inside a matched region, numbered like a phone keypad.
///
/// ```text
/// 1 2 3
/// 4 5 6
/// 7 8 9
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetPos {
    TopLeft = 1,
    Top = 2,
    TopRight = 3,
    Left = 4,
    #[default]
    Mid = 5,
    Right = 6,
    BottomLeft = 7,
    Bottom = 8,
    BottomRight = 9,
}

impl TargetPos {
    /// Parses the keypad number `1..=9`.
    pub fn from_index(index: u8) -> ScreenMatchResult<Self> {
        Ok(match index {
            1 => Self::TopLeft,
            2 => Self::Top,
            3 => Self::TopRight,
            4 => Self::Left,
            5 => Self::Mid,
            6 => Self::Right,
            7 => Self::BottomLeft,
            8 => Self::Bottom,
            9 => Self::BottomRight,
            _ => return Err(MatchError::InvalidConfig("target position must be 1..=9")),
        })
    }

    /// Point of `region` selected by this position.
    ///
    /// `Mid` is the integer center, the same point as [`MatchResult::center`].
    pub fn point_in(self, region: &Region) -> Point {
        let tl = region.top_left();
        let (w, h) = (region.width(), region.height());
        let idx = self as i64 - 1;
        let (col, row) = (idx % 3, idx / 3);
        Point::new(tl.x + col * w / 2, tl.y + row * h / 2)
    }
}

/// A located target and the point to act on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Located {
    pub result: MatchResult,
    pub point: Point,
}

/// Search image plus its recording metadata.
#[derive(Clone, Copy, Debug)]
pub struct Target<'a> {
    search: ImageView<'a>,
    threshold: Option<f32>,
    target_pos: TargetPos,
    record_pos: Option<RecordedPosition>,
    resolution: Option<Resolution>,
    color_check: Option<bool>,
}

impl<'a> Target<'a> {
    pub fn new(search: ImageView<'a>) -> Self {
        Self {
            search,
            threshold: None,
            target_pos: TargetPos::Mid,
            record_pos: None,
            resolution: None,
            color_check: None,
        }
    }

    /// Overrides the matcher's threshold for this target.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_target_pos(mut self, pos: TargetPos) -> Self {
        self.target_pos = pos;
        self
    }

    /// Sets the recorded position and the resolution it was recorded at.
    pub fn with_record(mut self, pos: RecordedPosition, resolution: Option<Resolution>) -> Self {
        self.record_pos = Some(pos);
        self.resolution = resolution;
        self
    }

    /// Overrides the matcher's color check for this target.
    pub fn with_color_check(mut self, color_check: bool) -> Self {
        self.color_check = Some(color_check);
        self
    }

    pub fn search(&self) -> ImageView<'a> {
        self.search
    }

    fn matcher_from(&self, base: &Matcher) -> Matcher {
        let cfg = MatchConfig {
            threshold: self.threshold.unwrap_or(base.config().threshold),
            color_check: self.color_check.unwrap_or(base.config().color_check),
            ..*base.config()
        };
        base.clone().with_config(cfg)
    }

    fn located(&self, result: MatchResult) -> Located {
        Located {
            result,
            point: result.target_point(self.target_pos),
        }
    }

    /// Locates the target on `screen`.
    ///
    /// With a recorded position the predicted area is searched first; the
    /// full screen is searched when that fails or no position was recorded.
    pub fn locate(
        &self,
        screen: ImageView<'_>,
        matcher: &Matcher,
    ) -> ScreenMatchResult<Option<Located>> {
        let matcher = self.matcher_from(matcher);
        if self.record_pos.is_some() {
            let predicted = matcher.match_in_predicted_area(
                screen,
                self.search,
                self.record_pos,
                self.resolution,
            )?;
            if let Some(result) = predicted {
                return Ok(Some(self.located(result)));
            }
            trace_event!("predicted_area_miss", fallback = true);
        }
        Ok(matcher
            .match_template(screen, self.search)?
            .map(|result| self.located(result)))
    }

    /// Locates every occurrence of the target on `screen`.
    pub fn locate_all(
        &self,
        screen: ImageView<'_>,
        matcher: &Matcher,
    ) -> ScreenMatchResult<Vec<Located>> {
        let matcher = self.matcher_from(matcher);
        Ok(matcher
            .match_all(screen, self.search)?
            .into_iter()
            .map(|result| self.located(result))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{Target, TargetPos};
    use crate::geometry::{Point, Region};
    use crate::image::ImageView;
    use crate::search::{MatchConfig, Matcher};

    #[test]
    fn keypad_points_cover_corners_and_center() {
        let region = Region::from_top_left(Point::new(10, 20), 30, 11);
        assert_eq!(TargetPos::TopLeft.point_in(&region), Point::new(10, 20));
        assert_eq!(TargetPos::Mid.point_in(&region), Point::new(25, 25));
        assert_eq!(TargetPos::Right.point_in(&region), Point::new(40, 25));
        assert_eq!(TargetPos::BottomRight.point_in(&region), Point::new(40, 31));
    }

    #[test]
    fn unset_overrides_keep_matcher_settings() {
        let data = [0u8; 4];
        let search = ImageView::from_gray(&data, 2, 2).unwrap();
        let base = Matcher::new().with_config(MatchConfig {
            threshold: 0.6,
            color_check: true,
            ..MatchConfig::default()
        });

        let inherited = Target::new(search).matcher_from(&base);
        assert_eq!(inherited.config(), base.config());

        let overridden = Target::new(search)
            .with_threshold(0.9)
            .with_color_check(false)
            .matcher_from(&base);
        assert_eq!(overridden.config().threshold, 0.9);
        assert!(!overridden.config().color_check);
    }

    #[test]
    fn keypad_index_round_trips() {
        for idx in 1..=9u8 {
            assert_eq!(TargetPos::from_index(idx).unwrap() as u8, idx);
        }
        assert!(TargetPos::from_index(0).is_err());
        assert!(TargetPos::from_index(10).is_err());
    }
}
