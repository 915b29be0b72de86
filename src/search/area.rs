//! Matching restricted to the area predicted from a recorded position.

use crate::geometry::Resolution;
use crate::image::ImageView;
use crate::predict::RecordedPosition;
use crate::search::{MatchResult, Matcher};
use crate::trace::{trace_event, trace_span};
use crate::util::ScreenMatchResult;

impl Matcher {
    /// Matches `search` inside the box predicted for `recorded` on `source`.
    ///
    /// `record` is the resolution the position was recorded at; when known,
    /// the search image size is rescaled to the source resolution before the
    /// margin is added. The box is clamped per axis to the source bounds.
    ///
    /// Fails with `InvalidConfig` for an invalid threshold or deviation, even
    /// without a recorded position. Returns `Ok(None)` without a recorded
    /// position, for an empty crop, for a crop too small to hold the search
    /// image, and when nothing in the crop reaches the threshold. Coordinates
    /// of a match are in `source` space.
    pub fn match_in_predicted_area(
        &self,
        source: ImageView<'_>,
        search: ImageView<'_>,
        recorded: Option<RecordedPosition>,
        record: Option<Resolution>,
    ) -> ScreenMatchResult<Option<MatchResult>> {
        self.cfg.validate()?;
        self.predictor.config().validate()?;
        let Some(recorded) = recorded else {
            return Ok(None);
        };
        let _span = trace_span!(
            "match_in_predicted_area",
            delta_x = recorded.delta_x,
            delta_y = recorded.delta_y
        )
        .entered();

        let area = self
            .predictor
            .predict_area(recorded, search.size(), record, source.resolution());
        let rect = area.clamp_to(source.resolution());
        trace_event!(
            "predicted_area",
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height
        );
        if rect.is_empty() || rect.width < search.width() || rect.height < search.height() {
            return Ok(None);
        }

        let crop = source.roi(rect.x, rect.y, rect.width, rect.height)?;
        let found = self.match_template(crop, search)?;
        Ok(found.map(|m| m.offset(rect.x as i64, rect.y as i64)))
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{Point, Resolution};
    use crate::image::ImageView;
    use crate::predict::{Predictor, PredictorConfig};
    use crate::search::{MatchConfig, Matcher};
    use crate::util::MatchError;

    fn scene(width: usize, height: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push((((x * 7) ^ (y * 13) ^ (x * y / 3)) & 0xFF) as u8);
            }
        }
        data
    }

    fn cut(data: &[u8], width: usize, x0: usize, y0: usize, w: usize, h: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(w * h);
        for y in y0..y0 + h {
            out.extend_from_slice(&data[y * width + x0..y * width + x0 + w]);
        }
        out
    }

    #[test]
    fn invalid_deviation_is_rejected() {
        let data = scene(40, 30);
        let view = ImageView::from_gray(&data, 40, 30).unwrap();
        let recorded = Some(crate::predict::RecordedPosition::new(0.0, 0.0));
        for deviation in [-1000.0, f64::NAN, f64::INFINITY] {
            let matcher = Matcher::new().with_predictor(PredictorConfig { deviation });
            for pos in [recorded, None] {
                let err = matcher
                    .match_in_predicted_area(view, view, pos, None)
                    .unwrap_err();
                assert!(matches!(err, MatchError::InvalidConfig(_)), "{deviation}");
            }
        }
    }

    #[test]
    fn invalid_threshold_is_rejected_before_cropping() {
        let data = scene(40, 30);
        let view = ImageView::from_gray(&data, 40, 30).unwrap();
        let matcher = Matcher::new().with_config(MatchConfig {
            threshold: 0.0,
            ..MatchConfig::default()
        });
        assert!(matches!(
            matcher.match_in_predicted_area(view, view, None, None),
            Err(MatchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn missing_recorded_position_is_no_match() {
        let data = scene(40, 30);
        let view = ImageView::from_gray(&data, 40, 30).unwrap();
        let found = Matcher::new()
            .match_in_predicted_area(view, view, None, None)
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn match_is_mapped_back_to_source_coordinates() {
        let (width, height) = (200, 120);
        let data = scene(width, height);
        let tpl = cut(&data, width, 150, 70, 16, 12);
        let source = ImageView::from_gray(&data, width, height).unwrap();
        let search = ImageView::from_gray(&tpl, 16, 12).unwrap();

        let res = Resolution::new(width, height);
        let recorded = Predictor::to_recorded_position(Point::new(158, 76), res);
        let matcher = Matcher::new().with_predictor(PredictorConfig { deviation: 20.0 });
        let found = matcher
            .match_in_predicted_area(source, search, Some(recorded), Some(res))
            .unwrap()
            .unwrap();
        assert_eq!(found.region().top_left(), Point::new(150, 70));
        assert_eq!(found.center(), Point::new(158, 76));
    }

    #[test]
    fn target_outside_predicted_area_is_not_found() {
        let (width, height) = (200, 120);
        let data = scene(width, height);
        let tpl = cut(&data, width, 150, 70, 16, 12);
        let source = ImageView::from_gray(&data, width, height).unwrap();
        let search = ImageView::from_gray(&tpl, 16, 12).unwrap();

        let res = Resolution::new(width, height);
        let recorded = Predictor::to_recorded_position(Point::new(20, 20), res);
        let matcher = Matcher::new().with_predictor(PredictorConfig { deviation: 10.0 });
        let found = matcher
            .match_in_predicted_area(source, search, Some(recorded), Some(res))
            .unwrap();
        assert!(found.map_or(true, |m| m.region().top_left() != Point::new(150, 70)));
    }

    #[test]
    fn off_screen_prediction_is_no_match() {
        let data = scene(60, 40);
        let tpl = cut(&data, 60, 10, 10, 8, 8);
        let source = ImageView::from_gray(&data, 60, 40).unwrap();
        let search = ImageView::from_gray(&tpl, 8, 8).unwrap();
        let matcher = Matcher::new().with_predictor(PredictorConfig { deviation: 0.0 });
        let far_right = crate::predict::RecordedPosition::new(5.0, 0.0);
        let found = matcher
            .match_in_predicted_area(source, search, Some(far_right), None)
            .unwrap();
        assert!(found.is_none());
    }
}
