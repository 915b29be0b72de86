//! Best single match over the full source image.

use crate::image::ImageView;
use crate::search::{ensure_fits, MatchResult, Matcher};
use crate::trace::{trace_event, trace_span};
use crate::util::ScreenMatchResult;

impl Matcher {
    /// Finds the best match of `search` in `source`.
    ///
    /// Fails with `SizeMismatch` before any correlation if `search` is larger
    /// than `source` in either axis. Returns `Ok(None)` when the confidence of
    /// the best placement is below the configured threshold.
    pub fn match_template(
        &self,
        source: ImageView<'_>,
        search: ImageView<'_>,
    ) -> ScreenMatchResult<Option<MatchResult>> {
        self.cfg.validate()?;
        ensure_fits(source, search)?;
        let _span = trace_span!(
            "match_template",
            threshold = self.cfg.threshold,
            color_check = self.cfg.color_check
        )
        .entered();

        let surface = self.response_surface(source, search)?;
        let Some(peak) = surface.max_peak() else {
            return Ok(None);
        };
        let confidence = self.cfg.strategy().confidence(source, search, peak)?;
        trace_event!(
            "best_peak",
            x = peak.x,
            y = peak.y,
            score = peak.score,
            confidence = confidence
        );

        if confidence < self.cfg.threshold {
            return Ok(None);
        }
        Ok(Some(MatchResult::from_placement(
            peak.x,
            peak.y,
            search.width(),
            search.height(),
            confidence,
        )))
    }
}
