//! Multiple matches by repeated peak extraction with suppression.

use crate::image::ImageView;
use crate::search::{ensure_fits, MatchResult, Matcher};
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::ScreenMatchResult;

/// Score written over suppressed placements; below every valid threshold.
pub(crate) const SUPPRESSED_SCORE: f32 = -1.0;

impl Matcher {
    /// Finds up to `max_count` matches of `search` in `source`.
    ///
    /// The response surface is computed once. Each round takes the current
    /// global maximum, stops if its confidence is below the threshold, and
    /// otherwise records it and suppresses a template-sized block around it.
    /// Results are in discovery order.
    pub fn match_all(
        &self,
        source: ImageView<'_>,
        search: ImageView<'_>,
    ) -> ScreenMatchResult<Vec<MatchResult>> {
        self.cfg.validate()?;
        ensure_fits(source, search)?;
        let _span = trace_span!(
            "match_all",
            threshold = self.cfg.threshold,
            max_count = self.cfg.max_count
        )
        .entered();

        let (tpl_width, tpl_height) = search.size();
        let strategy = self.cfg.strategy();
        let mut surface = self.response_surface(source, search)?;
        let mut results = Vec::new();

        while results.len() < self.cfg.max_count {
            let Some(peak) = surface.max_peak() else {
                break;
            };
            let confidence = strategy.confidence(source, search, peak)?;
            if confidence < self.cfg.threshold {
                break;
            }

            results.push(MatchResult::from_placement(
                peak.x,
                peak.y,
                tpl_width,
                tpl_height,
                confidence,
            ));
            let cleared = surface.suppress(peak.x, peak.y, tpl_width, tpl_height, SUPPRESSED_SCORE);
            trace_debug!(
                "suppressed",
                x = peak.x,
                y = peak.y,
                confidence = confidence,
                cells = cleared
            );
        }

        trace_event!("match_all_done", count = results.len());
        Ok(results)
    }
}
