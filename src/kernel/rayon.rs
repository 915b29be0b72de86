//! Rayon-parallel kernel (feature-gated).
//!
//! Rows of the placement grid are scored in parallel. Every placement runs
//! the same arithmetic as the scalar kernel, so the surfaces are identical.

use crate::image::ImageView;
use crate::kernel::scalar::ZnccScalar;
use crate::kernel::{placement_grid, zncc_at, Kernel, WindowSums};
use crate::search::response::ResponseSurface;
use crate::template::TemplatePlan;
use crate::util::ScreenMatchResult;
use rayon::prelude::*;

/// Row-parallel unmasked ZNCC kernel.
pub struct ZnccRayon;

impl Kernel for ZnccRayon {
    fn score_at(image: ImageView<'_>, plan: &TemplatePlan, x: usize, y: usize) -> f32 {
        ZnccScalar::score_at(image, plan, x, y)
    }

    fn response(
        image: ImageView<'_>,
        plan: &TemplatePlan,
    ) -> ScreenMatchResult<ResponseSurface> {
        let (grid_w, grid_h) = placement_grid(image, plan)?;
        let sums = WindowSums::build(image);

        let mut scores = vec![0.0f32; grid_w * grid_h];
        scores
            .par_chunks_mut(grid_w)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, slot) in row.iter_mut().enumerate() {
                    *slot = zncc_at(image, plan, &sums, x, y);
                }
            });

        Ok(ResponseSurface::new(grid_w, grid_h, scores))
    }
}
