//! Scalar reference kernel for ZNCC response surfaces.

use crate::image::ImageView;
use crate::kernel::{placement_grid, zncc_at, Kernel, WindowSums};
use crate::search::response::ResponseSurface;
use crate::template::TemplatePlan;
use crate::util::ScreenMatchResult;

/// Scalar unmasked ZNCC kernel.
pub struct ZnccScalar;

impl Kernel for ZnccScalar {
    fn score_at(image: ImageView<'_>, plan: &TemplatePlan, x: usize, y: usize) -> f32 {
        let (grid_w, grid_h) = match placement_grid(image, plan) {
            Ok(grid) => grid,
            Err(_) => return f32::NEG_INFINITY,
        };
        if x >= grid_w || y >= grid_h {
            return f32::NEG_INFINITY;
        }
        let window = match image.roi(x, y, plan.width(), plan.height()) {
            Ok(window) => window,
            Err(_) => return f32::NEG_INFINITY,
        };
        let sums = WindowSums::build(window);
        zncc_at(window, plan, &sums, 0, 0)
    }

    fn response(
        image: ImageView<'_>,
        plan: &TemplatePlan,
    ) -> ScreenMatchResult<ResponseSurface> {
        let (grid_w, grid_h) = placement_grid(image, plan)?;
        let sums = WindowSums::build(image);

        let mut scores = Vec::with_capacity(grid_w * grid_h);
        for y in 0..grid_h {
            for x in 0..grid_w {
                scores.push(zncc_at(image, plan, &sums, x, y));
            }
        }

        Ok(ResponseSurface::new(grid_w, grid_h, scores))
    }
}
