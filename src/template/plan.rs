//! Template plan precomputation for ZNCC.

use crate::image::ImageView;

/// Variance at or below which a template or window counts as flat.
pub(crate) const FLAT_VARIANCE: f64 = 1e-8;

/// Precomputed statistics and zero-mean buffer for one single-channel template.
///
/// `var_t` is the sum of squared deviations from the mean (not divided by the
/// pixel count), matching the un-normalized window variance used by the
/// kernels.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f64,
    var_t: f64,
    t_prime: Vec<f64>,
}

impl TemplatePlan {
    /// Builds a plan from a template view, reading the first channel only.
    ///
    /// Callers pass luminance or single-plane images.
    pub fn from_view(tpl: ImageView<'_>) -> Self {
        let width = tpl.width();
        let height = tpl.height();
        let channels = tpl.channels();
        let count = width * height;

        let mut samples = Vec::with_capacity(count);
        for y in 0..height {
            if let Some(row) = tpl.row(y) {
                samples.extend(row.iter().step_by(channels).map(|&v| f64::from(v)));
            }
        }

        let mean = samples.iter().sum::<f64>() / count as f64;
        let t_prime: Vec<f64> = samples.iter().map(|v| v - mean).collect();
        let var_t = t_prime.iter().map(|v| v * v).sum();

        Self {
            width,
            height,
            mean,
            var_t,
            t_prime,
        }
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the sum of squared deviations from the mean.
    pub fn var_t(&self) -> f64 {
        self.var_t
    }

    /// True for a constant template; kernels then score by level agreement.
    pub fn is_flat(&self) -> bool {
        self.var_t <= FLAT_VARIANCE
    }

    /// Returns the zero-mean template in row-major order.
    pub fn t_prime(&self) -> &[f64] {
        &self.t_prime
    }
}

#[cfg(test)]
mod tests {
    use super::TemplatePlan;
    use crate::image::ImageView;

    #[test]
    fn plan_matches_known_stats() {
        let data = [0u8, 1, 2, 3];
        let view = ImageView::from_gray(&data, 2, 2).unwrap();
        let plan = TemplatePlan::from_view(view);

        assert_eq!(plan.width(), 2);
        assert_eq!(plan.height(), 2);
        assert!((plan.mean() - 1.5).abs() < 1e-12);
        assert!((plan.var_t() - 5.0).abs() < 1e-12);
        assert_eq!(plan.t_prime(), &[-1.5, -0.5, 0.5, 1.5]);
        assert!(!plan.is_flat());
    }

    #[test]
    fn constant_template_is_flat() {
        let data = [9u8; 6];
        let view = ImageView::from_gray(&data, 3, 2).unwrap();
        assert!(TemplatePlan::from_view(view).is_flat());
    }
}
