//! Summed-area tables for constant-time window statistics.

use crate::image::ImageView;

/// Integral tables of sample values and squared sample values.
///
/// Both tables are `(width + 1) x (height + 1)` with a zero first row and
/// column. Sums are exact integers, so window variances carry no
/// accumulation error.
pub(crate) struct WindowSums {
    cols: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl WindowSums {
    /// Builds tables over the first channel of `image`.
    pub(crate) fn build(image: ImageView<'_>) -> Self {
        let width = image.width();
        let height = image.height();
        let channels = image.channels();
        let cols = width + 1;
        let mut sum = vec![0u64; cols * (height + 1)];
        let mut sum_sq = vec![0u64; cols * (height + 1)];

        for y in 0..height {
            let mut row_sum = 0u64;
            let mut row_sum_sq = 0u64;
            if let Some(row) = image.row(y) {
                for (x, &v) in row.iter().step_by(channels).enumerate() {
                    let v = u64::from(v);
                    row_sum += v;
                    row_sum_sq += v * v;
                    let idx = (y + 1) * cols + x + 1;
                    sum[idx] = sum[idx - cols] + row_sum;
                    sum_sq[idx] = sum_sq[idx - cols] + row_sum_sq;
                }
            }
        }

        Self { cols, sum, sum_sq }
    }

    fn rect(table: &[u64], cols: usize, x: usize, y: usize, w: usize, h: usize) -> u64 {
        let a = table[y * cols + x];
        let b = table[y * cols + x + w];
        let c = table[(y + h) * cols + x];
        let d = table[(y + h) * cols + x + w];
        (a + d) - (b + c)
    }

    /// Sum of samples in the window.
    pub(crate) fn window_sum(&self, x: usize, y: usize, w: usize, h: usize) -> u64 {
        Self::rect(&self.sum, self.cols, x, y, w, h)
    }

    /// Sum of squared deviations from the window mean.
    pub(crate) fn centered_square_sum(&self, x: usize, y: usize, w: usize, h: usize) -> f64 {
        let n = (w * h) as u128;
        let s = u128::from(self.window_sum(x, y, w, h));
        let s2 = u128::from(Self::rect(&self.sum_sq, self.cols, x, y, w, h));
        // n * s2 >= s^2 by Cauchy-Schwarz.
        let scaled = n * s2 - s * s;
        scaled as f64 / n as f64
    }
}
