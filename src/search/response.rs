//! Correlation response surfaces.

/// Score peak on a response surface (placement coordinates).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// X coordinate (column) of the template's top-left corner.
    pub x: usize,
    /// Y coordinate (row) of the template's top-left corner.
    pub y: usize,
    /// ZNCC score at the peak.
    pub score: f32,
}

/// Dense grid of ZNCC scores, one per template placement.
///
/// Placement `(x, y)` puts the template's top-left corner at source pixel
/// `(x, y)`; the grid is `(W - w + 1) x (H - h + 1)`.
#[derive(Clone, Debug)]
pub struct ResponseSurface {
    width: usize,
    height: usize,
    scores: Vec<f32>,
}

impl ResponseSurface {
    pub(crate) fn new(width: usize, height: usize, scores: Vec<f32>) -> Self {
        debug_assert_eq!(scores.len(), width * height);
        Self {
            width,
            height,
            scores,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the score at placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Row-major scores.
    pub fn as_slice(&self) -> &[f32] {
        &self.scores
    }

    /// Returns the global maximum.
    ///
    /// Ties resolve to the first placement in row-major order.
    pub fn max_peak(&self) -> Option<Peak> {
        let mut best: Option<Peak> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            if score.is_nan() {
                continue;
            }
            if best.map_or(true, |b| score > b.score) {
                best = Some(Peak {
                    x: idx % self.width,
                    y: idx / self.width,
                    score,
                });
            }
        }
        best
    }

    /// Overwrites the block centered on `(x, y)` with `value`.
    ///
    /// The block spans `[x - w/2, x + w/2] x [y - h/2, y + h/2]` inclusive,
    /// clipped to the surface. Returns the number of cells written.
    pub fn suppress(&mut self, x: usize, y: usize, w: usize, h: usize, value: f32) -> usize {
        if self.width == 0 || self.height == 0 {
            return 0;
        }
        let x0 = x.saturating_sub(w / 2);
        let y0 = y.saturating_sub(h / 2);
        let x1 = x.saturating_add(w / 2).min(self.width - 1);
        let y1 = y.saturating_add(h / 2).min(self.height - 1);
        if x0 > x1 || y0 > y1 {
            return 0;
        }
        for yy in y0..=y1 {
            let row = &mut self.scores[yy * self.width..(yy + 1) * self.width];
            row[x0..=x1].fill(value);
        }
        (x1 - x0 + 1) * (y1 - y0 + 1)
    }
}
