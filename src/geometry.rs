//! Points, regions and rectangles in pixel space.

/// Integer pixel coordinate.
///
/// Signed so that predicted or translated points may sit off-screen before
/// they are clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the point shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Screen or image size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned match region stored as four corners.
///
/// Corner order is always top-left, bottom-left, bottom-right, top-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    corners: [Point; 4],
}

impl Region {
    /// Builds the region covering `width x height` pixels from `top_left`.
    pub fn from_top_left(top_left: Point, width: usize, height: usize) -> Self {
        let (w, h) = (width as i64, height as i64);
        Self {
            corners: [
                top_left,
                top_left.offset(0, h),
                top_left.offset(w, h),
                top_left.offset(w, 0),
            ],
        }
    }

    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    pub fn top_left(&self) -> Point {
        self.corners[0]
    }

    pub fn bottom_right(&self) -> Point {
        self.corners[2]
    }

    pub fn width(&self) -> i64 {
        self.corners[2].x - self.corners[0].x
    }

    pub fn height(&self) -> i64 {
        self.corners[2].y - self.corners[0].y
    }

    /// Returns the region with every corner shifted by `(dx, dy)`.
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self {
            corners: self.corners.map(|p| p.offset(dx, dy)),
        }
    }

    /// Area shared with `other`, zero when disjoint.
    pub fn overlap_area(&self, other: &Region) -> i64 {
        let (a0, a1) = (self.top_left(), self.bottom_right());
        let (b0, b1) = (other.top_left(), other.bottom_right());
        let w = a1.x.min(b1.x) - a0.x.max(b0.x);
        let h = a1.y.min(b1.y) - a0.y.max(b0.y);
        if w <= 0 || h <= 0 {
            0
        } else {
            w * h
        }
    }
}

/// Unclamped predicted search box in (fractional) pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchArea {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl SearchArea {
    /// Clamps each axis into `[0, width]` / `[0, height]` and rounds to pixels.
    ///
    /// The result may be empty but is always a valid crop of an image of
    /// `bounds` size.
    pub fn clamp_to(&self, bounds: Resolution) -> PixelRect {
        let clamp_axis = |v: f64, max: usize| -> usize {
            if v.is_nan() {
                return 0;
            }
            v.clamp(0.0, max as f64).round() as usize
        };
        let x0 = clamp_axis(self.xmin, bounds.width);
        let y0 = clamp_axis(self.ymin, bounds.height);
        let x1 = clamp_axis(self.xmax, bounds.width);
        let y1 = clamp_axis(self.ymax, bounds.height);
        PixelRect {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0),
            height: y1.saturating_sub(y0),
        }
    }
}

/// Integer crop rectangle inside an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Region, Resolution, SearchArea};

    #[test]
    fn region_corner_order_is_fixed() {
        let region = Region::from_top_left(Point::new(10, 20), 4, 3);
        assert_eq!(
            region.corners(),
            &[
                Point::new(10, 20),
                Point::new(10, 23),
                Point::new(14, 23),
                Point::new(14, 20),
            ]
        );
        assert_eq!(region.width(), 4);
        assert_eq!(region.height(), 3);
    }

    #[test]
    fn overlap_of_disjoint_and_nested_regions() {
        let a = Region::from_top_left(Point::new(0, 0), 10, 10);
        let b = Region::from_top_left(Point::new(10, 0), 10, 10);
        let c = Region::from_top_left(Point::new(2, 3), 4, 4);
        assert_eq!(a.overlap_area(&b), 0);
        assert_eq!(a.overlap_area(&c), 16);
    }

    #[test]
    fn clamp_uses_each_axis_bound() {
        // Wide screen: a box reaching x = 1000 must not be cut at the height.
        let area = SearchArea {
            xmin: 600.0,
            ymin: -50.0,
            xmax: 1000.0,
            ymax: 900.0,
        };
        let rect = area.clamp_to(Resolution::new(1280, 720));
        assert_eq!(rect.x, 600);
        assert_eq!(rect.y, 0);
        assert_eq!(rect.width, 400);
        assert_eq!(rect.height, 720);
    }

    #[test]
    fn clamp_of_off_screen_box_is_empty() {
        let area = SearchArea {
            xmin: 2000.0,
            ymin: 10.0,
            xmax: 2400.0,
            ymax: 90.0,
        };
        let rect = area.clamp_to(Resolution::new(1280, 720));
        assert!(rect.is_empty());
        assert_eq!(rect.x, 1280);
    }
}
