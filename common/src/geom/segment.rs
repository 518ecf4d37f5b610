use super::point::Point;
use super::rect::Rect;

/// Straight line segment between two board points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point<f64>,
    pub end: Point<f64>,
}

impl Segment {
    pub fn new(start: Point<f64>, end: Point<f64>) -> Self {
        Self { start, end }
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }

    /// A segment whose endpoints coincide (a via is stored this way).
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }

    /// Closed rectangle vs. segment test (Liang-Barsky clipping).
    ///
    /// Touching an edge or corner counts as a hit. Non-finite input never hits.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        if !self.is_finite() || !rect.is_finite() {
            return false;
        }

        let d = self.end - self.start;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;

        let constraints = [
            (-d.x, self.start.x - rect.min.x),
            (d.x, rect.max.x - self.start.x),
            (-d.y, self.start.y - rect.min.y),
            (d.y, rect.max.y - self.start.y),
        ];

        for (p, q) in constraints {
            if p == 0.0 {
                // Parallel to this slab: must already lie within it.
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return false;
                }
                t1 = t1.min(r);
            }
        }

        t0 <= t1
    }
}
