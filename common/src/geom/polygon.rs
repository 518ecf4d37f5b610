//! Polygonal outlines for zones and keepout areas.
//!
//! An [`Outline`] may hold several contours. Containment uses the even-odd
//! rule across all of them, so a contour nested inside another acts as a hole.

use super::point::Point;
use super::rect::Rect;
use super::segment::Segment;

/// Minimal capability set the fill engine needs from an area outline.
pub trait Shape {
    fn contains(&self, p: Point<f64>) -> bool;
    fn bounding_box(&self) -> Option<Rect>;
    fn overlaps(&self, rect: &Rect) -> bool;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    pub contours: Vec<Vec<Point<f64>>>,
}

impl Outline {
    pub fn new(contours: Vec<Vec<Point<f64>>>) -> Self {
        Self { contours }
    }

    pub fn from_contour(points: Vec<Point<f64>>) -> Self {
        Self {
            contours: vec![points],
        }
    }

    /// Closed regular polygon approximating a circle.
    pub fn circle(center: Point<f64>, radius: f64, segments: usize) -> Self {
        let n = segments.max(3);
        let points = (0..n)
            .map(|i| {
                let a = std::f64::consts::TAU * (i as f64) / (n as f64);
                Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
            })
            .collect();
        Self::from_contour(points)
    }

    pub fn rectangle(rect: &Rect) -> Self {
        Self::from_contour(rect.corners().to_vec())
    }

    /// Contours that can take part in a containment test.
    fn usable_contours(&self) -> impl Iterator<Item = &Vec<Point<f64>>> {
        self.contours
            .iter()
            .filter(|c| c.len() >= 3 && c.iter().all(|p| p.is_finite()))
    }

    fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        self.usable_contours().flat_map(|c| {
            let n = c.len();
            (0..n).map(move |i| Segment::new(c[i], c[(i + 1) % n]))
        })
    }

    /// True when every contour is collinear (or too short) and so encloses
    /// nothing. Self-intersecting contours whose signed lobes cancel still
    /// enclose area and are not degenerate.
    pub fn is_degenerate(&self) -> bool {
        !self.usable_contours().any(|c| {
            let a = c[0];
            let Some(&b) = c.iter().find(|&&p| p != a) else {
                return false;
            };
            c.iter()
                .any(|&p| (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x) != 0.0)
        })
    }
}

impl Shape for Outline {
    fn contains(&self, p: Point<f64>) -> bool {
        if !p.is_finite() {
            return false;
        }
        let mut inside = false;
        for c in self.usable_contours() {
            let n = c.len();
            let mut j = n - 1;
            for i in 0..n {
                let (pi, pj) = (c[i], c[j]);
                if ((pi.y > p.y) != (pj.y > p.y))
                    && (p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x)
                {
                    inside = !inside;
                }
                j = i;
            }
        }
        inside
    }

    fn bounding_box(&self) -> Option<Rect> {
        self.usable_contours()
            .flat_map(|c| c.iter())
            .map(|&p| Rect::new(p, p))
            .reduce(|a, b| a.union(&b))
    }

    fn overlaps(&self, rect: &Rect) -> bool {
        let Some(bbox) = self.bounding_box() else {
            return false;
        };
        if !bbox.overlaps(rect) {
            return false;
        }
        if self.edges().any(|e| e.intersects_rect(rect)) {
            return true;
        }
        // Rect entirely inside the outline.
        self.contains(rect.center())
    }
}
