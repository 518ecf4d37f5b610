use super::point::Point;
use super::rect::Rect;
use rstar::{AABB, RTree};

/// R-tree over rectangles tagged with a caller-defined payload.
pub struct SpatialIndex<T> {
    tree: RTree<IndexedRect<T>>,
}

struct IndexedRect<T> {
    rect: Rect,
    payload: T,
}

impl<T> rstar::RTreeObject for IndexedRect<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.rect.min.x, self.rect.min.y],
            [self.rect.max.x, self.rect.max.y],
        )
    }
}

impl<T: Copy> SpatialIndex<T> {
    /// Bulk-loads the tree; non-finite rects are dropped.
    pub fn from_rects(items: impl IntoIterator<Item = (Rect, T)>) -> Self {
        let objects = items
            .into_iter()
            .filter(|(rect, _)| rect.is_finite())
            .map(|(rect, payload)| IndexedRect { rect, payload })
            .collect();
        Self {
            tree: RTree::bulk_load(objects),
        }
    }

    pub fn query(&self, rect: Rect) -> Vec<(Rect, T)> {
        let aabb = AABB::from_corners([rect.min.x, rect.min.y], [rect.max.x, rect.max.y]);
        self.tree
            .locate_in_envelope_intersecting(&aabb)
            .map(|item| (item.rect, item.payload))
            .collect()
    }

    pub fn query_point(&self, p: Point<f64>) -> Vec<(Rect, T)> {
        self.query(Rect::new(p, p))
    }
}
