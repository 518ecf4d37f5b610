use crate::error::FillError;
use stitch_common::geom::coord::GridCoord;
use stitch_common::geom::point::Point;
use stitch_common::geom::rect::Rect;

/// Inclusive block of grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

impl CellRange {
    pub fn cell_count(&self) -> usize {
        (self.x_max - self.x_min + 1) as usize * (self.y_max - self.y_min + 1) as usize
    }

    pub fn contains(&self, c: GridCoord) -> bool {
        c.x >= self.x_min && c.x <= self.x_max && c.y >= self.y_min && c.y <= self.y_max
    }

    /// Row-major walk over the block.
    pub fn iter(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (self.y_min..=self.y_max)
            .flat_map(move |y| (self.x_min..=self.x_max).map(move |x| GridCoord::new(x, y)))
    }
}

/// Maps board coordinates onto the fill lattice anchored at the board origin.
#[derive(Clone, Debug)]
pub struct GridConverter {
    origin: Point<f64>,
    step: f64,
    columns: u32,
    rows: u32,
}

impl GridConverter {
    pub fn new(origin: Point<f64>, step: f64, columns: u32, rows: u32) -> Self {
        Self {
            origin,
            step,
            columns,
            rows,
        }
    }

    /// Sizes the lattice for `bounds` with a `step + inter` margin so that every
    /// obstruction range near the far edge still lands inside the grid.
    pub fn for_board(
        bounds: &Rect,
        step: f64,
        inter: f64,
        max_cells: u64,
    ) -> Result<Self, FillError> {
        if !bounds.is_finite() {
            return Err(FillError::NonFiniteBounds);
        }
        let (width, height) = (bounds.width(), bounds.height());
        if width <= 0.0 || height <= 0.0 {
            return Err(FillError::EmptyBoard { width, height });
        }

        let margin = step + inter;
        let columns = ((width + margin) / step).ceil() + 1.0;
        let rows = ((height + margin) / step).ceil() + 1.0;

        let too_large = || FillError::GridTooLarge {
            columns: columns as u64,
            rows: rows as u64,
            limit: max_cells,
        };
        if columns > u32::MAX as f64 || rows > u32::MAX as f64 {
            return Err(too_large());
        }
        let cells = (columns as u64).checked_mul(rows as u64).ok_or_else(too_large)?;
        if cells > max_cells {
            return Err(too_large());
        }

        Ok(Self::new(bounds.min, step, columns as u32, rows as u32))
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }
    pub fn rows(&self) -> u32 {
        self.rows
    }
    pub fn step(&self) -> f64 {
        self.step
    }
    pub fn origin(&self) -> Point<f64> {
        self.origin
    }

    pub fn to_world(&self, g: GridCoord) -> Point<f64> {
        Point::new(
            self.origin.x + g.x as f64 * self.step,
            self.origin.y + g.y as f64 * self.step,
        )
    }

    /// Board-space y of a whole grid row.
    pub fn row_y(&self, y: u32) -> f64 {
        self.origin.y + y as f64 * self.step
    }

    /// Cells from `floor(min)` to `ceil(max)`, clipped to the grid.
    ///
    /// `None` when the rectangle misses the grid or is not finite.
    pub fn cell_range(&self, rect: &Rect) -> Option<CellRange> {
        if !rect.is_finite() {
            return None;
        }
        let (x_min, x_max) = self.axis_range(rect.min.x, rect.max.x, self.origin.x, self.columns)?;
        let (y_min, y_max) = self.axis_range(rect.min.y, rect.max.y, self.origin.y, self.rows)?;
        Some(CellRange {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    fn axis_range(&self, lo: f64, hi: f64, origin: f64, count: u32) -> Option<(u32, u32)> {
        let start = ((lo - origin) / self.step).floor();
        let stop = ((hi - origin) / self.step).ceil();
        let last = count as f64 - 1.0;
        if stop < 0.0 || start > last || start > stop {
            return None;
        }
        Some((start.max(0.0) as u32, stop.min(last) as u32))
    }
}
