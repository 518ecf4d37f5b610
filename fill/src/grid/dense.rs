use super::{Cell, Obstructions};
use crate::utils::conversion::CellRange;
use rayon::prelude::*;
use std::fmt::Write;
use stitch_common::geom::coord::GridCoord;

/// Row-major cell array covering the board.
#[derive(Clone, Debug, PartialEq)]
pub struct FillGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl FillGrid {
    pub fn new(columns: u32, rows: u32) -> Self {
        let size = (columns as usize) * (rows as usize);

        if size > 100_000_000 {
            log::warn!(
                "Allocating large FillGrid: {} cells. Ensure sufficient RAM.",
                size
            );
        }

        Self {
            columns,
            rows,
            cells: vec![Cell::default(); size],
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline(always)]
    fn index(&self, coord: GridCoord) -> usize {
        (coord.y as usize) * (self.columns as usize) + (coord.x as usize)
    }

    pub fn get(&self, coord: GridCoord) -> Option<&Cell> {
        if coord.x >= self.columns || coord.y >= self.rows {
            return None;
        }
        self.cells.get(self.index(coord))
    }

    pub fn get_mut(&mut self, coord: GridCoord) -> Option<&mut Cell> {
        if coord.x >= self.columns || coord.y >= self.rows {
            return None;
        }
        let idx = self.index(coord);
        self.cells.get_mut(idx)
    }

    /// Parallel mutable row slices, for passes that work a row at a time.
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, Cell> {
        let columns = self.columns.max(1) as usize;
        self.cells.par_chunks_mut(columns)
    }

    /// Row-major walk over every cell.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &Cell)> + '_ {
        let columns = self.columns.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            (
                GridCoord::new((i % columns) as u32, (i / columns) as u32),
                cell,
            )
        })
    }

    /// Sets `mark` on every cell of `range`. Returns the number of cells in range.
    pub fn mark(&mut self, range: &CellRange, mark: Obstructions) -> usize {
        let columns = self.columns as usize;
        for y in range.y_min..=range.y_max {
            let row = (y as usize) * columns;
            let start = row + range.x_min as usize;
            let stop = row + range.x_max as usize;
            for cell in &mut self.cells[start..=stop] {
                cell.obstructions.insert(mark);
            }
        }
        range.cell_count()
    }

    pub fn count_eligible(&self) -> usize {
        self.cells.iter().filter(|c| c.is_fill_eligible()).count()
    }

    /// Status-code matrix, one line per row, two hex digits per cell.
    pub fn render(&self) -> String {
        let columns = self.columns.max(1) as usize;
        let mut out = String::with_capacity(self.cells.len() * 3 + self.rows as usize);
        for row in self.cells.chunks(columns) {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{:02X}", cell.status_code());
            }
            out.push('\n');
        }
        out
    }
}
