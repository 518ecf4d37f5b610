use crate::grid::FillGrid;
use crate::utils::conversion::GridConverter;
use stitch_common::db::core::{PLACEMENT_VALUE, Placement};
use stitch_common::geom::coord::GridCoord;
use stitch_common::util::params::FillParams;

/// Reference designator for the via at `coord`.
pub fn label(coord: GridCoord) -> String {
    format!("V{}_{}", coord.x, coord.y)
}

/// One placement per eligible cell, in row-major order.
pub fn emit(grid: &FillGrid, converter: &GridConverter, params: &FillParams) -> Vec<Placement> {
    grid.iter()
        .filter(|(_, cell)| cell.is_fill_eligible())
        .map(|(coord, _)| Placement {
            label: label(coord),
            value: PLACEMENT_VALUE,
            coord,
            position: converter.to_world(coord),
            net: params.net(),
            net_name: params.net_name().to_string(),
            size: params.via_size(),
            drill: params.drill(),
            clearance: params.clearance(),
        })
        .collect()
}
