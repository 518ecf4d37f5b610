pub mod emit;
pub mod error;
pub mod grid;
pub mod passes;
pub mod utils;

use error::FillError;
use grid::FillGrid;
use passes::{PassContext, Pipeline};
use stitch_common::db::core::{Board, Placement};
use stitch_common::util::params::{FillParams, FillParamsBuilder};
use stitch_common::util::profiler::ScopedTimer;
use utils::conversion::GridConverter;

/// Runs every obstruction pass and returns the finished grid with its converter.
pub fn rasterize(
    board: &Board,
    params: &FillParams,
) -> Result<(FillGrid, GridConverter), FillError> {
    let converter = GridConverter::for_board(
        &board.bounds,
        params.step(),
        params.inter(),
        params.max_grid_cells(),
    )?;
    log::info!(
        "Fill grid: {} x {} cells, step {} mm, exclusion {} mm",
        converter.columns(),
        converter.rows(),
        params.step(),
        params.inter()
    );

    let ctx = PassContext {
        board,
        converter: &converter,
        target_net: params.net(),
        inter: params.inter(),
    };
    let grid = Pipeline::standard()
        .with_debug(params.debug())
        .run(FillGrid::new(converter.columns(), converter.rows()), &ctx);

    Ok((grid, converter))
}

/// Computes the via placements for `board` on the configured net.
pub fn run(board: &Board, params: &FillParams) -> Result<Vec<Placement>, FillError> {
    let _timer = ScopedTimer::new("Via fill");
    log::info!("Starting Via Fill on net '{}'...", params.net_name());

    let (grid, converter) = rasterize(board, params)?;
    let placements = emit::emit(&grid, &converter, params);

    log::info!("Via Fill produced {} vias", placements.len());
    Ok(placements)
}

/// Validates `builder` against `board`, then runs the fill.
pub fn run_with(board: &Board, builder: FillParamsBuilder) -> Result<Vec<Placement>, FillError> {
    let params = builder.build(board)?;
    run(board, &params)
}
