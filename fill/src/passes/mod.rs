//! Obstruction passes and the fixed order they run in.
//!
//! Each pass takes the grid by value and hands back the updated grid. Only the
//! zone pass decides eligibility; the later passes add obstruction marks.

pub mod pad;
pub mod text;
pub mod track;
pub mod zone;

pub use pad::PadPass;
pub use text::TextPass;
pub use track::TrackPass;
pub use zone::ZonePass;

use crate::grid::FillGrid;
use crate::utils::conversion::GridConverter;
use std::fmt;
use stitch_common::db::core::Board;
use stitch_common::db::indices::NetId;
use stitch_common::util::profiler::ScopedTimer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    Zone,
    Pad,
    Track,
    Text,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PassKind::Zone => "zone",
            PassKind::Pad => "pad",
            PassKind::Track => "track",
            PassKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// Read-only inputs shared by every pass.
pub struct PassContext<'a> {
    pub board: &'a Board,
    pub converter: &'a GridConverter,
    pub target_net: NetId,
    /// `2 * clearance + via_size`.
    pub inter: f64,
}

pub trait ObstructionPass: Send + Sync {
    fn kind(&self) -> PassKind;
    fn apply(&self, grid: FillGrid, ctx: &PassContext<'_>) -> FillGrid;
}

pub struct Pipeline {
    passes: Vec<Box<dyn ObstructionPass>>,
    debug: bool,
}

impl Pipeline {
    /// Zones and keepouts, then pads, then tracks, then text.
    pub fn standard() -> Self {
        Self {
            passes: vec![
                Box::new(ZonePass),
                Box::new(PadPass),
                Box::new(TrackPass),
                Box::new(TextPass),
            ],
            debug: false,
        }
    }

    /// Dump the status-code matrix after every pass.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn kinds(&self) -> Vec<PassKind> {
        self.passes.iter().map(|p| p.kind()).collect()
    }

    pub fn run(&self, mut grid: FillGrid, ctx: &PassContext<'_>) -> FillGrid {
        if self.debug {
            log::info!("Initial grid:\n{}", grid.render());
        }
        for pass in &self.passes {
            let _timer = ScopedTimer::with_level(format!("{} pass", pass.kind()), log::Level::Debug);
            grid = pass.apply(grid, ctx);
            if self.debug {
                log::info!("Grid after {} pass:\n{}", pass.kind(), grid.render());
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_order() {
        assert_eq!(
            Pipeline::standard().kinds(),
            vec![PassKind::Zone, PassKind::Pad, PassKind::Track, PassKind::Text]
        );
    }

    #[test]
    fn debug_dump_leaves_grid_unchanged() {
        use stitch_common::geom::point::Point;
        use stitch_common::geom::polygon::Outline;
        use stitch_common::geom::rect::Rect;

        stitch_common::util::logger::init();
        let mut board = Board::new();
        let gnd = board.add_net("GND");
        board.add_area(
            Some(gnd),
            false,
            Outline::rectangle(&Rect::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0))),
        );
        board.add_pad(Point::new(3.5, 3.5), Point::new(0.5, 0.5), 0.0, None);
        let conv = GridConverter::new(Point::new(0.0, 0.0), 1.0, 6, 6);
        let ctx = PassContext {
            board: &board,
            converter: &conv,
            target_net: gnd,
            inter: 0.2,
        };

        let plain = Pipeline::standard().run(FillGrid::new(6, 6), &ctx);
        let dumped = Pipeline::standard()
            .with_debug(true)
            .run(FillGrid::new(6, 6), &ctx);
        assert_eq!(plain, dumped);
        assert_eq!(dumped.count_eligible(), 9 - 1);
    }
}
