use super::{ObstructionPass, PassContext, PassKind};
use crate::grid::{FillGrid, Obstructions};
use stitch_common::geom::rect::Rect;

/// Blocks cells whose `2 * (inter + track clearance)` square touches the track centerline.
pub struct TrackPass;

impl ObstructionPass for TrackPass {
    fn kind(&self) -> PassKind {
        PassKind::Track
    }

    fn apply(&self, mut grid: FillGrid, ctx: &PassContext<'_>) -> FillGrid {
        let conv = ctx.converter;
        let mut hits = 0usize;

        for (i, track) in ctx.board.tracks.iter().enumerate() {
            if !track.segment.is_finite() {
                log::warn!("track pass: track {} has non-finite endpoints, skipped", i);
                continue;
            }
            let clearance = ctx.inter + track.clearance;
            let bbox = track.segment.bounding_box().expand(clearance);
            let Some(range) = conv.cell_range(&bbox) else {
                continue;
            };

            for coord in range.iter() {
                let probe = Rect::from_center(conv.to_world(coord), clearance, clearance);
                if !track.segment.intersects_rect(&probe) {
                    continue;
                }
                if let Some(cell) = grid.get_mut(coord) {
                    cell.obstructions.insert(Obstructions::TRACK);
                    hits += 1;
                }
            }
        }

        log::info!(
            "track pass: {} tracks marked {} cells",
            ctx.board.tracks.len(),
            hits
        );
        grid
    }
}
