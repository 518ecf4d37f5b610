use super::{ObstructionPass, PassContext, PassKind};
use crate::grid::{FillGrid, Obstructions};

/// Blocks the full pad rectangle grown by pad clearance and `inter`.
pub struct PadPass;

impl ObstructionPass for PadPass {
    fn kind(&self) -> PassKind {
        PassKind::Pad
    }

    fn apply(&self, mut grid: FillGrid, ctx: &PassContext<'_>) -> FillGrid {
        let mut touched = 0;
        for (i, pad) in ctx.board.pads.iter().enumerate() {
            let rect = pad.exclusion_rect(ctx.inter);
            match ctx.converter.cell_range(&rect) {
                Some(range) => touched += grid.mark(&range, Obstructions::PAD),
                None if !rect.is_finite() => {
                    log::warn!("pad pass: pad {} has non-finite geometry, skipped", i)
                }
                None => {}
            }
        }
        log::info!(
            "pad pass: {} pads marked {} cells",
            ctx.board.pads.len(),
            touched
        );
        grid
    }
}
