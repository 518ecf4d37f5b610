use super::{ObstructionPass, PassContext, PassKind};
use crate::grid::{FillGrid, Obstructions};

/// Blocks the bounding box of copper-layer text grown by `inter`.
pub struct TextPass;

impl ObstructionPass for TextPass {
    fn kind(&self) -> PassKind {
        PassKind::Text
    }

    fn apply(&self, mut grid: FillGrid, ctx: &PassContext<'_>) -> FillGrid {
        let mut touched = 0;
        let mut considered = 0;
        for (i, text) in ctx.board.texts.iter().enumerate() {
            if !text.layer.is_copper() {
                continue;
            }
            considered += 1;
            let rect = text.bbox.expand(ctx.inter);
            match ctx.converter.cell_range(&rect) {
                Some(range) => touched += grid.mark(&range, Obstructions::TEXT),
                None if !rect.is_finite() => log::warn!(
                    "text pass: text {} ('{}') has non-finite bounds, skipped",
                    i,
                    text.text
                ),
                None => {}
            }
        }
        log::info!(
            "text pass: {} copper texts marked {} cells",
            considered,
            touched
        );
        grid
    }
}
