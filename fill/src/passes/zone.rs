use super::{ObstructionPass, PassContext, PassKind};
use crate::grid::{FillGrid, ZoneState};
use rayon::prelude::*;
use stitch_common::db::core::Area;
use stitch_common::geom::coord::GridCoord;
use stitch_common::geom::point::Point;
use stitch_common::geom::polygon::Shape;
use stitch_common::geom::rect::Rect;

/// Marks cells allowed by target-net zones and denied by keepouts.
///
/// Each cell samples the four corners of an `inter`-sided square around its
/// board position. Keepouts deny when any corner is inside, target zones allow
/// when all four are. Denial always wins and an allow only applies to a cell
/// that is still `Outside`, so the per-cell result does not depend on area
/// order and rows can be processed in parallel.
pub struct ZonePass;

struct Candidate<'a> {
    index: usize,
    area: &'a Area,
    bbox: Rect,
}

impl ObstructionPass for ZonePass {
    fn kind(&self) -> PassKind {
        PassKind::Zone
    }

    fn apply(&self, mut grid: FillGrid, ctx: &PassContext<'_>) -> FillGrid {
        let half = ctx.inter / 2.0;
        let conv = ctx.converter;

        let candidates: Vec<Candidate> = ctx
            .board
            .areas
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_keepout || a.net == Some(ctx.target_net))
            .filter_map(|(index, area)| {
                if area.outline.is_degenerate() {
                    log::warn!("zone pass: area {} has a degenerate outline, skipped", index);
                    return None;
                }
                let bbox = area.outline.bounding_box()?;
                Some(Candidate { index, area, bbox })
            })
            .collect();

        log::debug!(
            "zone pass: {} target-net zones, {} keepouts",
            candidates.iter().filter(|c| !c.area.is_keepout).count(),
            candidates.iter().filter(|c| c.area.is_keepout).count()
        );
        if candidates.is_empty() {
            return grid;
        }

        let x_first = conv.origin().x - half;
        let x_last = conv.to_world(GridCoord::new(conv.columns().saturating_sub(1), 0)).x + half;

        grid.par_rows_mut().enumerate().for_each(|(y, row)| {
            let cy = conv.row_y(y as u32);
            let band = Rect::new(Point::new(x_first, cy - half), Point::new(x_last, cy + half));

            for cand in &candidates {
                if !cand.bbox.overlaps(&band) || !cand.area.outline.overlaps(&band) {
                    continue;
                }
                for (x, cell) in row.iter_mut().enumerate() {
                    let center = conv.to_world(GridCoord::new(x as u32, y as u32));
                    let square = Rect::from_center(center, half, half);
                    if !cand.bbox.overlaps(&square) {
                        continue;
                    }
                    let corners = square.corners();

                    if cand.area.is_keepout {
                        if cell.zone != ZoneState::Denied
                            && corners.iter().any(|&p| cand.area.outline.contains(p))
                        {
                            log::trace!(
                                "zone pass: keepout area {} denies cell ({}, {})",
                                cand.index,
                                x,
                                y
                            );
                            cell.zone = ZoneState::Denied;
                        }
                    } else if cell.zone == ZoneState::Outside
                        && corners.iter().all(|&p| cand.area.outline.contains(p))
                    {
                        cell.zone = ZoneState::Allowed;
                    }
                }
            }
        });

        let (allowed, denied) = grid.iter().fold((0usize, 0usize), |(a, d), (_, cell)| {
            match cell.zone {
                ZoneState::Allowed => (a + 1, d),
                ZoneState::Denied => (a, d + 1),
                ZoneState::Outside => (a, d),
            }
        });
        log::info!(
            "zone pass: {} cells allowed, {} cells denied by keepouts",
            allowed,
            denied
        );
        grid
    }
}
