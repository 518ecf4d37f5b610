use crate::db::core::{Board, Placement};
use crate::db::indices::{PadId, TextId, TrackId};
use crate::geom::point::Point;
use crate::geom::polygon::Shape;
use crate::geom::rect::Rect;
use crate::geom::rtree::SpatialIndex;
use crate::util::params::FillParams;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

const CHECK_TOLERANCE: f64 = 1e-6;

fn strictly_inside(rect: &Rect, p: Point<f64>) -> bool {
    rect.expand(-CHECK_TOLERANCE).contains(p)
}

#[derive(Default)]
struct Violations {
    pads: AtomicUsize,
    tracks: AtomicUsize,
    texts: AtomicUsize,
    keepouts: AtomicUsize,
    outside: AtomicUsize,
}

/// Re-checks every placement against the board independently of the fill grid.
pub fn run_fill_check(
    board: &Board,
    params: &FillParams,
    placements: &[Placement],
) -> Result<(), String> {
    log::info!("Starting Fill Verification ({} vias)...", placements.len());
    let inter = params.inter();

    let mut seen = HashSet::with_capacity(placements.len());
    let duplicates = placements
        .iter()
        .filter(|p| !seen.insert(p.label.as_str()))
        .count();
    if duplicates > 0 {
        log::error!("FAIL: {} duplicate via labels", duplicates);
    }

    let pad_index: SpatialIndex<PadId> = SpatialIndex::from_rects(
        board
            .pads
            .iter()
            .enumerate()
            .map(|(i, pad)| (pad.exclusion_rect(inter), PadId::new(i))),
    );
    let text_index: SpatialIndex<TextId> = SpatialIndex::from_rects(
        board
            .texts
            .iter()
            .enumerate()
            .filter(|(_, t)| t.layer.is_copper())
            .map(|(i, t)| (t.bbox.expand(inter), TextId::new(i))),
    );
    let track_index: SpatialIndex<TrackId> =
        SpatialIndex::from_rects(board.tracks.iter().enumerate().map(|(i, t)| {
            (
                t.segment.bounding_box().expand(inter + t.clearance),
                TrackId::new(i),
            )
        }));

    let keepouts: Vec<_> = board.areas.iter().filter(|a| a.is_keepout).collect();
    let zones: Vec<_> = board
        .areas
        .iter()
        .filter(|a| !a.is_keepout && a.net == Some(params.net()))
        .collect();

    let violations = Violations::default();

    placements.par_iter().for_each(|via| {
        let p = via.position;

        for (rect, id) in pad_index.query_point(p) {
            if strictly_inside(&rect, p) {
                log::error!("FAIL: Via '{}' inside clearance of pad {:?}", via.label, id);
                violations.pads.fetch_add(1, Ordering::Relaxed);
            }
        }

        for (rect, id) in text_index.query_point(p) {
            if strictly_inside(&rect, p) {
                log::error!("FAIL: Via '{}' inside clearance of text {:?}", via.label, id);
                violations.texts.fetch_add(1, Ordering::Relaxed);
            }
        }

        for (_, id) in track_index.query_point(p) {
            let track = &board.tracks[id.index()];
            let half = inter + track.clearance - CHECK_TOLERANCE;
            if half > 0.0 && track.segment.intersects_rect(&Rect::from_center(p, half, half)) {
                log::error!("FAIL: Via '{}' too close to track {:?}", via.label, id);
                violations.tracks.fetch_add(1, Ordering::Relaxed);
            }
        }

        let corners = Rect::from_center(p, inter / 2.0, inter / 2.0).corners();
        if keepouts
            .iter()
            .any(|k| corners.iter().any(|&c| k.outline.contains(c)))
        {
            log::error!("FAIL: Via '{}' touches a keepout area", via.label);
            violations.keepouts.fetch_add(1, Ordering::Relaxed);
        }
        if !zones
            .iter()
            .any(|z| corners.iter().all(|&c| z.outline.contains(c)))
        {
            log::error!("FAIL: Via '{}' is not inside a target-net zone", via.label);
            violations.outside.fetch_add(1, Ordering::Relaxed);
        }
    });

    let total = duplicates
        + violations.pads.load(Ordering::Relaxed)
        + violations.tracks.load(Ordering::Relaxed)
        + violations.texts.load(Ordering::Relaxed)
        + violations.keepouts.load(Ordering::Relaxed)
        + violations.outside.load(Ordering::Relaxed);

    if total == 0 {
        log::info!("\x1b[32mPASS\x1b[0m: All vias respect clearances.");
        Ok(())
    } else {
        Err(format!(
            "fill verification failed: {} violations (pads {}, tracks {}, texts {}, keepouts {}, outside {}, duplicates {})",
            total,
            violations.pads.load(Ordering::Relaxed),
            violations.tracks.load(Ordering::Relaxed),
            violations.texts.load(Ordering::Relaxed),
            violations.keepouts.load(Ordering::Relaxed),
            violations.outside.load(Ordering::Relaxed),
            duplicates
        ))
    }
}
