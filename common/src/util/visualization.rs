use crate::db::core::{Board, Placement};
use crate::geom::polygon::Shape;
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect as ImageRect;
use std::path::Path;

/// Renders the board outline features and the emitted vias to a PNG.
pub fn draw_fill(
    board: &Board,
    placements: &[Placement],
    filename: &str,
    width: u32,
    height: u32,
) -> image::ImageResult<()> {
    let mut img = RgbImage::from_pixel(width, height, Rgb([20, 20, 20]));

    let bounds = board.bounds;
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        log::warn!("Board has no extent, skipping rendering of {}", filename);
        return Ok(());
    }

    // Keep the aspect ratio; board y grows downwards like image rows.
    let scale = (width as f64 / bounds.width()).min(height as f64 / bounds.height());
    let map = |x: f64, y: f64| {
        (
            ((x - bounds.min.x) * scale) as f32,
            ((y - bounds.min.y) * scale) as f32,
        )
    };

    let color_zone = Rgb([40, 90, 160]);
    let color_keepout = Rgb([200, 60, 60]);
    let color_pad = Rgb([200, 160, 40]);
    let color_track = Rgb([60, 170, 80]);
    let color_text = Rgb([220, 220, 220]);
    let color_via = Rgb([255, 255, 255]);

    for area in &board.areas {
        let color = if area.is_keepout {
            color_keepout
        } else {
            color_zone
        };
        if area.outline.bounding_box().is_none() {
            continue;
        }
        for contour in &area.outline.contours {
            let n = contour.len();
            for i in 0..n {
                let a = contour[i];
                let b = contour[(i + 1) % n];
                draw_line_segment_mut(&mut img, map(a.x, a.y), map(b.x, b.y), color);
            }
        }
    }

    for pad in &board.pads {
        let r = pad.copper_rect();
        let (x, y) = map(r.min.x, r.min.y);
        let w = ((r.width() * scale) as u32).max(1);
        let h = ((r.height() * scale) as u32).max(1);
        draw_filled_rect_mut(&mut img, ImageRect::at(x as i32, y as i32).of_size(w, h), color_pad);
    }

    for track in &board.tracks {
        let s = track.segment;
        draw_line_segment_mut(
            &mut img,
            map(s.start.x, s.start.y),
            map(s.end.x, s.end.y),
            color_track,
        );
    }

    for text in board.texts.iter().filter(|t| t.layer.is_copper()) {
        let (x, y) = map(text.bbox.min.x, text.bbox.min.y);
        let w = ((text.bbox.width() * scale) as u32).max(1);
        let h = ((text.bbox.height() * scale) as u32).max(1);
        draw_hollow_rect_mut(&mut img, ImageRect::at(x as i32, y as i32).of_size(w, h), color_text);
    }

    for via in placements {
        let radius = ((via.size / 2.0 * scale) as i32).max(1);
        let (x, y) = map(via.position.x, via.position.y);
        draw_filled_circle_mut(&mut img, (x as i32, y as i32), radius, color_via);
    }

    img.save(Path::new(filename))
}
