use crate::db::parser::board::{
    AreaEntry, BoardFile, BoundsEntry, PadEntry, TextEntry, TrackEntry,
};
use anyhow::Result;
use rand::Rng;
use std::fs::File;
use std::io::Write;

pub struct GeneratorParams {
    pub width: f64,
    pub height: f64,
    pub pads: usize,
    pub tracks: usize,
    pub texts: usize,
    pub keepouts: usize,
}

/// Random benchmark board: one GND zone covering the board plus random obstructions.
pub fn generate_random_board(filename: &str, params: &GeneratorParams) -> Result<()> {
    let mut rng = rand::thread_rng();
    let w = params.width.max(5.0);
    let h = params.height.max(5.0);
    let margin = 1.0;

    log::info!(
        "Generating Board: {:.1}x{:.1} mm, {} pads, {} tracks, {} texts, {} keepouts",
        w,
        h,
        params.pads,
        params.tracks,
        params.texts,
        params.keepouts
    );

    let mut board = BoardFile {
        nets: vec!["GND".to_string(), "VCC".to_string()],
        bounds: Some(BoundsEntry {
            min: [0.0, 0.0],
            max: [w, h],
        }),
        ..BoardFile::default()
    };

    board.areas.push(AreaEntry {
        net: Some("GND".to_string()),
        keepout: false,
        outline: vec![vec![
            [margin, margin],
            [w - margin, margin],
            [w - margin, h - margin],
            [margin, h - margin],
        ]],
    });

    for _ in 0..params.keepouts {
        let cx = rng.gen_range(margin..w - margin);
        let cy = rng.gen_range(margin..h - margin);
        let r = rng.gen_range(0.5..(w.min(h) / 8.0).max(0.6));
        let contour = (0..24)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / 24.0;
                [cx + r * a.cos(), cy + r * a.sin()]
            })
            .collect();
        board.areas.push(AreaEntry {
            net: None,
            keepout: true,
            outline: vec![contour],
        });
    }

    for i in 0..params.pads {
        let side = rng.gen_range(0.6..2.0);
        board.pads.push(PadEntry {
            position: [rng.gen_range(0.0..w), rng.gen_range(0.0..h)],
            size: [side, rng.gen_range(0.6..2.0)],
            clearance: 0.2,
            net: Some(if i % 4 == 0 { "GND" } else { "VCC" }.to_string()),
        });
    }

    for _ in 0..params.tracks {
        let start = [rng.gen_range(0.0..w), rng.gen_range(0.0..h)];
        // Manhattan or 45 degree routing.
        let len = rng.gen_range(1.0..(w.max(h) / 3.0).max(1.5));
        let end = match rng.gen_range(0..3) {
            0 => [(start[0] + len).min(w), start[1]],
            1 => [start[0], (start[1] + len).min(h)],
            _ => [(start[0] + len).min(w), (start[1] + len).min(h)],
        };
        board.tracks.push(TrackEntry {
            start,
            end,
            clearance: 0.2,
            net: Some("VCC".to_string()),
        });
    }

    for i in 0..params.texts {
        let x = rng.gen_range(0.0..w);
        let y = rng.gen_range(0.0..h);
        board.texts.push(TextEntry {
            text: format!("T{}", i),
            layer: if i % 2 == 0 { "F.Cu" } else { "F.SilkS" }.to_string(),
            min: [x, y],
            max: [(x + 3.0).min(w), (y + 1.0).min(h)],
        });
    }

    let content = toml::to_string(&board)?;
    let mut file = File::create(filename)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
