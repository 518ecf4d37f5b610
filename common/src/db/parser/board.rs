//! TOML board description.
//!
//! ```toml
//! nets = ["GND", "VCC"]
//!
//! [bounds]            # optional, computed from features when absent
//! min = [0.0, 0.0]
//! max = [50.0, 40.0]
//!
//! [[areas]]
//! net = "GND"
//! outline = [[[0.0, 0.0], [50.0, 0.0], [50.0, 40.0], [0.0, 40.0]]]
//!
//! [[areas]]
//! keepout = true
//! outline = [[[10.0, 10.0], [14.0, 10.0], [14.0, 14.0], [10.0, 14.0]]]
//!
//! [[pads]]
//! position = [20.0, 20.0]
//! size = [1.5, 1.5]
//! clearance = 0.2
//! net = "VCC"
//!
//! [[tracks]]
//! start = [5.0, 5.0]
//! end = [30.0, 5.0]
//! clearance = 0.2
//!
//! [[texts]]
//! text = "REV A"
//! layer = "F.Cu"
//! min = [40.0, 35.0]
//! max = [48.0, 38.0]
//! ```

use crate::db::core::{Board, Layer};
use crate::geom::point::Point;
use crate::geom::polygon::Outline;
use crate::geom::rect::Rect;
use crate::geom::segment::Segment;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

type Xy = [f64; 2];

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BoardFile {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub areas: Vec<AreaEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pads: Vec<PadEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracks: Vec<TrackEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub texts: Vec<TextEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoundsEntry {
    pub min: Xy,
    pub max: Xy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AreaEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net: Option<String>,
    #[serde(default)]
    pub keepout: bool,
    pub outline: Vec<Vec<Xy>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PadEntry {
    pub position: Xy,
    pub size: Xy,
    #[serde(default)]
    pub clearance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackEntry {
    pub start: Xy,
    pub end: Xy,
    #[serde(default)]
    pub clearance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TextEntry {
    #[serde(default)]
    pub text: String,
    pub layer: String,
    pub min: Xy,
    pub max: Xy,
}

fn point(xy: Xy) -> Point<f64> {
    Point::new(xy[0], xy[1])
}

pub fn parse(db: &mut Board, filename: &str) -> Result<()> {
    let content = std::fs::read_to_string(filename)
        .with_context(|| format!("failed to read board file '{}'", filename))?;
    parse_str(db, &content)
}

pub fn parse_str(db: &mut Board, content: &str) -> Result<()> {
    let file: BoardFile = toml::from_str(content).context("invalid board description")?;
    load(db, file);
    Ok(())
}

/// Adds every entry of `file` to `db`. Nets referenced by features are created on demand.
pub fn load(db: &mut Board, file: BoardFile) {
    for name in file.nets {
        db.add_net(name);
    }

    for area in file.areas {
        let net = area.net.map(|n| db.add_net(n));
        let contours = area
            .outline
            .into_iter()
            .map(|c| c.into_iter().map(point).collect())
            .collect();
        db.add_area(net, area.keepout, Outline::new(contours));
    }

    for pad in file.pads {
        let net = pad.net.map(|n| db.add_net(n));
        db.add_pad(point(pad.position), point(pad.size), pad.clearance, net);
    }

    for track in file.tracks {
        let net = track.net.map(|n| db.add_net(n));
        db.add_track(
            Segment::new(point(track.start), point(track.end)),
            track.clearance,
            net,
        );
    }

    for text in file.texts {
        db.add_text(
            text.text,
            Rect::from_corners(point(text.min), point(text.max)),
            Layer::from_name(&text.layer),
        );
    }

    match file.bounds {
        Some(b) => db.bounds = Rect::from_corners(point(b.min), point(b.max)),
        None => db.update_bounds(),
    }

    log::info!(
        "Board loaded: {} nets, {} areas, {} pads, {} tracks, {} texts",
        db.num_nets(),
        db.areas.len(),
        db.pads.len(),
        db.tracks.len(),
        db.texts.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
nets = ["/GND"]

[[areas]]
net = "/GND"
outline = [[[0.0, 0.0], [20.0, 0.0], [20.0, 10.0], [0.0, 10.0]]]

[[areas]]
keepout = true
outline = [[[2.0, 2.0], [4.0, 2.0], [4.0, 4.0]]]

[[pads]]
position = [5.0, 5.0]
size = [1.0, 2.0]
clearance = 0.25
net = "VCC"

[[tracks]]
start = [1.0, 1.0]
end = [21.0, 1.0]

[[texts]]
text = "hello"
layer = "B.Cu"
min = [3.0, 8.0]
max = [1.0, 9.0]
"#;

    #[test]
    fn parses_all_sections() {
        let mut board = Board::new();
        parse_str(&mut board, SAMPLE).unwrap();

        assert_eq!(board.num_nets(), 2);
        let gnd = board.find_net("/GND").unwrap();
        let vcc = board.find_net("VCC").unwrap();

        assert_eq!(board.areas.len(), 2);
        assert_eq!(board.areas[0].net, Some(gnd));
        assert!(board.areas[1].is_keepout);
        assert_eq!(board.areas[1].net, None);

        assert_eq!(board.pads[0].net, Some(vcc));
        assert_eq!(board.pads[0].clearance, 0.25);
        assert_eq!(board.tracks[0].clearance, 0.0);
        assert_eq!(board.texts[0].layer, Layer::BackCopper);
        assert_eq!(board.texts[0].bbox.min, Point::new(1.0, 8.0));

        // No explicit bounds: the track reaches x = 21.
        assert_eq!(board.bounds.min, Point::new(0.0, 0.0));
        assert_eq!(board.bounds.max, Point::new(21.0, 10.0));
    }

    #[test]
    fn explicit_bounds_win() {
        let mut board = Board::new();
        parse_str(
            &mut board,
            "[bounds]\nmin = [-1.0, -1.0]\nmax = [5.0, 6.0]\n",
        )
        .unwrap();
        assert_eq!(board.bounds.max, Point::new(5.0, 6.0));
    }

    #[test]
    fn rejects_malformed_input() {
        let mut board = Board::new();
        assert!(parse_str(&mut board, "[[pads]]\nposition = [1.0]\n").is_err());
    }
}
