use crate::db::indices::*;
use crate::geom::coord::GridCoord;
use crate::geom::point::Point;
use crate::geom::polygon::{Outline, Shape};
use crate::geom::rect::Rect;
use crate::geom::segment::Segment;
use std::collections::HashMap;
use std::fmt;

/// Value string stamped on every emitted via footprint.
pub const PLACEMENT_VALUE: &str = "AUTO_VIA";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Layer {
    FrontCopper,
    BackCopper,
    InnerCopper(u8),
    Other(String),
}

impl Layer {
    pub fn from_name(name: &str) -> Self {
        match name {
            "F.Cu" => Layer::FrontCopper,
            "B.Cu" => Layer::BackCopper,
            _ => name
                .strip_prefix("In")
                .and_then(|rest| rest.strip_suffix(".Cu"))
                .and_then(|n| n.parse().ok())
                .map(Layer::InnerCopper)
                .unwrap_or_else(|| Layer::Other(name.to_string())),
        }
    }

    pub fn is_copper(&self) -> bool {
        !matches!(self, Layer::Other(_))
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::FrontCopper => write!(f, "F.Cu"),
            Layer::BackCopper => write!(f, "B.Cu"),
            Layer::InnerCopper(n) => write!(f, "In{}.Cu", n),
            Layer::Other(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NetData {
    pub name: String,
}

/// Zone or keepout region.
#[derive(Clone, Debug)]
pub struct Area {
    pub net: Option<NetId>,
    pub is_keepout: bool,
    pub outline: Outline,
}

#[derive(Clone, Debug)]
pub struct Pad {
    pub position: Point<f64>,
    /// Full width/height of the copper.
    pub size: Point<f64>,
    pub clearance: f64,
    pub net: Option<NetId>,
}

impl Pad {
    pub fn copper_rect(&self) -> Rect {
        Rect::from_center(self.position, self.size.x.abs() / 2.0, self.size.y.abs() / 2.0)
    }

    /// Copper footprint grown by the pad clearance plus `extra`.
    pub fn exclusion_rect(&self, extra: f64) -> Rect {
        Rect::from_center(
            self.position,
            self.size.x.abs() / 2.0 + self.clearance + extra,
            self.size.y.abs() / 2.0 + self.clearance + extra,
        )
    }
}

/// Track or via. A via is a zero-length segment.
#[derive(Clone, Debug)]
pub struct Track {
    pub segment: Segment,
    pub clearance: f64,
    pub net: Option<NetId>,
}

#[derive(Clone, Debug)]
pub struct Text {
    pub text: String,
    pub bbox: Rect,
    pub layer: Layer,
}

/// Through-hole via produced by the fill run, with everything needed to
/// instantiate its footprint.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub label: String,
    pub value: &'static str,
    pub coord: GridCoord,
    pub position: Point<f64>,
    pub net: NetId,
    pub net_name: String,
    pub size: f64,
    pub drill: f64,
    pub clearance: f64,
}

pub struct Board {
    pub bounds: Rect,
    pub nets: Vec<NetData>,
    pub areas: Vec<Area>,
    pub pads: Vec<Pad>,
    pub tracks: Vec<Track>,
    pub texts: Vec<Text>,

    pub net_name_map: HashMap<String, NetId>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            bounds: Rect::default(),
            nets: Vec::new(),
            areas: Vec::new(),
            pads: Vec::with_capacity(256),
            tracks: Vec::with_capacity(256),
            texts: Vec::new(),
            net_name_map: HashMap::new(),
        }
    }

    pub fn num_nets(&self) -> usize {
        self.nets.len()
    }

    pub fn add_net(&mut self, name: impl Into<String>) -> NetId {
        let name = name.into();
        if let Some(&id) = self.net_name_map.get(&name) {
            return id;
        }
        let id = NetId::new(self.nets.len());
        self.nets.push(NetData { name: name.clone() });
        self.net_name_map.insert(name, id);
        id
    }

    pub fn find_net(&self, name: &str) -> Option<NetId> {
        self.net_name_map.get(name).copied()
    }

    pub fn net_name(&self, net: NetId) -> Option<&str> {
        self.nets.get(net.index()).map(|n| n.name.as_str())
    }

    pub fn add_area(&mut self, net: Option<NetId>, is_keepout: bool, outline: Outline) -> AreaId {
        let id = AreaId::new(self.areas.len());
        self.areas.push(Area {
            net,
            is_keepout,
            outline,
        });
        id
    }

    pub fn add_pad(
        &mut self,
        position: Point<f64>,
        size: Point<f64>,
        clearance: f64,
        net: Option<NetId>,
    ) -> PadId {
        let id = PadId::new(self.pads.len());
        self.pads.push(Pad {
            position,
            size,
            clearance,
            net,
        });
        id
    }

    pub fn add_track(&mut self, segment: Segment, clearance: f64, net: Option<NetId>) -> TrackId {
        let id = TrackId::new(self.tracks.len());
        self.tracks.push(Track {
            segment,
            clearance,
            net,
        });
        id
    }

    pub fn add_text(&mut self, text: impl Into<String>, bbox: Rect, layer: Layer) -> TextId {
        let id = TextId::new(self.texts.len());
        self.texts.push(Text {
            text: text.into(),
            bbox,
            layer,
        });
        id
    }

    /// Union of every feature's extent, or `None` for a board with no usable geometry.
    pub fn compute_bounding_box(&self) -> Option<Rect> {
        let areas = self.areas.iter().filter_map(|a| a.outline.bounding_box());
        let pads = self.pads.iter().map(|p| p.copper_rect());
        let tracks = self.tracks.iter().map(|t| t.segment.bounding_box());
        let texts = self.texts.iter().map(|t| t.bbox);

        areas
            .chain(pads)
            .chain(tracks)
            .chain(texts)
            .filter(|r| r.is_finite())
            .reduce(|a, b| a.union(&b))
    }

    /// Replaces `bounds` with the computed bounding box when one exists.
    pub fn update_bounds(&mut self) {
        if let Some(bbox) = self.compute_bounding_box() {
            self.bounds = bbox;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
