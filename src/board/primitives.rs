//! Board primitive types.
//!
//! These types represent the items the fanout engine reads from and writes to
//! a board: footprints with their pads, tracks, and vias. All coordinates are
//! integer board units (see [`IU_PER_MM`](super::IU_PER_MM)).

use serde::{Deserialize, Serialize};

/// A 2D point in board units.
///
/// The Y axis points down, as on a PCB editor canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: i64,
    /// Y coordinate.
    pub y: i64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Creates a point from floating-point coordinates, rounding to the
    /// nearest board unit.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // board coordinates fit in i64
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: x.round() as i64,
            y: y.round() as i64,
        }
    }

    /// Returns this point offset by `(dx, dy)`, rounded to board units.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::from_f64(self.x as f64 + dx, self.y as f64 + dy)
    }

    /// Rotates this point about `centre` by `degrees`.
    ///
    /// Positive angles turn counter-clockwise on screen, which with a
    /// downward Y axis means `x' = x cos + y sin`, `y' = -x sin + y cos`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rotated_about(self, centre: Self, degrees: f64) -> Self {
        if degrees == 0.0 {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = (self.x - centre.x) as f64;
        let dy = (self.y - centre.y) as f64;
        Self::from_f64(
            centre.x as f64 + dx.mul_add(cos, dy * sin),
            centre.y as f64 + (-dx).mul_add(sin, dy * cos),
        )
    }
}

/// A footprint pad as seen by the fanout engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pad {
    /// Pad name (e.g., "A1").
    pub name: String,

    /// Net code. Zero means the pad has no net (mechanical pad).
    #[serde(default)]
    pub net_code: u32,

    /// Absolute pad position.
    pub position: Point,
}

impl Pad {
    /// Creates a new pad.
    #[must_use]
    pub fn new(name: impl Into<String>, net_code: u32, position: Point) -> Self {
        Self {
            name: name.into(),
            net_code,
            position,
        }
    }

    /// Returns `true` if the pad carries a net.
    #[must_use]
    pub const fn is_electrical(&self) -> bool {
        self.net_code != 0
    }
}

/// A pad stored inside a [`Footprint`], relative to the footprint origin at
/// zero rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintPad {
    /// Pad name.
    pub name: String,

    /// Net code (0 for mechanical pads).
    #[serde(default)]
    pub net_code: u32,

    /// Offset from the footprint origin, unrotated.
    pub offset: Point,
}

/// A placed footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Reference designator (e.g., "U1").
    pub reference: String,

    /// Footprint origin on the board.
    pub position: Point,

    /// Orientation in degrees. Stored exactly as set.
    #[serde(default)]
    pub orientation: f64,

    /// Pads in definition order.
    #[serde(default)]
    pub pads: Vec<FootprintPad>,
}

impl Footprint {
    /// Creates a new footprint with no pads.
    #[must_use]
    pub fn new(reference: impl Into<String>, position: Point, orientation: f64) -> Self {
        Self {
            reference: reference.into(),
            position,
            orientation,
            pads: Vec::new(),
        }
    }

    /// Adds a pad at `offset` from the origin (unrotated).
    pub fn add_pad(&mut self, name: impl Into<String>, net_code: u32, offset: Point) {
        self.pads.push(FootprintPad {
            name: name.into(),
            net_code,
            offset,
        });
    }

    /// Returns the absolute position of a pad at the current orientation.
    #[must_use]
    pub fn pad_position(&self, pad: &FootprintPad) -> Point {
        let unrotated = Point::new(self.position.x + pad.offset.x, self.position.y + pad.offset.y);
        unrotated.rotated_about(self.position, self.orientation)
    }
}

/// Copper layers a track can be placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layer {
    /// Front copper.
    #[default]
    #[serde(rename = "F.Cu")]
    FrontCopper,
    /// Back copper.
    #[serde(rename = "B.Cu")]
    BackCopper,
}

/// Identifier of an item added to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

/// A straight copper track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Board item id. Assigned by the board when the track is added.
    #[serde(default)]
    pub id: ItemId,

    /// Net code.
    pub net_code: u32,

    /// Start point.
    pub start: Point,

    /// End point.
    pub end: Point,

    /// Track width in board units.
    pub width: i64,

    /// Copper layer.
    #[serde(default)]
    pub layer: Layer,
}

impl Track {
    /// Creates a new track. The id is filled in by the board.
    #[must_use]
    pub const fn new(net_code: u32, start: Point, end: Point, width: i64, layer: Layer) -> Self {
        Self {
            id: ItemId(0),
            net_code,
            start,
            end,
            width,
            layer,
        }
    }
}

/// Via types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViaType {
    /// Through-hole via spanning all copper layers.
    #[default]
    Through,
    /// Blind or buried via.
    BlindBuried,
    /// Micro via.
    Micro,
}

/// A via.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Via {
    /// Board item id. Assigned by the board when the via is added.
    #[serde(default)]
    pub id: ItemId,

    /// Net code.
    pub net_code: u32,

    /// Via centre.
    pub position: Point,

    /// Copper diameter in board units.
    pub diameter: i64,

    /// Drill diameter in board units.
    pub drill: i64,

    /// Via type.
    #[serde(default)]
    pub via_type: ViaType,
}

impl Via {
    /// Creates a new through via. The id is filled in by the board.
    #[must_use]
    pub const fn through(net_code: u32, position: Point, diameter: i64, drill: i64) -> Self {
        Self {
            id: ItemId(0),
            net_code,
            position,
            diameter,
            drill,
            via_type: ViaType::Through,
        }
    }
}
