//! Host board model.
//!
//! The fanout engine never talks to a concrete PCB editor. It reaches the
//! board through two traits:
//!
//! - [`FootprintModel`]: a placed footprint with stateful orientation
//! - [`BoardModel`]: footprint lookup plus add/remove of tracks and vias
//!
//! [`Board`] is an in-memory implementation backed by a JSON file, used by
//! the command-line tool and the tests.
//!
//! # File Structure
//!
//! ```text
//! {
//!   "footprints": [ { "reference": "U1", "position": {..}, "orientation": 0.0, "pads": [..] } ],
//!   "tracks":     [ { "id": 1, "net_code": 3, "start": {..}, "end": {..}, "width": 200000, "layer": "F.Cu" } ],
//!   "vias":       [ { "id": 2, "net_code": 3, "position": {..}, "diameter": 450000, "drill": 200000 } ]
//! }
//! ```

pub mod error;
pub mod primitives;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::{BoardError, BoardResult};
pub use primitives::{Footprint, FootprintPad, ItemId, Layer, Pad, Point, Track, Via, ViaType};

/// Board internal units per millimetre.
pub const IU_PER_MM: i64 = 1_000_000;

/// Converts millimetres to board units, rounding to the nearest unit.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn mm_to_iu(mm: f64) -> i64 {
    (mm * IU_PER_MM as f64).round() as i64
}

/// Converts board units to millimetres, rounded to 4 decimal places.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn iu_to_mm(iu: i64) -> f64 {
    (iu as f64 / IU_PER_MM as f64 * 10_000.0).round() / 10_000.0
}

/// A footprint as exposed by the host.
pub trait FootprintModel {
    /// Reference designator.
    fn reference(&self) -> &str;

    /// Footprint origin.
    fn position(&self) -> Point;

    /// Orientation in degrees.
    fn orientation_degrees(&self) -> f64;

    /// Orientation in radians.
    fn orientation_radians(&self) -> f64 {
        self.orientation_degrees().to_radians()
    }

    /// Sets the orientation. Pad positions follow.
    fn set_orientation_degrees(&mut self, degrees: f64);

    /// Snapshot of all pads at the current orientation, in definition order.
    fn pads(&self) -> Vec<Pad>;
}

/// A board as exposed by the host.
pub trait BoardModel {
    /// Footprint type stored on the board.
    type Footprint: FootprintModel;

    /// Looks up a footprint by reference designator.
    fn footprint_mut(&mut self, reference: &str) -> Option<&mut Self::Footprint>;

    /// Adds a track and returns its id.
    fn add_track(&mut self, track: Track) -> ItemId;

    /// Adds a via and returns its id.
    fn add_via(&mut self, via: Via) -> ItemId;

    /// Removes an item. Returns `false` if no item has that id.
    fn remove(&mut self, id: ItemId) -> bool;

    /// Notifies the host that the board view should be redrawn.
    fn refresh(&mut self) {}
}

impl FootprintModel for Footprint {
    fn reference(&self) -> &str {
        &self.reference
    }

    fn position(&self) -> Point {
        self.position
    }

    fn orientation_degrees(&self) -> f64 {
        self.orientation
    }

    fn set_orientation_degrees(&mut self, degrees: f64) {
        self.orientation = degrees;
    }

    fn pads(&self) -> Vec<Pad> {
        self.pads
            .iter()
            .map(|pad| Pad::new(pad.name.clone(), pad.net_code, self.pad_position(pad)))
            .collect()
    }
}

/// An in-memory board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Placed footprints.
    #[serde(default)]
    pub footprints: Vec<Footprint>,

    /// Tracks on the board.
    #[serde(default)]
    pub tracks: Vec<Track>,

    /// Vias on the board.
    #[serde(default)]
    pub vias: Vec<Via>,

    /// Number of view refreshes requested since load.
    #[serde(skip)]
    refreshes: u64,

    /// Next item id to hand out.
    #[serde(skip)]
    next_id: u64,
}

impl Board {
    /// Creates a new empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a footprint to the board.
    pub fn add_footprint(&mut self, footprint: Footprint) {
        self.footprints.push(footprint);
    }

    /// Looks up a footprint by reference designator.
    #[must_use]
    pub fn footprint(&self, reference: &str) -> Option<&Footprint> {
        self.footprints.iter().find(|fp| fp.reference == reference)
    }

    /// Number of view refreshes requested since the board was created or loaded.
    #[must_use]
    pub const fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    /// Parses a board from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let mut board: Self = serde_json::from_str(json)
            .map_err(|e| BoardError::parse(format!("line {}, column {}", e.line(), e.column()), e))?;
        board.next_id = board
            .tracks
            .iter()
            .map(|t| t.id.0)
            .chain(board.vias.iter().map(|v| v.id.0))
            .max()
            .unwrap_or(0);
        Ok(board)
    }

    /// Serialises the board to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> BoardResult<String> {
        serde_json::to_string_pretty(self).map_err(|source| BoardError::Serialize { source })
    }

    /// Reads a board from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid board.
    pub fn read(path: impl AsRef<Path>) -> BoardResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| BoardError::file_read(path, e))?;
        let board = Self::from_json(&contents)?;

        tracing::info!(
            path = %path.display(),
            footprints = board.footprints.len(),
            tracks = board.tracks.len(),
            vias = board.vias.len(),
            "Read board"
        );

        Ok(board)
    }

    /// Writes the board to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, path: impl AsRef<Path>) -> BoardResult<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| BoardError::file_write(path, e))?;

        tracing::info!(
            path = %path.display(),
            tracks = self.tracks.len(),
            vias = self.vias.len(),
            "Wrote board"
        );

        Ok(())
    }

    fn allocate_id(&mut self) -> ItemId {
        self.next_id += 1;
        ItemId(self.next_id)
    }
}

impl BoardModel for Board {
    type Footprint = Footprint;

    fn footprint_mut(&mut self, reference: &str) -> Option<&mut Footprint> {
        self.footprints.iter_mut().find(|fp| fp.reference == reference)
    }

    fn add_track(&mut self, mut track: Track) -> ItemId {
        let id = self.allocate_id();
        track.id = id;
        self.tracks.push(track);
        id
    }

    fn add_via(&mut self, mut via: Via) -> ItemId {
        let id = self.allocate_id();
        via.id = id;
        self.vias.push(via);
        id
    }

    fn remove(&mut self, id: ItemId) -> bool {
        if let Some(index) = self.tracks.iter().position(|t| t.id == id) {
            self.tracks.remove(index);
            return true;
        }
        if let Some(index) = self.vias.iter().position(|v| v.id == id) {
            self.vias.remove(index);
            return true;
        }
        false
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}
