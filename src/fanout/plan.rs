//! Fanout plan: alignment style, direction, track and via geometry.

use std::fmt;

use crate::board::mm_to_iu;
use crate::fanout::error::{FanoutError, FanoutResult};

/// Fanout geometry family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Each pad escapes away from the footprint centre, by quadrant.
    #[default]
    Quadrant,
    /// Every pad escapes towards the same configured corner.
    Diagonal,
    /// Pads escape along a pinwheel pattern around the centre.
    XPattern,
}

impl Alignment {
    /// Parses an alignment name.
    ///
    /// Accepts: "Quadrant", "Diagonal", "X-pattern" (case-insensitive, the
    /// hyphen in "X-pattern" is optional).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quadrant" => Some(Self::Quadrant),
            "diagonal" => Some(Self::Diagonal),
            "x-pattern" | "xpattern" => Some(Self::XPattern),
            _ => None,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quadrant => write!(f, "Quadrant"),
            Self::Diagonal => write!(f, "Diagonal"),
            Self::XPattern => write!(f, "X-pattern"),
        }
    }
}

/// Target corner for the Diagonal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    /// Up and to the left.
    TopLeft,
    /// Up and to the right.
    TopRight,
    /// Down and to the left.
    BottomLeft,
    /// Down and to the right. Used when no corner is configured.
    #[default]
    BottomRight,
}

impl Corner {
    /// Parses a corner name (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "topleft" => Some(Self::TopLeft),
            "topright" => Some(Self::TopRight),
            "bottomleft" => Some(Self::BottomLeft),
            "bottomright" => Some(Self::BottomRight),
            _ => None,
        }
    }
}

/// Rotation sense for the X-pattern alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sweep {
    /// Clockwise.
    #[default]
    Clockwise,
    /// Counter-clockwise. Currently routes exactly like [`Sweep::Clockwise`].
    Counterclockwise,
    /// Legacy `Counterclock` token. The only value that selects the
    /// mirrored sweep.
    Counterclock,
}

impl Sweep {
    /// Parses a sweep name (case-insensitive, whole-word).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clockwise" => Some(Self::Clockwise),
            "counterclockwise" => Some(Self::Counterclockwise),
            "counterclock" => Some(Self::Counterclock),
            _ => None,
        }
    }
}

/// Configured direction. Which variants are meaningful depends on the
/// alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// No direction (Quadrant, or an unrecognised token).
    #[default]
    Unset,
    /// Corner for the Diagonal alignment.
    Corner(Corner),
    /// Sweep for the X-pattern alignment.
    Sweep(Sweep),
}

impl Direction {
    /// Parses a direction token for the given alignment.
    ///
    /// Returns `None` if the token does not belong to the alignment.
    #[must_use]
    pub fn parse(alignment: Alignment, token: &str) -> Option<Self> {
        match alignment {
            Alignment::Quadrant => None,
            Alignment::Diagonal => Corner::from_str_loose(token).map(Self::Corner),
            Alignment::XPattern => Sweep::from_str_loose(token).map(Self::Sweep),
        }
    }
}

/// Via geometry in board units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViaSpec {
    /// Copper diameter.
    pub diameter: i64,
    /// Drill diameter.
    pub drill: i64,
}

impl ViaSpec {
    /// Creates a via spec from millimetre values.
    #[must_use]
    pub fn from_mm(diameter: f64, drill: f64) -> Self {
        Self {
            diameter: mm_to_iu(diameter),
            drill: mm_to_iu(drill),
        }
    }
}

impl Default for ViaSpec {
    fn default() -> Self {
        Self::from_mm(0.45, 0.2)
    }
}

/// Everything a fanout run needs besides the footprint itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanoutPlan {
    /// Geometry family.
    pub alignment: Alignment,
    /// Direction for Diagonal / X-pattern.
    pub direction: Direction,
    /// Track width in board units.
    pub track_width: i64,
    /// Via geometry.
    pub via: ViaSpec,
}

impl Default for FanoutPlan {
    fn default() -> Self {
        Self {
            alignment: Alignment::default(),
            direction: Direction::default(),
            track_width: mm_to_iu(0.2),
            via: ViaSpec::default(),
        }
    }
}

impl FanoutPlan {
    /// Creates a plan with no direction.
    #[must_use]
    pub const fn new(alignment: Alignment, track_width: i64, via: ViaSpec) -> Self {
        Self {
            alignment,
            direction: Direction::Unset,
            track_width,
            via,
        }
    }

    /// Applies a direction token.
    ///
    /// Tokens that do not belong to the plan's alignment are ignored, as is
    /// any token for Quadrant.
    #[must_use]
    pub fn with_direction(mut self, token: &str) -> Self {
        match Direction::parse(self.alignment, token) {
            Some(direction) => self.direction = direction,
            None => tracing::warn!(
                alignment = %self.alignment,
                direction = token,
                "Direction does not apply to this alignment, ignoring"
            ),
        }
        self
    }

    /// Corner for the Diagonal alignment; bottom-right when unset.
    #[must_use]
    pub const fn corner(&self) -> Corner {
        match self.direction {
            Direction::Corner(corner) => corner,
            _ => Corner::BottomRight,
        }
    }

    /// Whether the X-pattern uses the mirrored sweep.
    #[must_use]
    pub const fn mirrored_sweep(&self) -> bool {
        matches!(self.direction, Direction::Sweep(Sweep::Counterclock))
    }

    /// Checks track and via geometry.
    ///
    /// # Errors
    ///
    /// Returns [`FanoutError::InvalidPlan`] for non-positive lengths or a
    /// drill that is not smaller than the via diameter.
    pub fn validate(&self) -> FanoutResult<()> {
        if self.track_width <= 0 {
            return Err(FanoutError::invalid_plan(format!(
                "track width must be positive, got {}",
                self.track_width
            )));
        }
        if self.via.diameter <= 0 || self.via.drill <= 0 {
            return Err(FanoutError::invalid_plan(format!(
                "via diameter and drill must be positive, got {} / {}",
                self.via.diameter, self.via.drill
            )));
        }
        if self.via.drill >= self.via.diameter {
            return Err(FanoutError::invalid_plan(format!(
                "via drill {} must be smaller than diameter {}",
                self.via.drill, self.via.diameter
            )));
        }
        Ok(())
    }
}
