//! Quadrant fanout for footprints at an arbitrary angle.
//!
//! The footprint's own axes are two perpendicular lines through its origin,
//! with slopes `-tan θ` and `1 / tan θ` (board Y points down). They split the
//! board into four sectors.
//!
//! Each pad gets two more lines through its centre, rotated a further 45°:
//! slopes `-tan φ` and `1 / tan φ` with `φ = θ + 45°`. Intersecting each line
//! with a circle of radius `hypot(pitch_x, pitch_y) / 2` around the pad gives
//! up to four candidate endpoints:
//!
//! ```text
//! X1, X2   roots on the -tan φ line   (X1 = larger x)
//! X3, X4   roots on the 1/tan φ line  (X3 = larger x)
//! ```
//!
//! [`ROOT_TABLE`] picks the candidate pointing away from the footprint centre
//! for each (sector, angle band). Which root that is flips as θ sweeps
//! through multiples of 45°.

use crate::board::Point;
use crate::fanout::pitch::Pitch;
use crate::fanout::rotation::AngleBand;

/// One of the four candidate intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    /// Larger root on the `-tan φ` line.
    X1,
    /// Smaller root on the `-tan φ` line.
    X2,
    /// Larger root on the `1 / tan φ` line.
    X3,
    /// Smaller root on the `1 / tan φ` line.
    X4,
}

/// Pad position relative to the footprint's rotated axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    /// Below the `-tan θ` axis, below the `1 / tan θ` axis.
    BottomLeft,
    /// Below the `-tan θ` axis, on or above the `1 / tan θ` axis.
    BottomRight,
    /// On or above the `-tan θ` axis, below the `1 / tan θ` axis.
    TopLeft,
    /// On or above both axes.
    TopRight,
}

impl Sector {
    /// Row of this sector in [`ROOT_TABLE`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Root selection, indexed `[sector][band]`.
pub const ROOT_TABLE: [[Root; 4]; 4] = {
    use Root::{X1, X2, X3, X4};
    [
        // 0-45   45-90  90-135 135-180
        [X2, X1, X4, X3], // bottom-left
        [X3, X3, X2, X2], // bottom-right
        [X4, X4, X1, X1], // top-left
        [X1, X2, X3, X4], // top-right
    ]
};

/// Looks up the root for a sector and angle band.
#[must_use]
pub const fn select_root(sector: Sector, band: AngleBand) -> Root {
    ROOT_TABLE[sector.index()][band.index()]
}

/// A line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Line {
    slope: f64,
    intercept: f64,
}

impl Line {
    fn through(x: f64, y: f64, slope: f64) -> Self {
        Self {
            slope,
            intercept: slope.mul_add(-x, y),
        }
    }

    fn at(self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }

    /// Intersects the line with a circle around `(cx, cy)`.
    ///
    /// Returns `(larger, smaller)` x roots. Without two real roots both fall
    /// back to `cx`, i.e. the circle centre.
    fn circle_roots(self, cx: f64, cy: f64, radius: f64) -> (f64, f64) {
        let m = self.slope;
        let b = self.intercept;
        let a = m.mul_add(m, 1.0);
        let bq = 2.0 * m * b - 2.0 * cx - 2.0 * m * cy;
        let c = cx * cx + b * b + cy * cy - 2.0 * b * cy - radius * radius;
        let delta = bq * bq - 4.0 * a * c;
        if delta > 0.0 {
            let sqrt = delta.sqrt();
            ((-bq + sqrt) / (2.0 * a), (-bq - sqrt) / (2.0 * a))
        } else {
            (cx, cx)
        }
    }
}

/// The four candidate endpoints for one pad, indexed by [`Root`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidates([(f64, f64); 4]);

impl Candidates {
    /// Returns the candidate for `root`.
    #[must_use]
    pub const fn get(&self, root: Root) -> (f64, f64) {
        self.0[root as usize]
    }
}

/// Arbitrary-angle quadrant solver for one footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbitrarySolver {
    axis_x: Line,
    axis_y: Line,
    pad_slope_x: f64,
    pad_slope_y: f64,
    radius: f64,
    band: AngleBand,
}

impl ArbitrarySolver {
    /// Creates a solver.
    ///
    /// `radians` is the footprint rotation, `secondary_radians` the rotation
    /// plus 45° recorded during pitch analysis, and `band` the 45° band
    /// containing the rotation. Callers guarantee the rotation is not a
    /// multiple of 45°.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(
        origin: Point,
        radians: f64,
        secondary_radians: f64,
        band: AngleBand,
        pitch: Pitch,
    ) -> Self {
        let (x0, y0) = (origin.x as f64, origin.y as f64);
        Self {
            axis_x: Line::through(x0, y0, -radians.tan()),
            axis_y: Line::through(x0, y0, 1.0 / radians.tan()),
            pad_slope_x: -secondary_radians.tan(),
            pad_slope_y: 1.0 / secondary_radians.tan(),
            radius: pitch.half_diagonal(),
            band,
        }
    }

    /// Sector of a pad relative to the footprint axes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sector(&self, pad: Point) -> Sector {
        let (x, y) = (pad.x as f64, pad.y as f64);
        let bottom = y > self.axis_x.at(x);
        let left = y > self.axis_y.at(x);
        match (bottom, left) {
            (true, true) => Sector::BottomLeft,
            (true, false) => Sector::BottomRight,
            (false, true) => Sector::TopLeft,
            (false, false) => Sector::TopRight,
        }
    }

    /// All four candidate endpoints for a pad.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn candidates(&self, pad: Point) -> Candidates {
        let (x, y) = (pad.x as f64, pad.y as f64);
        let line_x = Line::through(x, y, self.pad_slope_x);
        let line_y = Line::through(x, y, self.pad_slope_y);
        let (x1, x2) = line_x.circle_roots(x, y, self.radius);
        let (x3, x4) = line_y.circle_roots(x, y, self.radius);
        Candidates([
            (x1, line_x.at(x1)),
            (x2, line_x.at(x2)),
            (x3, line_y.at(x3)),
            (x4, line_y.at(x4)),
        ])
    }

    /// Fanout endpoint for a pad.
    #[must_use]
    pub fn endpoint(&self, pad: Point) -> Point {
        let root = select_root(self.sector(pad), self.band);
        let (x, y) = self.candidates(pad).get(root);
        Point::from_f64(x, y)
    }
}
