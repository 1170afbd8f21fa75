//! Per-pad endpoint rules.
//!
//! A [`Strategy`] is chosen once per fanout from the plan's alignment and the
//! footprint's [`RotationBucket`], then applied to every electrical pad:
//!
//! | alignment | axis-aligned | 45° | arbitrary |
//! |---|---|---|---|
//! | Quadrant | half pitch, away from centre | half diagonal, away from centre | [`ArbitrarySolver`] |
//! | Diagonal | half pitch, to one corner | half diagonal, to one corner | not implemented |
//! | X-pattern | half pitch, pinwheel | half diagonal, pinwheel | not implemented |
//!
//! "Half diagonal" is `hypot(pitch_x, pitch_y) / 2`: at 45° the grid
//! diagonals line up with the board axes, so the step is along X or Y only.

use crate::board::Point;
use crate::fanout::pitch::Pitch;
use crate::fanout::plan::{Alignment, Corner, FanoutPlan};
use crate::fanout::rotation::RotationBucket;
use crate::fanout::solver::ArbitrarySolver;

/// Footprint data shared by all pads of one fanout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintFrame {
    /// Footprint origin.
    pub origin: Point,
    /// Rotation in radians.
    pub radians: f64,
    /// Rotation plus 45° in radians, from pitch analysis.
    pub secondary_radians: f64,
    /// Measured pad pitch.
    pub pitch: Pitch,
}

/// Sector between the two 45° diagonals through the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wedge {
    Bottom,
    Right,
    Left,
    Top,
}

impl Wedge {
    /// Classifies a pad against the lines `y - y0 = ±(x - x0)`.
    const fn of(origin: Point, pad: Point) -> Self {
        let below_anti = pad.y > (origin.y + origin.x) - pad.x;
        let below_main = pad.y > (origin.y - origin.x) + pad.x;
        match (below_anti, below_main) {
            (true, true) => Self::Bottom,
            (true, false) => Self::Right,
            (false, true) => Self::Left,
            (false, false) => Self::Top,
        }
    }
}

/// Endpoint rule for one (alignment, rotation bucket) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Quadrant at 0/90/180/-90°.
    QuadrantAxisAligned,
    /// Quadrant at ±45/±135°.
    QuadrantDiagonal45,
    /// Quadrant at any other angle.
    QuadrantArbitrary(ArbitrarySolver),
    /// Diagonal at 0/90/180/-90°.
    DiagonalAxisAligned(Corner),
    /// Diagonal at ±45/±135°.
    DiagonalDiagonal45(Corner),
    /// X-pattern at 0/90/180/-90°.
    XPatternAxisAligned {
        /// Use the mirrored sweep.
        mirrored: bool,
    },
    /// X-pattern at ±45/±135°.
    XPatternDiagonal45 {
        /// Use the mirrored sweep.
        mirrored: bool,
    },
    /// Diagonal or X-pattern at an arbitrary angle. Produces no routing.
    NotImplemented,
}

/// Endpoint rule bound to a footprint frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strategy {
    rule: Rule,
    origin: Point,
    pitch: Pitch,
}

impl Strategy {
    /// Picks the rule for a plan and rotation bucket.
    #[must_use]
    pub fn select(plan: &FanoutPlan, bucket: RotationBucket, frame: &FootprintFrame) -> Self {
        let rule = match (plan.alignment, bucket) {
            (Alignment::Quadrant, RotationBucket::AxisAligned) => Rule::QuadrantAxisAligned,
            (Alignment::Quadrant, RotationBucket::Diagonal45) => Rule::QuadrantDiagonal45,
            (Alignment::Quadrant, RotationBucket::Arbitrary(band)) => {
                Rule::QuadrantArbitrary(ArbitrarySolver::new(
                    frame.origin,
                    frame.radians,
                    frame.secondary_radians,
                    band,
                    frame.pitch,
                ))
            }
            (Alignment::Diagonal, RotationBucket::AxisAligned) => {
                Rule::DiagonalAxisAligned(plan.corner())
            }
            (Alignment::Diagonal, RotationBucket::Diagonal45) => {
                Rule::DiagonalDiagonal45(plan.corner())
            }
            (Alignment::XPattern, RotationBucket::AxisAligned) => Rule::XPatternAxisAligned {
                mirrored: plan.mirrored_sweep(),
            },
            (Alignment::XPattern, RotationBucket::Diagonal45) => Rule::XPatternDiagonal45 {
                mirrored: plan.mirrored_sweep(),
            },
            (Alignment::Diagonal | Alignment::XPattern, RotationBucket::Arbitrary(_)) => {
                Rule::NotImplemented
            }
        };
        Self {
            rule,
            origin: frame.origin,
            pitch: frame.pitch,
        }
    }

    /// The selected rule.
    #[must_use]
    pub const fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Whether this strategy produces any routing.
    #[must_use]
    pub const fn is_implemented(&self) -> bool {
        !matches!(self.rule, Rule::NotImplemented)
    }

    /// Computes the fanout endpoint for a pad at `pad`.
    ///
    /// Returns `None` for [`Rule::NotImplemented`].
    #[must_use]
    pub fn endpoint(&self, pad: Point) -> Option<Point> {
        let hx = self.pitch.half_x();
        let hy = self.pitch.half_y();
        let d = self.pitch.half_diagonal();
        let o = self.origin;

        let (dx, dy) = match self.rule {
            Rule::QuadrantAxisAligned => {
                let dy = if pad.y > o.y { hy } else { -hy };
                let dx = if pad.x > o.x { hx } else { -hx };
                (dx, dy)
            }
            Rule::QuadrantDiagonal45 => match Wedge::of(o, pad) {
                Wedge::Bottom => (0.0, d),
                Wedge::Right => (d, 0.0),
                Wedge::Left => (-d, 0.0),
                Wedge::Top => (0.0, -d),
            },
            Rule::QuadrantArbitrary(solver) => return Some(solver.endpoint(pad)),
            Rule::DiagonalAxisAligned(corner) => match corner {
                Corner::TopLeft => (-hx, -hy),
                Corner::TopRight => (hx, -hy),
                Corner::BottomLeft => (-hx, hy),
                Corner::BottomRight => (hx, hy),
            },
            Rule::DiagonalDiagonal45(corner) => match corner {
                Corner::TopLeft => (-d, 0.0),
                Corner::TopRight => (d, 0.0),
                Corner::BottomLeft => (0.0, d),
                Corner::BottomRight => (0.0, -d),
            },
            Rule::XPatternAxisAligned { mirrored } => match (Wedge::of(o, pad), mirrored) {
                (Wedge::Bottom, true) => (-hx, hy),
                (Wedge::Bottom, false) => (hx, hy),
                (Wedge::Right, true) => (hx, hy),
                (Wedge::Right, false) => (hx, -hy),
                (Wedge::Left, true) => (-hx, -hy),
                (Wedge::Left, false) => (-hx, hy),
                (Wedge::Top, true) => (hx, -hy),
                (Wedge::Top, false) => (-hx, -hy),
            },
            Rule::XPatternDiagonal45 { mirrored } => {
                let bottom = pad.y > o.y;
                let right = pad.x > o.x;
                match (bottom, right, mirrored) {
                    (true, true, true) => (0.0, d),
                    (true, true, false) => (d, 0.0),
                    (true, false, true) => (-d, 0.0),
                    (true, false, false) => (0.0, d),
                    (false, true, true) => (d, 0.0),
                    (false, true, false) => (0.0, -d),
                    (false, false, true) => (0.0, -d),
                    (false, false, false) => (-d, 0.0),
                }
            }
            Rule::NotImplemented => return None,
        };

        Some(pad.offset(dx, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fanout::plan::Sweep;
    use crate::fanout::plan::Direction;

    fn frame(pitch: Pitch) -> FootprintFrame {
        FootprintFrame {
            origin: Point::new(0, 0),
            radians: 0.0,
            secondary_radians: 0.0,
            pitch,
        }
    }

    fn plan(alignment: Alignment, direction: Direction) -> FanoutPlan {
        FanoutPlan {
            alignment,
            direction,
            ..FanoutPlan::default()
        }
    }

    fn strategy(alignment: Alignment, direction: Direction, bucket: RotationBucket, pitch: Pitch) -> Strategy {
        Strategy::select(&plan(alignment, direction), bucket, &frame(pitch))
    }

    #[test]
    fn quadrant_axis_aligned_moves_away_from_centre() {
        let s = strategy(
            Alignment::Quadrant,
            Direction::Unset,
            RotationBucket::AxisAligned,
            Pitch::new(200_000, 200_000),
        );
        assert_eq!(s.endpoint(Point::new(100_000, 100_000)), Some(Point::new(200_000, 200_000)));
        assert_eq!(s.endpoint(Point::new(-100_000, -100_000)), Some(Point::new(-200_000, -200_000)));
        assert_eq!(s.endpoint(Point::new(100_000, -100_000)), Some(Point::new(200_000, -200_000)));
        assert_eq!(s.endpoint(Point::new(-100_000, 100_000)), Some(Point::new(-200_000, 200_000)));
    }

    #[test]
    fn quadrant_ties_fall_to_top_left() {
        let s = strategy(
            Alignment::Quadrant,
            Direction::Unset,
            RotationBucket::AxisAligned,
            Pitch::new(200_000, 200_000),
        );
        assert_eq!(s.endpoint(Point::new(0, 0)), Some(Point::new(-100_000, -100_000)));
    }

    #[test]
    fn quadrant_diagonal45_moves_along_one_axis() {
        let s = strategy(
            Alignment::Quadrant,
            Direction::Unset,
            RotationBucket::Diagonal45,
            Pitch::new(300_000, 400_000),
        );
        // half diagonal = 250_000
        assert_eq!(s.endpoint(Point::new(0, 1000)), Some(Point::new(0, 251_000)));
        assert_eq!(s.endpoint(Point::new(1000, 0)), Some(Point::new(251_000, 0)));
        assert_eq!(s.endpoint(Point::new(-1000, 0)), Some(Point::new(-251_000, 0)));
        assert_eq!(s.endpoint(Point::new(0, -1000)), Some(Point::new(0, -251_000)));
    }

    #[test]
    fn diagonal_axis_aligned_uses_one_corner_for_every_pad() {
        let s = strategy(
            Alignment::Diagonal,
            Direction::Corner(Corner::TopLeft),
            RotationBucket::AxisAligned,
            Pitch::new(200_000, 100_000),
        );
        for (x, y) in [(0, 0), (700_000, -300_000), (-1_000_000, 2_000_000)] {
            assert_eq!(
                s.endpoint(Point::new(x, y)),
                Some(Point::new(x - 100_000, y - 50_000))
            );
        }
    }

    #[test]
    fn diagonal_defaults_to_bottom_right() {
        let s = strategy(
            Alignment::Diagonal,
            Direction::Unset,
            RotationBucket::AxisAligned,
            Pitch::new(200_000, 100_000),
        );
        assert_eq!(s.endpoint(Point::new(0, 0)), Some(Point::new(100_000, 50_000)));
    }

    #[test]
    fn diagonal45_corners() {
        let pitch = Pitch::new(600_000, 800_000); // half diagonal 500_000
        let cases = [
            (Corner::TopLeft, Point::new(-500_000, 0)),
            (Corner::TopRight, Point::new(500_000, 0)),
            (Corner::BottomLeft, Point::new(0, 500_000)),
            (Corner::BottomRight, Point::new(0, -500_000)),
        ];
        for (corner, expected) in cases {
            let s = strategy(
                Alignment::Diagonal,
                Direction::Corner(corner),
                RotationBucket::Diagonal45,
                pitch,
            );
            assert_eq!(s.endpoint(Point::new(0, 0)), Some(expected), "{corner:?}");
        }
    }

    #[test]
    fn xpattern_axis_aligned_default_sweep() {
        let s = strategy(
            Alignment::XPattern,
            Direction::Sweep(Sweep::Clockwise),
            RotationBucket::AxisAligned,
            Pitch::new(200_000, 200_000),
        );
        let p = |x, y| s.endpoint(Point::new(x, y));
        assert_eq!(p(0, 1_000_000), Some(Point::new(100_000, 1_100_000))); // bottom
        assert_eq!(p(1_000_000, 0), Some(Point::new(1_100_000, -100_000))); // right
        assert_eq!(p(-1_000_000, 0), Some(Point::new(-1_100_000, 100_000))); // left
        assert_eq!(p(0, -1_000_000), Some(Point::new(-100_000, -1_100_000))); // top
    }

    #[test]
    fn xpattern_counterclockwise_matches_clockwise() {
        let pitch = Pitch::new(200_000, 200_000);
        let cw = strategy(
            Alignment::XPattern,
            Direction::Sweep(Sweep::Clockwise),
            RotationBucket::AxisAligned,
            pitch,
        );
        let ccw = strategy(
            Alignment::XPattern,
            Direction::Sweep(Sweep::Counterclockwise),
            RotationBucket::AxisAligned,
            pitch,
        );
        for (x, y) in [(0, 5), (5, 0), (-5, 0), (0, -5), (3, 7)] {
            assert_eq!(cw.endpoint(Point::new(x, y)), ccw.endpoint(Point::new(x, y)));
        }
    }

    #[test]
    fn xpattern_axis_aligned_mirrored_sweep() {
        let s = strategy(
            Alignment::XPattern,
            Direction::Sweep(Sweep::Counterclock),
            RotationBucket::AxisAligned,
            Pitch::new(200_000, 200_000),
        );
        let p = |x, y| s.endpoint(Point::new(x, y));
        assert_eq!(p(0, 1_000_000), Some(Point::new(-100_000, 1_100_000)));
        assert_eq!(p(1_000_000, 0), Some(Point::new(1_100_000, 100_000)));
        assert_eq!(p(-1_000_000, 0), Some(Point::new(-1_100_000, -100_000)));
        assert_eq!(p(0, -1_000_000), Some(Point::new(100_000, -1_100_000)));
    }

    #[test]
    fn xpattern_diagonal45_quadrants() {
        let pitch = Pitch::new(600_000, 800_000); // half diagonal 500_000
        let default = strategy(
            Alignment::XPattern,
            Direction::Unset,
            RotationBucket::Diagonal45,
            pitch,
        );
        let mirrored = strategy(
            Alignment::XPattern,
            Direction::Sweep(Sweep::Counterclock),
            RotationBucket::Diagonal45,
            pitch,
        );
        let cases = [
            // pad, default, mirrored
            ((10, 10), (500_010, 10), (10, 500_010)),
            ((-10, 10), (-10, 500_010), (-500_010, 10)),
            ((10, -10), (10, -500_010), (500_010, -10)),
            ((-10, -10), (-500_010, -10), (-10, -500_010)),
        ];
        for ((x, y), (dx, dy), (mx, my)) in cases {
            assert_eq!(default.endpoint(Point::new(x, y)), Some(Point::new(dx, dy)));
            assert_eq!(mirrored.endpoint(Point::new(x, y)), Some(Point::new(mx, my)));
        }
    }

    #[test]
    fn arbitrary_angle_stubs_produce_nothing() {
        let bucket = RotationBucket::classify(30.0);
        for alignment in [Alignment::Diagonal, Alignment::XPattern] {
            let s = strategy(alignment, Direction::Unset, bucket, Pitch::new(1000, 1000));
            assert_eq!(*s.rule(), Rule::NotImplemented);
            assert!(!s.is_implemented());
            assert_eq!(s.endpoint(Point::new(400, 400)), None);
        }
    }

    #[test]
    fn quadrant_arbitrary_uses_solver() {
        let f = FootprintFrame {
            origin: Point::new(0, 0),
            radians: 30.0_f64.to_radians(),
            secondary_radians: 75.0_f64.to_radians(),
            pitch: Pitch::new(1_000_000, 1_000_000),
        };
        let s = Strategy::select(
            &plan(Alignment::Quadrant, Direction::Unset),
            RotationBucket::classify(30.0),
            &f,
        );
        assert!(matches!(s.rule(), Rule::QuadrantArbitrary(_)));
        let pad = Point::new(500_000, 500_000).rotated_about(f.origin, 30.0);
        let end = s.endpoint(pad).unwrap();
        let expected = Point::new(1_000_000, 1_000_000).rotated_about(f.origin, 30.0);
        assert!((end.x - expected.x).abs() <= 2 && (end.y - expected.y).abs() <= 2);
    }
}
