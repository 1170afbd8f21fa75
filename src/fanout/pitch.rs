//! Pad grid pitch measurement.
//!
//! The pitch is inferred from pad coordinates alone. Pads are grouped into
//! rows (identical Y) and columns (identical X); the pitch along each axis
//! is the smallest positive gap between neighbours in any row or column.
//!
//! Footprints at an arbitrary angle have no axis-aligned rows, so they are
//! measured at 0° and put back afterwards. The angle `rotation + 45°` is
//! recorded on the way; the arbitrary-angle solver builds its per-pad lines
//! from it.

use std::fmt;

use thiserror::Error;

use crate::board::{iu_to_mm, FootprintModel, Pad, Point};
use crate::fanout::rotation::RotationBucket;

/// Pad grid pitch in board units. Both components are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    /// Spacing along X.
    pub x: i64,
    /// Spacing along Y.
    pub y: i64,
}

impl Pitch {
    /// Creates a new pitch.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Half the X pitch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn half_x(self) -> f64 {
        self.x as f64 / 2.0
    }

    /// Half the Y pitch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn half_y(self) -> f64 {
        self.y as f64 / 2.0
    }

    /// Half the cell diagonal, `hypot(x, y) / 2`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn half_diagonal(self) -> f64 {
        (self.x as f64).hypot(self.y as f64) / 2.0
    }

    /// Pitch in millimetres, rounded to 4 decimals.
    #[must_use]
    pub fn to_mm(self) -> (f64, f64) {
        (iu_to_mm(self.x), iu_to_mm(self.y))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.to_mm();
        write!(f, "{x} mm x {y} mm")
    }
}

/// Why no pitch could be measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PitchFailure {
    /// Fewer than two electrical pads.
    #[error("only {count} electrical pad(s), need at least 2")]
    InsufficientPads {
        /// Number of electrical pads found.
        count: usize,
    },

    /// The first row holds a single pad.
    #[error("first pad row has fewer than 2 pads")]
    DegenerateRow,

    /// The first column holds a single pad.
    #[error("first pad column has fewer than 2 pads")]
    DegenerateColumn,
}

/// Outcome of a pitch analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchAnalysis {
    /// Measured pitch, or the reason there is none.
    pub result: Result<Pitch, PitchFailure>,

    /// `rotation + 45°` in radians as reported by the footprint. Zero for
    /// axis-aligned footprints and when analysis stopped early.
    pub secondary_radians: f64,
}

impl PitchAnalysis {
    /// The measured pitch, if any.
    #[must_use]
    pub fn pitch(&self) -> Option<Pitch> {
        self.result.ok()
    }
}

/// Restores a footprint's orientation when dropped.
struct OrientationGuard<'a, F: FootprintModel> {
    footprint: &'a mut F,
    original: f64,
}

impl<'a, F: FootprintModel> OrientationGuard<'a, F> {
    fn new(footprint: &'a mut F) -> Self {
        let original = footprint.orientation_degrees();
        Self {
            footprint,
            original,
        }
    }
}

impl<F: FootprintModel> Drop for OrientationGuard<'_, F> {
    fn drop(&mut self) {
        self.footprint.set_orientation_degrees(self.original);
    }
}

/// Measures the pad pitch of a footprint.
///
/// The footprint's orientation may change during the call but is always
/// restored to its exact original value before returning.
pub fn analyze<F: FootprintModel>(footprint: &mut F) -> PitchAnalysis {
    let degrees = footprint.orientation_degrees();
    let count = footprint.pads().iter().filter(|p| p.is_electrical()).count();
    if count < 2 {
        let failure = PitchFailure::InsufficientPads { count };
        tracing::info!(reference = footprint.reference(), reason = %failure, "Skipping pitch calculation");
        return PitchAnalysis {
            result: Err(failure),
            secondary_radians: 0.0,
        };
    }

    let mut secondary_radians = 0.0;
    let positions = {
        let mut guard = OrientationGuard::new(footprint);
        if !RotationBucket::classify(degrees).is_axis_aligned() {
            guard.footprint.set_orientation_degrees(degrees + 45.0);
            secondary_radians = guard.footprint.orientation_radians();
            guard.footprint.set_orientation_degrees(0.0);
        }
        guard
            .footprint
            .pads()
            .into_iter()
            .filter(Pad::is_electrical)
            .map(|pad| pad.position)
            .collect::<Vec<_>>()
    };

    let result = measure(&positions);
    match result {
        Ok(pitch) => {
            let (x_mm, y_mm) = pitch.to_mm();
            tracing::info!(
                reference = footprint.reference(),
                pitch_x = pitch.x,
                pitch_y = pitch.y,
                "pitch x: {x_mm} mm, pitch y: {y_mm} mm"
            );
        }
        Err(failure) => {
            tracing::info!(reference = footprint.reference(), reason = %failure, "Skipping pitch calculation");
        }
    }

    PitchAnalysis {
        result,
        secondary_radians,
    }
}

/// Measures the pitch of a set of pad positions.
///
/// Order of `positions` matters only in deciding which row and column are
/// "first": those containing `positions[0]`.
///
/// # Errors
///
/// Returns a [`PitchFailure`] when fewer than two positions are given or the
/// first row or column has a single member.
pub fn measure(positions: &[Point]) -> Result<Pitch, PitchFailure> {
    if positions.len() < 2 {
        return Err(PitchFailure::InsufficientPads {
            count: positions.len(),
        });
    }

    let mut rows = group_by(positions, |p| p.y);
    let mut columns = group_by(positions, |p| p.x);
    for row in &mut rows {
        row.sort_by_key(|p| p.x);
    }
    for column in &mut columns {
        column.sort_by_key(|p| p.y);
    }

    if rows[0].len() < 2 {
        return Err(PitchFailure::DegenerateRow);
    }
    if columns[0].len() < 2 {
        return Err(PitchFailure::DegenerateColumn);
    }

    Ok(Pitch::new(
        smallest_gap(&rows, |p| p.x),
        smallest_gap(&columns, |p| p.y),
    ))
}

/// Groups positions sharing `key`, in first-seen order, without duplicates.
fn group_by(positions: &[Point], key: impl Fn(&Point) -> i64) -> Vec<Vec<Point>> {
    let mut groups: Vec<Vec<Point>> = Vec::new();
    for &pos in positions {
        match groups.iter_mut().find(|group| key(&group[0]) == key(&pos)) {
            Some(group) => {
                if !group.contains(&pos) {
                    group.push(pos);
                }
            }
            None => groups.push(vec![pos]),
        }
    }
    groups
}

/// Smallest positive neighbour gap, seeded from the first group's first gap.
fn smallest_gap(groups: &[Vec<Point>], coord: impl Fn(&Point) -> i64) -> i64 {
    let mut pitch = coord(&groups[0][1]) - coord(&groups[0][0]);
    for group in groups {
        for pair in group.windows(2) {
            let gap = coord(&pair[1]) - coord(&pair[0]);
            if gap > 0 && gap < pitch {
                pitch = gap;
            }
        }
    }
    pitch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Footprint;

    fn grid(cols: i64, rows: i64, px: i64, py: i64) -> Vec<Point> {
        let mut out = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                out.push(Point::new(c * px, r * py));
            }
        }
        out
    }

    fn grid_footprint(orientation: f64) -> Footprint {
        let mut fp = Footprint::new("U1", Point::new(50_000_000, 40_000_000), orientation);
        let mut net = 1;
        for r in -2..=2_i64 {
            for c in -2..=2_i64 {
                fp.add_pad(format!("{r}{c}"), net, Point::new(c * 800_000, r * 650_000));
                net += 1;
            }
        }
        fp.add_pad("MH1", 0, Point::new(123_456, 0));
        fp
    }

    #[test]
    fn rectilinear_grid() {
        assert_eq!(measure(&grid(4, 3, 1_000_000, 800_000)), Ok(Pitch::new(1_000_000, 800_000)));
    }

    #[test]
    fn independent_of_enumeration_order() {
        let mut points = grid(5, 5, 500_000, 500_000);
        points.reverse();
        points.swap(3, 17);
        assert_eq!(measure(&points), Ok(Pitch::new(500_000, 500_000)));
    }

    #[test]
    fn smallest_gap_across_all_rows() {
        // First row uses 2 mm spacing, a later row has a 1 mm gap
        let points = vec![
            Point::new(0, 0),
            Point::new(2_000_000, 0),
            Point::new(0, 1_000_000),
            Point::new(1_000_000, 1_000_000),
            Point::new(2_000_000, 1_000_000),
        ];
        assert_eq!(measure(&points), Ok(Pitch::new(1_000_000, 1_000_000)));
    }

    #[test]
    fn duplicate_positions_ignored() {
        let points = vec![
            Point::new(0, 0),
            Point::new(0, 0),
            Point::new(300, 0),
            Point::new(0, 300),
            Point::new(300, 300),
        ];
        assert_eq!(measure(&points), Ok(Pitch::new(300, 300)));
    }

    #[test]
    fn single_row_is_degenerate() {
        let points = grid(4, 1, 1000, 1000);
        assert_eq!(measure(&points), Err(PitchFailure::DegenerateColumn));
    }

    #[test]
    fn single_column_is_degenerate() {
        let points = grid(1, 4, 1000, 1000);
        assert_eq!(measure(&points), Err(PitchFailure::DegenerateRow));
    }

    #[test]
    fn too_few_positions() {
        assert_eq!(
            measure(&[Point::new(0, 0)]),
            Err(PitchFailure::InsufficientPads { count: 1 })
        );
    }

    #[test]
    fn analyze_axis_aligned_footprint() {
        let mut fp = grid_footprint(0.0);
        let analysis = analyze(&mut fp);
        assert_eq!(analysis.pitch(), Some(Pitch::new(800_000, 650_000)));
        assert!(analysis.secondary_radians.abs() < f64::EPSILON);
    }

    #[test]
    fn analyze_quarter_turn_swaps_axes() {
        let mut fp = grid_footprint(90.0);
        let analysis = analyze(&mut fp);
        assert_eq!(analysis.pitch(), Some(Pitch::new(650_000, 800_000)));
    }

    #[test]
    fn analyze_arbitrary_angle_measures_unrotated_grid() {
        let mut fp = grid_footprint(30.0);
        let analysis = analyze(&mut fp);
        assert_eq!(analysis.pitch(), Some(Pitch::new(800_000, 650_000)));
        assert!((analysis.secondary_radians - 75.0_f64.to_radians()).abs() < 1e-12);
        assert_eq!(fp.orientation.to_bits(), 30.0_f64.to_bits());
    }

    #[test]
    fn orientation_restored_on_failure() {
        let mut fp = Footprint::new("U2", Point::new(0, 0), 17.3);
        fp.add_pad("1", 1, Point::new(0, 0));
        fp.add_pad("2", 2, Point::new(1000, 0));
        let analysis = analyze(&mut fp);
        assert_eq!(analysis.result, Err(PitchFailure::DegenerateColumn));
        assert_eq!(fp.orientation.to_bits(), 17.3_f64.to_bits());
    }

    #[test]
    fn mechanical_pads_do_not_count() {
        let mut fp = Footprint::new("U3", Point::new(0, 0), 0.0);
        fp.add_pad("1", 5, Point::new(0, 0));
        fp.add_pad("MH1", 0, Point::new(1000, 0));
        fp.add_pad("MH2", 0, Point::new(0, 1000));
        let analysis = analyze(&mut fp);
        assert_eq!(
            analysis.result,
            Err(PitchFailure::InsufficientPads { count: 1 })
        );
    }

    #[test]
    fn pitch_display_in_mm() {
        assert_eq!(Pitch::new(800_000, 1_270_000).to_string(), "0.8 mm x 1.27 mm");
    }
}
