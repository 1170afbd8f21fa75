//! Rotation buckets.
//!
//! Footprint rotation selects one of three geometry families. Exact
//! comparisons are intentional: a footprint at 45.0001° is "arbitrary".

/// Normalises an angle in degrees into `(-180, 180]`.
///
/// Angles already in range are returned unchanged, bit for bit.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees % 360.0;
    if d <= -180.0 {
        d + 360.0
    } else if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Open 45° interval containing an arbitrary rotation.
///
/// Each band covers its named interval and the interval 180° below it,
/// since the fanout geometry is symmetric under a half turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleBand {
    /// (0°, 45°) and (-180°, -135°).
    Deg0To45,
    /// (45°, 90°) and (-135°, -90°).
    Deg45To90,
    /// (90°, 135°) and (-90°, -45°).
    Deg90To135,
    /// (135°, 180°) and (-45°, 0°).
    Deg135To180,
}

impl AngleBand {
    /// All bands in increasing angle order.
    pub const ALL: [Self; 4] = [
        Self::Deg0To45,
        Self::Deg45To90,
        Self::Deg90To135,
        Self::Deg135To180,
    ];

    /// Column of this band in the root selection table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the band for a normalised angle, or `None` on a multiple of 45°.
    #[must_use]
    pub fn of(degrees: f64) -> Option<Self> {
        let d = if degrees < 0.0 { degrees + 180.0 } else { degrees };
        if d > 0.0 && d < 45.0 {
            Some(Self::Deg0To45)
        } else if d > 45.0 && d < 90.0 {
            Some(Self::Deg45To90)
        } else if d > 90.0 && d < 135.0 {
            Some(Self::Deg90To135)
        } else if d > 135.0 && d < 180.0 {
            Some(Self::Deg135To180)
        } else {
            None
        }
    }
}

/// Footprint rotation classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationBucket {
    /// 0°, 90°, 180° or -90°.
    AxisAligned,
    /// 45°, 135°, -45° or -135°.
    Diagonal45,
    /// Anything else.
    Arbitrary(AngleBand),
}

impl RotationBucket {
    /// Classifies a rotation in degrees.
    #[must_use]
    pub fn classify(degrees: f64) -> Self {
        let d = normalize_degrees(degrees);
        if [0.0, 90.0, 180.0, -90.0].contains(&d) {
            Self::AxisAligned
        } else if [45.0, 135.0, -45.0, -135.0].contains(&d) {
            Self::Diagonal45
        } else {
            // Every non-multiple of 45° lands in exactly one band.
            AngleBand::of(d).map_or(Self::AxisAligned, Self::Arbitrary)
        }
    }

    /// Returns `true` for 0°, 90°, 180° and -90°.
    #[must_use]
    pub const fn is_axis_aligned(self) -> bool {
        matches!(self, Self::AxisAligned)
    }
}
