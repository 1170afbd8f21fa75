//! BGA fanout engine.
//!
//! Generates a short escape track plus a via for every electrical pad of a
//! grid-array footprint.
//!
//! # Pipeline
//!
//! 1. [`classify`]: drop mechanical pads (net code 0)
//! 2. [`pitch`]: infer the grid pitch from pad coordinates
//! 3. [`strategy`]: pick an endpoint rule from the alignment and rotation
//!    bucket, using [`solver`] for arbitrary angles
//! 4. [`emitter`]: add tracks and vias to the board, with bulk undo
//!
//! Steps 1 and 2 run once in [`BgaFanout::new`]; steps 3 and 4 on every
//! [`BgaFanout::fanout`] call.
//!
//! # Example
//!
//! ```
//! use bga_fanout::board::{Board, Footprint, Point};
//! use bga_fanout::fanout::{BgaFanout, FanoutPlan};
//!
//! let mut fp = Footprint::new("U1", Point::new(0, 0), 0.0);
//! let mut net = 1;
//! for row in [-1, 1] {
//!     for col in [-1, 1] {
//!         fp.add_pad(format!("{row}{col}"), net, Point::new(col * 400_000, row * 400_000));
//!         net += 1;
//!     }
//! }
//! let mut board = Board::new();
//! board.add_footprint(fp);
//!
//! let mut fanout = BgaFanout::new(&mut board, "U1", FanoutPlan::default()).unwrap();
//! let report = fanout.fanout(&mut board).unwrap();
//! assert_eq!(report.tracks, 4);
//! assert_eq!(board.vias.len(), 4);
//!
//! fanout.remove_track_via(&mut board);
//! assert!(board.tracks.is_empty());
//! ```

pub mod classify;
pub mod emitter;
pub mod error;
pub mod pitch;
pub mod plan;
pub mod rotation;
pub mod solver;
pub mod strategy;

pub use emitter::{RoutingEmitter, RoutingSet};
pub use error::{FanoutError, FanoutResult};
pub use pitch::{Pitch, PitchAnalysis, PitchFailure};
pub use plan::{Alignment, Corner, Direction, FanoutPlan, Sweep, ViaSpec};
pub use rotation::RotationBucket;
pub use strategy::{FootprintFrame, Rule, Strategy};

use crate::board::{BoardModel, FootprintModel, Pad, Point};

/// Why a fanout call produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No pitch could be measured.
    NoPitch(PitchFailure),
    /// The alignment has no rule for an arbitrary rotation.
    NotImplemented(Alignment),
}

/// Summary of one [`BgaFanout::fanout`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutReport {
    /// Tracks added.
    pub tracks: usize,
    /// Vias added.
    pub vias: usize,
    /// Pads whose endpoint coincided with the pad, so no track was added.
    pub zero_length: usize,
    /// Set when the call was skipped entirely.
    pub skipped: Option<SkipReason>,
}

impl FanoutReport {
    const fn skipped(reason: SkipReason) -> Self {
        Self {
            tracks: 0,
            vias: 0,
            zero_length: 0,
            skipped: Some(reason),
        }
    }
}

/// Fanout of one footprint.
///
/// Pad data and pitch are captured at construction. [`fanout`](Self::fanout)
/// may be called repeatedly; each call adds a fresh set of tracks and vias
/// without looking at what is already on the board.
#[derive(Debug, Clone)]
pub struct BgaFanout {
    reference: String,
    plan: FanoutPlan,
    origin: Point,
    degrees: f64,
    radians: f64,
    pads: Vec<Pad>,
    analysis: PitchAnalysis,
    emitter: RoutingEmitter,
}

impl BgaFanout {
    /// Prepares a fanout of footprint `reference`.
    ///
    /// The footprint's orientation is changed temporarily while measuring
    /// the pitch and restored exactly before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan is invalid or the footprint does not exist.
    pub fn new<B: BoardModel>(
        board: &mut B,
        reference: &str,
        plan: FanoutPlan,
    ) -> FanoutResult<Self> {
        let emitter = RoutingEmitter::new(&plan)?;
        let footprint = board
            .footprint_mut(reference)
            .ok_or_else(|| FanoutError::footprint_not_found(reference))?;

        tracing::info!(reference, alignment = %plan.alignment, "Initializing BGA fanout");

        let origin = footprint.position();
        let degrees = footprint.orientation_degrees();
        let radians = footprint.orientation_radians();
        let pads = classify::electrical_pads(&footprint.pads());
        let analysis = pitch::analyze(footprint);

        Ok(Self {
            reference: reference.to_string(),
            plan,
            origin,
            degrees,
            radians,
            pads,
            analysis,
            emitter,
        })
    }

    /// Footprint reference designator.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The plan in use.
    #[must_use]
    pub const fn plan(&self) -> &FanoutPlan {
        &self.plan
    }

    /// Electrical pads, in footprint order.
    #[must_use]
    pub fn electrical_pads(&self) -> &[Pad] {
        &self.pads
    }

    /// Measured pitch, if any.
    #[must_use]
    pub fn pitch(&self) -> Option<Pitch> {
        self.analysis.pitch()
    }

    /// Full pitch analysis result.
    #[must_use]
    pub const fn analysis(&self) -> &PitchAnalysis {
        &self.analysis
    }

    /// Rotation plus 45° in radians, as recorded during pitch analysis.
    #[must_use]
    pub const fn secondary_radians(&self) -> f64 {
        self.analysis.secondary_radians
    }

    /// Rotation bucket of the footprint.
    #[must_use]
    pub fn bucket(&self) -> RotationBucket {
        RotationBucket::classify(self.degrees)
    }

    /// Items added since the last [`remove_track_via`](Self::remove_track_via).
    #[must_use]
    pub const fn routing(&self) -> &RoutingSet {
        self.emitter.routing()
    }

    /// The strategy a fanout would use, or `None` without a pitch.
    #[must_use]
    pub fn strategy(&self) -> Option<Strategy> {
        self.pitch().map(|pitch| self.strategy_for(pitch))
    }

    fn strategy_for(&self, pitch: Pitch) -> Strategy {
        let frame = FootprintFrame {
            origin: self.origin,
            radians: self.radians,
            secondary_radians: self.analysis.secondary_radians,
            pitch,
        };
        Strategy::select(&self.plan, self.bucket(), &frame)
    }

    /// Routes every electrical pad outward with a track and a via.
    ///
    /// Nothing is added when fewer than two electrical pads exist, when no
    /// pitch could be measured, or when the alignment has no rule for the
    /// footprint's rotation; the report says why.
    ///
    /// # Errors
    ///
    /// Returns [`FanoutError::InvalidNet`] if a pad without a net reaches the
    /// emitter, which the pad filter rules out.
    pub fn fanout<B: BoardModel>(&mut self, board: &mut B) -> FanoutResult<FanoutReport> {
        if self.pads.len() < 2 {
            tracing::info!(reference = %self.reference, "Not enough electrical pads to fan out");
            return Ok(FanoutReport::skipped(SkipReason::NoPitch(
                PitchFailure::InsufficientPads {
                    count: self.pads.len(),
                },
            )));
        }
        let pitch = match self.analysis.result {
            Ok(pitch) => pitch,
            Err(failure) => {
                tracing::info!(reference = %self.reference, reason = %failure, "No pitch, skipping fanout");
                return Ok(FanoutReport::skipped(SkipReason::NoPitch(failure)));
            }
        };
        let strategy = self.strategy_for(pitch);
        if !strategy.is_implemented() {
            tracing::warn!(
                reference = %self.reference,
                alignment = %self.plan.alignment,
                degrees = self.degrees,
                "Alignment not implemented for arbitrary rotation, skipping fanout"
            );
            return Ok(FanoutReport::skipped(SkipReason::NotImplemented(
                self.plan.alignment,
            )));
        }

        let mut report = FanoutReport::default();
        for pad in &self.pads {
            let Some(end) = strategy.endpoint(pad.position) else {
                continue;
            };
            match self
                .emitter
                .add_segment(board, pad.net_code, pad.position, end)?
            {
                Some(_) => report.tracks += 1,
                None => report.zero_length += 1,
            }
            self.emitter.add_via(board, pad.net_code, end)?;
            report.vias += 1;
        }

        board.refresh();
        tracing::debug!(
            reference = %self.reference,
            tracks = report.tracks,
            vias = report.vias,
            "Fanout complete"
        );
        Ok(report)
    }

    /// Removes every track and via added since the last removal.
    ///
    /// Returns the number of items removed; zero if there was nothing to remove.
    pub fn remove_track_via<B: BoardModel>(&mut self, board: &mut B) -> usize {
        self.emitter.undo(board)
    }
}
