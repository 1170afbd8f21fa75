//! Track and via emission with bulk undo.

use crate::board::{BoardModel, ItemId, Layer, Point, Track, Via};
use crate::fanout::error::{FanoutError, FanoutResult};
use crate::fanout::plan::{FanoutPlan, ViaSpec};

/// Layer every fanout track is placed on.
pub const FANOUT_LAYER: Layer = Layer::FrontCopper;

/// Items added to the board since the last undo, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingSet {
    items: Vec<ItemId>,
    tracks: usize,
    vias: usize,
}

impl RoutingSet {
    /// Item ids in insertion order.
    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Number of tracks in the set.
    #[must_use]
    pub const fn track_count(&self) -> usize {
        self.tracks
    }

    /// Number of vias in the set.
    #[must_use]
    pub const fn via_count(&self) -> usize {
        self.vias
    }

    /// Total number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Adds fanout tracks and vias to a board and remembers them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingEmitter {
    track_width: i64,
    via: ViaSpec,
    routing: RoutingSet,
}

impl RoutingEmitter {
    /// Creates an emitter for a plan.
    ///
    /// # Errors
    ///
    /// Returns [`FanoutError::InvalidPlan`] if the plan's track or via
    /// geometry is unusable.
    pub fn new(plan: &FanoutPlan) -> FanoutResult<Self> {
        plan.validate()?;
        Ok(Self {
            track_width: plan.track_width,
            via: plan.via,
            routing: RoutingSet::default(),
        })
    }

    /// Items added since the last undo.
    #[must_use]
    pub const fn routing(&self) -> &RoutingSet {
        &self.routing
    }

    /// Adds a track from `start` to `end`.
    ///
    /// Zero-length tracks are skipped and `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`FanoutError::InvalidNet`] for net code 0.
    pub fn add_segment<B: BoardModel>(
        &mut self,
        board: &mut B,
        net_code: u32,
        start: Point,
        end: Point,
    ) -> FanoutResult<Option<ItemId>> {
        check_net(net_code)?;
        if start == end {
            tracing::debug!(?start, ?end, "Skipping zero-length track");
            return Ok(None);
        }

        let id = board.add_track(Track::new(net_code, start, end, self.track_width, FANOUT_LAYER));
        self.routing.items.push(id);
        self.routing.tracks += 1;
        Ok(Some(id))
    }

    /// Adds a through via at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`FanoutError::InvalidNet`] for net code 0.
    pub fn add_via<B: BoardModel>(
        &mut self,
        board: &mut B,
        net_code: u32,
        position: Point,
    ) -> FanoutResult<ItemId> {
        check_net(net_code)?;
        let id = board.add_via(Via::through(net_code, position, self.via.diameter, self.via.drill));
        self.routing.items.push(id);
        self.routing.vias += 1;
        Ok(id)
    }

    /// Removes every item added since the last undo and clears the set.
    ///
    /// Returns the number of items removed from the board.
    pub fn undo<B: BoardModel>(&mut self, board: &mut B) -> usize {
        if self.routing.is_empty() {
            return 0;
        }

        tracing::debug!(items = self.routing.len(), "Removing fanout tracks and vias");
        let removed = self
            .routing
            .items
            .drain(..)
            .filter(|&id| board.remove(id))
            .count();
        self.routing.tracks = 0;
        self.routing.vias = 0;
        board.refresh();
        tracing::debug!(removed, "Fanout tracks and vias removed");
        removed
    }
}

fn check_net(net_code: u32) -> FanoutResult<()> {
    if net_code == 0 {
        return Err(FanoutError::InvalidNet { net_code });
    }
    Ok(())
}
