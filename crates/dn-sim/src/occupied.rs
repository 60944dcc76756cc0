//! Mutable occupancy state wrapped around the frozen graph.
//!
//! Exactly one wrapper exists per region node and per region edge, created
//! when the vehicle manager is built and never replaced; every tick mutates
//! them in place.  The wrappers are index-aligned with the region's arenas,
//! so resolving a wrapper from a graph element is a direct vector index —
//! no identity-keyed maps.
//!
//! # Progress model
//!
//! An edge wrapper does not count progress up tick by tick; it stores each
//! vehicle's entry tick and derives progress as `now - arrived`.  Progress
//! is therefore a pure function of the current tick, which is what makes
//! the edge phase idempotent within a tick: a vehicle placed on an edge by
//! this tick's node phase shows zero elapsed progress however often the
//! edge is examined afterwards.

use std::collections::BTreeMap;

use dn_core::{EdgeIndex, NodeIndex, Tick, VehicleId};
use dn_region::NodeKind;

// ── VehicleStats ─────────────────────────────────────────────────────────────

/// Per-vehicle timing on one occupied element.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct VehicleStats {
    /// Tick the vehicle entered this element.
    pub arrived: Tick,
    /// Tick the vehicle left, set on the record returned by `depart`;
    /// `None` while the vehicle is still here.
    pub departed: Option<Tick>,
}

impl VehicleStats {
    fn arrive(tick: Tick) -> Self {
        Self {
            arrived: tick,
            departed: None,
        }
    }
}

// ── OccupiedNode ─────────────────────────────────────────────────────────────

/// Occupancy state of one region node.
///
/// The subtype tag is copied from the node's declared kind when the manager
/// builds the wrapper; tick-time code reads the tag instead of re-inspecting
/// the node.
pub struct OccupiedNode {
    node: NodeIndex,
    kind: NodeKind,
    vehicles: BTreeMap<VehicleId, VehicleStats>,
}

impl OccupiedNode {
    pub(crate) fn new(node: NodeIndex, kind: NodeKind) -> Self {
        Self {
            node,
            kind,
            vehicles: BTreeMap::new(),
        }
    }

    /// Arena index of the wrapped node.
    #[inline]
    pub fn node(&self) -> NodeIndex {
        self.node
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Vehicles currently at this node, ascending by id.
    pub fn vehicles(&self) -> &BTreeMap<VehicleId, VehicleStats> {
        &self.vehicles
    }

    pub fn stats(&self, vehicle: VehicleId) -> Option<&VehicleStats> {
        self.vehicles.get(&vehicle)
    }

    pub fn is_occupied(&self) -> bool {
        !self.vehicles.is_empty()
    }

    pub(crate) fn enter(&mut self, vehicle: VehicleId, tick: Tick) {
        let previous = self.vehicles.insert(vehicle, VehicleStats::arrive(tick));
        debug_assert!(previous.is_none(), "{vehicle} already at node {}", self.node);
    }

    /// Remove `vehicle`, returning its completed stats (departure filled in).
    ///
    /// # Panics
    /// Panics if the vehicle is not here — the manager's occupancy maps and
    /// vehicle positions would have diverged.
    pub(crate) fn depart(&mut self, vehicle: VehicleId, tick: Tick) -> VehicleStats {
        let mut stats = self
            .vehicles
            .remove(&vehicle)
            .unwrap_or_else(|| panic!("{vehicle} not at node {}", self.node));
        stats.departed = Some(tick);
        stats
    }

    pub(crate) fn reset(&mut self) {
        self.vehicles.clear();
    }
}

// ── OccupiedEdge ─────────────────────────────────────────────────────────────

/// Occupancy state of one region edge: vehicles mid-transit and how far
/// along they are.
pub struct OccupiedEdge {
    edge: EdgeIndex,
    duration: u64,
    vehicles: BTreeMap<VehicleId, VehicleStats>,
}

impl OccupiedEdge {
    pub(crate) fn new(edge: EdgeIndex, duration: u64) -> Self {
        Self {
            edge,
            duration,
            vehicles: BTreeMap::new(),
        }
    }

    /// Arena index of the wrapped edge.
    #[inline]
    pub fn edge(&self) -> EdgeIndex {
        self.edge
    }

    /// Travel time of the wrapped edge, in ticks.
    #[inline]
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Vehicles currently on this edge, ascending by id.
    pub fn vehicles(&self) -> &BTreeMap<VehicleId, VehicleStats> {
        &self.vehicles
    }

    pub fn stats(&self, vehicle: VehicleId) -> Option<&VehicleStats> {
        self.vehicles.get(&vehicle)
    }

    pub fn is_occupied(&self) -> bool {
        !self.vehicles.is_empty()
    }

    /// Ticks of progress `vehicle` has made along this edge at `now`,
    /// capped at the edge duration.  `None` if the vehicle is not here.
    pub fn progress(&self, vehicle: VehicleId, now: Tick) -> Option<u64> {
        self.vehicles
            .get(&vehicle)
            .map(|s| (now - s.arrived).min(self.duration))
    }

    /// Ticks remaining until `vehicle` reaches the far node.
    pub fn remaining(&self, vehicle: VehicleId, now: Tick) -> Option<u64> {
        self.progress(vehicle, now).map(|p| self.duration - p)
    }

    pub(crate) fn enter(&mut self, vehicle: VehicleId, tick: Tick) {
        let previous = self.vehicles.insert(vehicle, VehicleStats::arrive(tick));
        debug_assert!(previous.is_none(), "{vehicle} already on edge {}", self.edge);
    }

    /// Remove `vehicle`, returning its completed stats.
    ///
    /// # Panics
    /// Panics if the vehicle is not here (see [`OccupiedNode::depart`]).
    pub(crate) fn depart(&mut self, vehicle: VehicleId, tick: Tick) -> VehicleStats {
        let mut stats = self
            .vehicles
            .remove(&vehicle)
            .unwrap_or_else(|| panic!("{vehicle} not on edge {}", self.edge));
        stats.departed = Some(tick);
        stats
    }

    pub(crate) fn reset(&mut self) {
        self.vehicles.clear();
    }
}
