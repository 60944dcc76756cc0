//! The vehicle agent.

use std::collections::VecDeque;

use dn_core::{EdgeIndex, NodeIndex, VehicleId};

use crate::Order;

// ── VehiclePosition ──────────────────────────────────────────────────────────

/// Where a vehicle currently is: stationary at a node, or mid-transit on an
/// edge heading for `toward`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VehiclePosition {
    AtNode(NodeIndex),
    OnEdge { edge: EdgeIndex, toward: NodeIndex },
}

// ── Vehicle ──────────────────────────────────────────────────────────────────

/// A mobile agent: identity, carrying capacity, current position, the
/// remaining edges of its current leg, queued destinations, and the orders
/// on board.
///
/// All mutation goes through the vehicle manager; external code only ever
/// sees `&Vehicle`.
pub struct Vehicle {
    pub(crate) id: VehicleId,
    pub(crate) capacity: f64,
    /// The restaurant this vehicle spawns at (and returns to on reset).
    pub(crate) home: NodeIndex,
    pub(crate) position: VehiclePosition,
    /// Remaining edges of the leg currently being driven.
    pub(crate) route: VecDeque<EdgeIndex>,
    /// Destinations not yet routed, in arrival order.
    pub(crate) destinations: VecDeque<NodeIndex>,
    pub(crate) orders: Vec<Order>,
}

impl Vehicle {
    pub(crate) fn new(id: VehicleId, capacity: f64, home: NodeIndex) -> Self {
        Self {
            id,
            capacity,
            home,
            position: VehiclePosition::AtNode(home),
            route: VecDeque::new(),
            destinations: VecDeque::new(),
            orders: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Arena index of the spawn restaurant.
    #[inline]
    pub fn home(&self) -> NodeIndex {
        self.home
    }

    #[inline]
    pub fn position(&self) -> VehiclePosition {
        self.position
    }

    /// Orders currently on board.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Summed weight of the orders on board.
    pub fn current_weight(&self) -> f64 {
        self.orders.iter().map(Order::weight).sum()
    }

    /// Destinations queued but not yet routed.
    pub fn destinations(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.destinations.iter().copied()
    }

    /// `true` when the vehicle has nothing left to drive.
    pub fn is_idle(&self) -> bool {
        self.route.is_empty() && self.destinations.is_empty()
    }

    /// Back to the initial state: at the home restaurant, no route, no
    /// queued destinations, no cargo.  Identity and capacity survive.
    pub(crate) fn reset(&mut self) {
        self.position = VehiclePosition::AtNode(self.home);
        self.route.clear();
        self.destinations.clear();
        self.orders.clear();
    }
}
