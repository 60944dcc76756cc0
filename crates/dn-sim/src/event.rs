//! Tick-tagged simulation events and the per-tick event bus.
//!
//! # Drain discipline
//!
//! Events accumulate during one call to the vehicle manager's `tick` and
//! are drained exactly once, scoped to that tick: events from tick N are
//! never retrievable after tick N's drain and never merge with tick N+1's.
//! A second drain of the same (or an earlier) tick, and a post into an
//! already-drained tick, are invariant violations and panic.

use dn_core::{Location, Tick, VehicleId};

use crate::Order;

// ── Event ────────────────────────────────────────────────────────────────────

/// Something that happened during a tick, tagged with that tick.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A pending vehicle entered the simulation at its restaurant.
    VehicleSpawned {
        tick: Tick,
        vehicle: VehicleId,
        location: Location,
    },
    /// A vehicle finished traversing an edge onto a plain junction.
    ArrivedAtNode {
        tick: Tick,
        vehicle: VehicleId,
        location: Location,
    },
    /// A vehicle finished traversing an edge onto a restaurant.
    ArrivedAtRestaurant {
        tick: Tick,
        vehicle: VehicleId,
        location: Location,
    },
    /// A vehicle finished traversing an edge onto a neighborhood.
    ArrivedAtNeighborhood {
        tick: Tick,
        vehicle: VehicleId,
        location: Location,
    },
    /// An order was loaded onto a vehicle at its restaurant.
    OrderLoaded {
        tick: Tick,
        vehicle: VehicleId,
        order: Order,
    },
    /// An order reached its destination neighborhood.  The carried order
    /// has its `actual_delivery_tick` set.
    OrderDelivered {
        tick: Tick,
        vehicle: VehicleId,
        order: Order,
    },
}

impl Event {
    /// The tick this event belongs to.
    pub fn tick(&self) -> Tick {
        match *self {
            Event::VehicleSpawned { tick, .. }
            | Event::ArrivedAtNode { tick, .. }
            | Event::ArrivedAtRestaurant { tick, .. }
            | Event::ArrivedAtNeighborhood { tick, .. }
            | Event::OrderLoaded { tick, .. }
            | Event::OrderDelivered { tick, .. } => tick,
        }
    }

    /// The vehicle this event concerns.
    pub fn vehicle(&self) -> VehicleId {
        match *self {
            Event::VehicleSpawned { vehicle, .. }
            | Event::ArrivedAtNode { vehicle, .. }
            | Event::ArrivedAtRestaurant { vehicle, .. }
            | Event::ArrivedAtNeighborhood { vehicle, .. }
            | Event::OrderLoaded { vehicle, .. }
            | Event::OrderDelivered { vehicle, .. } => vehicle,
        }
    }
}

// ── EventBus ─────────────────────────────────────────────────────────────────

/// Per-tick append-only event buffer with a single-drain contract.
#[derive(Default)]
pub struct EventBus {
    pending: Vec<Event>,
    /// Highest tick drained so far; posts and drains at or below it panic.
    drained_through: Option<Tick>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event for later drain.
    ///
    /// # Panics
    /// Panics if the event is tagged with an already-drained tick.
    pub fn queue_post(&mut self, event: Event) {
        if let Some(drained) = self.drained_through {
            assert!(
                event.tick() > drained,
                "event posted for {} but ticks through {drained} are already drained",
                event.tick(),
            );
        }
        self.pending.push(event);
    }

    /// Remove and return exactly the events tagged with `tick`.
    ///
    /// # Panics
    /// Panics if `tick` (or a later tick) was already drained.
    pub fn pop_events(&mut self, tick: Tick) -> Vec<Event> {
        if let Some(drained) = self.drained_through {
            assert!(
                tick > drained,
                "double drain: {tick} requested but ticks through {drained} are already drained",
            );
        }
        self.drained_through = Some(tick);

        let mut drained = Vec::new();
        let mut kept = Vec::new();
        for event in self.pending.drain(..) {
            if event.tick() == tick {
                drained.push(event);
            } else {
                kept.push(event);
            }
        }
        self.pending = kept;
        drained
    }

    /// Number of events waiting for a future drain.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Forget all pending events and the drain watermark, allowing tick 0
    /// to be drained again.  Used by the manager's reset for replays.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.drained_through = None;
    }
}
