//! The vehicle manager: sole mutator of all simulation state.
//!
//! # Tick sequence
//!
//! One call to [`VehicleManager::tick`] advances the simulation by exactly
//! one logical time unit:
//!
//! 1. **Spawn** — every pending vehicle becomes active, is registered in
//!    its restaurant's wrapper, and emits a `VehicleSpawned` event.
//! 2. **Node phase** — vehicles whose next step is determined move onto
//!    their chosen edge.
//! 3. **Edge phase** — vehicles whose elapsed time covers the edge duration
//!    move onto the destination node.
//! 4. **Drain** — exactly this tick's events are returned.
//!
//! Nodes are ticked before edges.  This only works because edge ticking is
//! idempotent: progress is derived from entry ticks, so a vehicle the node
//! phase just placed on an edge is not advanced again by the edge phase of
//! the same tick.  The two phases must never be reordered or interleaved.
//!
//! Iteration is arena order (nodes by location, edges by canonical pair)
//! and, within one element, ascending vehicle id — the whole tick is
//! deterministic, including the order of emitted events.

use std::mem;
use std::sync::Arc;

use log::{debug, trace};

use dn_core::{EdgeIndex, Location, NodeIndex, Tick, VehicleId};
use dn_region::{NodeKind, PathCalculator, Region};

use crate::{
    Event, EventBus, OccupiedEdge, OccupiedNode, Order, SimError, SimResult, Vehicle,
    VehiclePosition,
};

// ── Component / OccupiedRef ──────────────────────────────────────────────────

/// A graph element named by its structural identity, for occupancy lookups.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Component {
    Node(Location),
    Edge(Location, Location),
}

/// The occupancy wrapper a [`Component`] resolved to.
pub enum OccupiedRef<'a> {
    Node(&'a OccupiedNode),
    Edge(&'a OccupiedEdge),
}

// ── VehicleManager ───────────────────────────────────────────────────────────

/// Owns the occupancy wrappers (one per region node and edge, built at
/// construction, never resized), the vehicle roster with its pending/active
/// lifecycle, and the event bus.
///
/// The region itself is shared and immutable; everything that changes from
/// tick to tick lives here and is mutated only through this type.
pub struct VehicleManager {
    region: Arc<Region>,
    path_calculator: Box<dyn PathCalculator>,
    /// Index-aligned with `region.nodes()`.
    occupied_nodes: Vec<OccupiedNode>,
    /// Index-aligned with `region.edges()`.
    occupied_edges: Vec<OccupiedEdge>,
    /// All vehicles ever added, indexed by `VehicleId`.  Always equals
    /// active ∪ pending — vehicles are never removed.
    vehicles: Vec<Vehicle>,
    active: Vec<VehicleId>,
    pending: Vec<VehicleId>,
    event_bus: EventBus,
}

impl VehicleManager {
    /// Wrap `region` into occupancy state.
    pub fn new(region: Arc<Region>, path_calculator: Box<dyn PathCalculator>) -> Self {
        let occupied_nodes = region
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, node)| OccupiedNode::new(NodeIndex(i as u32), node.kind()))
            .collect();
        let occupied_edges = region
            .edges()
            .iter()
            .enumerate()
            .map(|(i, edge)| OccupiedEdge::new(EdgeIndex(i as u32), edge.duration()))
            .collect();

        Self {
            region,
            path_calculator,
            occupied_nodes,
            occupied_edges,
            vehicles: Vec::new(),
            active: Vec::new(),
            pending: Vec::new(),
            event_bus: EventBus::new(),
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn path_calculator(&self) -> &dyn PathCalculator {
        self.path_calculator.as_ref()
    }

    // ── Vehicle lifecycle ─────────────────────────────────────────────────

    /// Create a vehicle at the restaurant at `start`.
    ///
    /// The vehicle exists logically right away — it can be queried and given
    /// destinations — but stays pending until the next tick spawns it.
    ///
    /// # Errors
    ///
    /// `start` must be a restaurant of the region.
    pub fn add_vehicle(&mut self, start: Location, capacity: f64) -> SimResult<VehicleId> {
        let node = self
            .region
            .node_index(start)
            .ok_or(SimError::UnknownNode(start))?;
        if !self.region.node_at(node).is_restaurant() {
            return Err(SimError::SpawnAtNonRestaurant(start));
        }

        let id = VehicleId(self.vehicles.len() as u32);
        self.vehicles.push(Vehicle::new(id, capacity, node));
        self.pending.push(id);
        debug!("{id} added at {start} with capacity {capacity}");
        Ok(id)
    }

    pub fn vehicle(&self, id: VehicleId) -> SimResult<&Vehicle> {
        self.vehicles
            .get(id.index())
            .ok_or(SimError::UnknownVehicle(id))
    }

    /// Active vehicles, in spawn order.
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.active.iter().map(|id| &self.vehicles[id.index()])
    }

    /// Active and pending vehicles.  Pending vehicles have not emitted a
    /// spawn event yet and appear in no wrapper's vehicle map.
    pub fn all_vehicles(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter()
    }

    /// Ids of vehicles awaiting their spawn tick.
    pub fn pending_vehicles(&self) -> &[VehicleId] {
        &self.pending
    }

    // ── Vehicle commands ──────────────────────────────────────────────────

    /// Append `destination` to the vehicle's destination queue.
    pub fn move_queued(&mut self, vehicle: VehicleId, destination: Location) -> SimResult<()> {
        let node = self
            .region
            .node_index(destination)
            .ok_or(SimError::UnknownNode(destination))?;
        self.vehicle(vehicle)?;
        self.vehicles[vehicle.index()].destinations.push_back(node);
        Ok(())
    }

    /// Drop every queued destination and the current leg, then head straight
    /// for `destination`.  A vehicle mid-edge finishes that edge first and
    /// re-routes from the far node.
    pub fn move_direct(&mut self, vehicle: VehicleId, destination: Location) -> SimResult<()> {
        let node = self
            .region
            .node_index(destination)
            .ok_or(SimError::UnknownNode(destination))?;
        self.vehicle(vehicle)?;
        let v = &mut self.vehicles[vehicle.index()];
        v.destinations.clear();
        v.route.clear();
        v.destinations.push_back(node);
        Ok(())
    }

    /// Load `order` onto `vehicle`, which must be at the order's restaurant,
    /// with capacity to spare.  Emits `OrderLoaded` tagged `now` (drained by
    /// the upcoming `tick(now)`).
    pub fn load_order(&mut self, vehicle: VehicleId, order: Order, now: Tick) -> SimResult<()> {
        let restaurant = self
            .region
            .node_index(order.restaurant())
            .ok_or(SimError::UnknownNode(order.restaurant()))?;
        if !self.region.node_at(restaurant).is_restaurant() {
            return Err(SimError::NotARestaurant(order.restaurant()));
        }
        match self.region.node(order.destination()) {
            Some(node) if node.is_neighborhood() => {}
            Some(_) => {
                return Err(SimError::DestinationNotANeighborhood(order.destination()));
            }
            None => return Err(SimError::UnknownNode(order.destination())),
        }

        let v = self.vehicle(vehicle)?;
        if v.position() != VehiclePosition::AtNode(restaurant) {
            return Err(SimError::VehicleNotAtRestaurant {
                vehicle,
                restaurant: order.restaurant(),
            });
        }
        let loaded = v.current_weight();
        if loaded + order.weight() > v.capacity() {
            return Err(SimError::CapacityExceeded {
                vehicle,
                capacity: v.capacity(),
                loaded,
                order_weight: order.weight(),
            });
        }

        trace!("{vehicle} loads order {} at {}", order.id(), order.restaurant());
        self.event_bus.queue_post(Event::OrderLoaded {
            tick: now,
            vehicle,
            order: order.clone(),
        });
        self.vehicles[vehicle.index()].orders.push(order);
        Ok(())
    }

    // ── Occupancy lookups ─────────────────────────────────────────────────

    /// Occupancy state of the node or edge named by `component`.
    pub fn occupied(&self, component: Component) -> SimResult<OccupiedRef<'_>> {
        match component {
            Component::Node(location) => self.occupied_node(location).map(OccupiedRef::Node),
            Component::Edge(a, b) => self.occupied_edge(a, b).map(OccupiedRef::Edge),
        }
    }

    /// Occupancy state of the node at `location`.
    pub fn occupied_node(&self, location: Location) -> SimResult<&OccupiedNode> {
        let node = self
            .region
            .node_index(location)
            .ok_or(SimError::UnknownNode(location))?;
        Ok(&self.occupied_nodes[node.index()])
    }

    /// Occupancy state of the edge between `a` and `b` (order-insensitive).
    pub fn occupied_edge(&self, a: Location, b: Location) -> SimResult<&OccupiedEdge> {
        let edge = self
            .region
            .edge_index(a, b)
            .ok_or(SimError::UnknownEdge { a, b })?;
        Ok(&self.occupied_edges[edge.index()])
    }

    /// Like [`occupied_node`](Self::occupied_node), but the node must be a
    /// restaurant.
    pub fn occupied_restaurant(&self, location: Location) -> SimResult<&OccupiedNode> {
        let occupied = self.occupied_node(location)?;
        if occupied.kind() != NodeKind::Restaurant {
            return Err(SimError::NotARestaurant(location));
        }
        Ok(occupied)
    }

    /// Like [`occupied_node`](Self::occupied_node), but the node must be a
    /// neighborhood.
    pub fn occupied_neighborhood(&self, location: Location) -> SimResult<&OccupiedNode> {
        let occupied = self.occupied_node(location)?;
        if occupied.kind() != NodeKind::Neighborhood {
            return Err(SimError::NotANeighborhood(location));
        }
        Ok(occupied)
    }

    /// All node wrappers, in arena order.
    pub fn occupied_nodes(&self) -> &[OccupiedNode] {
        &self.occupied_nodes
    }

    /// All edge wrappers, in arena order.
    pub fn occupied_edges(&self) -> &[OccupiedEdge] {
        &self.occupied_edges
    }

    /// Restaurant wrappers, in arena order.
    pub fn occupied_restaurants(&self) -> impl Iterator<Item = &OccupiedNode> + '_ {
        self.occupied_nodes
            .iter()
            .filter(|o| o.kind() == NodeKind::Restaurant)
    }

    /// Neighborhood wrappers, in arena order.
    pub fn occupied_neighborhoods(&self) -> impl Iterator<Item = &OccupiedNode> + '_ {
        self.occupied_nodes
            .iter()
            .filter(|o| o.kind() == NodeKind::Neighborhood)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the whole simulation by one logical time unit and return the
    /// events of exactly this tick.
    pub fn tick(&mut self, now: Tick) -> SimResult<Vec<Event>> {
        let to_spawn = mem::take(&mut self.pending);
        for id in to_spawn {
            self.spawn_vehicle(id, now);
        }

        // Nodes are ticked before edges.  This only works because edge
        // ticking is idempotent; otherwise a vehicle a node tick just moved
        // onto an edge could see two state changes in a single tick.
        for i in 0..self.occupied_nodes.len() {
            self.tick_node(NodeIndex(i as u32), now)?;
        }
        for i in 0..self.occupied_edges.len() {
            self.tick_edge(EdgeIndex(i as u32), now);
        }

        Ok(self.event_bus.pop_events(now))
    }

    /// Everything back to its initial state: wrappers emptied, vehicles at
    /// their home restaurants with no cargo or plans, the whole roster
    /// pending again in id order, event history gone.  Replaying the same
    /// tick sequence afterwards reproduces the original spawn sequence.
    pub fn reset(&mut self) {
        for occupied in &mut self.occupied_nodes {
            occupied.reset();
        }
        for occupied in &mut self.occupied_edges {
            occupied.reset();
        }
        for vehicle in &mut self.vehicles {
            vehicle.reset();
        }
        self.active.clear();
        self.pending = (0..self.vehicles.len())
            .map(|i| VehicleId(i as u32))
            .collect();
        self.event_bus.reset();
        debug!("reset: {} vehicles back to pending", self.pending.len());
    }

    // ── Tick internals ────────────────────────────────────────────────────

    fn spawn_vehicle(&mut self, id: VehicleId, now: Tick) {
        self.active.push(id);
        let home = self.vehicles[id.index()].home();
        self.occupied_nodes[home.index()].enter(id, now);
        let location = self.region.node_at(home).location();
        self.event_bus.queue_post(Event::VehicleSpawned {
            tick: now,
            vehicle: id,
            location,
        });
        debug!("{id} spawned at {location} on {now}");
    }

    /// Move every vehicle at `node` whose next step is determined onto its
    /// chosen edge.
    fn tick_node(&mut self, node: NodeIndex, now: Tick) -> SimResult<()> {
        let present: Vec<VehicleId> = self.occupied_nodes[node.index()]
            .vehicles()
            .keys()
            .copied()
            .collect();

        for id in present {
            self.plan_next_leg(id, node)?;

            let Some(&next_edge) = self.vehicles[id.index()].route.front() else {
                continue; // nothing to drive
            };
            self.vehicles[id.index()].route.pop_front();

            let toward = self.region.neighbor_across(next_edge, node);
            let stats = self.occupied_nodes[node.index()].depart(id, now);
            self.occupied_edges[next_edge.index()].enter(id, now);
            self.vehicles[id.index()].position = VehiclePosition::OnEdge {
                edge: next_edge,
                toward,
            };
            trace!(
                "{id} leaves node {} for edge {} after waiting {} ticks",
                node,
                next_edge,
                now - stats.arrived,
            );
        }
        Ok(())
    }

    /// Ensure the vehicle has a current leg if it has queued destinations.
    /// Destinations equal to the current node are consumed on the spot.
    fn plan_next_leg(&mut self, id: VehicleId, at: NodeIndex) -> SimResult<()> {
        loop {
            if !self.vehicles[id.index()].route.is_empty() {
                return Ok(());
            }
            let Some(destination) = self.vehicles[id.index()].destinations.pop_front() else {
                return Ok(());
            };
            if destination == at {
                continue;
            }

            // An unreachable destination on a well-formed topology is a
            // design-level defect; it propagates instead of being swallowed.
            let route = self
                .path_calculator
                .path(&self.region, at, destination)
                .ok_or_else(|| SimError::NoRoute {
                    from: self.region.node_at(at).location(),
                    to: self.region.node_at(destination).location(),
                })?;
            self.vehicles[id.index()].route = route.edges.into();
            return Ok(());
        }
    }

    /// Move every vehicle on `edge` whose elapsed time covers the duration
    /// onto its destination node.
    fn tick_edge(&mut self, edge: EdgeIndex, now: Tick) {
        let occupied = &self.occupied_edges[edge.index()];
        let duration = occupied.duration();
        let arriving: Vec<VehicleId> = occupied
            .vehicles()
            .iter()
            .filter(|(_, stats)| now - stats.arrived >= duration)
            .map(|(&id, _)| id)
            .collect();

        for id in arriving {
            let VehiclePosition::OnEdge { toward, .. } = self.vehicles[id.index()].position()
            else {
                panic!("{id} listed on edge {edge} but its position disagrees");
            };
            self.occupied_edges[edge.index()].depart(id, now);
            self.occupied_nodes[toward.index()].enter(id, now);
            self.vehicles[id.index()].position = VehiclePosition::AtNode(toward);
            self.arrive(id, toward, now);
        }
    }

    /// Record an arrival: emit the kind-appropriate event and, at a
    /// neighborhood, hand over every order destined here.
    fn arrive(&mut self, id: VehicleId, node: NodeIndex, now: Tick) {
        let kind = self.occupied_nodes[node.index()].kind();
        let location = self.region.node_at(node).location();

        let event = match kind {
            NodeKind::Generic => Event::ArrivedAtNode {
                tick: now,
                vehicle: id,
                location,
            },
            NodeKind::Restaurant => Event::ArrivedAtRestaurant {
                tick: now,
                vehicle: id,
                location,
            },
            NodeKind::Neighborhood => Event::ArrivedAtNeighborhood {
                tick: now,
                vehicle: id,
                location,
            },
        };
        self.event_bus.queue_post(event);
        trace!("{id} arrives at {location} on {now}");

        if kind == NodeKind::Neighborhood {
            self.deliver_orders(id, location, now);
        }
    }

    fn deliver_orders(&mut self, id: VehicleId, location: Location, now: Tick) {
        let vehicle = &mut self.vehicles[id.index()];
        let mut delivered = Vec::new();
        let mut kept = Vec::new();
        for order in vehicle.orders.drain(..) {
            if order.destination() == location {
                delivered.push(order);
            } else {
                kept.push(order);
            }
        }
        vehicle.orders = kept;

        for mut order in delivered {
            order.mark_delivered(now);
            debug!("{id} delivered order {} at {location} on {now}", order.id());
            self.event_bus.queue_post(Event::OrderDelivered {
                tick: now,
                vehicle: id,
                order,
            });
        }
    }
}
