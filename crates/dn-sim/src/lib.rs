//! `dn-sim` — the tick-driven occupancy and simulation engine.
//!
//! # Two-phase tick loop
//!
//! ```text
//! for each external tick(now):
//!   ① Spawn  — pending vehicles become active at their restaurants
//!              (one VehicleSpawned event each).
//!   ② Nodes  — vehicles with a determined next step move onto an edge.
//!   ③ Edges  — vehicles whose elapsed time covers the edge duration
//!              arrive at the far node (arrival + delivery events).
//!   ④ Drain  — exactly this tick's events are returned.
//! ```
//!
//! Node updates always run before edge updates; edge progress is derived
//! from entry ticks, so the edge phase is idempotent within a tick and a
//! freshly placed vehicle is never double-advanced.
//!
//! # Crate layout
//!
//! | Module         | Contents                                            |
//! |----------------|-----------------------------------------------------|
//! | [`event`]      | `Event`, `EventBus` (per-tick drain)                |
//! | [`order`]      | `Order`, `OrderGenerator`, `UniformOrderGenerator`  |
//! | [`occupied`]   | `OccupiedNode`, `OccupiedEdge`, `VehicleStats`      |
//! | [`vehicle`]    | `Vehicle`, `VehiclePosition`                        |
//! | [`manager`]    | `VehicleManager`, `Component`, `OccupiedRef`        |
//! | [`simulation`] | `Simulation` runner, `Rater` trait                  |
//! | [`error`]      | `SimError`, `SimResult<T>`                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dn_core::{Location, Tick};
//! use dn_region::{DijkstraPathCalculator, RegionBuilder};
//! use dn_sim::VehicleManager;
//!
//! let mut b = RegionBuilder::new();
//! b.add_restaurant("Pizza Pronto", Location::new(0, 0));
//! b.add_neighborhood("Old Town", Location::new(10, 0));
//! b.add_edge("Main St", Location::new(0, 0), Location::new(10, 0), 5);
//! let region = Arc::new(b.build()?);
//!
//! let mut manager = VehicleManager::new(region, Box::new(DijkstraPathCalculator));
//! let vehicle = manager.add_vehicle(Location::new(0, 0), 1.0)?;
//! manager.move_queued(vehicle, Location::new(10, 0))?;
//! for t in 0..=5 {
//!     let events = manager.tick(Tick(t))?;
//!     println!("T{t}: {events:?}");
//! }
//! ```

pub mod error;
pub mod event;
pub mod manager;
pub mod occupied;
pub mod order;
pub mod simulation;
pub mod vehicle;


pub use error::{SimError, SimResult};
pub use event::{Event, EventBus};
pub use manager::{Component, OccupiedRef, VehicleManager};
pub use occupied::{OccupiedEdge, OccupiedNode, VehicleStats};
pub use order::{Order, OrderGenerator, UniformOrderGenerator, UniformOrderGeneratorBuilder};
pub use simulation::{Rater, Simulation};
pub use vehicle::{Vehicle, VehiclePosition};
