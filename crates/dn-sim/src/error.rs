//! Simulation-layer error type.
//!
//! Every variant is a runtime lookup or usage error: descriptive, local to
//! the failing call, and guaranteed not to have mutated manager state.
//! Build-time structural violations live in
//! [`RegionError`](dn_region::RegionError) instead.

use thiserror::Error;

use dn_core::{Location, VehicleId};

/// Errors produced by `dn-sim`.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("no node at {0}")]
    UnknownNode(Location),

    #[error("no edge between {a} and {b}")]
    UnknownEdge { a: Location, b: Location },

    #[error("node at {0} is not a restaurant")]
    NotARestaurant(Location),

    #[error("node at {0} is not a neighborhood")]
    NotANeighborhood(Location),

    #[error("vehicles can only spawn at restaurants; {0} is not one")]
    SpawnAtNonRestaurant(Location),

    #[error("unknown vehicle {0}")]
    UnknownVehicle(VehicleId),

    #[error("vehicle {vehicle} is not at the order's restaurant {restaurant}")]
    VehicleNotAtRestaurant {
        vehicle: VehicleId,
        restaurant: Location,
    },

    #[error("order destination {0} is not a neighborhood")]
    DestinationNotANeighborhood(Location),

    #[error(
        "vehicle {vehicle} over capacity: {loaded} loaded + {order_weight} ordered > {capacity}"
    )]
    CapacityExceeded {
        vehicle: VehicleId,
        capacity: f64,
        loaded: f64,
        order_weight: f64,
    },

    #[error("no route from {from} to {to}")]
    NoRoute { from: Location, to: Location },
}

pub type SimResult<T> = Result<T, SimError>;
