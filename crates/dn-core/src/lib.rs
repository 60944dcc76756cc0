//! `dn-core` — foundational types for the delivnet simulation framework.
//!
//! This crate is a dependency of every other `dn-*` crate.  It intentionally
//! has no `dn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | [`ids`]      | `NodeIndex`, `EdgeIndex`, `VehicleId`, `OrderId`     |
//! | [`location`] | `Location` — exact 2-D coordinate, node identity key |
//! | [`time`]     | `Tick`, `TickInterval`                               |
//! | [`distance`] | `DistanceCalculator` + Euclidean/Manhattan/Chebyshev |
//! | [`rng`]      | `SimRng` (seeded, deterministic)                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.  |

pub mod distance;
pub mod ids;
pub mod location;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use distance::{ChebyshevDistance, DistanceCalculator, EuclideanDistance, ManhattanDistance};
pub use ids::{EdgeIndex, NodeIndex, OrderId, VehicleId};
pub use location::Location;
pub use rng::SimRng;
pub use time::{InvalidInterval, Tick, TickInterval};
