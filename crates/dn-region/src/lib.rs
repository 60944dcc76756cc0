//! `dn-region` — the frozen delivery-network graph and route calculation.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`node`]   | `Node`, `NodeKind`                                            |
//! | [`edge`]   | `Edge` (canonical endpoints, total order)                     |
//! | [`region`] | `Region` (arenas + CSR adjacency), `RegionBuilder`            |
//! | [`path`]   | `PathCalculator`, `Route`, Dijkstra + LRU-cached calculators  |
//! | [`error`]  | `RegionError`, `RegionResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Node` and `Edge`. |
//!
//! # Identity model
//!
//! A node's public identity is its [`Location`](dn_core::Location); an
//! edge's is its canonical endpoint pair.  Internally both map to dense
//! arena indices assigned once at build time — the stable keys everything
//! downstream (occupancy wrappers, routes) is indexed by.

pub mod edge;
pub mod error;
pub mod node;
pub mod path;
pub mod region;


pub use edge::Edge;
pub use error::{RegionError, RegionResult};
pub use node::{Node, NodeKind};
pub use path::{CachedPathCalculator, DijkstraPathCalculator, PathCalculator, Route};
pub use region::{Region, RegionBuilder};
