//! Region-construction error type.
//!
//! Every variant is a structural violation detected by
//! [`RegionBuilder::build`](crate::RegionBuilder::build).  Structural
//! violations are fatal: a malformed topology is rejected at build time,
//! never silently accepted.

use thiserror::Error;

use dn_core::Location;

/// Errors produced by `dn-region`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    #[error("duplicate node at {0}")]
    DuplicateNode(Location),

    #[error("duplicate edge between {a} and {b}")]
    DuplicateEdge { a: Location, b: Location },

    #[error("edge '{name}' endpoint {location} is not a node of this region")]
    UnknownEndpoint { name: String, location: Location },

    #[error("edge '{name}' connects {location} to itself")]
    SelfLoop { name: String, location: Location },

    #[error("edge '{name}' has zero duration")]
    ZeroDuration { name: String },
}

pub type RegionResult<T> = Result<T, RegionError>;
