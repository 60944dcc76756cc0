//! Immutable graph node.

use std::collections::BTreeSet;
use std::fmt;

use dn_core::Location;

// ── NodeKind ─────────────────────────────────────────────────────────────────

/// The declared role of a node, fixed when the region is built.
///
/// This is a closed set: the simulation layer resolves kind-specific
/// behavior (spawn points, delivery destinations) once at wrapper
/// construction and never re-inspects it on the tick path.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Plain junction; vehicles pass through without special handling.
    #[default]
    Generic,
    /// Vehicle spawn point and order pickup location.
    Restaurant,
    /// Delivery destination.
    Neighborhood,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Generic => "node",
            NodeKind::Restaurant => "restaurant",
            NodeKind::Neighborhood => "neighborhood",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Node ─────────────────────────────────────────────────────────────────────

/// An immutable node of a [`Region`](crate::Region), identified by its
/// location.
///
/// `connections` holds the locations this node has an edge to; it is derived
/// from the edge list when the region is built, so every entry resolves to a
/// node of the same region by construction.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub(crate) name: String,
    pub(crate) location: Location,
    pub(crate) kind: NodeKind,
    pub(crate) connections: BTreeSet<Location>,
}

impl Node {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Locations this node is directly connected to, in ascending order.
    #[inline]
    pub fn connections(&self) -> &BTreeSet<Location> {
        &self.connections
    }

    #[inline]
    pub fn is_restaurant(&self) -> bool {
        self.kind == NodeKind::Restaurant
    }

    #[inline]
    pub fn is_neighborhood(&self) -> bool {
        self.kind == NodeKind::Neighborhood
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.kind, self.name, self.location)
    }
}
