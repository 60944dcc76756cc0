//! Immutable weighted graph edge.

use std::cmp::Ordering;
use std::fmt;

use dn_core::Location;

/// An undirected weighted edge between two nodes of a
/// [`Region`](crate::Region).
///
/// Endpoints are stored canonically: `location_a <= location_b` always holds
/// (the builder sorts each pair), so an edge exists exactly once no matter
/// which way it is queried.  `duration` is the fixed travel time in ticks,
/// at least 1.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub(crate) name: String,
    pub(crate) location_a: Location,
    pub(crate) location_b: Location,
    pub(crate) duration: u64,
}

impl Edge {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lesser endpoint.
    #[inline]
    pub fn location_a(&self) -> Location {
        self.location_a
    }

    /// The greater endpoint.
    #[inline]
    pub fn location_b(&self) -> Location {
        self.location_b
    }

    /// Travel time in ticks.
    #[inline]
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Given one endpoint, the other; `None` if `from` is not an endpoint.
    pub fn other_endpoint(&self, from: Location) -> Option<Location> {
        if from == self.location_a {
            Some(self.location_b)
        } else if from == self.location_b {
            Some(self.location_a)
        } else {
            None
        }
    }

    #[inline]
    pub fn touches(&self, location: Location) -> bool {
        location == self.location_a || location == self.location_b
    }
}

/// Edges order by `duration`, then `name`, then the canonical endpoint pair:
/// a deterministic total order usable for route-selection tie-breaks.
impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.duration
            .cmp(&other.duration)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| (self.location_a, self.location_b).cmp(&(other.location_a, other.location_b)))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edge '{}' {} to {} ({} ticks)",
            self.name, self.location_a, self.location_b, self.duration
        )
    }
}
