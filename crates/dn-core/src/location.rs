//! Exact 2-D coordinate used as the sole key for node identity.
//!
//! Locations are integer grid coordinates, not geographic positions: two
//! nodes are the same node exactly when their locations are equal.  The
//! derived `Ord` is lexicographic (`x`, then `y`); the canonical edge
//! invariant (`location_a <= location_b`) and the region's node arena order
//! both build on it.

use std::fmt;

/// An immutable, totally ordered 2-D coordinate.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const ORIGIN: Location = Location { x: 0, y: 0 };

    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise translation.
    #[inline]
    pub fn add(self, other: Location) -> Location {
        Location::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference.
    #[inline]
    pub fn subtract(self, other: Location) -> Location {
        Location::new(self.x - other.x, self.y - other.y)
    }
}

impl From<(i32, i32)> for Location {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Location::new(x, y)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
