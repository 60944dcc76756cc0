//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced from outside:
//! one call to the vehicle manager's `tick` advances the whole simulation by
//! exactly one logical unit.  Using an integer tick as the canonical time
//! unit means all schedule arithmetic is exact (no floating-point drift) and
//! comparisons are O(1).
//!
//! `TickInterval` is the closed `[start, end]` delivery window attached to
//! an order.  Construction with `end < start` is rejected — malformed
//! windows are a build-time error, never a silently empty interval.

use std::fmt;

use thiserror::Error;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at one tick per simulated second a u64 lasts ~585 billion
/// years, so overflow is not a practical concern.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickInterval ─────────────────────────────────────────────────────────────

/// Error returned when an interval's end precedes its start.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid tick interval: end {end} precedes start {start}")]
pub struct InvalidInterval {
    pub start: Tick,
    pub end: Tick,
}

/// A closed interval of ticks, `start <= end` by construction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickInterval {
    start: Tick,
    end: Tick,
}

impl TickInterval {
    pub fn new(start: Tick, end: Tick) -> Result<Self, InvalidInterval> {
        if end < start {
            return Err(InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(self) -> Tick {
        self.start
    }

    #[inline]
    pub fn end(self) -> Tick {
        self.end
    }

    /// Number of ticks spanned, inclusive of both endpoints' gap.
    #[inline]
    pub fn duration(self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn contains(self, tick: Tick) -> bool {
        self.start <= tick && tick <= self.end
    }

    /// Distance of `actual` from the interval, in ticks: 0 inside, otherwise
    /// how early (before `start`) or late (after `end`) it falls.
    pub fn ticks_off(self, actual: Tick) -> u64 {
        if actual < self.start {
            self.start - actual
        } else if actual > self.end {
            actual - self.end
        } else {
            0
        }
    }
}

impl fmt::Display for TickInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
