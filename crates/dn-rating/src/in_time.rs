//! Punctuality rater.

use dn_core::Tick;
use dn_sim::{Event, Rater};

use crate::{RatingError, RatingResult};

/// Scores a run by how punctually orders arrived inside their delivery
/// windows.
///
/// Each delivered order contributes a penalty of
/// `min(max_ticks_off, ticks_off - ignored_ticks_off)` ticks (never below
/// zero) against a per-order maximum of `max_ticks_off`.  The score is
///
/// ```text
/// 1 - actual_total / max_total
/// ```
///
/// so a run with every order inside its window (or within the tolerance)
/// scores 1.0, and a run where every order missed by the cap or more
/// scores 0.0.  With no deliveries observed the score is 0.0.
///
/// Create via [`InTimeRater::builder`].
#[derive(Debug)]
pub struct InTimeRater {
    ignored_ticks_off: u64,
    max_ticks_off: u64,
    actual_total: u64,
    max_total: u64,
}

impl InTimeRater {
    pub fn builder() -> InTimeRaterBuilder {
        InTimeRaterBuilder {
            ignored_ticks_off: 5,
            max_ticks_off: 25,
        }
    }
}

impl Rater for InTimeRater {
    fn on_tick(&mut self, events: &[Event], _tick: Tick) {
        for event in events {
            if let Event::OrderDelivered { order, .. } = event {
                let off = order.ticks_off().unwrap_or(0);
                let penalty = off
                    .saturating_sub(self.ignored_ticks_off)
                    .min(self.max_ticks_off);
                self.actual_total += penalty;
                self.max_total += self.max_ticks_off;
            }
        }
    }

    fn score(&self) -> f64 {
        if self.max_total == 0 {
            0.0
        } else {
            1.0 - self.actual_total as f64 / self.max_total as f64
        }
    }
}

/// Builder for [`InTimeRater`].
///
/// | Method                | Default |
/// |-----------------------|---------|
/// | `.ignored_ticks_off`  | 5       |
/// | `.max_ticks_off`      | 25      |
pub struct InTimeRaterBuilder {
    ignored_ticks_off: u64,
    max_ticks_off: u64,
}

impl InTimeRaterBuilder {
    /// Tolerance: this many ticks outside the window cost nothing.
    pub fn ignored_ticks_off(mut self, ticks: u64) -> Self {
        self.ignored_ticks_off = ticks;
        self
    }

    /// Cap on the penalty a single order can accrue.  Must be positive.
    pub fn max_ticks_off(mut self, ticks: u64) -> Self {
        self.max_ticks_off = ticks;
        self
    }

    pub fn build(self) -> RatingResult<InTimeRater> {
        if self.max_ticks_off == 0 {
            return Err(RatingError::NonPositiveMaxTicksOff);
        }
        Ok(InTimeRater {
            ignored_ticks_off: self.ignored_ticks_off,
            max_ticks_off: self.max_ticks_off,
            actual_total: 0,
            max_total: 0,
        })
    }
}
