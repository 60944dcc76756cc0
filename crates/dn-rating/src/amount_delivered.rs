//! Delivery-completion rater.

use dn_core::Tick;
use dn_sim::{Event, Rater};

/// Scores a run by the fraction of loaded orders that reached their
/// neighborhood: `delivered / loaded`, or 0.0 before anything was loaded.
#[derive(Default)]
pub struct AmountDeliveredRater {
    loaded: usize,
    delivered: usize,
}

impl AmountDeliveredRater {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Rater for AmountDeliveredRater {
    fn on_tick(&mut self, events: &[Event], _tick: Tick) {
        for event in events {
            match event {
                Event::OrderLoaded { .. } => self.loaded += 1,
                Event::OrderDelivered { .. } => self.delivered += 1,
                _ => {}
            }
        }
    }

    fn score(&self) -> f64 {
        if self.loaded == 0 {
            0.0
        } else {
            self.delivered as f64 / self.loaded as f64
        }
    }
}
