//! Stepping runner: drives the manager tick by tick and fans the event
//! stream out to raters.

use dn_core::Tick;

use crate::{Event, SimResult, VehicleManager};

// ── Rater ────────────────────────────────────────────────────────────────────

/// Consumer of the per-tick event stream, producing a score for the run.
///
/// A rater is a pure function of the history it has observed: it receives
/// every tick's drained events exactly once and never reaches back into
/// manager state.
pub trait Rater {
    /// Called once per tick with exactly that tick's events.
    fn on_tick(&mut self, events: &[Event], tick: Tick);

    /// The score over everything observed so far.
    fn score(&self) -> f64;
}

// ── Simulation ───────────────────────────────────────────────────────────────

/// Owns a [`VehicleManager`] and a set of raters, and advances them in
/// lockstep, one discrete tick per [`step`](Self::step).
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = Simulation::new(manager).with_rater(Box::new(rater));
/// sim.run_ticks(100)?;
/// println!("scores: {:?}", sim.scores());
/// ```
pub struct Simulation {
    manager: VehicleManager,
    raters: Vec<Box<dyn Rater>>,
    current: Tick,
}

impl Simulation {
    pub fn new(manager: VehicleManager) -> Self {
        Self {
            manager,
            raters: Vec::new(),
            current: Tick::ZERO,
        }
    }

    /// Attach a rater.  Raters observe every tick stepped from now on.
    pub fn with_rater(mut self, rater: Box<dyn Rater>) -> Self {
        self.raters.push(rater);
        self
    }

    pub fn manager(&self) -> &VehicleManager {
        &self.manager
    }

    /// Mutable manager access, for adding vehicles or loading orders
    /// between ticks.
    pub fn manager_mut(&mut self) -> &mut VehicleManager {
        &mut self.manager
    }

    /// The tick the next [`step`](Self::step) will execute.
    pub fn current_tick(&self) -> Tick {
        self.current
    }

    /// Advance one tick: tick the manager, feed the drained events to every
    /// rater, return them.
    pub fn step(&mut self) -> SimResult<Vec<Event>> {
        let now = self.current;
        let events = self.manager.tick(now)?;
        for rater in &mut self.raters {
            rater.on_tick(&events, now);
        }
        self.current = now + 1;
        Ok(events)
    }

    /// Step `n` ticks.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Current score of every attached rater, in attachment order.
    pub fn scores(&self) -> Vec<f64> {
        self.raters.iter().map(|r| r.score()).collect()
    }
}
