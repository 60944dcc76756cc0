//! Delivery orders and order generation.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use dn_core::{Location, OrderId, SimRng, Tick, TickInterval};
use dn_region::Region;

// ── Order ────────────────────────────────────────────────────────────────────

/// A confirmed delivery task: pick up at `restaurant`, drop off at
/// `destination`, ideally within `delivery_interval`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    id: OrderId,
    restaurant: Location,
    destination: Location,
    delivery_interval: TickInterval,
    weight: f64,
    actual_delivery_tick: Option<Tick>,
}

impl Order {
    pub fn new(
        id: OrderId,
        restaurant: Location,
        destination: Location,
        delivery_interval: TickInterval,
        weight: f64,
    ) -> Self {
        Self {
            id,
            restaurant,
            destination,
            delivery_interval,
            weight,
            actual_delivery_tick: None,
        }
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn restaurant(&self) -> Location {
        self.restaurant
    }

    #[inline]
    pub fn destination(&self) -> Location {
        self.destination
    }

    #[inline]
    pub fn delivery_interval(&self) -> TickInterval {
        self.delivery_interval
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[inline]
    pub fn actual_delivery_tick(&self) -> Option<Tick> {
        self.actual_delivery_tick
    }

    #[inline]
    pub fn is_delivered(&self) -> bool {
        self.actual_delivery_tick.is_some()
    }

    /// How far outside the delivery window this order actually arrived.
    /// `None` until delivered; `Some(0)` for an in-window delivery.
    pub fn ticks_off(&self) -> Option<u64> {
        self.actual_delivery_tick
            .map(|t| self.delivery_interval.ticks_off(t))
    }

    pub(crate) fn mark_delivered(&mut self, tick: Tick) {
        self.actual_delivery_tick = Some(tick);
    }
}

// ── OrderGenerator ───────────────────────────────────────────────────────────

/// Produces the orders that appear at a given tick.
///
/// Implementations must be deterministic per tick: repeated calls with the
/// same tick return equal orders, so a reset-and-replay run observes the
/// exact order stream of the original run.
pub trait OrderGenerator {
    fn generate(&mut self, tick: Tick) -> Vec<Order>;
}

// ── UniformOrderGenerator ────────────────────────────────────────────────────

/// Seeded random order source: uniformly chosen restaurant and neighborhood
/// pairs, uniform weights, fixed-length delivery windows.
///
/// Orders are generated lazily tick by tick and memoized, so queries are
/// deterministic regardless of how often a tick is replayed.  Create via
/// [`UniformOrderGenerator::builder`].
pub struct UniformOrderGenerator {
    region: Arc<Region>,
    rng: SimRng,
    max_orders_per_tick: usize,
    delivery_window: u64,
    max_weight: f64,
    last_tick: Tick,
    next_id: u32,
    /// Ticks `..=generated_through` are memoized.
    generated_through: Option<Tick>,
    memo: FxHashMap<Tick, Vec<Order>>,
}

impl UniformOrderGenerator {
    pub fn builder(region: Arc<Region>) -> UniformOrderGeneratorBuilder {
        UniformOrderGeneratorBuilder {
            region,
            seed: 0,
            max_orders_per_tick: 2,
            delivery_window: 20,
            max_weight: 1.0,
            last_tick: Tick(100),
        }
    }

    /// Generate (and memoize) orders for every tick up to and including
    /// `tick`, in tick order, so the RNG stream is consumed identically no
    /// matter which tick is asked for first.
    fn fill_through(&mut self, tick: Tick) {
        let start = match self.generated_through {
            Some(done) if done >= tick => return,
            Some(done) => done + 1,
            None => Tick::ZERO,
        };

        let restaurants: Vec<Location> = self
            .region
            .restaurants()
            .map(|(_, n)| n.location())
            .collect();
        let neighborhoods: Vec<Location> = self
            .region
            .neighborhoods()
            .map(|(_, n)| n.location())
            .collect();

        let mut t = start;
        while t <= tick {
            let mut orders = Vec::new();
            if t <= self.last_tick && !restaurants.is_empty() && !neighborhoods.is_empty() {
                let count = self.rng.gen_range(0..=self.max_orders_per_tick);
                for _ in 0..count {
                    let restaurant = *self.rng.choose(&restaurants).unwrap();
                    let destination = *self.rng.choose(&neighborhoods).unwrap();
                    let weight = self.rng.gen_range(0.0..=self.max_weight);
                    let interval = TickInterval::new(t, t + self.delivery_window)
                        .expect("window end >= start by construction");
                    let id = OrderId(self.next_id);
                    self.next_id += 1;
                    orders.push(Order::new(id, restaurant, destination, interval, weight));
                }
            }
            self.memo.insert(t, orders);
            t = t + 1;
        }
        self.generated_through = Some(tick);
    }
}

impl OrderGenerator for UniformOrderGenerator {
    fn generate(&mut self, tick: Tick) -> Vec<Order> {
        self.fill_through(tick);
        self.memo.get(&tick).cloned().unwrap_or_default()
    }
}

/// Builder for [`UniformOrderGenerator`].
///
/// | Method                  | Default    |
/// |-------------------------|------------|
/// | `.seed(u64)`            | 0          |
/// | `.max_orders_per_tick`  | 2          |
/// | `.delivery_window`      | 20 ticks   |
/// | `.max_weight`           | 1.0        |
/// | `.last_tick`            | T100       |
pub struct UniformOrderGeneratorBuilder {
    region: Arc<Region>,
    seed: u64,
    max_orders_per_tick: usize,
    delivery_window: u64,
    max_weight: f64,
    last_tick: Tick,
}

impl UniformOrderGeneratorBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Upper bound on orders per tick (the count is uniform in `0..=max`).
    pub fn max_orders_per_tick(mut self, max: usize) -> Self {
        self.max_orders_per_tick = max;
        self
    }

    /// Length of each order's delivery window, in ticks from its creation.
    pub fn delivery_window(mut self, ticks: u64) -> Self {
        self.delivery_window = ticks;
        self
    }

    pub fn max_weight(mut self, weight: f64) -> Self {
        self.max_weight = weight;
        self
    }

    /// No orders are generated after this tick.
    pub fn last_tick(mut self, tick: Tick) -> Self {
        self.last_tick = tick;
        self
    }

    pub fn build(self) -> UniformOrderGenerator {
        UniformOrderGenerator {
            region: self.region,
            rng: SimRng::new(self.seed),
            max_orders_per_tick: self.max_orders_per_tick,
            delivery_window: self.delivery_window,
            max_weight: self.max_weight,
            last_tick: self.last_tick,
            next_id: 0,
            generated_through: None,
            memo: FxHashMap::default(),
        }
    }
}
