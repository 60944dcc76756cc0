//! Unit tests for dn-rating, driving real single-road simulations.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use dn_core::{Location, OrderId, Tick, TickInterval};
    use dn_region::{DijkstraPathCalculator, RegionBuilder};
    use dn_sim::{Order, Rater, Simulation, VehicleManager};

    pub const R: Location = Location { x: 0, y: 0 };
    pub const H: Location = Location { x: 10, y: 0 };

    /// One restaurant, one neighborhood, one 5-tick edge: a vehicle that
    /// departs at T0 delivers at T5.
    pub fn delivery_run(window: TickInterval, rater: Box<dyn Rater>) -> f64 {
        let mut b = RegionBuilder::new();
        b.add_restaurant("Pizza Pronto", R);
        b.add_neighborhood("Old Town", H);
        b.add_edge("Main St", R, H, 5);
        let region = Arc::new(b.build().unwrap());

        let mut manager = VehicleManager::new(region, Box::new(DijkstraPathCalculator));
        let vehicle = manager.add_vehicle(R, 1.0).unwrap();
        manager
            .load_order(vehicle, Order::new(OrderId(0), R, H, window, 0.5), Tick(0))
            .unwrap();
        manager.move_queued(vehicle, H).unwrap();

        let mut sim = Simulation::new(manager).with_rater(rater);
        sim.run_ticks(6).unwrap();
        sim.scores()[0]
    }

    pub fn window(start: u64, end: u64) -> TickInterval {
        TickInterval::new(Tick(start), Tick(end)).unwrap()
    }
}

// ── InTimeRater ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod in_time {
    use super::helpers::{delivery_run, window};
    use crate::{InTimeRater, RatingError};

    #[test]
    fn zero_max_ticks_off_rejected() {
        let err = InTimeRater::builder().max_ticks_off(0).build().unwrap_err();
        assert_eq!(err, RatingError::NonPositiveMaxTicksOff);
    }

    #[test]
    fn in_window_delivery_scores_full() {
        let rater = InTimeRater::builder().build().unwrap();
        // Delivered at T5, window [0, 50]: no penalty.
        let score = delivery_run(window(0, 50), Box::new(rater));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn late_delivery_penalized() {
        let rater = InTimeRater::builder()
            .ignored_ticks_off(0)
            .max_ticks_off(10)
            .build()
            .unwrap();
        // Delivered at T5, window [0, 2]: 3 ticks late of a 10-tick cap.
        let score = delivery_run(window(0, 2), Box::new(rater));
        assert!((score - 0.7).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn tolerance_absorbs_small_misses() {
        let rater = InTimeRater::builder()
            .ignored_ticks_off(5)
            .max_ticks_off(25)
            .build()
            .unwrap();
        // 3 ticks late is within the 5-tick tolerance.
        let score = delivery_run(window(0, 2), Box::new(rater));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn penalty_is_capped() {
        let rater = InTimeRater::builder()
            .ignored_ticks_off(0)
            .max_ticks_off(3)
            .build()
            .unwrap();
        // 5 ticks late, capped at 3 of 3: the worst possible score.
        let score = delivery_run(window(0, 0), Box::new(rater));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn no_deliveries_scores_zero() {
        use dn_core::Tick;
        use dn_sim::Rater;

        let mut rater = InTimeRater::builder().build().unwrap();
        rater.on_tick(&[], Tick(0));
        assert_eq!(rater.score(), 0.0);
    }
}

// ── AmountDeliveredRater ─────────────────────────────────────────────────────

#[cfg(test)]
mod amount_delivered {
    use std::sync::Arc;

    use dn_core::{Location, OrderId, Tick, TickInterval};
    use dn_region::{DijkstraPathCalculator, RegionBuilder};
    use dn_sim::{Order, Rater, Simulation, VehicleManager};

    use crate::AmountDeliveredRater;

    #[test]
    fn nothing_loaded_scores_zero() {
        let rater = AmountDeliveredRater::new();
        assert_eq!(rater.score(), 0.0);
    }

    #[test]
    fn counts_delivered_fraction() {
        let r = Location::new(0, 0);
        let near = Location::new(10, 0);
        let far = Location::new(20, 0);

        let mut b = RegionBuilder::new();
        b.add_restaurant("Pizza Pronto", r);
        b.add_neighborhood("Old Town", near);
        b.add_neighborhood("New Town", far);
        b.add_edge("Main St", r, near, 3);
        b.add_edge("High St", near, far, 3);
        let region = Arc::new(b.build().unwrap());

        let window = TickInterval::new(Tick(0), Tick(50)).unwrap();
        let mut manager = VehicleManager::new(region, Box::new(DijkstraPathCalculator));
        let vehicle = manager.add_vehicle(r, 2.0).unwrap();
        manager
            .load_order(vehicle, Order::new(OrderId(0), r, near, window, 0.5), Tick(0))
            .unwrap();
        manager
            .load_order(vehicle, Order::new(OrderId(1), r, far, window, 0.5), Tick(0))
            .unwrap();
        // Only visit the near neighborhood; the second order rides along
        // undelivered.
        manager.move_queued(vehicle, near).unwrap();

        let mut sim = Simulation::new(manager).with_rater(Box::new(AmountDeliveredRater::new()));
        sim.run_ticks(10).unwrap();
        assert_eq!(sim.scores(), vec![0.5]);
    }
}
