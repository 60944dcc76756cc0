//! Unit tests for dn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeIndex, NodeIndex, OrderId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = VehicleId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VehicleId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(VehicleId(0) < VehicleId(1));
        assert!(NodeIndex(100) > NodeIndex(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeIndex::INVALID.0, u32::MAX);
        assert_eq!(EdgeIndex::INVALID.0, u32::MAX);
        assert_eq!(OrderId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
    }
}

#[cfg(test)]
mod location {
    use crate::Location;

    #[test]
    fn lexicographic_order() {
        // x dominates, y breaks ties
        assert!(Location::new(0, 9) < Location::new(1, 0));
        assert!(Location::new(2, 1) < Location::new(2, 5));
        assert_eq!(Location::new(3, 3), Location::new(3, 3));
    }

    #[test]
    fn add_subtract() {
        let a = Location::new(2, -3);
        let b = Location::new(1, 1);
        assert_eq!(a.add(b), Location::new(3, -2));
        assert_eq!(a.subtract(b), Location::new(1, -4));
    }

    #[test]
    fn display() {
        assert_eq!(Location::new(-4, 12).to_string(), "(-4, 12)");
        assert_eq!(Location::ORIGIN.to_string(), "(0, 0)");
    }

    #[test]
    fn from_tuple() {
        let l: Location = (5, 6).into();
        assert_eq!(l, Location::new(5, 6));
    }
}

#[cfg(test)]
mod time {
    use crate::{Tick, TickInterval};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5);
    }

    #[test]
    fn tick_display() {
        assert_eq!(Tick(42).to_string(), "T42");
    }

    #[test]
    fn interval_contains() {
        let w = TickInterval::new(Tick(5), Tick(10)).unwrap();
        assert!(!w.contains(Tick(4)));
        assert!(w.contains(Tick(5)));
        assert!(w.contains(Tick(10)));
        assert!(!w.contains(Tick(11)));
        assert_eq!(w.duration(), 5);
    }

    #[test]
    fn interval_rejects_reversed_bounds() {
        assert!(TickInterval::new(Tick(10), Tick(5)).is_err());
        // degenerate single-tick window is fine
        assert!(TickInterval::new(Tick(5), Tick(5)).is_ok());
    }

    #[test]
    fn ticks_off_measures_distance_outside_window() {
        let w = TickInterval::new(Tick(10), Tick(20)).unwrap();
        assert_eq!(w.ticks_off(Tick(15)), 0); // inside
        assert_eq!(w.ticks_off(Tick(10)), 0); // boundary
        assert_eq!(w.ticks_off(Tick(7)), 3); // early
        assert_eq!(w.ticks_off(Tick(26)), 6); // late
    }
}

#[cfg(test)]
mod distance {
    use crate::{
        ChebyshevDistance, DistanceCalculator, EuclideanDistance, Location, ManhattanDistance,
    };

    const A: Location = Location { x: 0, y: 0 };
    const B: Location = Location { x: 3, y: 4 };

    #[test]
    fn euclidean_is_straight_line() {
        assert!((EuclideanDistance.distance(A, B) - 5.0).abs() < 1e-12);
        assert_eq!(EuclideanDistance.distance(A, A), 0.0);
    }

    #[test]
    fn manhattan_sums_components() {
        assert_eq!(ManhattanDistance.distance(A, B), 7.0);
    }

    #[test]
    fn chebyshev_takes_max_component() {
        assert_eq!(ChebyshevDistance.distance(A, B), 4.0);
    }

    #[test]
    fn symmetric() {
        assert_eq!(
            EuclideanDistance.distance(A, B),
            EuclideanDistance.distance(B, A)
        );
        assert_eq!(
            ManhattanDistance.distance(A, B),
            ManhattanDistance.distance(B, A)
        );
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: u64 = r1.gen_range(0..u64::MAX);
            let b: u64 = r2.gen_range(0..u64::MAX);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f64..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[7]), Some(&7));
    }
}
