use proptest::prelude::*;
use zone_geo::{Coordinate, angular_difference, bearing, destination, distance};

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-80.0f64..80.0, -180.0f64..180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
}

proptest! {
    #[test]
    fn offset_then_distance(
        origin in coordinate(),
        d in 0.0f64..2_000_000.0,
        h in -720.0f64..720.0,
    ) {
        let target = destination(origin, d, h);
        let measured = distance(origin, target);
        prop_assert!((measured - d).abs() <= 1e-3 * d.max(1.0), "d={d} measured={measured}");
    }

    #[test]
    fn offset_then_bearing(
        origin in coordinate(),
        d in 1.0f64..2_000_000.0,
        h in -720.0f64..720.0,
    ) {
        let target = destination(origin, d, h);
        let measured = bearing(origin, target);
        prop_assert!((0.0..360.0).contains(&measured));
        prop_assert!(angular_difference(measured, h) <= 1e-3, "h={h} measured={measured}");
    }

    #[test]
    fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
        let ab = distance(a, b);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - distance(b, a)).abs() <= 1e-6);
    }
}
