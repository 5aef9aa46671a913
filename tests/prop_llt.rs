//! Property-based tests for the load transfer model.
//!
//! Covers: weight conservation, front/rear additivity, ARB share bounds,
//! comparison antisymmetry and the symmetric-spring wheel rate identity.

use llt_server::llt::stiffness::{roll_stiffness, FrontAxleSprings, RearAxleSprings};
use llt_server::llt::{Axle, Corner, CornerWeights};
use llt_server::{Vehicle, VehicleConfig};
use proptest::prelude::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

prop_compose! {
    fn corner_weights()(
        lf in 300.0f64..1200.0,
        rf in 300.0f64..1200.0,
        lr in 300.0f64..1200.0,
        rr in 300.0f64..1200.0,
    ) -> CornerWeights {
        CornerWeights::new(lf, rf, lr, rr)
    }
}

prop_compose! {
    fn vehicle_config()(
        weights in corner_weights(),
        lateral in -3.0f64..3.0,
        cg in 0.8f64..2.0,
        track_front in 4.5f64..6.5,
        track_rear in 4.5f64..6.5,
        spring_left in 100.0f64..800.0,
        spring_right in 100.0f64..800.0,
        spring_rear in 100.0f64..800.0,
        rear_mr in 0.5f64..1.0,
        od in 0.8f64..1.5,
        wall in 0.05f64..0.3,
    ) -> VehicleConfig {
        let mut cfg = VehicleConfig::reference();
        cfg.static_corner_weights = weights;
        cfg.lateral_acceleration_g = lateral;
        cfg.cg_height = cg;
        cfg.track_width_front = track_front;
        cfg.track_width_rear = track_rear;
        cfg.suspension_front.spring_rate_left = spring_left;
        cfg.suspension_front.spring_rate_right = spring_right;
        cfg.suspension_front.arb.outer_diameter = od;
        cfg.suspension_front.arb.inner_diameter = od - wall;
        cfg.suspension_rear.spring_rate = spring_rear;
        cfg.suspension_rear.motion_ratio = rear_mr;
        cfg
    }
}

// ── Load transfer invariants ─────────────────────────────────────────

proptest! {
    /// Dynamic corner weights always sum to the static total.
    #[test]
    fn corner_weights_are_conserved(cfg in vehicle_config()) {
        let mut car = Vehicle::new(cfg).unwrap();
        let dynamic = car.dynamic_corner_weights().unwrap();
        prop_assert!(close(dynamic.total(), cfg.total_weight()));
    }

    /// Front + rear LLT equals the total, and the total follows W * a * h / t_avg.
    #[test]
    fn axle_transfers_add_up(cfg in vehicle_config()) {
        let mut car = Vehicle::new(cfg).unwrap();
        let llt = car.derived().unwrap().load_transfer;

        prop_assert!(close(llt.front + llt.rear, llt.total));
        let avg_track = (cfg.track_width_front + cfg.track_width_rear) / 2.0;
        let expected = cfg.total_weight() * cfg.lateral_acceleration_g * cfg.cg_height / avg_track;
        prop_assert!(close(llt.total, expected));
    }

    /// Each side of an axle moves by half the axle transfer, in opposite directions.
    #[test]
    fn axle_weights_do_not_change(cfg in vehicle_config()) {
        let mut car = Vehicle::new(cfg).unwrap();
        let dynamic = car.dynamic_corner_weights().unwrap();
        for axle in Axle::ALL {
            prop_assert!(close(dynamic.axle(axle), cfg.static_corner_weights.axle(axle)));
        }
    }

    /// Flipping the turn direction mirrors the corner deltas.
    #[test]
    fn turn_direction_mirrors(cfg in vehicle_config()) {
        let mut mirrored = cfg;
        mirrored.lateral_acceleration_g = -cfg.lateral_acceleration_g;

        let left = Vehicle::new(cfg).unwrap().dynamic_corner_weights().unwrap();
        let right = Vehicle::new(mirrored).unwrap().dynamic_corner_weights().unwrap();
        for corner in Corner::ALL {
            let s = cfg.static_corner_weights[corner];
            prop_assert!(close(left[corner] - s, s - right[corner]));
        }
    }

    /// The ARB share of front roll stiffness is a percentage.
    #[test]
    fn arb_share_is_bounded(cfg in vehicle_config()) {
        let mut car = Vehicle::new(cfg).unwrap();
        let rs = car.derived().unwrap().roll_stiffness;
        prop_assert!((0.0..=100.0).contains(&rs.arb_percentage));
        prop_assert!(close(rs.front, rs.front_spring_roll_stiffness + rs.front_arb_roll_stiffness));
    }

    /// Equal springs and motion ratios give equal wheel rates.
    #[test]
    fn symmetric_springs_give_symmetric_rates(
        spring in 50.0f64..1000.0,
        mr in 0.3f64..1.2,
        track in 4.0f64..7.0,
    ) {
        let rs = roll_stiffness(
            &FrontAxleSprings {
                spring_rate_left: spring,
                spring_rate_right: spring,
                motion_ratio_left: mr,
                motion_ratio_right: mr,
                arb_rate: 0.0,
                track_width: track,
            },
            &RearAxleSprings { spring_rate: spring, motion_ratio: mr, track_width: track },
        )
        .unwrap();

        prop_assert_eq!(rs.wheel_rate_left, rs.wheel_rate_right);
        prop_assert!(close(rs.front_wheel_rate_avg, spring * mr * mr));
        prop_assert_eq!(rs.arb_percentage, 0.0);
        prop_assert!(close(rs.front, rs.rear));
    }
}

// ── Comparison ───────────────────────────────────────────────────────

proptest! {
    /// compare(a, b) and compare(b, a) report opposite differences.
    #[test]
    fn comparison_is_antisymmetric(a in vehicle_config(), b in vehicle_config()) {
        let mut va = Vehicle::new(a).unwrap();
        let mut vb = Vehicle::new(b).unwrap();

        let ab = va.compare_to(&mut vb).unwrap();
        let ba = vb.compare_to(&mut va).unwrap();

        for corner in Corner::ALL {
            prop_assert!(close(ab.corner(corner).difference, -ba.corner(corner).difference));
        }
        for axle in Axle::ALL {
            prop_assert!(close(ab.axle(axle).difference, -ba.axle(axle).difference));
        }
    }
}
