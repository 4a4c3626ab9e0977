//! Property tests for the fragment drag controller and scatter generator.
//!
//! Invariants covered:
//! 1. After any release, `placed` holds iff the fragment sits exactly at the
//!    identity transform, and that happens iff the release distance was
//!    within the snap threshold.
//! 2. No move sequence without a release ever sets `placed`.
//! 3. Foreign pointers never move a fragment.
//! 4. Scatter samples stay inside the configured bands for every seed.

use glasstrap_core::{
    DragConfig, DragOutcome, FragmentController, FragmentId, Offset, PointerId, PointerPosition,
    ScatterConfig, ScatterGenerator, Transform,
};
use proptest::prelude::*;

const OWNER: PointerId = PointerId(11);
const INTRUDER: PointerId = PointerId(12);

fn coord() -> impl Strategy<Value = f32> {
    -400.0f32..400.0
}

fn moves() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((coord(), coord()), 0..24)
}

fn controller_at(x: f32, y: f32) -> FragmentController {
    let mut c = FragmentController::new(FragmentId(0), DragConfig::default());
    c.scatter_to(Transform::new(x, y, 30.0));
    c
}

proptest! {
    #[test]
    fn placed_iff_released_within_threshold(
        start in (coord(), coord()),
        path in moves(),
        release in (coord(), coord()),
        up in (coord(), coord()),
    ) {
        let mut c = controller_at(start.0, start.1);
        let press = PointerPosition::new(0.0, 0.0);
        prop_assert!(c.pointer_down(true, OWNER, press).accepted());
        for (x, y) in path {
            c.pointer_move(OWNER, PointerPosition::new(x, y));
            prop_assert!(!c.fragment().is_placed());
        }

        let expected = Offset::new(start.0 + release.0, start.1 + release.1);
        let within = expected.distance_from_home() <= DragConfig::default().snap_threshold;
        c.pointer_move(OWNER, PointerPosition::new(release.0, release.1));
        prop_assert!(!c.fragment().is_placed());
        let d = c.pointer_up(OWNER, PointerPosition::new(up.0, up.1));

        prop_assert_eq!(d.snapped(), within);
        prop_assert_eq!(c.fragment().is_placed(), within);
        if within {
            prop_assert_eq!(c.fragment().transform(), Transform::IDENTITY);
        } else {
            prop_assert_eq!(d.outcome, DragOutcome::Dropped);
            prop_assert_eq!(c.fragment().translation(), expected);
        }
        prop_assert!(!c.is_dragging());
    }

    #[test]
    fn intruder_never_moves_fragment(start in (coord(), coord()), path in moves()) {
        let mut c = controller_at(start.0, start.1);
        c.pointer_down(true, OWNER, PointerPosition::new(0.0, 0.0));
        for (x, y) in path {
            c.pointer_move(INTRUDER, PointerPosition::new(x, y));
            c.pointer_up(INTRUDER, PointerPosition::new(x, y));
            c.pointer_cancel(INTRUDER);
        }
        prop_assert_eq!(c.fragment().translation(), Offset::new(start.0, start.1));
        prop_assert_eq!(c.active_pointer_id(), Some(OWNER));
    }

    #[test]
    fn scatter_respects_bands(seed in any::<u64>()) {
        let config = ScatterConfig::default();
        let mut generator = ScatterGenerator::seeded(config, seed);
        for _ in 0..8 {
            let t = generator.sample();
            let d = t.offset.distance_from_home();
            prop_assert!(d >= config.min_distance - 0.01 && d <= config.max_distance + 0.01);
            prop_assert!(t.rotation_deg.abs() <= config.max_rotation_deg);
            prop_assert!(t.offset.distance_from_home() > DragConfig::default().snap_threshold);
        }
    }
}
