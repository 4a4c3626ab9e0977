//! Property tests for the interaction gate under arbitrary event streams.
//!
//! Invariants covered:
//! 1. The final action runs at most once.
//! 2. While `PuzzleActive`, an activation neither shatters again nor ends.
//! 3. Every placed fragment sits at the identity transform.
//! 4. The lifecycle only moves forward.
//! 5. No event sequence panics.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use glasstrap_core::{FragmentId, PointerId, PointerPosition, ScatterConfig, ScatterGenerator, Transform};
use glasstrap_widget::{ActivationOutcome, HostDocument, Lifecycle, ShatterButton, WidgetConfig};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Activate,
    Down { fragment: u32, pointer: u32, x: f32, y: f32 },
    Move { fragment: u32, pointer: u32, x: f32, y: f32 },
    Up { fragment: u32, pointer: u32, x: f32, y: f32 },
    Cancel { fragment: u32, pointer: u32 },
    LostCapture { fragment: u32, pointer: u32 },
    Advance { ms: u64 },
    /// Drag a fragment straight home, so solves are actually reachable.
    PlaceHome { fragment: u32 },
}

fn op() -> impl Strategy<Value = Op> {
    let fragment = 0u32..4;
    let pointer = 1u32..4;
    let coord = -300.0f32..300.0;
    prop_oneof![
        Just(Op::Activate),
        (fragment.clone(), pointer.clone(), coord.clone(), coord.clone())
            .prop_map(|(fragment, pointer, x, y)| Op::Down { fragment, pointer, x, y }),
        (fragment.clone(), pointer.clone(), coord.clone(), coord.clone())
            .prop_map(|(fragment, pointer, x, y)| Op::Move { fragment, pointer, x, y }),
        (fragment.clone(), pointer.clone(), coord.clone(), coord)
            .prop_map(|(fragment, pointer, x, y)| Op::Up { fragment, pointer, x, y }),
        (fragment.clone(), pointer.clone())
            .prop_map(|(fragment, pointer)| Op::Cancel { fragment, pointer }),
        (fragment.clone(), pointer).prop_map(|(fragment, pointer)| Op::LostCapture { fragment, pointer }),
        (0u64..600).prop_map(|ms| Op::Advance { ms }),
        fragment.prop_map(|fragment| Op::PlaceHome { fragment }),
    ]
}

const fn rank(lifecycle: Lifecycle) -> u8 {
    match lifecycle {
        Lifecycle::Armed => 0,
        Lifecycle::PuzzleActive => 1,
        Lifecycle::ResolvedPending => 2,
        Lifecycle::ReadyToEnd => 3,
        Lifecycle::Ended => 4,
    }
}

fn place_home(button: &mut ShatterButton, fragment: FragmentId) {
    let Some(offset) = button
        .coordinator()
        .fragment(fragment)
        .map(|c| c.fragment().translation())
    else {
        return;
    };
    let pointer = PointerId(9);
    let home = PointerPosition::new(-offset.x, -offset.y);
    button.pointer_down(fragment, pointer, PointerPosition::new(0.0, 0.0));
    button.pointer_move(fragment, pointer, home);
    button.pointer_up(fragment, pointer, home);
}

proptest! {
    #[test]
    fn gate_invariants_hold(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..80)) {
        let runs = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&runs);
        let mut button = ShatterButton::mount(HostDocument::complete(3), WidgetConfig::default())
            .expect("mount")
            .with_scatter(ScatterGenerator::seeded(ScatterConfig::default(), seed))
            .on_final_action(move || counter.set(counter.get() + 1));

        let mut last_rank = rank(button.lifecycle());
        for op in ops {
            let before = button.lifecycle();
            match op {
                Op::Activate => {
                    let activation = button.activate();
                    if before == Lifecycle::PuzzleActive {
                        prop_assert_eq!(activation.outcome, ActivationOutcome::Inert);
                        prop_assert_eq!(button.lifecycle(), Lifecycle::PuzzleActive);
                    }
                }
                Op::Down { fragment, pointer, x, y } => {
                    button.pointer_down(FragmentId(fragment), PointerId(pointer), PointerPosition::new(x, y));
                }
                Op::Move { fragment, pointer, x, y } => {
                    button.pointer_move(FragmentId(fragment), PointerId(pointer), PointerPosition::new(x, y));
                }
                Op::Up { fragment, pointer, x, y } => {
                    button.pointer_up(FragmentId(fragment), PointerId(pointer), PointerPosition::new(x, y));
                }
                Op::Cancel { fragment, pointer } => {
                    button.pointer_cancel(FragmentId(fragment), PointerId(pointer));
                }
                Op::LostCapture { fragment, pointer } => {
                    button.lost_pointer_capture(FragmentId(fragment), PointerId(pointer));
                }
                Op::Advance { ms } => button.advance(Duration::from_millis(ms)),
                Op::PlaceHome { fragment } => place_home(&mut button, FragmentId(fragment)),
            }

            let now_rank = rank(button.lifecycle());
            prop_assert!(now_rank >= last_rank, "lifecycle went backwards: {:?}", button.lifecycle());
            last_rank = now_rank;

            prop_assert!(runs.get() <= 1);
            for controller in button.coordinator().fragments() {
                if controller.fragment().is_placed() {
                    prop_assert_eq!(controller.fragment().transform(), Transform::IDENTITY);
                    prop_assert!(!controller.is_dragging());
                }
            }
            if button.lifecycle() == Lifecycle::Ended {
                prop_assert_eq!(runs.get(), 1);
            }
        }
    }
}
