#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use glasstrap_core::{
    FragmentId, PointerId, PointerPosition, ScatterConfig, ScatterGenerator, Transform,
};
use glasstrap_widget::{HostDocument, Lifecycle, ShatterButton, WidgetConfig};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Event {
    Activate,
    Down { fragment: u8, pointer: u8, x: i16, y: i16 },
    Move { fragment: u8, pointer: u8, x: i16, y: i16 },
    Up { fragment: u8, pointer: u8, x: i16, y: i16 },
    Cancel { fragment: u8, pointer: u8 },
    LostCapture { fragment: u8, pointer: u8 },
    Advance { ms: u16 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    fragments: u8,
    seed: u64,
    events: Vec<Event>,
}

fn pos(x: i16, y: i16) -> PointerPosition {
    PointerPosition::new(f32::from(x), f32::from(y))
}

fuzz_target!(|input: Input| {
    // 1..=8 fragments; the extra ids exercise unknown-fragment routing.
    let count = u32::from(input.fragments % 8) + 1;
    let Ok(button) = ShatterButton::mount(HostDocument::complete(count), WidgetConfig::default())
    else {
        return;
    };
    let mut button = button.with_scatter(ScatterGenerator::seeded(ScatterConfig::default(), input.seed));

    for event in input.events.into_iter().take(512) {
        let before = button.lifecycle();
        match event {
            Event::Activate => {
                button.activate();
            }
            Event::Down { fragment, pointer, x, y } => {
                button.pointer_down(FragmentId(u32::from(fragment % 10)), PointerId(u32::from(pointer)), pos(x, y));
            }
            Event::Move { fragment, pointer, x, y } => {
                button.pointer_move(FragmentId(u32::from(fragment % 10)), PointerId(u32::from(pointer)), pos(x, y));
            }
            Event::Up { fragment, pointer, x, y } => {
                button.pointer_up(FragmentId(u32::from(fragment % 10)), PointerId(u32::from(pointer)), pos(x, y));
            }
            Event::Cancel { fragment, pointer } => {
                button.pointer_cancel(FragmentId(u32::from(fragment % 10)), PointerId(u32::from(pointer)));
            }
            Event::LostCapture { fragment, pointer } => {
                button.lost_pointer_capture(FragmentId(u32::from(fragment % 10)), PointerId(u32::from(pointer)));
            }
            Event::Advance { ms } => button.advance(Duration::from_millis(u64::from(ms))),
        }

        // Post-conditions that must always hold:
        assert!(button.final_action_runs() <= 1, "final action ran twice");
        if before == Lifecycle::PuzzleActive {
            assert_ne!(button.lifecycle(), Lifecycle::Ended, "ended without a solve");
            assert_ne!(button.lifecycle(), Lifecycle::Armed, "re-armed mid puzzle");
        }
        for controller in button.coordinator().fragments() {
            if controller.fragment().is_placed() {
                assert_eq!(controller.fragment().transform(), Transform::IDENTITY);
            }
        }
        let _ = button.take_commands();
        let _ = button.take_logs();
    }
});
