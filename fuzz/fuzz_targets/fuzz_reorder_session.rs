#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reorder_core::{Point, RowLayout};
use reorder_harness::{DragDriver, VecListHost};
use reorder_list::QueuedInput;

#[derive(Debug, Arbitrary)]
enum Op {
    Press(i16),
    Move(i16),
    Release,
    PointerCancel,
    Cancel,
    ForceCancel,
    Wait(u16),
    Tick(u8),
    Scroll(i16),
    Disable(bool),
    PostEnd,
    PostMove(i16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    heights: Vec<u8>,
    viewport: u16,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let rows: Vec<(u16, f32)> = input
        .heights
        .iter()
        .take(64)
        .enumerate()
        .map(|(i, h)| (i as u16, f32::from(*h % 113) + 8.0))
        .collect();
    let expected = {
        let mut ids: Vec<u16> = rows.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids
    };
    let count = rows.len();
    let viewport = f32::from(input.viewport % 2_000) + 60.0;
    let mut driver = DragDriver::new(VecListHost::with_heights(rows, viewport));

    for op in input.ops.iter().take(512) {
        match *op {
            Op::Press(y) => {
                driver.press(f32::from(y));
            }
            Op::Move(y) => {
                driver.move_to(f32::from(y));
            }
            Op::Release => {
                driver.release();
            }
            Op::PointerCancel => {
                driver.pointer_cancel();
            }
            Op::Cancel => {
                driver.cancel();
            }
            Op::ForceCancel => {
                driver.session_mut().force_cancel();
            }
            Op::Wait(ms) => {
                driver.hold(u64::from(ms % 1_000));
            }
            Op::Tick(ms) => {
                driver.tick(u64::from(ms));
            }
            Op::Scroll(dy) => {
                driver.host_mut().scroll_by(f32::from(dy));
            }
            Op::Disable(off) => {
                driver.session_mut().set_enabled(!off);
            }
            Op::PostEnd => driver.session().input_queue().push(QueuedInput::End),
            Op::PostMove(y) => {
                let at = driver.clock().now();
                driver.session().input_queue().push(QueuedInput::Move {
                    position: Point::new(100.0, f32::from(y)),
                    at,
                });
            }
        }

        let mut ids = driver.host().rows().to_vec();
        ids.sort_unstable();
        assert_eq!(ids, expected, "rows are no longer a permutation");
        assert_eq!(driver.host().row_count(), count);

        let offset = driver.host().content_offset().y;
        assert!(offset >= 0.0 && offset <= driver.host().max_scroll_y());

        match driver.session().drag() {
            Some(drag) => assert!(drag.dragged_index() < count),
            None => {
                assert!(!driver.ticks().is_active(), "tick lease leaked");
                assert_eq!(driver.indicators().outstanding(), 0);
            }
        }
        assert_eq!(driver.host().moves().len(), driver.delegate().move_count());
    }
});
