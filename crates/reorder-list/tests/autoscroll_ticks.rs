#![forbid(unsafe_code)]

//! Edge autoscroll driven through the session: activation, time-based scroll
//! distance, and release of the tick lease on every exit path.
//!
//! Twenty 44pt rows in a 480pt viewport: content 880, max offset 400.
//! Row 9 spans 396..440, so grabbing it at its center leaves its bottom edge
//! 40pt above the viewport bottom (rate = (44 - 40) * 12 = 48 pt/s).

use reorder_harness::DragDriver;
use reorder_list::{
    AutoscrollConfig, AutoscrollState, MoveCommand, NoopReason, ReorderConfig, ReorderEffect,
    ReorderError, RowLayout, ScrollDirection,
};
use web_time::Duration;

const ROWS: &str = "ABCDEFGHIJKLMNOPQRST";

fn tall() -> DragDriver<char> {
    DragDriver::letters(ROWS)
}

fn grab_row_nine(driver: &mut DragDriver<char>) {
    let effects = driver.long_press(418.0);
    assert_eq!(
        effects,
        vec![
            ReorderEffect::DragStarted { index: 9 },
            ReorderEffect::AutoscrollChanged(AutoscrollState {
                direction: ScrollDirection::Down,
                rate: 48.0,
                active: true,
            }),
        ]
    );
}

fn offset(driver: &DragDriver<char>) -> f32 {
    driver.host().content_offset().y
}

// ============================================================================
// Activation
// ============================================================================

#[test]
fn entering_edge_zone_acquires_lease() {
    let mut driver = tall();
    grab_row_nine(&mut driver);
    assert!(driver.ticks().is_active());
    assert_eq!(driver.ticks().interval(), Some(Duration::from_millis(16)));
    assert!(driver.session().wants_tick());
}

#[test]
fn leaving_edge_zone_releases_lease() {
    let mut driver = tall();
    grab_row_nine(&mut driver);
    let effects = driver.move_to(200.0);
    assert_eq!(
        effects,
        vec![
            ReorderEffect::Moved(MoveCommand::new(9, 5)),
            ReorderEffect::AutoscrollChanged(AutoscrollState::IDLE),
        ]
    );
    assert!(!driver.ticks().is_active());
    assert_eq!(
        driver.tick(16),
        vec![ReorderEffect::Noop {
            reason: NoopReason::NoAutoscroll
        }]
    );
}

#[test]
fn disabled_autoscroll_never_leases() {
    let config = ReorderConfig {
        autoscroll: AutoscrollConfig {
            enabled: false,
            ..AutoscrollConfig::default()
        },
        ..ReorderConfig::default()
    };
    let mut driver = DragDriver::with_config(config, reorder_harness::VecListHost::letters(ROWS))
        .unwrap();
    assert_eq!(
        driver.long_press(418.0),
        vec![ReorderEffect::DragStarted { index: 9 }]
    );
    assert_eq!(driver.ticks().leases_acquired(), 0);
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn tick_scrolls_rate_times_elapsed_then_resolves() {
    let mut driver = tall();
    grab_row_nine(&mut driver);
    let effects = driver.tick(1_000);
    assert_eq!(
        effects,
        vec![
            ReorderEffect::Scrolled {
                requested: 48.0,
                actual: 48.0
            },
            ReorderEffect::Moved(MoveCommand::new(9, 10)),
        ]
    );
    assert_eq!(offset(&driver), 48.0);
    assert_eq!(driver.session().drag().unwrap().current_center_y(), 466.0);
}

#[test]
fn scroll_distance_is_independent_of_tick_spacing() {
    let mut fine = tall();
    grab_row_nine(&mut fine);
    for _ in 0..10 {
        fine.tick(16);
    }

    let mut coarse = tall();
    grab_row_nine(&mut coarse);
    for _ in 0..4 {
        coarse.tick(40);
    }

    let expected = 48.0 * 0.16;
    assert!((offset(&fine) - expected).abs() < 1e-3, "fine: {}", offset(&fine));
    assert!(
        (offset(&coarse) - expected).abs() < 1e-3,
        "coarse: {}",
        offset(&coarse)
    );
}

#[test]
fn autoscroll_walks_rows_one_at_a_time_and_stops_at_end() {
    let mut driver = tall();
    grab_row_nine(&mut driver);
    driver.run_frames(1_000, 16);

    assert_eq!(offset(&driver), 400.0);
    let moves = driver.host().moves();
    assert_eq!(moves.len(), 9);
    assert!(moves.iter().all(|m| m.distance() == 1));
    assert_eq!(driver.session().drag().unwrap().dragged_index(), 18);
    assert_eq!(driver.order().chars().nth(18), Some('J'));

    // Pinned at the end: ticks keep arriving but scroll nothing.
    let effects = driver.tick(16);
    assert!(effects.is_empty(), "unexpected effects: {effects:?}");
}

#[test]
fn upward_scroll_clamps_at_top() {
    let mut driver = tall();
    driver.host_mut().set_content_offset(200.0);
    // Viewport y 10 is content 210: row 4 (176..220), 24pt above the top.
    let effects = driver.long_press(10.0);
    assert_eq!(
        effects,
        vec![
            ReorderEffect::DragStarted { index: 4 },
            ReorderEffect::AutoscrollChanged(AutoscrollState {
                direction: ScrollDirection::Up,
                rate: 816.0,
                active: true,
            }),
        ]
    );

    assert_eq!(
        driver.tick(1_000),
        vec![
            ReorderEffect::Scrolled {
                requested: -200.0,
                actual: -200.0
            },
            ReorderEffect::Moved(MoveCommand::new(4, 0)),
        ]
    );
    assert_eq!(offset(&driver), 0.0);
    assert!(driver.tick(16).is_empty());
}

#[test]
fn poll_delivers_due_ticks() {
    let mut driver = tall();
    grab_row_nine(&mut driver);
    assert!(driver.hold(10).is_empty());
    let effects = driver.hold(6);
    assert!(
        matches!(effects.as_slice(), [ReorderEffect::Scrolled { actual, .. }] if *actual > 0.0),
        "unexpected effects: {effects:?}"
    );
}

// ============================================================================
// Lease release on exit paths
// ============================================================================

#[test]
fn release_drops_lease() {
    let mut driver = tall();
    grab_row_nine(&mut driver);
    assert_eq!(
        driver.release(),
        vec![
            ReorderEffect::AutoscrollChanged(AutoscrollState::IDLE),
            ReorderEffect::Settling { index: 9 },
            ReorderEffect::Ended {
                original_index: 9,
                final_index: 9
            },
        ]
    );
    assert!(!driver.ticks().is_active());
    assert_eq!(driver.ticks().leases_acquired(), 1);
    assert_eq!(driver.ticks().leases_released(), 1);
}

#[test]
fn cancel_drops_lease_and_stops_scrolling() {
    let mut driver = tall();
    grab_row_nine(&mut driver);
    driver.tick(100);
    let scrolled = offset(&driver);

    assert_eq!(
        driver.cancel(),
        vec![
            ReorderEffect::AutoscrollChanged(AutoscrollState::IDLE),
            ReorderEffect::Cancelled { index: 9 },
        ]
    );
    assert!(!driver.ticks().is_active());
    assert_eq!(
        driver.tick(100),
        vec![ReorderEffect::Noop {
            reason: NoopReason::IdleWithoutActiveDrag
        }]
    );
    assert_eq!(offset(&driver), scrolled);
}

#[test]
fn abort_drops_lease() {
    let mut driver = tall();
    grab_row_nine(&mut driver);
    driver.host_mut().remove(0);
    assert_eq!(
        driver.tick(16),
        vec![
            ReorderEffect::AutoscrollChanged(AutoscrollState::IDLE),
            ReorderEffect::Aborted {
                index: 9,
                error: ReorderError::ConcurrentMutation {
                    expected: 20,
                    actual: 19
                }
            },
        ]
    );
    assert!(!driver.ticks().is_active());
    assert_eq!(offset(&driver), 0.0);
}

#[test]
fn disabling_drops_lease() {
    let mut driver = tall();
    grab_row_nine(&mut driver);
    driver.session_mut().set_enabled(false);
    assert!(!driver.ticks().is_active());
}

#[test]
fn dropping_session_drops_lease() {
    let mut driver = tall();
    grab_row_nine(&mut driver);
    let ticks = driver.ticks().clone();
    drop(driver);
    assert!(!ticks.is_active());
    assert_eq!(ticks.leases_released(), 1);
}
