#![forbid(unsafe_code)]

//! Long-press drag recognition: turns raw pointer events into a drag lifecycle.
//!
//! [`GestureCoordinator`] is a stateful processor that converts raw
//! [`PointerEvent`] sequences into [`DragGesture`]s.
//!
//! # State Machine
//!
//! ```text
//! Idle --press on row--> Armed --held >= duration--> Dragging --release--> Idle
//!   ^                      |                            |
//!   +--release/move-away---+                            +--cancel--> Idle
//! ```
//!
//! # Invariants
//!
//! 1. Every press on a row ends in exactly one of `Begin` or `Discarded`.
//! 2. Every `Begin` is followed by zero or more `Move` and then exactly one
//!    `End` or `Cancel`.
//! 3. At most one press is tracked at a time. A second press, or events from
//!    another pointer, are reported as `Ignored` and change nothing.
//! 4. [`cancel`](GestureCoordinator::cancel) is idempotent.
//!
//! # Timing
//!
//! The long-press timer is virtual. The host calls
//! [`poll`](GestureCoordinator::poll) on its frame clock; in addition, any
//! event stamped at or after the deadline first fires the pending `Begin`.
//! A press held exactly the configured duration therefore qualifies even if
//! no poll landed in between.

use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::event::{PointerEvent, PointerId, PointerPhase};
use crate::geometry::Point;
use crate::layout::RowLayout;

#[cfg(feature = "tracing")]
use crate::logging::{debug, trace};
#[cfg(not(feature = "tracing"))]
use crate::{debug, trace};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for long-press recognition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// How long a press must be held before dragging starts (default: 500ms).
    #[serde(rename = "long_press_ms", with = "crate::duration_ms")]
    pub long_press_duration: Duration,
    /// How far (points) the pointer may wander while armed (default: 10.0).
    pub long_press_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_duration: Duration::from_millis(500),
            long_press_slop: 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Why a press ended without starting a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscardReason {
    /// Released before the long-press duration; a normal tap.
    PrematureRelease,
    /// Moved further than the slop before the duration elapsed.
    MovedAway,
    /// Nothing to drag under the press point.
    NoRowUnderPointer,
    /// The platform or the host cancelled the pointer while armed.
    Cancelled,
}

/// Why an event was dropped without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// A press arrived while another press is armed or dragging.
    DoublePress,
    /// The event came from a pointer other than the tracked one.
    PointerMismatch,
    /// Reordering is disabled.
    Disabled,
}

/// Drag lifecycle emitted by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragGesture {
    /// Long press qualified; `index` is the row under the press.
    Begin { index: usize, position: Point },
    /// Pointer moved while dragging.
    Move { position: Point },
    /// Pointer released while dragging.
    End { position: Point },
    /// Drag cancelled by the platform or the host.
    Cancel,
    /// Press ended without a drag.
    Discarded {
        position: Point,
        reason: DiscardReason,
    },
    /// Event dropped.
    Ignored { reason: IgnoreReason },
}

impl DragGesture {
    /// Returns true for events that belong to an active drag.
    #[must_use]
    pub fn is_drag(&self) -> bool {
        matches!(
            self,
            Self::Begin { .. } | Self::Move { .. } | Self::End { .. } | Self::Cancel
        )
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct PendingPress {
    pointer_id: PointerId,
    index: usize,
    origin: Point,
    last: Point,
    pressed_at: Instant,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Armed(PendingPress),
    Dragging { pointer_id: PointerId },
}

// ---------------------------------------------------------------------------
// GestureCoordinator
// ---------------------------------------------------------------------------

/// Stateful long-press drag recognizer.
///
/// Call [`process`](GestureCoordinator::process) for each incoming
/// [`PointerEvent`] and [`poll`](GestureCoordinator::poll) periodically to
/// fire a pending long press.
#[derive(Debug, Clone)]
pub struct GestureCoordinator {
    config: GestureConfig,
    enabled: bool,
    phase: Phase,
}

impl Default for GestureCoordinator {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureCoordinator {
    /// Create a new coordinator with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            enabled: true,
            phase: Phase::Idle,
        }
    }

    /// Process a raw event, returning any drag gestures produced.
    ///
    /// Most events produce 0 or 1 gestures. An event that arrives after the
    /// long-press deadline while armed produces the overdue `Begin` first.
    pub fn process<L>(&mut self, event: &PointerEvent, layout: &L) -> Vec<DragGesture>
    where
        L: RowLayout + ?Sized,
    {
        let mut out = Vec::with_capacity(2);

        if !self.enabled {
            if event.phase == PointerPhase::Press {
                out.push(DragGesture::Ignored {
                    reason: IgnoreReason::Disabled,
                });
            }
            return out;
        }

        if let Some(tracked) = self.tracked_pointer()
            && tracked != event.pointer_id
        {
            let reason = if event.phase == PointerPhase::Press {
                IgnoreReason::DoublePress
            } else {
                IgnoreReason::PointerMismatch
            };
            out.push(DragGesture::Ignored { reason });
            return out;
        }

        // Fire an overdue long press before interpreting the event itself.
        if let Some(begin) = self.poll(event.timestamp) {
            out.push(begin);
        }

        match (self.phase, event.phase) {
            (Phase::Idle, PointerPhase::Press) => self.on_press(event, layout, &mut out),
            (Phase::Idle, _) => {}
            (Phase::Armed(_) | Phase::Dragging { .. }, PointerPhase::Press) => {
                out.push(DragGesture::Ignored {
                    reason: IgnoreReason::DoublePress,
                });
            }
            (Phase::Armed(mut pending), PointerPhase::Move) => {
                if pending.origin.distance(event.position) > self.config.long_press_slop {
                    self.discard(event.position, DiscardReason::MovedAway, &mut out);
                } else {
                    pending.last = event.position;
                    self.phase = Phase::Armed(pending);
                }
            }
            (Phase::Armed(_), PointerPhase::Release) => {
                self.discard(event.position, DiscardReason::PrematureRelease, &mut out);
            }
            (Phase::Armed(_), PointerPhase::Cancel) => {
                self.discard(event.position, DiscardReason::Cancelled, &mut out);
            }
            (Phase::Dragging { .. }, PointerPhase::Move) => {
                trace!(y = event.position.y, "drag move");
                out.push(DragGesture::Move {
                    position: event.position,
                });
            }
            (Phase::Dragging { .. }, PointerPhase::Release) => {
                self.phase = Phase::Idle;
                debug!(y = event.position.y, "drag end");
                out.push(DragGesture::End {
                    position: event.position,
                });
            }
            (Phase::Dragging { .. }, PointerPhase::Cancel) => {
                self.phase = Phase::Idle;
                debug!("drag cancelled by pointer source");
                out.push(DragGesture::Cancel);
            }
        }

        out
    }

    /// Check the long-press deadline. Call periodically (e.g., on tick).
    ///
    /// Returns `Some(Begin { .. })` once, when an armed press has been held
    /// for at least the configured duration.
    pub fn poll(&mut self, now: Instant) -> Option<DragGesture> {
        let Phase::Armed(pending) = self.phase else {
            return None;
        };
        if now.saturating_duration_since(pending.pressed_at) < self.config.long_press_duration {
            return None;
        }
        self.phase = Phase::Dragging {
            pointer_id: pending.pointer_id,
        };
        debug!(index = pending.index, "long press qualified, drag begins");
        Some(DragGesture::Begin {
            index: pending.index,
            position: pending.last,
        })
    }

    /// Programmatically cancel whatever is in progress.
    ///
    /// Returns `Cancel` when a drag was active, `Discarded` when a press was
    /// armed, and `None` when idle. Calling it again is a no-op.
    pub fn cancel(&mut self) -> Option<DragGesture> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => None,
            Phase::Armed(pending) => Some(DragGesture::Discarded {
                position: pending.last,
                reason: DiscardReason::Cancelled,
            }),
            Phase::Dragging { .. } => Some(DragGesture::Cancel),
        }
    }

    /// Return to idle without emitting anything.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Enable or disable recognition.
    ///
    /// Disabling cancels in-flight work and returns what [`cancel`](Self::cancel)
    /// would have returned.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<DragGesture> {
        self.enabled = enabled;
        if enabled { None } else { self.cancel() }
    }

    /// Whether presses are currently recognized.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a press is waiting for the long-press deadline.
    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        matches!(self.phase, Phase::Armed(_))
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Instant at which the armed press qualifies, if one is armed.
    #[must_use]
    pub fn long_press_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Armed(pending) => Some(pending.pressed_at + self.config.long_press_duration),
            _ => None,
        }
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration. Takes effect for the next press.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    fn tracked_pointer(&self) -> Option<PointerId> {
        match self.phase {
            Phase::Idle => None,
            Phase::Armed(pending) => Some(pending.pointer_id),
            Phase::Dragging { pointer_id } => Some(pointer_id),
        }
    }

    fn on_press<L>(&mut self, event: &PointerEvent, layout: &L, out: &mut Vec<DragGesture>)
    where
        L: RowLayout + ?Sized,
    {
        let content = layout.to_content(event.position);
        let Some(index) = layout.index_at(content.y) else {
            out.push(DragGesture::Discarded {
                position: event.position,
                reason: DiscardReason::NoRowUnderPointer,
            });
            return;
        };
        trace!(index, "press armed");
        self.phase = Phase::Armed(PendingPress {
            pointer_id: event.pointer_id,
            index,
            origin: event.position,
            last: event.position,
            pressed_at: event.timestamp,
        });
        // A zero duration qualifies immediately.
        if let Some(begin) = self.poll(event.timestamp) {
            out.push(begin);
        }
    }

    fn discard(&mut self, position: Point, reason: DiscardReason, out: &mut Vec<DragGesture>) {
        self.phase = Phase::Idle;
        trace!(?reason, "press discarded");
        out.push(DragGesture::Discarded { position, reason });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    struct Rows(usize);

    impl RowLayout for Rows {
        fn row_count(&self) -> usize {
            self.0
        }

        fn frame_of(&self, index: usize) -> Rect {
            Rect::new(0.0, index as f32 * 44.0, 320.0, 44.0)
        }

        fn viewport_bounds(&self) -> Rect {
            Rect::from_size(320.0, 480.0)
        }

        fn content_offset(&self) -> Point {
            Point::ZERO
        }

        fn scroll_by(&mut self, _delta: f32) -> f32 {
            0.0
        }
    }

    const MS_100: Duration = Duration::from_millis(100);
    const MS_500: Duration = Duration::from_millis(500);
    const MS_600: Duration = Duration::from_millis(600);

    fn at(y: f32) -> Point {
        Point::new(100.0, y)
    }

    #[test]
    fn press_arms_without_output() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        let out = gc.process(&PointerEvent::press(at(66.0), t), &Rows(5));
        assert!(out.is_empty());
        assert!(gc.is_armed());
        assert_eq!(gc.long_press_deadline(), Some(t + MS_500));
    }

    #[test]
    fn poll_fires_begin_once() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        gc.process(&PointerEvent::press(at(66.0), t), &Rows(5));

        assert_eq!(gc.poll(t + MS_100), None);
        assert_eq!(
            gc.poll(t + MS_500),
            Some(DragGesture::Begin {
                index: 1,
                position: at(66.0)
            })
        );
        assert!(gc.is_dragging());
        assert_eq!(gc.poll(t + MS_600), None);
    }

    #[test]
    fn early_release_is_a_tap() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        gc.process(&PointerEvent::press(at(66.0), t), &Rows(5));
        let out = gc.process(&PointerEvent::release(at(66.0), t + MS_100), &Rows(5));
        assert_eq!(
            out,
            vec![DragGesture::Discarded {
                position: at(66.0),
                reason: DiscardReason::PrematureRelease
            }]
        );
        assert!(!gc.is_armed());
        assert_eq!(gc.poll(t + MS_600), None);
    }

    #[test]
    fn release_exactly_at_threshold_drags() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        gc.process(&PointerEvent::press(at(66.0), t), &Rows(5));
        let out = gc.process(&PointerEvent::release(at(66.0), t + MS_500), &Rows(5));
        assert_eq!(out.len(), 2);
        assert!(matches!(out[0], DragGesture::Begin { index: 1, .. }));
        assert!(matches!(out[1], DragGesture::End { .. }));
    }

    #[test]
    fn move_within_slop_keeps_armed() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        gc.process(&PointerEvent::press(at(66.0), t), &Rows(5));
        let out = gc.process(&PointerEvent::moved(at(70.0), t + MS_100), &Rows(5));
        assert!(out.is_empty());
        assert!(gc.is_armed());
        assert_eq!(
            gc.poll(t + MS_500),
            Some(DragGesture::Begin {
                index: 1,
                position: at(70.0)
            })
        );
    }

    #[test]
    fn move_away_discards() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        gc.process(&PointerEvent::press(at(66.0), t), &Rows(5));
        let out = gc.process(&PointerEvent::moved(at(90.0), t + MS_100), &Rows(5));
        assert!(matches!(
            out[..],
            [DragGesture::Discarded {
                reason: DiscardReason::MovedAway,
                ..
            }]
        ));
        assert_eq!(gc.poll(t + MS_600), None);
    }

    #[test]
    fn late_move_fires_begin_then_move() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        gc.process(&PointerEvent::press(at(66.0), t), &Rows(5));
        let out = gc.process(&PointerEvent::moved(at(116.0), t + MS_600), &Rows(5));
        assert_eq!(
            out,
            vec![
                DragGesture::Begin {
                    index: 1,
                    position: at(66.0)
                },
                DragGesture::Move { position: at(116.0) },
            ]
        );
    }

    #[test]
    fn press_below_content_is_discarded() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        let out = gc.process(&PointerEvent::press(at(300.0), t), &Rows(5));
        assert!(matches!(
            out[..],
            [DragGesture::Discarded {
                reason: DiscardReason::NoRowUnderPointer,
                ..
            }]
        ));
        assert!(!gc.is_armed());
    }

    #[test]
    fn second_press_is_ignored() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        gc.process(&PointerEvent::press(at(66.0), t), &Rows(5));
        gc.poll(t + MS_500);

        let out = gc.process(
            &PointerEvent::press(at(150.0), t + MS_600).with_pointer(1),
            &Rows(5),
        );
        assert_eq!(
            out,
            vec![DragGesture::Ignored {
                reason: IgnoreReason::DoublePress
            }]
        );
        let out = gc.process(
            &PointerEvent::moved(at(150.0), t + MS_600).with_pointer(1),
            &Rows(5),
        );
        assert_eq!(
            out,
            vec![DragGesture::Ignored {
                reason: IgnoreReason::PointerMismatch
            }]
        );
        assert!(gc.is_dragging());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        assert_eq!(gc.cancel(), None);

        gc.process(&PointerEvent::press(at(66.0), t), &Rows(5));
        gc.poll(t + MS_500);
        assert_eq!(gc.cancel(), Some(DragGesture::Cancel));
        assert_eq!(gc.cancel(), None);
        assert!(!gc.is_dragging());
    }

    #[test]
    fn pointer_cancel_while_dragging() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        gc.process(&PointerEvent::press(at(66.0), t), &Rows(5));
        gc.poll(t + MS_500);
        let out = gc.process(&PointerEvent::cancel(at(66.0), t + MS_600), &Rows(5));
        assert_eq!(out, vec![DragGesture::Cancel]);
    }

    #[test]
    fn disabled_ignores_presses() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        gc.process(&PointerEvent::press(at(66.0), t), &Rows(5));
        assert!(matches!(
            gc.set_enabled(false),
            Some(DragGesture::Discarded {
                reason: DiscardReason::Cancelled,
                ..
            })
        ));
        let out = gc.process(&PointerEvent::press(at(66.0), t + MS_100), &Rows(5));
        assert_eq!(
            out,
            vec![DragGesture::Ignored {
                reason: IgnoreReason::Disabled
            }]
        );
        assert_eq!(gc.set_enabled(true), None);
        assert!(gc.is_enabled());
    }

    #[test]
    fn events_while_idle_are_silent() {
        let mut gc = GestureCoordinator::default();
        let t = Instant::now();
        assert!(gc.process(&PointerEvent::moved(at(66.0), t), &Rows(5)).is_empty());
        assert!(gc.process(&PointerEvent::release(at(66.0), t), &Rows(5)).is_empty());
        assert!(gc.process(&PointerEvent::cancel(at(66.0), t), &Rows(5)).is_empty());
    }

    #[test]
    fn zero_duration_begins_on_press() {
        let mut gc = GestureCoordinator::new(GestureConfig {
            long_press_duration: Duration::ZERO,
            ..GestureConfig::default()
        });
        let t = Instant::now();
        let out = gc.process(&PointerEvent::press(at(10.0), t), &Rows(5));
        assert!(matches!(out[..], [DragGesture::Begin { index: 0, .. }]));
    }

    #[test]
    fn config_serializes_in_millis() {
        let json = serde_json::to_string(&GestureConfig::default()).unwrap();
        assert!(json.contains("\"long_press_ms\":500"), "{json}");
        let back: GestureConfig = serde_json::from_str(r#"{"long_press_ms":250}"#).unwrap();
        assert_eq!(back.long_press_duration, Duration::from_millis(250));
        assert_eq!(back.long_press_slop, 10.0);
    }
}
