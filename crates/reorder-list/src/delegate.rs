#![forbid(unsafe_code)]

//! Drag lifecycle notifications.
//!
//! Every method has a no-op default, so a delegate implements only what it
//! cares about. Return values never change control flow, except
//! [`should_hide_indicator_for_target`](ReorderDelegate::should_hide_indicator_for_target)
//! which only picks whether indicators fade before removal.
//!
//! Callbacks run in the middle of an input. To react with further input
//! (end the drag from `on_did_move`, say), push onto an
//! [`InputQueue`](crate::InputQueue) obtained from the session; queued
//! inputs run after the current one completes.

use crate::error::ReorderError;

/// Observer of a reorder session.
pub trait ReorderDelegate {
    /// A long press qualified and row `index` is now being dragged.
    fn on_drag_begin(&mut self, _index: usize) {}

    /// The dragged row is about to move from `from` to `to`.
    fn on_will_move(&mut self, _from: usize, _to: usize) {}

    /// The host has applied the move from `from` to `to`.
    fn on_did_move(&mut self, _from: usize, _to: usize) {}

    /// The pointer was released; the row will settle at `index`.
    fn on_will_end_drag_to(&mut self, _index: usize) {}

    /// The drag finished with the row at `index`.
    fn on_did_end_drag_to(&mut self, _index: usize) {}

    /// Whether indicators should fade out before being removed when the row
    /// settles at `index`.
    fn should_hide_indicator_for_target(&mut self, _index: usize) -> bool {
        true
    }

    /// The drag was cancelled with the row at `index`. Moves already
    /// committed stay committed.
    fn on_drag_cancelled(&mut self, _index: usize) {}

    /// The drag was aborted because the host broke its contract.
    fn on_drag_aborted(&mut self, _index: usize, _error: &ReorderError) {}
}

/// Delegate that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelegate;

impl ReorderDelegate for NoopDelegate {}
