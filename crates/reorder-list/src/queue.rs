#![forbid(unsafe_code)]

//! FIFO of inputs waiting to be processed by a session.
//!
//! Pointer events, autoscroll ticks, and requests posted from inside
//! delegate callbacks all flow through one queue. The session drains it one
//! input at a time, each running to completion, so notifications never
//! interleave with a move in progress.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use reorder_core::{Point, PointerEvent};
use web_time::Instant;

/// One unit of work for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueuedInput {
    /// Raw pointer event for the gesture coordinator.
    Pointer(PointerEvent),
    /// Long-press deadline check plus an autoscroll tick if one is due.
    Poll(Instant),
    /// Autoscroll tick.
    Tick(Instant),
    /// Start dragging `index`, bypassing the gesture coordinator.
    Begin {
        index: usize,
        position: Point,
        at: Instant,
    },
    /// Pointer moved (viewport coordinates), bypassing the coordinator.
    Move { position: Point, at: Instant },
    /// Finish the drag.
    End,
    /// Cancel the drag or the armed press.
    Cancel,
}

/// Shared handle to a session's input queue.
///
/// Cheap to clone; all clones feed the same session.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    inner: Rc<RefCell<VecDeque<QueuedInput>>>,
}

impl InputQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an input. It runs after everything already queued.
    pub fn push(&self, input: QueuedInput) {
        self.inner.borrow_mut().push_back(input);
    }

    pub(crate) fn pop(&self) -> Option<QueuedInput> {
        self.inner.borrow_mut().pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Drop everything queued.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}
