#![forbid(unsafe_code)]

//! Delegate and indicator provider that record every call.
//!
//! Both are cheap to clone and every clone shares the same log, so a test
//! keeps one handle while the session owns another.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use reorder_core::Rect;
use reorder_list::{
    DragProxy, IndicatorProvider, InputQueue, QueuedInput, ReorderDelegate, ReorderError,
    ShadowIndicators,
};

/// One delegate callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    DragBegin(usize),
    WillMove { from: usize, to: usize },
    DidMove { from: usize, to: usize },
    WillEndDragTo(usize),
    DidEndDragTo(usize),
    DragCancelled(usize),
    DragAborted { index: usize, error: ReorderError },
}

#[derive(Debug, Default)]
struct DelegateState {
    log: RefCell<Vec<Notification>>,
    keep_indicators: Cell<bool>,
    post_on_did_move: RefCell<Option<(InputQueue, QueuedInput)>>,
}

/// Delegate that logs callbacks.
#[derive(Debug, Clone, Default)]
pub struct RecordingDelegate {
    state: Rc<DelegateState>,
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `false` from `should_hide_indicator_for_target`.
    pub fn keep_indicators(self) -> Self {
        self.state.keep_indicators.set(true);
        self
    }

    /// Post `input` to `queue` from the next `on_did_move`, once.
    pub fn post_on_did_move(&self, queue: InputQueue, input: QueuedInput) {
        *self.state.post_on_did_move.borrow_mut() = Some((queue, input));
    }

    /// Everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.state.log.borrow().clone()
    }

    /// Number of `DidMove` notifications.
    pub fn move_count(&self) -> usize {
        self.state
            .log
            .borrow()
            .iter()
            .filter(|n| matches!(n, Notification::DidMove { .. }))
            .count()
    }

    pub fn clear(&self) {
        self.state.log.borrow_mut().clear();
    }

    fn record(&self, notification: Notification) {
        self.state.log.borrow_mut().push(notification);
    }
}

impl ReorderDelegate for RecordingDelegate {
    fn on_drag_begin(&mut self, index: usize) {
        self.record(Notification::DragBegin(index));
    }

    fn on_will_move(&mut self, from: usize, to: usize) {
        self.record(Notification::WillMove { from, to });
    }

    fn on_did_move(&mut self, from: usize, to: usize) {
        self.record(Notification::DidMove { from, to });
        if let Some((queue, input)) = self.state.post_on_did_move.borrow_mut().take() {
            queue.push(input);
        }
    }

    fn on_will_end_drag_to(&mut self, index: usize) {
        self.record(Notification::WillEndDragTo(index));
    }

    fn on_did_end_drag_to(&mut self, index: usize) {
        self.record(Notification::DidEndDragTo(index));
    }

    fn should_hide_indicator_for_target(&mut self, _index: usize) -> bool {
        !self.state.keep_indicators.get()
    }

    fn on_drag_cancelled(&mut self, index: usize) {
        self.record(Notification::DragCancelled(index));
    }

    fn on_drag_aborted(&mut self, index: usize, error: &ReorderError) {
        self.record(Notification::DragAborted {
            index,
            error: error.clone(),
        });
    }
}

/// One indicator provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorCall {
    CloneForDragging(usize),
    Add(usize),
    Hide(usize),
    Remove(usize),
}

/// [`ShadowIndicators`] with a call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingIndicators {
    inner: ShadowIndicators,
    log: Rc<RefCell<Vec<IndicatorCall>>>,
}

impl RecordingIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<IndicatorCall> {
        self.log.borrow().clone()
    }

    /// `Add` calls minus `Remove` calls. Zero whenever no drag is live.
    pub fn outstanding(&self) -> isize {
        self.log.borrow().iter().fold(0, |n, call| match call {
            IndicatorCall::Add(_) => n + 1,
            IndicatorCall::Remove(_) => n - 1,
            _ => n,
        })
    }
}

impl IndicatorProvider for RecordingIndicators {
    fn add_indicators(&mut self, proxy: &mut DragProxy, index: usize) {
        self.log.borrow_mut().push(IndicatorCall::Add(index));
        self.inner.add_indicators(proxy, index);
    }

    fn hide_indicators(&mut self, proxy: &mut DragProxy) {
        self.log
            .borrow_mut()
            .push(IndicatorCall::Hide(proxy.source_index));
        self.inner.hide_indicators(proxy);
    }

    fn remove_indicators(&mut self, proxy: &mut DragProxy) {
        self.log
            .borrow_mut()
            .push(IndicatorCall::Remove(proxy.source_index));
        self.inner.remove_indicators(proxy);
    }

    fn clone_for_dragging(&mut self, index: usize, frame: Rect) -> Option<DragProxy> {
        self.log
            .borrow_mut()
            .push(IndicatorCall::CloneForDragging(index));
        Some(DragProxy::new(index, frame))
    }
}
