#![forbid(unsafe_code)]

//! The reorder state machine.
//!
//! [`ReorderSession`] owns the single live [`DragSession`] and is the only
//! place that issues move commands.
//!
//! ```text
//! Idle -> Armed -> Dragging -> Settling -> Idle
//!           \          \------ cancel / abort -----> Idle
//!            \---- tap / move-away / cancel -------> Idle
//! ```
//!
//! # Invariants
//!
//! 1. At most one drag exists. `dragged_index < row_count` for its whole
//!    life and `original_index` never changes.
//! 2. Every index change runs `on_will_move`, `move_row`, `on_did_move` in
//!    that order, and nothing else runs in between.
//! 3. The autoscroll tick lease lives inside the drag, so ending, cancelling,
//!    aborting, disabling, or dropping the session releases it.
//! 4. After cancel or abort no further moves or scrolls happen for that drag.
//!    Committed moves are not rolled back.
//! 5. The engine never changes the row count. If the host does, the drag is
//!    aborted with [`ReorderError::ConcurrentMutation`].
//!
//! # Input flow
//!
//! Every public entry point appends to the session's [`InputQueue`] and then
//! drains it. Inputs posted from delegate callbacks land behind the current
//! one and run once it has completed.

use std::fmt;

use reorder_core::{
    DiscardReason, DragGesture, GestureCoordinator, IgnoreReason, Point, PointerEvent, Vector,
};
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::autoscroll::{AutoscrollEngine, AutoscrollState};
use crate::config::ReorderConfig;
use crate::delegate::{NoopDelegate, ReorderDelegate};
use crate::error::{ConfigError, ReorderError};
use crate::host::{MoveCommand, ReorderHost};
use crate::indicator::{DragProxy, IndicatorProvider, ShadowIndicators};
use crate::queue::{InputQueue, QueuedInput};
use crate::resolver::IndexResolver;
use crate::ticker::{ManualTicks, TickHandle, TickScheduler};

#[cfg(feature = "tracing")]
use reorder_core::logging::{debug, warn};
#[cfg(not(feature = "tracing"))]
use reorder_core::{debug, warn};

/// Upper bound on inputs processed by one drain. Guards against delegates
/// that keep re-posting from their own callbacks.
const MAX_INPUTS_PER_FLUSH: usize = 4096;

// ---------------------------------------------------------------------------
// Observable state
// ---------------------------------------------------------------------------

/// Lifecycle state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderState {
    Idle,
    /// A press is waiting for the long-press deadline.
    Armed,
    Dragging,
    /// Release is being finalized. Only visible from inside callbacks.
    Settling,
}

/// Phase of a live drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragState {
    Dragging,
    Settling,
}

/// Why an input changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    IdleWithoutActiveDrag,
    DragAlreadyInProgress,
    DoublePress,
    PointerMismatch,
    Disabled,
    NoAutoscroll,
}

impl From<IgnoreReason> for NoopReason {
    fn from(reason: IgnoreReason) -> Self {
        match reason {
            IgnoreReason::DoublePress => Self::DoublePress,
            IgnoreReason::PointerMismatch => Self::PointerMismatch,
            IgnoreReason::Disabled => Self::Disabled,
        }
    }
}

/// One observable consequence of an input.
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderEffect {
    DragStarted { index: usize },
    /// A move command was issued to the host.
    Moved(MoveCommand),
    /// Autoscroll started, stopped, or changed direction.
    AutoscrollChanged(AutoscrollState),
    Scrolled { requested: f32, actual: f32 },
    Settling { index: usize },
    Ended {
        original_index: usize,
        final_index: usize,
    },
    Cancelled { index: usize },
    Aborted { index: usize, error: ReorderError },
    /// A begin request was refused before any drag existed.
    BeginRejected { error: ReorderError },
    /// A press ended without a drag.
    Discarded { reason: DiscardReason },
    Noop { reason: NoopReason },
}

// ---------------------------------------------------------------------------
// DragSession
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct AutoscrollTicker {
    _lease: TickHandle,
    last_tick: Instant,
}

/// Live state of one drag.
#[derive(Debug)]
pub struct DragSession {
    original_index: usize,
    dragged_index: usize,
    touch_offset: Vector,
    last_touch: Point,
    current_center_y: f32,
    row_count: usize,
    state: DragState,
    committed_moves: usize,
    started_at: Instant,
    proxy: DragProxy,
    ticker: Option<AutoscrollTicker>,
}

impl DragSession {
    /// Row currently holding the dragged content.
    #[inline]
    #[must_use]
    pub fn dragged_index(&self) -> usize {
        self.dragged_index
    }

    /// Row the drag started from.
    #[inline]
    #[must_use]
    pub fn original_index(&self) -> usize {
        self.original_index
    }

    /// Touch point minus item center, fixed at drag start.
    #[inline]
    #[must_use]
    pub fn touch_offset(&self) -> Vector {
        self.touch_offset
    }

    /// Last pointer position in viewport coordinates.
    #[inline]
    #[must_use]
    pub fn last_touch(&self) -> Point {
        self.last_touch
    }

    /// Item center in content coordinates as of the last move or tick.
    #[inline]
    #[must_use]
    pub fn current_center_y(&self) -> f32 {
        self.current_center_y
    }

    /// Row count captured at drag start.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Move commands issued so far.
    #[inline]
    #[must_use]
    pub fn committed_moves(&self) -> usize {
        self.committed_moves
    }

    #[inline]
    #[must_use]
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Floating stand-in for the dragged row.
    #[inline]
    #[must_use]
    pub fn proxy(&self) -> &DragProxy {
        &self.proxy
    }

    /// Whether an autoscroll tick lease is held.
    #[inline]
    #[must_use]
    pub fn is_autoscrolling(&self) -> bool {
        self.ticker.is_some()
    }
}

// ---------------------------------------------------------------------------
// ReorderSession
// ---------------------------------------------------------------------------

/// Drag-to-reorder state machine for one list.
///
/// Feed it pointer events with [`handle_pointer`](Self::handle_pointer) and
/// call [`poll`](Self::poll) from the host's frame clock. Hosts with their
/// own gesture recognition can drive [`begin`](Self::begin),
/// [`drag_move`](Self::drag_move), [`end`](Self::end), and
/// [`cancel`](Self::cancel) directly instead.
pub struct ReorderSession {
    config: ReorderConfig,
    gestures: GestureCoordinator,
    autoscroll: AutoscrollEngine,
    drag: Option<DragSession>,
    delegate: Box<dyn ReorderDelegate>,
    indicators: Box<dyn IndicatorProvider>,
    scheduler: Box<dyn TickScheduler>,
    queue: InputQueue,
}

impl fmt::Debug for ReorderSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReorderSession")
            .field("state", &self.state())
            .field("drag", &self.drag)
            .field("autoscroll", &self.autoscroll.state())
            .field("queued", &self.queue.len())
            .finish()
    }
}

impl Default for ReorderSession {
    fn default() -> Self {
        Self::with_valid_config(ReorderConfig::default())
    }
}

impl ReorderSession {
    /// Create a session with the default delegate, indicators, and
    /// [`ManualTicks`] scheduler.
    pub fn new(config: ReorderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: ReorderConfig) -> Self {
        Self {
            config,
            gestures: GestureCoordinator::new(config.gesture),
            autoscroll: AutoscrollEngine::new(config.autoscroll),
            drag: None,
            delegate: Box::new(NoopDelegate),
            indicators: Box::new(ShadowIndicators::default()),
            scheduler: Box::new(ManualTicks::new()),
            queue: InputQueue::new(),
        }
    }

    /// Replace the delegate.
    #[must_use]
    pub fn with_delegate(mut self, delegate: impl ReorderDelegate + 'static) -> Self {
        self.delegate = Box::new(delegate);
        self
    }

    /// Replace the indicator provider.
    #[must_use]
    pub fn with_indicators(mut self, indicators: impl IndicatorProvider + 'static) -> Self {
        self.indicators = Box::new(indicators);
        self
    }

    /// Replace the tick scheduler.
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: impl TickScheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> ReorderState {
        match &self.drag {
            Some(drag) => match drag.state {
                DragState::Dragging => ReorderState::Dragging,
                DragState::Settling => ReorderState::Settling,
            },
            None if self.gestures.is_armed() => ReorderState::Armed,
            None => ReorderState::Idle,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The live drag, if any.
    #[inline]
    #[must_use]
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// The floating proxy of the live drag, if any.
    #[must_use]
    pub fn proxy(&self) -> Option<&DragProxy> {
        self.drag.as_ref().map(|drag| &drag.proxy)
    }

    #[inline]
    #[must_use]
    pub fn autoscroll_state(&self) -> AutoscrollState {
        self.autoscroll.state()
    }

    /// Whether the host should keep delivering autoscroll ticks.
    #[must_use]
    pub fn wants_tick(&self) -> bool {
        self.drag.as_ref().is_some_and(|drag| drag.ticker.is_some())
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.gestures.is_enabled()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// Handle for posting inputs from callbacks.
    #[must_use]
    pub fn input_queue(&self) -> InputQueue {
        self.queue.clone()
    }

    // --- Inputs ---

    /// Feed one raw pointer event.
    pub fn handle_pointer<H>(&mut self, event: &PointerEvent, host: &mut H) -> Vec<ReorderEffect>
    where
        H: ReorderHost + ?Sized,
    {
        self.queue.push(QueuedInput::Pointer(*event));
        self.flush(host)
    }

    /// Frame-clock hook: fires a due long press and a due autoscroll tick.
    pub fn poll<H>(&mut self, now: Instant, host: &mut H) -> Vec<ReorderEffect>
    where
        H: ReorderHost + ?Sized,
    {
        self.queue.push(QueuedInput::Poll(now));
        self.flush(host)
    }

    /// Deliver one autoscroll tick.
    pub fn tick<H>(&mut self, now: Instant, host: &mut H) -> Vec<ReorderEffect>
    where
        H: ReorderHost + ?Sized,
    {
        self.queue.push(QueuedInput::Tick(now));
        self.flush(host)
    }

    /// Start dragging row `index` with the pointer at `position` (viewport
    /// coordinates), bypassing long-press recognition.
    ///
    /// A request while already dragging, or while reordering is disabled,
    /// is ignored, not an error. A pending long press is dropped.
    pub fn begin<H>(
        &mut self,
        index: usize,
        position: Point,
        now: Instant,
        host: &mut H,
    ) -> Result<Vec<ReorderEffect>, ReorderError>
    where
        H: ReorderHost + ?Sized,
    {
        check_begin(index, host.row_count())?;
        self.queue.push(QueuedInput::Begin {
            index,
            position,
            at: now,
        });
        Ok(self.flush(host))
    }

    /// Report the pointer at `position` (viewport coordinates).
    pub fn drag_move<H>(&mut self, position: Point, now: Instant, host: &mut H) -> Vec<ReorderEffect>
    where
        H: ReorderHost + ?Sized,
    {
        self.queue.push(QueuedInput::Move { position, at: now });
        self.flush(host)
    }

    /// Finish the drag at the current index.
    pub fn end<H>(&mut self, host: &mut H) -> Vec<ReorderEffect>
    where
        H: ReorderHost + ?Sized,
    {
        self.queue.push(QueuedInput::End);
        self.flush(host)
    }

    /// Cancel the drag or armed press immediately.
    ///
    /// Idempotent. Committed moves stay committed. Inputs already queued
    /// still run afterwards and find the session idle.
    pub fn cancel(&mut self) -> Vec<ReorderEffect> {
        let mut out = Vec::new();
        self.apply_cancel(&mut out);
        out
    }

    /// Cancel and discard everything queued. For host lifecycle events
    /// (losing focus, going to background).
    pub fn force_cancel(&mut self) -> Vec<ReorderEffect> {
        self.queue.clear();
        self.cancel()
    }

    /// Enable or disable reordering. Disabling cancels any drag in progress.
    pub fn set_enabled(&mut self, enabled: bool) -> Vec<ReorderEffect> {
        let mut out = Vec::new();
        if !enabled {
            self.apply_cancel(&mut out);
        }
        self.gestures.set_enabled(enabled);
        out
    }

    /// Process everything in the input queue.
    pub fn flush<H>(&mut self, host: &mut H) -> Vec<ReorderEffect>
    where
        H: ReorderHost + ?Sized,
    {
        let mut out = Vec::new();
        let mut processed = 0usize;
        while let Some(input) = self.queue.pop() {
            self.apply(input, host, &mut out);
            processed += 1;
            if processed >= MAX_INPUTS_PER_FLUSH {
                warn!(remaining = self.queue.len(), "input queue not drained");
                break;
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

fn check_begin(index: usize, row_count: usize) -> Result<(), ReorderError> {
    if row_count == 0 {
        return Err(ReorderError::EmptyList);
    }
    if index >= row_count {
        return Err(ReorderError::InvalidIndex { index, row_count });
    }
    Ok(())
}

impl ReorderSession {
    fn apply<H>(&mut self, input: QueuedInput, host: &mut H, out: &mut Vec<ReorderEffect>)
    where
        H: ReorderHost + ?Sized,
    {
        match input {
            QueuedInput::Pointer(event) => {
                for gesture in self.gestures.process(&event, &*host) {
                    self.apply_gesture(gesture, event.timestamp, host, out);
                }
            }
            QueuedInput::Poll(now) => {
                if let Some(gesture) = self.gestures.poll(now) {
                    self.apply_gesture(gesture, now, host, out);
                }
                if self.tick_due(now) {
                    self.apply_tick(now, host, out);
                }
            }
            QueuedInput::Tick(now) => self.apply_tick(now, host, out),
            QueuedInput::Begin {
                index,
                position,
                at,
            } => self.apply_explicit_begin(index, position, at, host, out),
            QueuedInput::Move { position, at } => self.apply_move(position, at, host, out),
            QueuedInput::End => self.apply_end(host, out),
            QueuedInput::Cancel => self.apply_cancel(out),
        }
    }

    fn apply_gesture<H>(
        &mut self,
        gesture: DragGesture,
        at: Instant,
        host: &mut H,
        out: &mut Vec<ReorderEffect>,
    ) where
        H: ReorderHost + ?Sized,
    {
        match gesture {
            DragGesture::Begin { index, position } => {
                self.apply_begin(index, position, at, host, out);
            }
            DragGesture::Move { position } => self.apply_move(position, at, host, out),
            DragGesture::End { .. } => self.apply_end(host, out),
            DragGesture::Cancel => self.apply_cancel(out),
            DragGesture::Discarded { reason, .. } => out.push(ReorderEffect::Discarded { reason }),
            DragGesture::Ignored { reason } => out.push(ReorderEffect::Noop {
                reason: reason.into(),
            }),
        }
    }

    /// Begin requested through [`ReorderSession::begin`]. Any press the
    /// coordinator has armed is dropped so it cannot fire later.
    fn apply_explicit_begin<H>(
        &mut self,
        index: usize,
        position: Point,
        at: Instant,
        host: &mut H,
        out: &mut Vec<ReorderEffect>,
    ) where
        H: ReorderHost + ?Sized,
    {
        if !self.gestures.is_enabled() {
            out.push(ReorderEffect::Noop {
                reason: NoopReason::Disabled,
            });
            return;
        }
        if self.drag.is_none() {
            self.gestures.reset();
        }
        self.apply_begin(index, position, at, host, out);
    }

    fn apply_begin<H>(
        &mut self,
        index: usize,
        position: Point,
        at: Instant,
        host: &mut H,
        out: &mut Vec<ReorderEffect>,
    ) where
        H: ReorderHost + ?Sized,
    {
        if self.drag.is_some() {
            out.push(ReorderEffect::Noop {
                reason: NoopReason::DragAlreadyInProgress,
            });
            return;
        }
        let row_count = host.row_count();
        if let Err(error) = check_begin(index, row_count) {
            warn!(%error, "drag begin rejected");
            self.gestures.reset();
            out.push(ReorderEffect::BeginRejected { error });
            return;
        }

        let frame = host.frame_of(index);
        let mut proxy = self
            .indicators
            .clone_for_dragging(index, frame)
            .unwrap_or_else(|| DragProxy::new(index, frame));
        self.indicators.add_indicators(&mut proxy, index);

        let touch_offset = host.to_content(position).vector_from(frame.center());
        self.drag = Some(DragSession {
            original_index: index,
            dragged_index: index,
            touch_offset,
            last_touch: position,
            current_center_y: frame.mid_y(),
            row_count,
            state: DragState::Dragging,
            committed_moves: 0,
            started_at: at,
            proxy,
            ticker: None,
        });
        debug!(index, row_count, "drag started");
        self.delegate.on_drag_begin(index);
        out.push(ReorderEffect::DragStarted { index });

        self.update_autoscroll(at, host, out);
    }

    fn apply_move<H>(
        &mut self,
        position: Point,
        at: Instant,
        host: &mut H,
        out: &mut Vec<ReorderEffect>,
    ) where
        H: ReorderHost + ?Sized,
    {
        if self.drag.is_none() {
            out.push(ReorderEffect::Noop {
                reason: NoopReason::IdleWithoutActiveDrag,
            });
            return;
        }
        if self.abort_on_mutation(host, out) {
            return;
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.last_touch = position;
        }
        self.reposition(host, out);
        self.update_autoscroll(at, host, out);
    }

    fn apply_tick<H>(&mut self, now: Instant, host: &mut H, out: &mut Vec<ReorderEffect>)
    where
        H: ReorderHost + ?Sized,
    {
        let reason = match &self.drag {
            None => Some(NoopReason::IdleWithoutActiveDrag),
            Some(drag) if drag.ticker.is_none() => Some(NoopReason::NoAutoscroll),
            Some(_) => None,
        };
        if let Some(reason) = reason {
            out.push(ReorderEffect::Noop { reason });
            return;
        }
        if self.abort_on_mutation(host, out) {
            return;
        }

        let Some(ticker) = self.drag.as_mut().and_then(|drag| drag.ticker.as_mut()) else {
            return;
        };
        let elapsed = now.saturating_duration_since(ticker.last_tick);
        ticker.last_tick = now;

        let requested = self.autoscroll.scroll_delta(elapsed, &*host);
        if requested != 0.0 {
            let actual = host.scroll_by(requested);
            out.push(ReorderEffect::Scrolled { requested, actual });
        }
        self.reposition(host, out);
    }

    fn apply_end<H>(&mut self, host: &mut H, out: &mut Vec<ReorderEffect>)
    where
        H: ReorderHost + ?Sized,
    {
        if self.drag.is_none() {
            out.push(ReorderEffect::Noop {
                reason: NoopReason::IdleWithoutActiveDrag,
            });
            return;
        }
        if self.abort_on_mutation(host, out) {
            return;
        }
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        drag.state = DragState::Settling;
        drag.ticker = None;
        if self.autoscroll.stop() {
            out.push(ReorderEffect::AutoscrollChanged(AutoscrollState::IDLE));
        }
        let index = drag.dragged_index;
        out.push(ReorderEffect::Settling { index });

        self.delegate.on_will_end_drag_to(index);
        if self.delegate.should_hide_indicator_for_target(index) {
            self.indicators.hide_indicators(&mut drag.proxy);
        }
        drag.proxy.frame = host.frame_of(index);
        self.indicators.remove_indicators(&mut drag.proxy);
        self.delegate.on_did_end_drag_to(index);

        let original_index = drag.original_index;
        self.drag = None;
        self.gestures.reset();
        debug!(original_index, final_index = index, "drag ended");
        out.push(ReorderEffect::Ended {
            original_index,
            final_index: index,
        });
    }

    fn apply_cancel(&mut self, out: &mut Vec<ReorderEffect>) {
        let gesture = self.gestures.cancel();
        let Some(mut drag) = self.drag.take() else {
            if let Some(DragGesture::Discarded { reason, .. }) = gesture {
                out.push(ReorderEffect::Discarded { reason });
            }
            return;
        };

        drag.ticker = None;
        if self.autoscroll.stop() {
            out.push(ReorderEffect::AutoscrollChanged(AutoscrollState::IDLE));
        }
        let index = drag.dragged_index;
        self.indicators.remove_indicators(&mut drag.proxy);
        debug!(index, moves = drag.committed_moves, "drag cancelled");
        self.delegate.on_drag_cancelled(index);
        out.push(ReorderEffect::Cancelled { index });
    }

    /// Abort when the host's row count no longer matches. Returns `true` if
    /// the drag was aborted.
    fn abort_on_mutation<H>(&mut self, host: &H, out: &mut Vec<ReorderEffect>) -> bool
    where
        H: ReorderHost + ?Sized,
    {
        let Some(expected) = self.drag.as_ref().map(|drag| drag.row_count) else {
            return false;
        };
        let actual = host.row_count();
        if actual == expected {
            return false;
        }
        self.abort(ReorderError::ConcurrentMutation { expected, actual }, out);
        true
    }

    fn abort(&mut self, error: ReorderError, out: &mut Vec<ReorderEffect>) {
        let Some(mut drag) = self.drag.take() else {
            return;
        };
        drag.ticker = None;
        if self.autoscroll.stop() {
            out.push(ReorderEffect::AutoscrollChanged(AutoscrollState::IDLE));
        }
        self.gestures.reset();
        let index = drag.dragged_index;
        self.indicators.remove_indicators(&mut drag.proxy);
        warn!(index, %error, "drag aborted");
        self.delegate.on_drag_aborted(index, &error);
        out.push(ReorderEffect::Aborted { index, error });
    }

    /// Recompute the item center, move the proxy, and commit a move if the
    /// resolver picks a new index.
    fn reposition<H>(&mut self, host: &mut H, out: &mut Vec<ReorderEffect>)
    where
        H: ReorderHost + ?Sized,
    {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let center_y = IndexResolver::center_y(drag, &*host);
        drag.current_center_y = center_y;
        drag.proxy.move_center_y(center_y);

        if let Some(target) = IndexResolver::resolve(drag, &*host) {
            let command = MoveCommand::new(drag.dragged_index, target);
            self.commit_move(command, host, out);
        }
    }

    fn commit_move<H>(&mut self, command: MoveCommand, host: &mut H, out: &mut Vec<ReorderEffect>)
    where
        H: ReorderHost + ?Sized,
    {
        let MoveCommand { from, to } = command;
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("reorder.move", from, to).entered();

        self.delegate.on_will_move(from, to);
        host.move_row(from, to);
        if self.abort_on_mutation(host, out) {
            return;
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.dragged_index = to;
            drag.committed_moves += 1;
        }
        self.delegate.on_did_move(from, to);
        debug!(from, to, "row moved");
        out.push(ReorderEffect::Moved(command));
    }

    /// Re-evaluate autoscroll for the proxy's position and acquire or
    /// release the tick lease to match.
    fn update_autoscroll<H>(&mut self, at: Instant, host: &H, out: &mut Vec<ReorderEffect>)
    where
        H: ReorderHost + ?Sized,
    {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let offset = host.content_offset();
        let item = drag.proxy.frame.translated(Vector::new(-offset.x, -offset.y));
        let changed = self.autoscroll.update(item, host.viewport_bounds().height);

        if self.autoscroll.is_active() {
            if drag.ticker.is_none() {
                drag.ticker = Some(AutoscrollTicker {
                    _lease: self.scheduler.schedule(self.config.autoscroll.tick_interval),
                    last_tick: at,
                });
            }
        } else {
            drag.ticker = None;
        }

        if changed {
            let state = self.autoscroll.state();
            debug!(
                target: "reorder.autoscroll",
                direction = ?state.direction,
                rate = state.rate,
                "autoscroll changed"
            );
            out.push(ReorderEffect::AutoscrollChanged(state));
        }
    }

    fn tick_due(&self, now: Instant) -> bool {
        self.drag
            .as_ref()
            .and_then(|drag| drag.ticker.as_ref())
            .is_some_and(|ticker| {
                now.saturating_duration_since(ticker.last_tick)
                    >= self.config.autoscroll.tick_interval
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MoveExecutor;
    use reorder_core::{Rect, RowLayout};
    use std::cell::RefCell;
    use std::rc::Rc;
    use web_time::Duration;

    struct List {
        rows: Vec<char>,
        offset: f32,
        viewport: f32,
    }

    impl List {
        fn new(rows: &str) -> Self {
            Self {
                rows: rows.chars().collect(),
                offset: 0.0,
                viewport: 480.0,
            }
        }

        fn order(&self) -> String {
            self.rows.iter().collect()
        }
    }

    impl RowLayout for List {
        fn row_count(&self) -> usize {
            self.rows.len()
        }

        fn frame_of(&self, index: usize) -> Rect {
            Rect::new(0.0, index as f32 * 44.0, 320.0, 44.0)
        }

        fn viewport_bounds(&self) -> Rect {
            Rect::from_size(320.0, self.viewport)
        }

        fn content_offset(&self) -> Point {
            Point::new(0.0, self.offset)
        }

        fn scroll_by(&mut self, delta: f32) -> f32 {
            let next = (self.offset + delta).clamp(0.0, self.max_scroll_y());
            let actual = next - self.offset;
            self.offset = next;
            actual
        }
    }

    impl MoveExecutor for List {
        fn move_row(&mut self, from: usize, to: usize) {
            MoveCommand::new(from, to).apply(&mut self.rows);
        }
    }

    #[derive(Clone, Default)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl Log {
        fn entries(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    impl ReorderDelegate for Log {
        fn on_drag_begin(&mut self, index: usize) {
            self.0.borrow_mut().push(format!("begin {index}"));
        }
        fn on_will_move(&mut self, from: usize, to: usize) {
            self.0.borrow_mut().push(format!("will {from}->{to}"));
        }
        fn on_did_move(&mut self, from: usize, to: usize) {
            self.0.borrow_mut().push(format!("did {from}->{to}"));
        }
        fn on_will_end_drag_to(&mut self, index: usize) {
            self.0.borrow_mut().push(format!("will end {index}"));
        }
        fn on_did_end_drag_to(&mut self, index: usize) {
            self.0.borrow_mut().push(format!("did end {index}"));
        }
        fn on_drag_cancelled(&mut self, index: usize) {
            self.0.borrow_mut().push(format!("cancelled {index}"));
        }
        fn on_drag_aborted(&mut self, index: usize, _error: &ReorderError) {
            self.0.borrow_mut().push(format!("aborted {index}"));
        }
    }

    const MS_500: Duration = Duration::from_millis(500);

    fn at(y: f32) -> Point {
        Point::new(100.0, y)
    }

    fn dragging_b(log: &Log, list: &mut List, t: Instant) -> ReorderSession {
        let mut session = ReorderSession::default().with_delegate(log.clone());
        session.handle_pointer(&PointerEvent::press(at(66.0), t), list);
        let effects = session.poll(t + MS_500, list);
        assert_eq!(effects, vec![ReorderEffect::DragStarted { index: 1 }]);
        session
    }

    #[test]
    fn press_hold_drag_release() {
        let log = Log::default();
        let mut list = List::new("ABCDE");
        let t = Instant::now();
        let mut session = dragging_b(&log, &mut list, t);
        assert_eq!(session.state(), ReorderState::Dragging);

        let effects = session.handle_pointer(
            &PointerEvent::moved(at(116.0), t + Duration::from_millis(600)),
            &mut list,
        );
        assert_eq!(effects, vec![ReorderEffect::Moved(MoveCommand::new(1, 2))]);
        assert_eq!(list.order(), "ACBDE");

        let effects = session.handle_pointer(
            &PointerEvent::release(at(116.0), t + Duration::from_millis(700)),
            &mut list,
        );
        assert_eq!(
            effects,
            vec![
                ReorderEffect::Settling { index: 2 },
                ReorderEffect::Ended {
                    original_index: 1,
                    final_index: 2
                },
            ]
        );
        assert_eq!(session.state(), ReorderState::Idle);
        assert_eq!(
            log.entries(),
            vec!["begin 1", "will 1->2", "did 1->2", "will end 2", "did end 2"]
        );
    }

    #[test]
    fn armed_state_and_tap() {
        let log = Log::default();
        let mut list = List::new("ABCDE");
        let mut session = ReorderSession::default().with_delegate(log.clone());
        let t = Instant::now();

        session.handle_pointer(&PointerEvent::press(at(66.0), t), &mut list);
        assert_eq!(session.state(), ReorderState::Armed);
        let effects = session.handle_pointer(
            &PointerEvent::release(at(66.0), t + Duration::from_millis(100)),
            &mut list,
        );
        assert_eq!(
            effects,
            vec![ReorderEffect::Discarded {
                reason: DiscardReason::PrematureRelease
            }]
        );
        assert!(log.entries().is_empty());
        assert_eq!(list.order(), "ABCDE");
    }

    #[test]
    fn cancel_keeps_committed_order() {
        let log = Log::default();
        let mut list = List::new("ABCDE");
        let t = Instant::now();
        let mut session = dragging_b(&log, &mut list, t);

        session.drag_move(at(160.0), t + Duration::from_millis(600), &mut list);
        assert_eq!(list.order(), "ACDBE");

        assert_eq!(session.cancel(), vec![ReorderEffect::Cancelled { index: 3 }]);
        assert!(session.cancel().is_empty());
        assert_eq!(list.order(), "ACDBE");
        assert_eq!(log.entries().last().map(String::as_str), Some("cancelled 3"));

        let effects = session.drag_move(at(10.0), t + Duration::from_millis(700), &mut list);
        assert_eq!(
            effects,
            vec![ReorderEffect::Noop {
                reason: NoopReason::IdleWithoutActiveDrag
            }]
        );
    }

    #[test]
    fn row_count_change_aborts() {
        let log = Log::default();
        let mut list = List::new("ABCDE");
        let t = Instant::now();
        let mut session = dragging_b(&log, &mut list, t);

        list.rows.push('F');
        let effects = session.drag_move(at(116.0), t + Duration::from_millis(600), &mut list);
        assert_eq!(
            effects,
            vec![ReorderEffect::Aborted {
                index: 1,
                error: ReorderError::ConcurrentMutation {
                    expected: 5,
                    actual: 6
                }
            }]
        );
        assert_eq!(list.order(), "ABCDEF");
        assert_eq!(session.state(), ReorderState::Idle);
        assert_eq!(log.entries().last().map(String::as_str), Some("aborted 1"));
    }

    #[test]
    fn explicit_begin_validates() {
        let mut list = List::new("ABC");
        let mut session = ReorderSession::default();
        let t = Instant::now();
        assert_eq!(
            session.begin(3, at(0.0), t, &mut list),
            Err(ReorderError::InvalidIndex {
                index: 3,
                row_count: 3
            })
        );
        assert_eq!(
            session.begin(0, at(0.0), t, &mut List::new("")),
            Err(ReorderError::EmptyList)
        );
        assert!(session.begin(0, at(22.0), t, &mut list).is_ok());
        assert_eq!(
            session.begin(1, at(66.0), t, &mut list),
            Ok(vec![ReorderEffect::Noop {
                reason: NoopReason::DragAlreadyInProgress
            }])
        );
    }

    #[test]
    fn proxy_follows_pointer_and_snaps_on_end() {
        let mut list = List::new("ABCDE");
        let mut session = ReorderSession::default();
        let t = Instant::now();
        // Grab B 10 points below its center.
        session.begin(1, at(76.0), t, &mut list).unwrap();
        let proxy = session.proxy().copied().unwrap();
        assert!(proxy.style.highlighted);
        assert_eq!(proxy.frame.mid_y(), 66.0);

        session.drag_move(at(86.0), t, &mut list);
        assert_eq!(session.drag().unwrap().current_center_y(), 76.0);
        assert_eq!(session.proxy().unwrap().frame.mid_y(), 76.0);
        assert_eq!(session.drag().unwrap().touch_offset(), Vector::new(-60.0, 10.0));
        session.end(&mut list);
        assert!(session.proxy().is_none());
    }

    #[test]
    fn disable_cancels_and_blocks_presses() {
        let mut list = List::new("ABCDE");
        let log = Log::default();
        let t = Instant::now();
        let mut session = dragging_b(&log, &mut list, t);

        assert_eq!(
            session.set_enabled(false),
            vec![ReorderEffect::Cancelled { index: 1 }]
        );
        assert!(!session.is_enabled());
        let effects = session.handle_pointer(&PointerEvent::press(at(66.0), t), &mut list);
        assert_eq!(
            effects,
            vec![ReorderEffect::Noop {
                reason: NoopReason::Disabled
            }]
        );
        session.set_enabled(true);
        assert!(session.is_enabled());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = ReorderConfig::default();
        config.autoscroll.max_rate = -1.0;
        assert!(ReorderSession::new(config).is_err());
        assert!(ReorderSession::new(ReorderConfig::default()).is_ok());
    }

    #[test]
    fn tick_without_autoscroll_is_noop() {
        let mut list = List::new("ABCDE");
        let mut session = ReorderSession::default();
        let t = Instant::now();
        assert_eq!(
            session.tick(t, &mut list),
            vec![ReorderEffect::Noop {
                reason: NoopReason::IdleWithoutActiveDrag
            }]
        );
        session.begin(2, at(110.0), t, &mut list).unwrap();
        assert!(!session.wants_tick());
        assert_eq!(
            session.tick(t, &mut list),
            vec![ReorderEffect::Noop {
                reason: NoopReason::NoAutoscroll
            }]
        );
    }
}
