#![forbid(unsafe_code)]

//! Scripted pointer input against a [`VecListHost`].
//!
//! Every helper feeds the session through its public entry points and
//! returns the effects of that one step. The full history is kept as well.

use reorder_core::{Point, PointerEvent};
use reorder_list::{ConfigError, ManualTicks, ReorderConfig, ReorderEffect, ReorderSession};
use tracing::debug_span;
use web_time::Duration;

use crate::clock::TestClock;
use crate::host::VecListHost;
use crate::recording::{RecordingDelegate, RecordingIndicators};
use crate::script::ScriptStep;

/// Horizontal pointer position used by every helper.
pub const POINTER_X: f32 = 100.0;

/// A session wired to a recording delegate, recording indicators, a manual
/// tick scheduler, and a test clock.
#[derive(Debug)]
pub struct DragDriver<T> {
    session: ReorderSession,
    host: VecListHost<T>,
    clock: TestClock,
    delegate: RecordingDelegate,
    indicators: RecordingIndicators,
    ticks: ManualTicks,
    pointer_y: f32,
    history: Vec<ReorderEffect>,
}

impl<T> DragDriver<T> {
    pub fn new(host: VecListHost<T>) -> Self {
        Self::build(ReorderSession::default(), host, RecordingDelegate::new())
    }

    pub fn with_config(config: ReorderConfig, host: VecListHost<T>) -> Result<Self, ConfigError> {
        Ok(Self::build(
            ReorderSession::new(config)?,
            host,
            RecordingDelegate::new(),
        ))
    }

    /// Use a pre-configured delegate (e.g. one that keeps indicators).
    pub fn with_delegate(host: VecListHost<T>, delegate: RecordingDelegate) -> Self {
        Self::build(ReorderSession::default(), host, delegate)
    }

    fn build(session: ReorderSession, host: VecListHost<T>, delegate: RecordingDelegate) -> Self {
        let indicators = RecordingIndicators::new();
        let ticks = ManualTicks::new();
        let session = session
            .with_delegate(delegate.clone())
            .with_indicators(indicators.clone())
            .with_scheduler(ticks.clone());
        Self {
            session,
            host,
            clock: TestClock::new(),
            delegate,
            indicators,
            ticks,
            pointer_y: 0.0,
            history: Vec::new(),
        }
    }

    // --- Accessors ---

    pub fn session(&self) -> &ReorderSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ReorderSession {
        &mut self.session
    }

    pub fn host(&self) -> &VecListHost<T> {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut VecListHost<T> {
        &mut self.host
    }

    pub fn clock(&self) -> &TestClock {
        &self.clock
    }

    pub fn delegate(&self) -> &RecordingDelegate {
        &self.delegate
    }

    pub fn indicators(&self) -> &RecordingIndicators {
        &self.indicators
    }

    pub fn ticks(&self) -> &ManualTicks {
        &self.ticks
    }

    /// Mutable session alongside its host and clock, for direct calls.
    pub fn parts_mut(&mut self) -> (&mut ReorderSession, &mut VecListHost<T>, &mut TestClock) {
        (&mut self.session, &mut self.host, &mut self.clock)
    }

    /// Every effect produced so far.
    pub fn history(&self) -> &[ReorderEffect] {
        &self.history
    }

    fn position(&self) -> Point {
        Point::new(POINTER_X, self.pointer_y)
    }

    fn record(&mut self, effects: Vec<ReorderEffect>) -> Vec<ReorderEffect> {
        self.history.extend(effects.iter().cloned());
        effects
    }

    // --- Pointer steps ---

    /// Press at viewport `y`.
    pub fn press(&mut self, y: f32) -> Vec<ReorderEffect> {
        self.pointer_y = y;
        let event = PointerEvent::press(self.position(), self.clock.now());
        let effects = self.session.handle_pointer(&event, &mut self.host);
        self.record(effects)
    }

    /// Let `ms` pass without polling.
    pub fn advance(&mut self, ms: u64) {
        self.clock.advance_ms(ms);
    }

    /// Let `ms` pass, then poll.
    pub fn hold(&mut self, ms: u64) -> Vec<ReorderEffect> {
        let now = self.clock.advance_ms(ms);
        let effects = self.session.poll(now, &mut self.host);
        self.record(effects)
    }

    /// Press at `y` and hold for the configured long-press duration.
    pub fn long_press(&mut self, y: f32) -> Vec<ReorderEffect> {
        let _span = debug_span!("long_press", y).entered();
        let mut effects = self.press(y);
        let hold = self.session.config().gesture.long_press_duration;
        effects.extend(self.hold_for(hold));
        effects
    }

    fn hold_for(&mut self, duration: Duration) -> Vec<ReorderEffect> {
        let now = self.clock.advance(duration);
        let effects = self.session.poll(now, &mut self.host);
        self.record(effects)
    }

    /// Move the pointer to viewport `y` without advancing time.
    pub fn move_to(&mut self, y: f32) -> Vec<ReorderEffect> {
        self.pointer_y = y;
        let event = PointerEvent::moved(self.position(), self.clock.now());
        let effects = self.session.handle_pointer(&event, &mut self.host);
        self.record(effects)
    }

    /// Move to each `y` in turn, one frame apart.
    pub fn sweep(&mut self, ys: impl IntoIterator<Item = f32>, frame_ms: u64) -> Vec<ReorderEffect> {
        let mut effects = Vec::new();
        for y in ys {
            self.clock.advance_ms(frame_ms);
            effects.extend(self.move_to(y));
        }
        effects
    }

    /// Release at the last pointer position.
    pub fn release(&mut self) -> Vec<ReorderEffect> {
        let event = PointerEvent::release(self.position(), self.clock.now());
        let effects = self.session.handle_pointer(&event, &mut self.host);
        self.record(effects)
    }

    /// The platform took the pointer away.
    pub fn pointer_cancel(&mut self) -> Vec<ReorderEffect> {
        let event = PointerEvent::cancel(self.position(), self.clock.now());
        let effects = self.session.handle_pointer(&event, &mut self.host);
        self.record(effects)
    }

    /// Programmatic cancel.
    pub fn cancel(&mut self) -> Vec<ReorderEffect> {
        let effects = self.session.cancel();
        self.record(effects)
    }

    /// Deliver one tick `ms` after the previous step.
    pub fn tick(&mut self, ms: u64) -> Vec<ReorderEffect> {
        let now = self.clock.advance_ms(ms);
        let effects = self.session.tick(now, &mut self.host);
        self.record(effects)
    }

    /// Run `count` frames of `frame_ms`, ticking only while the scheduler
    /// lease is held, the way a display link would.
    pub fn run_frames(&mut self, count: usize, frame_ms: u64) -> Vec<ReorderEffect> {
        let mut effects = Vec::new();
        for _ in 0..count {
            if !self.ticks.is_active() {
                break;
            }
            effects.extend(self.tick(frame_ms));
        }
        effects
    }

    /// Replay a script step by step.
    pub fn run_script(&mut self, steps: &[ScriptStep]) -> Vec<ReorderEffect> {
        let mut effects = Vec::new();
        for step in steps {
            effects.extend(match *step {
                ScriptStep::Press { y } => self.press(y),
                ScriptStep::Move { y } => self.move_to(y),
                ScriptStep::Release => self.release(),
                ScriptStep::PointerCancel => self.pointer_cancel(),
                ScriptStep::Cancel => self.cancel(),
                ScriptStep::Wait { ms } => self.hold(ms),
                ScriptStep::Tick { ms } => self.tick(ms),
            });
        }
        effects
    }
}

impl DragDriver<char> {
    /// Driver over [`VecListHost::letters`].
    pub fn letters(labels: &str) -> Self {
        Self::new(VecListHost::letters(labels))
    }

    pub fn order(&self) -> String {
        self.host.order()
    }
}
