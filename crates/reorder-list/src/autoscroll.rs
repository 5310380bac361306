#![forbid(unsafe_code)]

//! Edge autoscroll.
//!
//! While the dragged item sits within `edge_threshold` points of the top or
//! bottom of the viewport, the list scrolls toward that edge at a speed
//! proportional to how deep the item has pushed into the edge zone:
//!
//! ```text
//! rate = min(max_rate, (edge_threshold - distance) * rate_gain)
//! ```
//!
//! `distance` may be negative when the item is dragged past the edge; the
//! rate then saturates at `max_rate`. Each tick scrolls `rate * elapsed`, so
//! the speed is independent of how regularly ticks arrive.

use reorder_core::{Rect, RowLayout};
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::config::AutoscrollConfig;

/// Which way the viewport is scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    #[default]
    None,
    /// Toward the start of the content (offset decreasing).
    Up,
    /// Toward the end of the content (offset increasing).
    Down,
}

/// Current autoscroll decision.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AutoscrollState {
    pub direction: ScrollDirection,
    /// Scroll speed in points per second (always >= 0.0).
    pub rate: f32,
    pub active: bool,
}

impl AutoscrollState {
    /// Not scrolling.
    pub const IDLE: Self = Self {
        direction: ScrollDirection::None,
        rate: 0.0,
        active: false,
    };

    /// Signed scroll speed: negative scrolls up, positive scrolls down.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        match self.direction {
            ScrollDirection::None => 0.0,
            ScrollDirection::Up => -self.rate,
            ScrollDirection::Down => self.rate,
        }
    }
}

/// Decides when, which way, and how fast to scroll during a drag.
#[derive(Debug, Clone)]
pub struct AutoscrollEngine {
    config: AutoscrollConfig,
    state: AutoscrollState,
}

impl AutoscrollEngine {
    /// Create an idle engine.
    #[must_use]
    pub fn new(config: AutoscrollConfig) -> Self {
        Self {
            config,
            state: AutoscrollState::IDLE,
        }
    }

    /// Current decision.
    #[inline]
    #[must_use]
    pub fn state(&self) -> AutoscrollState {
        self.state
    }

    /// Whether scrolling is in progress.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &AutoscrollConfig {
        &self.config
    }

    /// Scroll speed for an item `distance` points from an edge.
    ///
    /// Zero at or beyond the threshold; non-decreasing as the distance
    /// shrinks; never above `max_rate`.
    #[must_use]
    pub fn rate_for_distance(&self, distance: f32) -> f32 {
        let threshold = self.config.edge_threshold;
        if distance.is_nan() || distance >= threshold {
            return 0.0;
        }
        ((threshold - distance) * self.config.rate_gain).min(self.config.max_rate)
    }

    /// Decide what to do for an item at `item` (viewport coordinates) in a
    /// viewport `viewport_height` points tall. Does not change the engine.
    #[must_use]
    pub fn evaluate(&self, item: Rect, viewport_height: f32) -> AutoscrollState {
        if !self.config.enabled {
            return AutoscrollState::IDLE;
        }
        let to_top = item.top();
        let to_bottom = viewport_height - item.bottom();
        let threshold = self.config.edge_threshold;

        let direction = match (to_top < threshold, to_bottom < threshold) {
            (false, false) => return AutoscrollState::IDLE,
            (true, false) => ScrollDirection::Up,
            (false, true) => ScrollDirection::Down,
            // Tiny viewport: the nearer edge wins.
            (true, true) if to_top <= to_bottom => ScrollDirection::Up,
            (true, true) => ScrollDirection::Down,
        };
        let distance = if direction == ScrollDirection::Up {
            to_top
        } else {
            to_bottom
        };
        let rate = self.rate_for_distance(distance);
        if rate <= 0.0 {
            return AutoscrollState::IDLE;
        }
        AutoscrollState {
            direction,
            rate,
            active: true,
        }
    }

    /// Re-evaluate for a new item position.
    ///
    /// Returns `true` when scrolling started, stopped, or changed direction.
    /// Rate changes alone return `false`.
    pub fn update(&mut self, item: Rect, viewport_height: f32) -> bool {
        let next = self.evaluate(item, viewport_height);
        let changed = next.active != self.state.active || next.direction != self.state.direction;
        self.state = next;
        changed
    }

    /// Stop scrolling. Returns `true` if it was active.
    pub fn stop(&mut self) -> bool {
        let was_active = self.state.active;
        self.state = AutoscrollState::IDLE;
        was_active
    }

    /// Scroll delta for one tick, clamped so the content offset stays within
    /// `[0, content_height - viewport_height]`.
    #[must_use]
    pub fn scroll_delta<L>(&self, elapsed: Duration, layout: &L) -> f32
    where
        L: RowLayout + ?Sized,
    {
        if !self.state.active {
            return 0.0;
        }
        let offset = layout.content_offset().y;
        let wanted = self.state.velocity() * elapsed.as_secs_f32();
        let target = (offset + wanted).clamp(0.0, layout.max_scroll_y());
        target - offset
    }
}
