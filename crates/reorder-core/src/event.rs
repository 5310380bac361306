#![forbid(unsafe_code)]

//! Canonical pointer input events.
//!
//! A gesture source (touch screen, mouse, pen) reports one [`PointerEvent`]
//! per phase change. Positions are in viewport coordinates; timestamps come
//! from a monotonic clock.

use web_time::Instant;

use crate::geometry::Point;

/// Identifier of the physical pointer (finger, mouse button, pen) that
/// produced an event.
pub type PointerId = u32;

/// Lifecycle phase of a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Pointer went down.
    Press,
    /// Pointer moved while down.
    Move,
    /// Pointer lifted.
    Release,
    /// The platform took the pointer away (competing gesture, focus loss).
    Cancel,
}

/// A single raw pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    pub phase: PointerPhase,
    /// Position in viewport coordinates.
    pub position: Point,
    pub timestamp: Instant,
}

impl PointerEvent {
    /// Create a new event.
    #[must_use]
    pub const fn new(
        pointer_id: PointerId,
        phase: PointerPhase,
        position: Point,
        timestamp: Instant,
    ) -> Self {
        Self {
            pointer_id,
            phase,
            position,
            timestamp,
        }
    }

    /// Press of the primary pointer.
    #[must_use]
    pub const fn press(position: Point, timestamp: Instant) -> Self {
        Self::new(0, PointerPhase::Press, position, timestamp)
    }

    /// Move of the primary pointer.
    #[must_use]
    pub const fn moved(position: Point, timestamp: Instant) -> Self {
        Self::new(0, PointerPhase::Move, position, timestamp)
    }

    /// Release of the primary pointer.
    #[must_use]
    pub const fn release(position: Point, timestamp: Instant) -> Self {
        Self::new(0, PointerPhase::Release, position, timestamp)
    }

    /// Cancel of the primary pointer.
    #[must_use]
    pub const fn cancel(position: Point, timestamp: Instant) -> Self {
        Self::new(0, PointerPhase::Cancel, position, timestamp)
    }

    /// Same event attributed to a different pointer.
    #[must_use]
    pub const fn with_pointer(mut self, pointer_id: PointerId) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}
