#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and long-press drag recognition.
//!
//! # Role in the workspace
//! `reorder-core` is the input layer. It knows nothing about moving rows; it
//! turns raw pointer events into a drag lifecycle and defines the read-only
//! [`RowLayout`](layout::RowLayout) view that every other component queries.
//!
//! # Primary responsibilities
//! - **Geometry**: `Point`, `Vector`, `Rect` in logical points.
//! - **PointerEvent**: press/move/release/cancel with position and timestamp.
//! - **GestureCoordinator**: long-press arming, tap rejection, drag lifecycle.
//! - **RowLayout**: host row geometry, hit testing, scroll clamping.
//!
//! # How it fits in the system
//! `reorder-list` drives a `GestureCoordinator` from its `ReorderSession` and
//! feeds the resulting gestures to the index resolver and autoscroll engine.

pub mod duration_ms;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod logging;

pub use event::{PointerEvent, PointerId, PointerPhase};
pub use geometry::{Point, Rect, Vector};
pub use gesture::{DiscardReason, DragGesture, GestureConfig, GestureCoordinator, IgnoreReason};
pub use layout::RowLayout;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
