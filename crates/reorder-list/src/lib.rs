#![forbid(unsafe_code)]

//! Press-and-hold drag reordering for vertically scrolling lists.
//!
//! # Role in the workspace
//! `reorder-list` sits on top of `reorder-core`. It turns the drag lifecycle
//! recognized there into row moves on a host list, scrolls the list when the
//! dragged row nears an edge, and reports everything to a delegate.
//!
//! # Primary responsibilities
//! - **ReorderSession**: the state machine. Owns the single live drag.
//! - **IndexResolver**: midpoint rule, one move per resolution, no flutter.
//! - **AutoscrollEngine**: edge zones, rate curve, time-based scroll deltas.
//! - **TickScheduler**: leases on a periodic tick source, released on drop.
//! - **ReorderDelegate / IndicatorProvider**: host notifications and proxy
//!   decoration.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut session = ReorderSession::new(ReorderConfig::default())?
//!     .with_delegate(MyDelegate::default());
//!
//! // From the host's input handler:
//! let effects = session.handle_pointer(&event, &mut list);
//! // From the host's frame clock:
//! let effects = session.poll(Instant::now(), &mut list);
//! ```

pub mod autoscroll;
pub mod config;
pub mod delegate;
pub mod error;
pub mod host;
pub mod indicator;
pub mod queue;
pub mod resolver;
pub mod session;
pub mod ticker;

pub use autoscroll::{AutoscrollEngine, AutoscrollState, ScrollDirection};
pub use config::{AutoscrollConfig, ReorderConfig};
pub use delegate::{NoopDelegate, ReorderDelegate};
pub use error::{ConfigError, ReorderError};
pub use host::{MoveCommand, MoveExecutor, ReorderHost};
pub use indicator::{DragProxy, IndicatorProvider, IndicatorStyle, ShadowIndicators};
pub use queue::{InputQueue, QueuedInput};
pub use resolver::IndexResolver;
pub use session::{DragSession, DragState, NoopReason, ReorderEffect, ReorderSession, ReorderState};
pub use ticker::{ManualTicks, TickHandle, TickScheduler};

pub use reorder_core::{
    DiscardReason, DragGesture, GestureConfig, Point, PointerEvent, PointerId, PointerPhase, Rect,
    RowLayout, Vector,
};
