#![forbid(unsafe_code)]

//! Fixtures for exercising reorder sessions without a UI.
//!
//! - [`VecListHost`]: a `Vec`-backed list with real geometry and scrolling.
//! - [`RecordingDelegate`] / [`RecordingIndicators`]: shared logs of every
//!   callback, in order.
//! - [`TestClock`]: deterministic timestamps.
//! - [`DragDriver`]: press/hold/move/release helpers over all of the above.
//! - [`PointerScript`]: seeded random pointer sequences for robustness tests.

pub mod clock;
pub mod driver;
pub mod host;
pub mod recording;
pub mod script;

pub use clock::TestClock;
pub use driver::{DragDriver, POINTER_X};
pub use host::VecListHost;
pub use recording::{IndicatorCall, Notification, RecordingDelegate, RecordingIndicators};
pub use script::{PointerScript, ScriptStep};
