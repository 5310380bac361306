#![forbid(unsafe_code)]

//! Visual "this row is being dragged" feedback.
//!
//! The engine does not render. It keeps a [`DragProxy`] describing the
//! floating stand-in for the dragged row and lets an [`IndicatorProvider`]
//! decorate it. Hosts draw the proxy however they like.
//!
//! Call order per drag: `clone_for_dragging` (optional), `add_indicators`,
//! then at the end `hide_indicators` (usually) and `remove_indicators`
//! (always, including cancel and abort).

use reorder_core::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Decoration applied to the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorStyle {
    pub highlighted: bool,
    /// 0.0 (invisible) to 1.0.
    pub shadow_opacity: f32,
    pub shadow_radius: f32,
}

/// Floating stand-in for the dragged row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragProxy {
    /// Row the drag started from.
    pub source_index: usize,
    /// Current frame in content coordinates.
    pub frame: Rect,
    pub style: IndicatorStyle,
}

impl DragProxy {
    /// Proxy covering `frame`, undecorated.
    #[must_use]
    pub fn new(source_index: usize, frame: Rect) -> Self {
        Self {
            source_index,
            frame,
            style: IndicatorStyle::default(),
        }
    }

    /// Center of the proxy.
    #[must_use]
    pub fn center(&self) -> Point {
        self.frame.center()
    }

    pub(crate) fn move_center_y(&mut self, center_y: f32) {
        let center = Point::new(self.frame.center().x, center_y);
        self.frame = self.frame.centered_at(center);
    }
}

/// Decorates the drag proxy.
pub trait IndicatorProvider {
    /// Make the proxy look draggable.
    fn add_indicators(&mut self, proxy: &mut DragProxy, index: usize);

    /// Fade decorations so the proxy looks like a resting row.
    fn hide_indicators(&mut self, proxy: &mut DragProxy);

    /// Strip all decorations.
    fn remove_indicators(&mut self, proxy: &mut DragProxy);

    /// Build a custom proxy for row `index` at `frame`. `None` uses the
    /// default undecorated proxy.
    fn clone_for_dragging(&mut self, _index: usize, _frame: Rect) -> Option<DragProxy> {
        None
    }
}

/// Default provider: highlights the row and drops a shadow around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowIndicators {
    pub opacity: f32,
    pub radius: f32,
}

impl Default for ShadowIndicators {
    fn default() -> Self {
        Self {
            opacity: 0.5,
            radius: 6.0,
        }
    }
}

impl IndicatorProvider for ShadowIndicators {
    fn add_indicators(&mut self, proxy: &mut DragProxy, _index: usize) {
        proxy.style = IndicatorStyle {
            highlighted: true,
            shadow_opacity: self.opacity,
            shadow_radius: self.radius,
        };
    }

    fn hide_indicators(&mut self, proxy: &mut DragProxy) {
        proxy.style.highlighted = false;
        proxy.style.shadow_opacity = 0.0;
    }

    fn remove_indicators(&mut self, proxy: &mut DragProxy) {
        proxy.style = IndicatorStyle::default();
    }
}
