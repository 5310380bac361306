#![forbid(unsafe_code)]

//! Read-only view of a host list's row geometry.
//!
//! [`RowLayout`] is the one collaborator every reorder component consults.
//! Implementations answer from live host state; callers re-query it on every
//! event or tick and never cache frames, because scrolling and moves shift
//! geometry between queries.

use crate::geometry::{Point, Rect};

/// Row geometry and scroll position of a vertically-scrolling list.
pub trait RowLayout {
    /// Number of rows currently in the list.
    fn row_count(&self) -> usize;

    /// Frame of the row at `index`, in content coordinates.
    ///
    /// Callers only pass indices below [`row_count`](Self::row_count).
    fn frame_of(&self, index: usize) -> Rect;

    /// Visible region of the list. Only the size is consulted; its position
    /// in content space is [`content_offset`](Self::content_offset).
    fn viewport_bounds(&self) -> Rect;

    /// Current scroll position (content coordinate of the viewport origin).
    fn content_offset(&self) -> Point;

    /// Scroll vertically by `delta` points, returning the distance actually
    /// scrolled after the host's own clamping.
    fn scroll_by(&mut self, delta: f32) -> f32;

    /// Total height of the content.
    fn content_height(&self) -> f32 {
        match self.row_count() {
            0 => 0.0,
            n => self.frame_of(n - 1).bottom(),
        }
    }

    /// Convert a viewport position into content coordinates.
    fn to_content(&self, viewport: Point) -> Point {
        let offset = self.content_offset();
        Point::new(viewport.x + offset.x, viewport.y + offset.y)
    }

    /// Index of the row whose vertical span contains `content_y`.
    ///
    /// Rows are assumed to be laid out top to bottom without overlap, so a
    /// binary search over frames is sufficient.
    fn index_at(&self, content_y: f32) -> Option<usize> {
        let count = self.row_count();
        let (mut lo, mut hi) = (0usize, count);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let frame = self.frame_of(mid);
            if content_y < frame.top() {
                hi = mid;
            } else if content_y >= frame.bottom() {
                lo = mid + 1;
            } else {
                return Some(mid);
            }
        }
        None
    }

    /// Largest valid content offset along y.
    fn max_scroll_y(&self) -> f32 {
        (self.content_height() - self.viewport_bounds().height).max(0.0)
    }
}
