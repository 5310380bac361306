#![forbid(unsafe_code)]

//! Target index resolution with the midpoint rule.
//!
//! The dragged row's slot is part of the live layout: after every committed
//! move the host has already reordered, so the slot at `dragged_index` is the
//! one the floating item will drop into.
//!
//! # Midpoint rule
//!
//! Moving down, the item claims row `k > dragged` once its center reaches the
//! vertical midpoint of row `k`. Moving up, it claims row `k < dragged` once
//! its center reaches the midpoint of row `k` from below. Because the row that
//! was just displaced now sits on the other side with its own midpoint, the
//! center has to travel back past that midpoint to undo the move, which leaves
//! a dead band around every boundary and prevents flutter.
//!
//! # Invariants
//!
//! 1. The result is always in `[0, row_count - 1]`.
//! 2. One resolution yields at most one move command, however many rows the
//!    center skipped.
//! 3. Equal target and dragged index yields no command.

use reorder_core::RowLayout;

use crate::session::DragSession;

/// Computes where the dragged item belongs.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexResolver;

impl IndexResolver {
    /// Current center of the dragged item in content coordinates.
    ///
    /// The touch point is kept in viewport space, so this moves with the
    /// content offset even when the pointer is still.
    #[must_use]
    pub fn center_y<L>(session: &DragSession, layout: &L) -> f32
    where
        L: RowLayout + ?Sized,
    {
        layout.to_content(session.last_touch()).y - session.touch_offset().dy
    }

    /// Resolve the target index for the session's current pointer position.
    ///
    /// Returns `Some(new_index)` only when it differs from the session's
    /// dragged index. The caller issues exactly one `dragged -> new_index`
    /// move and updates the session.
    #[must_use]
    pub fn resolve<L>(session: &DragSession, layout: &L) -> Option<usize>
    where
        L: RowLayout + ?Sized,
    {
        let dragged = session.dragged_index();
        let target = Self::target_index(Self::center_y(session, layout), dragged, layout);
        (target != dragged).then_some(target)
    }

    /// Index the item belongs at when its center is at `center_y` and it
    /// currently occupies `dragged`.
    #[must_use]
    pub fn target_index<L>(center_y: f32, dragged: usize, layout: &L) -> usize
    where
        L: RowLayout + ?Sized,
    {
        let count = layout.row_count();
        if count == 0 {
            return 0;
        }
        let dragged = dragged.min(count - 1);

        let mut target = dragged;
        while target + 1 < count && center_y >= layout.frame_of(target + 1).mid_y() {
            target += 1;
        }
        if target == dragged {
            while target > 0 && center_y <= layout.frame_of(target - 1).mid_y() {
                target -= 1;
            }
        }
        target
    }
}
