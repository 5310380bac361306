#![forbid(unsafe_code)]

//! Host list collaborators.
//!
//! The engine never owns list data. It reads geometry through
//! [`RowLayout`] and asks the host to reorder through [`MoveExecutor`].

use reorder_core::RowLayout;
use serde::{Deserialize, Serialize};

/// One "move row `from` to position `to`" instruction.
///
/// Both indices refer to the order *before* the move is applied; after it,
/// the content formerly at `from` sits at `to` and the rows in between have
/// shifted by one toward `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCommand {
    pub from: usize,
    pub to: usize,
}

impl MoveCommand {
    /// Create a new move command.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Number of rows the moved row travelled.
    #[must_use]
    pub const fn distance(&self) -> usize {
        self.from.abs_diff(self.to)
    }

    /// Apply this move to a slice-backed list.
    ///
    /// Out-of-range indices leave the list untouched.
    pub fn apply<T>(&self, items: &mut [T]) {
        if self.from >= items.len() || self.to >= items.len() {
            return;
        }
        if self.from < self.to {
            items[self.from..=self.to].rotate_left(1);
        } else {
            items[self.to..=self.from].rotate_right(1);
        }
    }
}

/// Host list capable of reordering its rows.
pub trait MoveExecutor {
    /// Move the row at `from` to `to`.
    ///
    /// Must be synchronous: the backing order (and therefore
    /// [`RowLayout::frame_of`]) reflects the move when this returns. Must not
    /// change the row count.
    fn move_row(&mut self, from: usize, to: usize);
}

/// Everything the session needs from the host list.
pub trait ReorderHost: RowLayout + MoveExecutor {}

impl<T: RowLayout + MoveExecutor + ?Sized> ReorderHost for T {}

#[cfg(test)]
mod tests {
    use super::MoveCommand;

    #[test]
    fn apply_moves_down() {
        let mut rows = vec!['A', 'B', 'C', 'D', 'E'];
        MoveCommand::new(1, 3).apply(&mut rows);
        assert_eq!(rows, vec!['A', 'C', 'D', 'B', 'E']);
    }

    #[test]
    fn apply_moves_up() {
        let mut rows = vec!['A', 'B', 'C', 'D', 'E'];
        MoveCommand::new(4, 0).apply(&mut rows);
        assert_eq!(rows, vec!['E', 'A', 'B', 'C', 'D']);
    }

    #[test]
    fn apply_same_index_is_noop() {
        let mut rows = vec!['A', 'B'];
        MoveCommand::new(1, 1).apply(&mut rows);
        assert_eq!(rows, vec!['A', 'B']);
    }

    #[test]
    fn apply_out_of_range_is_noop() {
        let mut rows = vec!['A', 'B'];
        MoveCommand::new(0, 2).apply(&mut rows);
        assert_eq!(rows, vec!['A', 'B']);
        assert_eq!(MoveCommand::new(4, 1).distance(), 3);
    }
}
