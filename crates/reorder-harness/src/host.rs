#![forbid(unsafe_code)]

//! In-memory host list.

use reorder_core::{Point, Rect, RowLayout};
use reorder_list::{MoveCommand, MoveExecutor};

/// Width of every row. Only the vertical axis matters to the engine.
const ROW_WIDTH: f32 = 320.0;

/// A `Vec`-backed list with per-row heights and a scrollable viewport.
///
/// Records every move and scroll so tests can check what the engine asked
/// for, not only where the rows ended up.
#[derive(Debug, Clone)]
pub struct VecListHost<T> {
    rows: Vec<T>,
    heights: Vec<f32>,
    viewport_height: f32,
    offset: f32,
    moves: Vec<MoveCommand>,
    scrolls: Vec<f32>,
}

impl<T> VecListHost<T> {
    /// Rows of equal height.
    pub fn uniform(rows: Vec<T>, row_height: f32, viewport_height: f32) -> Self {
        let heights = vec![row_height; rows.len()];
        Self::from_parts(rows, heights, viewport_height)
    }

    /// Rows with individual heights.
    pub fn with_heights(rows: Vec<(T, f32)>, viewport_height: f32) -> Self {
        let (rows, heights) = rows.into_iter().unzip();
        Self::from_parts(rows, heights, viewport_height)
    }

    fn from_parts(rows: Vec<T>, heights: Vec<f32>, viewport_height: f32) -> Self {
        Self {
            rows,
            heights,
            viewport_height,
            offset: 0.0,
            moves: Vec::new(),
            scrolls: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Move commands received, in order.
    pub fn moves(&self) -> &[MoveCommand] {
        &self.moves
    }

    /// Scroll distances actually applied, in order.
    pub fn scrolls(&self) -> &[f32] {
        &self.scrolls
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Jump to `y`, clamped to the scrollable range.
    pub fn set_content_offset(&mut self, y: f32) {
        self.offset = y.clamp(0.0, self.max_scroll_y());
    }

    /// Insert a row behind the engine's back.
    pub fn insert(&mut self, index: usize, row: T, height: f32) {
        self.rows.insert(index, row);
        self.heights.insert(index, height);
    }

    /// Remove a row behind the engine's back.
    pub fn remove(&mut self, index: usize) -> T {
        self.heights.remove(index);
        self.rows.remove(index)
    }
}

impl VecListHost<char> {
    /// One row per character, 44 points tall, in a 480 point viewport.
    pub fn letters(labels: &str) -> Self {
        Self::uniform(labels.chars().collect(), 44.0, 480.0)
    }

    /// Current row order as a string.
    pub fn order(&self) -> String {
        self.rows.iter().collect()
    }
}

impl<T> RowLayout for VecListHost<T> {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn frame_of(&self, index: usize) -> Rect {
        let top: f32 = self.heights[..index].iter().sum();
        Rect::new(0.0, top, ROW_WIDTH, self.heights[index])
    }

    fn viewport_bounds(&self) -> Rect {
        Rect::from_size(ROW_WIDTH, self.viewport_height)
    }

    fn content_offset(&self) -> Point {
        Point::new(0.0, self.offset)
    }

    fn content_height(&self) -> f32 {
        self.heights.iter().sum()
    }

    fn scroll_by(&mut self, delta: f32) -> f32 {
        let next = (self.offset + delta).clamp(0.0, self.max_scroll_y());
        let actual = next - self.offset;
        self.offset = next;
        if actual != 0.0 {
            self.scrolls.push(actual);
        }
        actual
    }
}

impl<T> MoveExecutor for VecListHost<T> {
    fn move_row(&mut self, from: usize, to: usize) {
        let command = MoveCommand::new(from, to);
        command.apply(&mut self.rows);
        command.apply(&mut self.heights);
        self.moves.push(command);
    }
}
