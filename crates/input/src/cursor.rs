//! Grid cursor - turns cursor actions into a tile index.
//!
//! The cursor is presentation state. It clamps at the grid edges and never
//! touches the round itself.

use crate::types::{GameAction, GRID_COLUMNS, GRID_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridCursor {
    col: usize,
    row: usize,
}

impl GridCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor on `index`, clamped into the grid.
    pub fn at(index: usize) -> Self {
        let index = index.min(GRID_COLUMNS * GRID_ROWS - 1);
        Self {
            col: index % GRID_COLUMNS,
            row: index / GRID_COLUMNS,
        }
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Row-major tile index under the cursor.
    pub fn index(&self) -> usize {
        self.row * GRID_COLUMNS + self.col
    }

    /// Apply a cursor action. Returns `true` if the cursor moved.
    ///
    /// Non-cursor actions are ignored.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let before = *self;
        match action {
            GameAction::CursorLeft => self.col = self.col.saturating_sub(1),
            GameAction::CursorRight => self.col = (self.col + 1).min(GRID_COLUMNS - 1),
            GameAction::CursorUp => self.row = self.row.saturating_sub(1),
            GameAction::CursorDown => self.row = (self.row + 1).min(GRID_ROWS - 1),
            GameAction::Select | GameAction::Restart => {}
        }
        *self != before
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_top_left() {
        let cursor = GridCursor::new();
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_moves_and_clamps() {
        let mut cursor = GridCursor::new();
        assert!(!cursor.apply(GameAction::CursorLeft));
        assert!(!cursor.apply(GameAction::CursorUp));

        for _ in 0..10 {
            cursor.apply(GameAction::CursorRight);
            cursor.apply(GameAction::CursorDown);
        }
        assert_eq!(cursor.col(), GRID_COLUMNS - 1);
        assert_eq!(cursor.row(), GRID_ROWS - 1);
        assert_eq!(cursor.index(), GRID_COLUMNS * GRID_ROWS - 1);

        assert!(cursor.apply(GameAction::CursorLeft));
        assert_eq!(cursor.index(), GRID_COLUMNS * GRID_ROWS - 2);
    }

    #[test]
    fn test_at_round_trips_index() {
        for i in 0..GRID_COLUMNS * GRID_ROWS {
            assert_eq!(GridCursor::at(i).index(), i);
        }
        assert_eq!(GridCursor::at(999).index(), GRID_COLUMNS * GRID_ROWS - 1);
    }

    #[test]
    fn test_ignores_other_actions() {
        let mut cursor = GridCursor::at(5);
        assert!(!cursor.apply(GameAction::Select));
        assert!(!cursor.apply(GameAction::Restart));
        assert_eq!(cursor.index(), 5);
        cursor.reset();
        assert_eq!(cursor.index(), 0);
    }
}
