use crate::OutOfRangeError;

use super::{piece::PieceKind, position::Position};

/// Content of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Nothing here.
    #[default]
    Empty,
    /// Landing preview of the falling piece. Never collides.
    Shadow,
    /// Part of a falling or locked piece.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns `true` if a piece cannot move into this cell.
    #[must_use]
    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::Piece(_))
    }
}

/// Fixed-size cell store used for the play field and the preview panels.
///
/// Cells are stored column-major. Row 0 is the bottom row.
///
/// The grid knows nothing about pieces beyond the cells they paint; all
/// movement rules live in [`Piece`](super::Piece).
///
/// # Example
///
/// ```
/// use stackfall_engine::{Cell, Grid, PieceKind};
///
/// let mut grid = Grid::new(10, 22);
/// grid.set(0, 0, Cell::Piece(PieceKind::T)).unwrap();
/// assert!(grid.is_occupied(0, 0).unwrap());
/// assert!(grid.get(10, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    num_cols: usize,
    num_rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(num_cols: usize, num_rows: usize) -> Self {
        assert!(num_cols > 0 && num_rows > 0, "grid dimensions must be non-zero");
        Self {
            num_cols,
            num_rows,
            cells: vec![Cell::Empty; num_cols * num_rows],
        }
    }

    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn get(&self, col: usize, row: usize) -> Result<Cell, OutOfRangeError> {
        let index = self.checked_index(col, row)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, col: usize, row: usize, cell: Cell) -> Result<(), OutOfRangeError> {
        let index = self.checked_index(col, row)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Returns `true` if the cell holds a piece (shadow cells do not count).
    pub fn is_occupied(&self, col: usize, row: usize) -> Result<bool, OutOfRangeError> {
        self.get(col, row).map(Cell::is_occupied)
    }

    /// Resets every cell to [`Cell::Empty`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Returns the cells of one row, left to right.
    pub fn row(&self, row: usize) -> Result<impl Iterator<Item = Cell> + '_, OutOfRangeError> {
        if row >= self.num_rows {
            return Err(OutOfRangeError { col: 0, row });
        }
        Ok((0..self.num_cols).map(move |col| self.cells[col * self.num_rows + row]))
    }

    /// Pivot at which new pieces enter this grid.
    ///
    /// Horizontally centered (rounding left) on the second row from the top.
    #[must_use]
    pub fn spawn_position(&self) -> Position {
        Position::new(to_coord(self.num_cols.saturating_sub(1) / 2), to_coord(self.num_rows) - 2)
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row).is_ok_and(|mut cells| cells.all(Cell::is_occupied))
    }

    /// Removes every full row, shifting the rows above it down.
    ///
    /// Sweeps from the top row downwards. After a row is removed the same
    /// index is examined again, because the row above has slid into it.
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = self.num_rows;
        while row > 0 {
            if self.is_row_full(row - 1) {
                cleared += 1;
                self.remove_row(row - 1);
            } else {
                row -= 1;
            }
        }
        cleared
    }

    fn remove_row(&mut self, row: usize) {
        for col in 0..self.num_cols {
            let column = &mut self.cells[col * self.num_rows..][..self.num_rows];
            column.copy_within(row + 1.., row);
            column[self.num_rows - 1] = Cell::Empty;
        }
    }

    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Returns `true` if `pos` is outside the grid or holds a piece.
    pub(crate) fn is_blocked(&self, pos: Position) -> bool {
        self.index(pos)
            .is_none_or(|index| self.cells[index].is_occupied())
    }

    pub(crate) fn put(&mut self, pos: Position, cell: Cell) {
        let index = self.index(pos);
        debug_assert!(index.is_some(), "painting outside the grid at {pos:?}");
        if let Some(index) = index {
            self.cells[index] = cell;
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let col = usize::try_from(pos.col).ok()?;
        let row = usize::try_from(pos.row).ok()?;
        self.checked_index(col, row).ok()
    }

    fn checked_index(&self, col: usize, row: usize) -> Result<usize, OutOfRangeError> {
        if col < self.num_cols && row < self.num_rows {
            Ok(col * self.num_rows + row)
        } else {
            Err(OutOfRangeError { col, row })
        }
    }
}

fn to_coord(n: usize) -> i32 {
    // Grid dimensions are bounded well below `i32::MAX` by field-size validation.
    i32::try_from(n).unwrap_or(i32::MAX)
}
