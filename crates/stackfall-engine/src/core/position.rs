/// Column/row coordinate on a [`Grid`](super::Grid), or an offset between two of them.
///
/// Row 0 is the bottom row of a grid and rows grow upwards, so "down" is `row - 1`.
/// Signed so that piece offsets relative to a pivot can be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Add, derive_more::Sub)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const LEFT: Self = Self::new(-1, 0);
    pub const RIGHT: Self = Self::new(1, 0);
    pub const DOWN: Self = Self::new(0, -1);

    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Reflects the offset over the `col == row` diagonal.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self::new(self.row, self.col)
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self::new(-self.col, -self.row)
    }

    #[must_use]
    pub const fn below(self, distance: i32) -> Self {
        Self::new(self.col, self.row - distance)
    }
}
