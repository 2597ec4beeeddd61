use serde::{Deserialize, Serialize};

use super::{
    grid::{Cell, Grid},
    position::Position,
};

/// An active tetromino painted into a [`Grid`].
///
/// A piece does not hold on to the grid it lives in. Every operation takes
/// the grid the piece is bound to, and the caller is responsible for always
/// passing the same one until [`Piece::remove_from_grid`] is called. Moving a
/// piece to another grid means removing it and spawning a new one there.
///
/// While active, the four cells returned by [`Piece::cells`] are always inside
/// the grid and always hold `Cell::Piece(kind)`.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Grid, Piece, PieceKind};
///
/// let mut grid = Grid::new(10, 22);
/// let mut piece = Piece::spawn(PieceKind::T, &mut grid, false);
/// assert!(piece.move_left(&mut grid));
/// assert!(piece.rotate(&mut grid, true));
/// let rows = piece.hard_drop(&mut grid);
/// assert!(rows > 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    offsets: [Position; 4],
    pivot: Position,
    rotation: Rotation,
    display_shadow: bool,
    shadow_distance: i32,
}

impl Piece {
    /// Creates a piece at the grid's spawn position and paints it.
    ///
    /// The cells are painted unconditionally; use [`Piece::is_legal_spawn`]
    /// beforehand to check that they are free.
    pub fn spawn(kind: PieceKind, grid: &mut Grid, display_shadow: bool) -> Self {
        let mut piece = Self {
            kind,
            offsets: kind.shape(),
            pivot: grid.spawn_position(),
            rotation: Rotation::Up,
            display_shadow,
            shadow_distance: 0,
        };
        piece.paint(grid);
        piece
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub fn pivot(&self) -> Position {
        self.pivot
    }

    #[must_use]
    pub fn offsets(&self) -> [Position; 4] {
        self.offsets
    }

    #[must_use]
    pub fn display_shadow(&self) -> bool {
        self.display_shadow
    }

    /// Number of rows between the piece and its shadow (0 when disabled).
    #[must_use]
    pub fn shadow_distance(&self) -> i32 {
        self.shadow_distance
    }

    /// Absolute positions of the four cells.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.offsets.iter().map(|&offset| self.pivot + offset)
    }

    /// Absolute positions of the four shadow cells.
    pub fn shadow_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells().map(|pos| pos.below(self.shadow_distance))
    }

    pub fn move_left(&mut self, grid: &mut Grid) -> bool {
        self.shift(grid, Position::LEFT)
    }

    pub fn move_right(&mut self, grid: &mut Grid) -> bool {
        self.shift(grid, Position::RIGHT)
    }

    /// Moves the piece one row down.
    ///
    /// Returns `false` if the piece has landed.
    pub fn move_down(&mut self, grid: &mut Grid) -> bool {
        self.shift(grid, Position::DOWN)
    }

    /// Moves the piece down until it lands, returning the number of rows travelled.
    pub fn hard_drop(&mut self, grid: &mut Grid) -> usize {
        let mut rows = 0;
        while self.move_down(grid) {
            rows += 1;
        }
        rows
    }

    /// Rotates the piece by 90°, trying each wall kick in turn.
    ///
    /// Returns `false` (and leaves the piece untouched) for the O piece or
    /// when no kick yields a free placement.
    pub fn rotate(&mut self, grid: &mut Grid, clockwise: bool) -> bool {
        if self.kind == PieceKind::O {
            return false;
        }

        let (target, offsets, pivot, kicks) = if clockwise {
            let target = self.rotation.rotated_cw();
            let mut pivot = self.pivot;
            if self.kind == PieceKind::I {
                pivot = pivot + self.offsets[2];
            }
            let offsets = self.offsets.map(|o| {
                let o = o.transposed();
                Position::new(o.col, -o.row)
            });
            (target, offsets, pivot, self.kicks(self.rotation))
        } else {
            let target = self.rotation.rotated_ccw();
            let offsets = self.offsets.map(|o| {
                let o = o.transposed();
                Position::new(-o.col, o.row)
            });
            let mut pivot = self.pivot;
            if self.kind == PieceKind::I {
                pivot = pivot - offsets[2];
            }
            let kicks = self.kicks(target).map(Position::negated);
            (target, offsets, pivot, kicks)
        };

        let board: &Grid = grid;
        let Some(pivot) = kicks
            .into_iter()
            .map(|kick| pivot + kick)
            .find(|&pivot| offsets.iter().all(|&o| self.can_enter(board, pivot + o)))
        else {
            return false;
        };

        self.erase(grid);
        self.offsets = offsets;
        self.pivot = pivot;
        self.rotation = target;
        self.paint(grid);
        true
    }

    /// Returns `true` if every cell is inside the two topmost (hidden) rows.
    ///
    /// Locking such a piece ends the game.
    #[must_use]
    pub fn is_illegal_lock(&self, grid: &Grid) -> bool {
        let boundary = grid.spawn_position().row;
        self.cells().all(|pos| pos.row >= boundary)
    }

    /// Returns `true` if this piece's current shape fits at the spawn position of `destination`.
    #[must_use]
    pub fn is_legal_spawn(&self, destination: &Grid) -> bool {
        let pivot = destination.spawn_position();
        self.offsets
            .iter()
            .all(|&offset| !destination.is_blocked(pivot + offset))
    }

    /// Erases the piece and its shadow.
    pub fn remove_from_grid(&self, grid: &mut Grid) {
        self.erase(grid);
    }

    /// Turns the landing shadow on or off, repainting as needed.
    pub fn set_display_shadow(&mut self, grid: &mut Grid, display_shadow: bool) {
        self.erase(grid);
        self.display_shadow = display_shadow;
        self.paint(grid);
    }

    fn kicks(&self, rotation: Rotation) -> [Position; 5] {
        if self.kind == PieceKind::I {
            I_KICKS[rotation as usize]
        } else {
            KICKS[rotation as usize]
        }
    }

    fn occupies(&self, pos: Position) -> bool {
        self.cells().any(|cell| cell == pos)
    }

    /// A cell can be entered if it is inside the grid and either free or one of our own.
    fn can_enter(&self, grid: &Grid, pos: Position) -> bool {
        grid.contains(pos) && (!grid.is_blocked(pos) || self.occupies(pos))
    }

    fn can_shift(&self, grid: &Grid, delta: Position) -> bool {
        self.cells().all(|pos| self.can_enter(grid, pos + delta))
    }

    fn shift(&mut self, grid: &mut Grid, delta: Position) -> bool {
        if !self.can_shift(grid, delta) {
            return false;
        }
        self.erase(grid);
        self.pivot = self.pivot + delta;
        self.paint(grid);
        true
    }

    fn erase(&self, grid: &mut Grid) {
        for pos in self.cells() {
            grid.put(pos, Cell::Empty);
        }
        if self.display_shadow {
            for pos in self.shadow_cells() {
                grid.put(pos, Cell::Empty);
            }
        }
    }

    fn paint(&mut self, grid: &mut Grid) {
        self.shadow_distance = 0;
        if self.display_shadow {
            while self.can_shift(grid, Position::DOWN.below(self.shadow_distance)) {
                self.shadow_distance += 1;
            }
            for pos in self.shadow_cells() {
                grid.put(pos, Cell::Shadow);
            }
        }
        for pos in self.cells() {
            grid.put(pos, Cell::Piece(self.kind));
        }
    }
}

/// Orientation of a piece relative to its spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Rotation {
    #[default]
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Rotation {
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        match self {
            Rotation::Up => Rotation::Right,
            Rotation::Right => Rotation::Down,
            Rotation::Down => Rotation::Left,
            Rotation::Left => Rotation::Up,
        }
    }

    #[must_use]
    pub const fn rotated_ccw(self) -> Self {
        match self {
            Rotation::Up => Rotation::Left,
            Rotation::Right => Rotation::Up,
            Rotation::Down => Rotation::Right,
            Rotation::Left => Rotation::Down,
        }
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    J = 1,
    L = 2,
    O = 3,
    S = 4,
    T = 5,
    Z = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Cell offsets from the pivot in the spawn orientation.
    #[must_use]
    pub const fn shape(self) -> [Position; 4] {
        SHAPES[self as usize]
    }
}

const fn p(col: i32, row: i32) -> Position {
    Position::new(col, row)
}

const SHAPES: [[Position; 4]; PieceKind::LEN] = [
    // I-piece
    [p(0, 0), p(-1, 0), p(1, 0), p(2, 0)],
    // J-piece
    [p(0, 0), p(-1, 1), p(-1, 0), p(1, 0)],
    // L-piece
    [p(0, 0), p(-1, 0), p(1, 1), p(1, 0)],
    // O-piece
    [p(0, 0), p(0, 1), p(1, 1), p(1, 0)],
    // S-piece
    [p(0, 0), p(-1, 0), p(0, 1), p(1, 1)],
    // T-piece
    [p(0, 0), p(-1, 0), p(0, 1), p(1, 0)],
    // Z-piece
    [p(0, 0), p(-1, 1), p(0, 1), p(1, 0)],
];

// Kick tables, indexed by rotation state. Clockwise rotations use the entry
// of the source state as-is; counter-clockwise rotations use the entry of
// the target state negated.
const KICKS: [[Position; 5]; 4] = [
    [p(0, 0), p(-1, 0), p(-1, 1), p(0, -2), p(-1, -2)],
    [p(0, 0), p(1, 0), p(1, -1), p(0, 2), p(1, 2)],
    [p(0, 0), p(1, 0), p(1, 1), p(0, -2), p(1, -2)],
    [p(0, 0), p(-1, 0), p(-1, -1), p(0, 2), p(-1, 2)],
];

const I_KICKS: [[Position; 5]; 4] = [
    [p(0, 0), p(-2, 0), p(1, 0), p(-2, -1), p(1, 2)],
    [p(0, 0), p(-1, 0), p(2, 0), p(-1, 2), p(2, -1)],
    [p(0, 0), p(2, 0), p(-1, 0), p(2, 1), p(-1, -2)],
    [p(0, 0), p(1, 0), p(-2, 0), p(1, -2), p(-2, 1)],
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const ROTATING: [PieceKind; 6] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    fn piece_cells(grid: &Grid) -> HashSet<Position> {
        let mut cells = HashSet::new();
        for col in 0..grid.num_cols() {
            for row in 0..grid.num_rows() {
                if grid.is_occupied(col, row).unwrap() {
                    cells.insert(p(i32::try_from(col).unwrap(), i32::try_from(row).unwrap()));
                }
            }
        }
        cells
    }

    fn shadow_cells(grid: &Grid) -> HashSet<Position> {
        let mut cells = HashSet::new();
        for col in 0..grid.num_cols() {
            for row in 0..grid.num_rows() {
                if grid.get(col, row).unwrap() == Cell::Shadow {
                    cells.insert(p(i32::try_from(col).unwrap(), i32::try_from(row).unwrap()));
                }
            }
        }
        cells
    }

    fn block(grid: &mut Grid, col: usize, row: usize) {
        grid.set(col, row, Cell::Piece(PieceKind::O)).unwrap();
    }

    #[test]
    fn test_spawn_matches_canonical_shape() {
        for kind in PieceKind::ALL {
            let mut grid = Grid::new(10, 22);
            let piece = Piece::spawn(kind, &mut grid, false);
            let expected: HashSet<_> = kind.shape().iter().map(|&o| p(4, 20) + o).collect();
            assert_eq!(expected.len(), 4, "{kind:?} shape should have 4 distinct cells");
            assert_eq!(piece_cells(&grid), expected, "{kind:?}");
            assert_eq!(piece.cells().collect::<HashSet<_>>(), expected);
            assert_eq!(piece.rotation(), Rotation::Up);
            for pos in &expected {
                assert!(grid.contains(*pos));
            }
        }
    }

    #[test]
    fn test_moves_leave_no_ghosts() {
        for kind in PieceKind::ALL {
            let mut grid = Grid::new(10, 22);
            let mut piece = Piece::spawn(kind, &mut grid, false);
            for mv in [Piece::move_left, Piece::move_right, Piece::move_down] {
                let before: HashSet<_> = piece.cells().collect();
                assert!(mv(&mut piece, &mut grid));
                let after: HashSet<_> = piece.cells().collect();
                assert_eq!(piece_cells(&grid), after, "{kind:?}");
                assert_ne!(before, after);
            }
        }
    }

    #[test]
    fn test_move_left_stops_at_wall() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::T, &mut grid, false);
        let mut moves = 0;
        while piece.move_left(&mut grid) {
            moves += 1;
        }
        assert_eq!(moves, 3);
        assert_eq!(piece.pivot(), p(1, 20));
        let snapshot = grid.clone();
        assert!(!piece.move_left(&mut grid));
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_move_right_blocked_by_stack() {
        let mut grid = Grid::new(10, 22);
        block(&mut grid, 6, 20);
        let mut piece = Piece::spawn(PieceKind::T, &mut grid, false);
        assert!(!piece.move_right(&mut grid));
        assert_eq!(piece.pivot(), p(4, 20));
        assert!(grid.is_occupied(6, 20).unwrap());
    }

    #[test]
    fn test_hard_drop_counts_rows() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::I, &mut grid, false);
        assert_eq!(piece.hard_drop(&mut grid), 20);
        assert_eq!(piece.pivot(), p(4, 0));
        assert_eq!(piece.hard_drop(&mut grid), 0);
        assert!(!piece.move_down(&mut grid));
    }

    #[test]
    fn test_hard_drop_onto_stack() {
        let mut grid = Grid::new(10, 22);
        block(&mut grid, 4, 5);
        let mut piece = Piece::spawn(PieceKind::T, &mut grid, false);
        assert_eq!(piece.hard_drop(&mut grid), 14);
        assert_eq!(piece.pivot(), p(4, 6));
    }

    #[test]
    fn test_o_piece_never_rotates() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::O, &mut grid, true);
        piece.move_down(&mut grid);
        let (before, grid_before) = (piece.clone(), grid.clone());
        assert!(!piece.rotate(&mut grid, true));
        assert!(!piece.rotate(&mut grid, false));
        assert_eq!(piece, before);
        assert_eq!(grid, grid_before);
    }

    #[test]
    fn test_rotation_cycles_back_to_up() {
        for kind in ROTATING {
            for clockwise in [true, false] {
                let mut grid = Grid::new(10, 22);
                let mut piece = Piece::spawn(kind, &mut grid, false);
                for _ in 0..4 {
                    piece.move_down(&mut grid);
                }
                let start = piece.clone();
                for _ in 0..4 {
                    assert!(piece.rotate(&mut grid, clockwise), "{kind:?}");
                    assert_eq!(piece_cells(&grid), piece.cells().collect(), "{kind:?}");
                }
                assert_eq!(piece.rotation(), Rotation::Up);
                assert_eq!(piece.offsets(), start.offsets(), "{kind:?}");
            }
        }
    }

    #[test]
    fn test_rotate_back_and_forth_is_identity_in_open_space() {
        for kind in ROTATING {
            let mut grid = Grid::new(10, 22);
            let mut piece = Piece::spawn(kind, &mut grid, false);
            for _ in 0..5 {
                piece.move_down(&mut grid);
            }
            let start = piece.clone();
            assert!(piece.rotate(&mut grid, true));
            assert_eq!(piece.rotation(), Rotation::Right);
            assert!(piece.rotate(&mut grid, false));
            assert_eq!(piece, start, "{kind:?}");
        }
    }

    #[test]
    fn test_t_rotation_clockwise() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::T, &mut grid, false);
        piece.move_down(&mut grid);
        assert!(piece.rotate(&mut grid, true));
        // Nub pointing right: (0,1) -> (1,0) after transposition and row negation.
        assert_eq!(piece.offsets(), [p(0, 0), p(0, 1), p(1, 0), p(0, -1)]);
        assert_eq!(piece.pivot(), p(4, 19));
    }

    #[test]
    fn test_i_rotation_shifts_pivot() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::I, &mut grid, false);
        for _ in 0..4 {
            piece.move_down(&mut grid);
        }
        assert!(piece.rotate(&mut grid, true));
        assert_eq!(piece.pivot(), p(5, 16));
        assert_eq!(piece.offsets(), [p(0, 0), p(0, 1), p(0, -1), p(0, -2)]);
        assert!(piece.rotate(&mut grid, false));
        assert_eq!(piece.pivot(), p(4, 16));
        assert_eq!(piece.offsets(), PieceKind::I.shape());
    }

    #[test]
    fn test_rotation_uses_wall_kick() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::T, &mut grid, false);
        piece.move_down(&mut grid);
        // Vertical T against the left wall, nub pointing right.
        assert!(piece.rotate(&mut grid, true));
        while piece.move_left(&mut grid) {}
        assert_eq!(piece.pivot(), p(0, 19));
        // Rotating to Down needs col -1; the Right kick table shifts it right.
        assert!(piece.rotate(&mut grid, true));
        assert_eq!(piece.rotation(), Rotation::Down);
        assert_eq!(piece.pivot(), p(1, 19));
        assert_eq!(piece_cells(&grid), piece.cells().collect());
    }

    /// Vertical I (rotation Right) at (5, 16) in an empty 10×22 grid.
    fn vertical_i(grid: &mut Grid) -> Piece {
        let mut piece = Piece::spawn(PieceKind::I, grid, false);
        for _ in 0..4 {
            piece.move_down(grid);
        }
        assert!(piece.rotate(grid, true));
        assert_eq!(piece.pivot(), p(5, 16));
        piece
    }

    #[test]
    fn test_i_kicks_off_left_wall() {
        let mut grid = Grid::new(10, 22);
        let mut piece = vertical_i(&mut grid);
        while piece.move_left(&mut grid) {}
        assert_eq!(piece.pivot(), p(0, 16));
        // Down at (0, 15) spans cols -2..=1; (0,0) and (-1,0) fail, (2,0) fits.
        assert!(piece.rotate(&mut grid, true));
        assert_eq!(piece.rotation(), Rotation::Down);
        assert_eq!(piece.pivot(), p(2, 15));
        assert_eq!(piece_cells(&grid), piece.cells().collect());
    }

    #[test]
    fn test_i_kicks_off_right_wall() {
        let mut grid = Grid::new(10, 22);
        let mut piece = vertical_i(&mut grid);
        while piece.move_right(&mut grid) {}
        assert_eq!(piece.pivot(), p(9, 16));
        assert!(piece.rotate(&mut grid, true));
        assert_eq!(piece.rotation(), Rotation::Down);
        assert_eq!(piece.pivot(), p(8, 15));
        assert_eq!(piece_cells(&grid), piece.cells().collect());
    }

    #[test]
    fn test_i_kicks_up_off_floor() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::I, &mut grid, false);
        piece.hard_drop(&mut grid);
        while piece.move_left(&mut grid) {}
        assert_eq!(piece.pivot(), p(1, 0));
        // Only the last Up entry (1,2) lifts the vertical I above the floor.
        assert!(piece.rotate(&mut grid, true));
        assert_eq!(piece.rotation(), Rotation::Right);
        assert_eq!(piece.pivot(), p(3, 2));
        assert_eq!(piece_cells(&grid), piece.cells().collect());
    }

    #[test]
    fn test_kicks_tried_in_order() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::I, &mut grid, false);
        for _ in 0..10 {
            piece.move_down(&mut grid);
        }
        for _ in 0..3 {
            assert!(piece.move_right(&mut grid));
        }
        assert_eq!(piece.pivot(), p(7, 10));
        // Blocks the (0,0) and (-2,0) placements, leaving (1,0) as the first fit.
        block(&mut grid, 8, 11);
        block(&mut grid, 6, 11);
        assert!(piece.rotate(&mut grid, true));
        assert_eq!(piece.rotation(), Rotation::Right);
        assert_eq!(piece.pivot(), p(9, 10));
        assert!(grid.is_occupied(8, 11).unwrap());
        assert!(grid.is_occupied(6, 11).unwrap());
    }

    #[test]
    fn test_counter_clockwise_uses_negated_target_kicks() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::T, &mut grid, false);
        piece.move_down(&mut grid);
        assert!(piece.rotate(&mut grid, true));
        while piece.move_left(&mut grid) {}
        assert_eq!(piece.pivot(), p(0, 19));
        // Back to Up needs col -1; the negated Up entry (1,0) moves it right.
        assert!(piece.rotate(&mut grid, false));
        assert_eq!(piece.rotation(), Rotation::Up);
        assert_eq!(piece.offsets(), PieceKind::T.shape());
        assert_eq!(piece.pivot(), p(1, 19));
        assert_eq!(piece_cells(&grid), piece.cells().collect());
    }

    #[test]
    fn test_i_counter_clockwise_kicks_off_walls() {
        let mut grid = Grid::new(10, 22);
        let mut piece = vertical_i(&mut grid);
        while piece.move_left(&mut grid) {}
        // Up at (-1, 16) spans cols -2..=1; the negated entry (2,0) fits.
        assert!(piece.rotate(&mut grid, false));
        assert_eq!(piece.rotation(), Rotation::Up);
        assert_eq!(piece.pivot(), p(1, 16));
        assert_eq!(piece_cells(&grid), piece.cells().collect());

        let mut grid = Grid::new(10, 22);
        let mut piece = vertical_i(&mut grid);
        while piece.move_right(&mut grid) {}
        // (2,0) still overflows, the negated entry (-1,0) fits.
        assert!(piece.rotate(&mut grid, false));
        assert_eq!(piece.rotation(), Rotation::Up);
        assert_eq!(piece.pivot(), p(7, 16));
        assert_eq!(piece_cells(&grid), piece.cells().collect());
    }

    #[test]
    fn test_rotation_fails_when_fully_blocked() {
        let mut grid = Grid::new(4, 6);
        let mut piece = Piece::spawn(PieceKind::I, &mut grid, false);
        piece.hard_drop(&mut grid);
        for col in 0..4 {
            for row in 1..6 {
                block(&mut grid, col, row);
            }
        }
        let (before, grid_before) = (piece.clone(), grid.clone());
        assert!(!piece.rotate(&mut grid, true));
        assert!(!piece.rotate(&mut grid, false));
        assert_eq!(piece, before);
        assert_eq!(grid, grid_before);
    }

    #[test]
    fn test_shadow_painted_below_piece() {
        let mut grid = Grid::new(10, 22);
        let piece = Piece::spawn(PieceKind::T, &mut grid, true);
        assert_eq!(piece.shadow_distance(), 20);
        let expected: HashSet<_> = PieceKind::T.shape().iter().map(|&o| p(4, 0) + o).collect();
        assert_eq!(shadow_cells(&grid), expected);
    }

    #[test]
    fn test_shadow_follows_moves_and_stack() {
        let mut grid = Grid::new(10, 22);
        block(&mut grid, 7, 3);
        let mut piece = Piece::spawn(PieceKind::T, &mut grid, true);
        for _ in 0..3 {
            assert!(piece.move_right(&mut grid));
        }
        assert_eq!(piece.shadow_distance(), 16);
        assert_eq!(shadow_cells(&grid).len(), 4);
        assert!(shadow_cells(&grid).contains(&p(7, 4)));
        assert_eq!(piece_cells(&grid).len(), 5);
    }

    #[test]
    fn test_shadow_hidden_under_resting_piece() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::L, &mut grid, true);
        piece.hard_drop(&mut grid);
        assert_eq!(piece.shadow_distance(), 0);
        assert!(shadow_cells(&grid).is_empty());
        assert_eq!(piece_cells(&grid), piece.cells().collect());
    }

    #[test]
    fn test_disable_shadow_erases_it() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::S, &mut grid, true);
        assert_eq!(shadow_cells(&grid).len(), 4);
        piece.set_display_shadow(&mut grid, false);
        assert!(shadow_cells(&grid).is_empty());
        assert_eq!(piece.shadow_distance(), 0);
        assert_eq!(piece_cells(&grid), piece.cells().collect());
        piece.set_display_shadow(&mut grid, true);
        assert_eq!(shadow_cells(&grid).len(), 4);
    }

    #[test]
    fn test_remove_from_grid() {
        let mut grid = Grid::new(10, 22);
        let piece = Piece::spawn(PieceKind::Z, &mut grid, true);
        piece.remove_from_grid(&mut grid);
        assert_eq!(grid, Grid::new(10, 22));
    }

    #[test]
    fn test_illegal_lock() {
        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::I, &mut grid, false);
        assert!(piece.is_illegal_lock(&grid));
        piece.move_down(&mut grid);
        assert!(!piece.is_illegal_lock(&grid));

        let mut grid = Grid::new(10, 22);
        let mut piece = Piece::spawn(PieceKind::T, &mut grid, false);
        assert!(piece.is_illegal_lock(&grid));
        piece.move_down(&mut grid);
        // Nub still in the hidden rows, body below them.
        assert!(!piece.is_illegal_lock(&grid));
    }

    #[test]
    fn test_legal_spawn() {
        let mut preview = Grid::new(4, 4);
        let next = Piece::spawn(PieceKind::J, &mut preview, false);

        let mut field = Grid::new(10, 22);
        assert!(next.is_legal_spawn(&field));
        block(&mut field, 3, 21);
        assert!(!next.is_legal_spawn(&field));
        assert!(next.is_legal_spawn(&Grid::new(4, 4)));
    }

    #[test]
    fn test_spawn_area_filled_is_illegal() {
        let mut field = Grid::new(10, 22);
        for col in 0..10 {
            for row in 20..22 {
                block(&mut field, col, row);
            }
        }
        for kind in PieceKind::ALL {
            let mut preview = Grid::new(4, 4);
            let piece = Piece::spawn(kind, &mut preview, false);
            assert!(!piece.is_legal_spawn(&field), "{kind:?}");
        }
    }

    #[test]
    fn test_rotation_state_cycle() {
        let mut r = Rotation::Up;
        for expected in [Rotation::Right, Rotation::Down, Rotation::Left, Rotation::Up] {
            r = r.rotated_cw();
            assert_eq!(r, expected);
        }
        for expected in [Rotation::Left, Rotation::Down, Rotation::Right, Rotation::Up] {
            r = r.rotated_ccw();
            assert_eq!(r, expected);
        }
    }

    #[test]
    fn test_piece_kind_serialization() {
        let json = serde_json::to_string(&PieceKind::T).unwrap();
        assert_eq!(json, "\"T\"");
        assert_eq!(serde_json::from_str::<PieceKind>(&json).unwrap(), PieceKind::T);
    }
}
