use log::{debug, trace};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::{ConfigError, Grid, Piece, PieceKind};

use super::{Bag, BagSeed, GameStats, GravityTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum GameState {
    /// Not started yet, or over.
    #[default]
    Off,
    On,
    Paused,
}

/// The game controller.
///
/// Owns the play field, the preview and hold panels, the pieces living in
/// them and the scoring state. Every command is a no-op unless the game is
/// in the state it applies to, so a front-end can forward input blindly.
///
/// The field has [`Game::HIDDEN_ROWS`] rows above the visible area where new
/// pieces appear.
#[derive(Debug, Clone)]
pub struct Game<R = Pcg32> {
    field: Grid,
    preview: Grid,
    hold: Grid,
    current: Option<Piece>,
    next: Option<Piece>,
    held: Option<Piece>,
    bag: Bag<R>,
    state: GameState,
    stats: GameStats,
    initial_level: usize,
    rotate_clockwise: bool,
    move_after_drop: bool,
    display_shadow: bool,
    hold_used: bool,
    gravity: GravityTimer,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    #[must_use]
    pub fn new() -> Self {
        Self::with_bag(Bag::new())
    }

    /// Like [`Self::new`], but deals pieces deterministically from `seed`.
    #[must_use]
    pub fn with_seed(seed: BagSeed) -> Self {
        Self::with_bag(Bag::with_seed(seed))
    }
}

impl<R> Game<R>
where
    R: Rng,
{
    pub const MAX_LEVEL: usize = GameStats::MAX_LEVEL;
    pub const MIN_FIELD_SIZE: usize = 4;
    pub const MAX_FIELD_SIZE: usize = 50;
    pub const DEFAULT_FIELD_COLS: usize = 10;
    pub const DEFAULT_FIELD_ROWS: usize = 20;
    pub const HIDDEN_ROWS: usize = 2;
    pub const PREVIEW_SIZE: usize = 4;

    /// Creates a stopped game dealing pieces from `bag`.
    pub fn with_bag(bag: Bag<R>) -> Self {
        Self {
            field: Grid::new(
                Self::DEFAULT_FIELD_COLS,
                Self::DEFAULT_FIELD_ROWS + Self::HIDDEN_ROWS,
            ),
            preview: Grid::new(Self::PREVIEW_SIZE, Self::PREVIEW_SIZE),
            hold: Grid::new(Self::PREVIEW_SIZE, Self::PREVIEW_SIZE),
            current: None,
            next: None,
            held: None,
            bag,
            state: GameState::Off,
            stats: GameStats::new(GameStats::MIN_LEVEL),
            initial_level: GameStats::MIN_LEVEL,
            rotate_clockwise: false,
            move_after_drop: false,
            display_shadow: false,
            hold_used: false,
            gravity: GravityTimer::new(GameStats::MIN_LEVEL),
        }
    }

    /// The play field, including the hidden rows at the top.
    #[must_use]
    pub fn field(&self) -> &Grid {
        &self.field
    }

    #[must_use]
    pub fn preview(&self) -> &Grid {
        &self.preview
    }

    #[must_use]
    pub fn hold_grid(&self) -> &Grid {
        &self.hold
    }

    #[must_use]
    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.stats.cleared_lines()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn initial_level(&self) -> usize {
        self.initial_level
    }

    #[must_use]
    pub fn rotate_clockwise(&self) -> bool {
        self.rotate_clockwise
    }

    #[must_use]
    pub fn move_after_drop(&self) -> bool {
        self.move_after_drop
    }

    #[must_use]
    pub fn display_shadow(&self) -> bool {
        self.display_shadow
    }

    #[must_use]
    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    #[must_use]
    pub fn gravity(&self) -> &GravityTimer {
        &self.gravity
    }

    /// Starts a new game, discarding whatever state the previous one left.
    pub fn start(&mut self) {
        self.field.clear();
        self.preview.clear();
        self.hold.clear();

        self.stats = GameStats::new(self.initial_level);
        self.hold_used = false;
        self.bag.reset();

        let kind = self.bag.next_kind();
        self.current = Some(self.spawn_in_field(kind));
        let kind = self.bag.next_kind();
        self.next = Some(self.spawn_in_preview(kind));
        self.held = None;

        self.state = GameState::On;
        self.gravity.set_level(self.initial_level);
        self.gravity.restart();
        debug!(
            "game started: {}x{} field, level {}",
            self.field.num_cols(),
            self.field.num_rows() - Self::HIDDEN_ROWS,
            self.initial_level
        );
    }

    /// Pauses a running game, or resumes a paused one.
    pub fn pause(&mut self) {
        match self.state {
            GameState::On => {
                self.state = GameState::Paused;
                self.gravity.stop();
            }
            GameState::Paused => {
                self.state = GameState::On;
                self.gravity.restart();
            }
            GameState::Off => {}
        }
    }

    pub fn end(&mut self) {
        if !self.state.is_off() {
            debug!(
                "game over: score {}, lines {}, level {}",
                self.stats.score(),
                self.stats.cleared_lines(),
                self.stats.level()
            );
        }
        self.state = GameState::Off;
        self.gravity.stop();
    }

    pub fn move_left(&mut self) {
        if let Some((piece, field)) = self.active_piece() {
            piece.move_left(field);
        }
    }

    pub fn move_right(&mut self) {
        if let Some((piece, field)) = self.active_piece() {
            piece.move_right(field);
        }
    }

    /// Moves the piece one row down, awarding a point and re-arming gravity.
    pub fn soft_drop(&mut self) {
        let Some((piece, field)) = self.active_piece() else {
            return;
        };
        if piece.move_down(field) {
            self.stats.add_drop_points(1);
            self.gravity.restart();
        }
    }

    /// Gravity step. Locks the piece if it cannot fall any further.
    pub fn tick(&mut self) {
        let Some((piece, field)) = self.active_piece() else {
            return;
        };
        if !piece.move_down(field) {
            self.lock_piece();
        }
    }

    /// Drops the piece as far as it goes, awarding a point per row.
    ///
    /// Whether the piece locks immediately depends on the move-after-drop
    /// setting, inverted when `modify` is set. A piece that was already
    /// resting always locks.
    pub fn hard_drop(&mut self, modify: bool) {
        let Some((piece, field)) = self.active_piece() else {
            return;
        };
        let rows = piece.hard_drop(field);
        self.stats.add_drop_points(rows);
        if rows == 0 || self.move_after_drop == modify {
            self.lock_piece();
        } else {
            self.gravity.restart();
        }
    }

    /// Rotates the piece in the default direction, or the opposite one when `switch` is set.
    pub fn rotate(&mut self, switch: bool) {
        let clockwise = self.rotate_clockwise ^ switch;
        if let Some((piece, field)) = self.active_piece() {
            piece.rotate(field, clockwise);
        }
    }

    /// Moves the current piece to the hold panel.
    ///
    /// With an empty hold panel the next piece enters the field and a fresh
    /// one is dealt to the preview. Otherwise the current and held pieces
    /// swap places. Allowed once per piece.
    pub fn hold(&mut self) {
        if !self.state.is_on() || self.hold_used {
            return;
        }
        let Some(current) = self.current.take() else {
            return;
        };
        self.hold_used = true;
        current.remove_from_grid(&mut self.field);

        let incoming = if let Some(held) = self.held.take() {
            held.remove_from_grid(&mut self.hold);
            held
        } else if let Some(next) = self.next.take() {
            next.remove_from_grid(&mut self.preview);
            let kind = self.bag.next_kind();
            self.next = Some(self.spawn_in_preview(kind));
            next
        } else {
            return;
        };
        self.held = Some(self.spawn_in_hold(current.kind()));

        if !incoming.is_legal_spawn(&self.field) {
            self.end();
            return;
        }
        self.current = Some(self.spawn_in_field(incoming.kind()));
        trace!("held {:?}, playing {:?}", current.kind(), incoming.kind());
        self.gravity.restart();
    }

    /// Sets the level new games start at. Ends the current game.
    pub fn set_initial_level(&mut self, level: usize) -> Result<(), ConfigError> {
        if !(GameStats::MIN_LEVEL..=Self::MAX_LEVEL).contains(&level) {
            return Err(ConfigError::InitialLevel(level));
        }
        self.end();
        self.initial_level = level;
        Ok(())
    }

    /// Replaces the field with an empty one of `cols` × `rows` visible cells. Ends the current game.
    pub fn set_field_size(&mut self, cols: usize, rows: usize) -> Result<(), ConfigError> {
        let range = Self::MIN_FIELD_SIZE..=Self::MAX_FIELD_SIZE;
        if !range.contains(&cols) || !range.contains(&rows) {
            return Err(ConfigError::FieldSize { cols, rows });
        }
        self.end();
        self.field = Grid::new(cols, rows + Self::HIDDEN_ROWS);
        self.current = None;
        Ok(())
    }

    pub fn set_display_shadow(&mut self, display_shadow: bool) {
        self.display_shadow = display_shadow;
        if self.state.is_off() {
            return;
        }
        if let Some(piece) = &mut self.current {
            piece.set_display_shadow(&mut self.field, display_shadow);
        }
    }

    pub fn set_rotate_clockwise(&mut self, rotate_clockwise: bool) {
        self.rotate_clockwise = rotate_clockwise;
    }

    pub fn set_move_after_drop(&mut self, move_after_drop: bool) {
        self.move_after_drop = move_after_drop;
    }

    /// The falling piece and the field it lives in, while the game is running.
    fn active_piece(&mut self) -> Option<(&mut Piece, &mut Grid)> {
        if !self.state.is_on() {
            return None;
        }
        self.current.as_mut().map(|piece| (piece, &mut self.field))
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        if piece.is_illegal_lock(&self.field) {
            trace!("{:?} locked in the hidden rows", piece.kind());
            self.end();
            return;
        }

        let cleared = self.field.clear_full_rows();
        let points = self.stats.complete_piece_lock(cleared);
        self.hold_used = false;
        trace!(
            "locked {:?} at {:?}, cleared {cleared} lines for {points} points",
            piece.kind(),
            piece.pivot()
        );

        let Some(next) = self.next.take() else {
            self.end();
            return;
        };
        if !next.is_legal_spawn(&self.field) {
            self.next = Some(next);
            self.end();
            return;
        }

        if self.stats.level_up() > 0 {
            self.gravity.set_level(self.stats.level());
            debug!(
                "level up: {} (gravity {:?})",
                self.stats.level(),
                self.gravity.period()
            );
        }

        next.remove_from_grid(&mut self.preview);
        self.current = Some(self.spawn_in_field(next.kind()));
        let kind = self.bag.next_kind();
        self.next = Some(self.spawn_in_preview(kind));
        self.gravity.restart();
    }

    // New pieces move down once so that they are visible right away.

    fn spawn_in_field(&mut self, kind: PieceKind) -> Piece {
        let mut piece = Piece::spawn(kind, &mut self.field, self.display_shadow);
        piece.move_down(&mut self.field);
        piece
    }

    fn spawn_in_preview(&mut self, kind: PieceKind) -> Piece {
        let mut piece = Piece::spawn(kind, &mut self.preview, false);
        piece.move_down(&mut self.preview);
        piece
    }

    fn spawn_in_hold(&mut self, kind: PieceKind) -> Piece {
        let mut piece = Piece::spawn(kind, &mut self.hold, false);
        piece.move_down(&mut self.hold);
        piece
    }
}
