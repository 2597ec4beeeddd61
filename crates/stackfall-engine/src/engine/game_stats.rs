/// Base score for a line clear, multiplied by the current level.
///
/// Index corresponds to number of lines cleared simultaneously, with four or
/// more lines sharing the last entry.
const SCORE_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

/// Score, line and level bookkeeping for a single game.
///
/// # Scoring
///
/// - Soft drop: 1 point per row moved by the player
/// - Hard drop: 1 point per row travelled
/// - Line clears: [40, 100, 300, 1200] × level for 1, 2, 3, 4+ lines
///
/// # Leveling
///
/// The game starts at the initial level and gains one level for every 10
/// lines cleared, up to [`GameStats::MAX_LEVEL`].
///
/// # Example
///
/// ```
/// use stackfall_engine::GameStats;
///
/// let mut stats = GameStats::new(2);
/// stats.complete_piece_lock(4);
///
/// assert_eq!(stats.score(), 2400);
/// assert_eq!(stats.cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    cleared_lines: usize,
    level: usize,
    initial_level: usize,
    locked_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new(1)
    }
}

impl GameStats {
    pub const MIN_LEVEL: usize = 1;
    pub const MAX_LEVEL: usize = 20;
    pub const LINES_PER_LEVEL: usize = 10;

    #[must_use]
    pub const fn new(initial_level: usize) -> Self {
        Self {
            score: 0,
            cleared_lines: 0,
            level: initial_level,
            initial_level,
            locked_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    /// Returns a histogram of locks by lines cleared.
    ///
    /// - `[0]`: locks that cleared nothing
    /// - `[1]`..`[3]`: singles, doubles, triples
    /// - `[4]`: four or more lines at once
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Awards one point per row the piece was moved down by the player.
    pub const fn add_drop_points(&mut self, rows: usize) {
        self.score += rows;
    }

    /// Updates statistics after a piece has locked and `cleared_lines` rows were removed.
    ///
    /// Returns the points awarded for the clear.
    pub fn complete_piece_lock(&mut self, cleared_lines: usize) -> usize {
        let bucket = cleared_lines.min(SCORE_TABLE.len() - 1);
        let points = SCORE_TABLE[bucket] * self.level;
        self.locked_pieces += 1;
        self.line_cleared_counter[bucket] += 1;
        self.cleared_lines += cleared_lines;
        self.score += points;
        points
    }

    /// Raises the level for every 10-line threshold crossed since the last call.
    ///
    /// Returns the number of levels gained (0 once [`Self::MAX_LEVEL`] is reached).
    pub fn level_up(&mut self) -> usize {
        let mut gained = 0;
        while self.level < Self::MAX_LEVEL
            && self.cleared_lines / Self::LINES_PER_LEVEL > self.level - self.initial_level
        {
            self.level += 1;
            gained += 1;
        }
        gained
    }
}
