//! Game engine logic and state management.
//!
//! This module builds the rules of play on top of the core data structures:
//!
//! - [`Game`] - The controller: field, preview and hold panels, commands and the state machine
//! - [`GameStats`] - Score, cleared lines and level progression
//! - [`GravityTimer`] - Gravity schedule for an external clock to follow
//! - [`Bag`] - 7-bag piece generation system
//! - [`BagSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. [`Game::start`] deals the first piece into the field and the next one into the preview
//! 2. The front-end forwards player input (move, rotate, drop, hold)
//! 3. The front-end calls [`Game::tick`] every [`GravityTimer::interval`]
//! 4. Landed pieces lock, full rows are cleared and the next piece enters
//! 5. Repeat until a piece locks in the hidden rows or cannot spawn
//!
//! # Example
//!
//! ```
//! use stackfall_engine::{BagSeed, Game};
//!
//! let mut game = Game::with_seed(BagSeed::new(42));
//! game.start();
//!
//! game.move_left();
//! game.rotate(false);
//! game.hard_drop(false);
//!
//! assert_eq!(game.stats().locked_pieces(), 1);
//! assert!(game.score() > 0);
//! ```

pub use self::{bag::*, game::*, game_stats::*, gravity_timer::*};

mod bag;
mod game;
mod game_stats;
mod gravity_timer;
