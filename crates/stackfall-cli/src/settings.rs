use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use stackfall_engine::{BagSeed, ConfigError, Game};

/// Game options, loadable from a JSON file.
///
/// Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) initial_level: usize,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) display_shadow: bool,
    pub(crate) rotate_clockwise: bool,
    pub(crate) move_after_drop: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) seed: Option<BagSeed>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_level: 1,
            width: <Game>::DEFAULT_FIELD_COLS,
            height: <Game>::DEFAULT_FIELD_ROWS,
            display_shadow: false,
            rotate_clockwise: false,
            move_after_drop: false,
            seed: None,
        }
    }
}

impl Settings {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Creates a stopped game configured with these settings.
    pub(crate) fn build_game(&self) -> Result<Game, ConfigError> {
        let mut game = match self.seed {
            Some(seed) => Game::with_seed(seed),
            None => Game::new(),
        };
        game.set_initial_level(self.initial_level)?;
        game.set_field_size(self.width, self.height)?;
        game.set_display_shadow(self.display_shadow);
        game.set_rotate_clockwise(self.rotate_clockwise);
        game.set_move_after_drop(self.move_after_drop);
        Ok(game)
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SettingsArg {
    /// Settings file (JSON). Command-line options override its values
    #[clap(long)]
    settings: Option<PathBuf>,
    /// Level to start at (1-20)
    #[clap(long)]
    level: Option<usize>,
    /// Number of columns in the field (4-50)
    #[clap(long)]
    width: Option<usize>,
    /// Number of visible rows in the field (4-50)
    #[clap(long)]
    height: Option<usize>,
    /// Show where the falling piece will land
    #[clap(long, num_args = 0..=1, default_missing_value = "true")]
    shadow: Option<bool>,
    /// Rotate clockwise by default
    #[clap(long, num_args = 0..=1, default_missing_value = "true")]
    rotate_clockwise: Option<bool>,
    /// Keep the piece movable after a hard drop
    #[clap(long, num_args = 0..=1, default_missing_value = "true")]
    move_after_drop: Option<bool>,
    /// Seed for the piece sequence
    #[clap(long)]
    seed: Option<u64>,
}

impl SettingsArg {
    /// Loads the settings file, if any, and applies the command-line overrides.
    pub(crate) fn resolve(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(level) = self.level {
            settings.initial_level = level;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(shadow) = self.shadow {
            settings.display_shadow = shadow;
        }
        if let Some(rotate_clockwise) = self.rotate_clockwise {
            settings.rotate_clockwise = rotate_clockwise;
        }
        if let Some(move_after_drop) = self.move_after_drop {
            settings.move_after_drop = move_after_drop;
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(BagSeed::new(seed));
        }
        Ok(settings)
    }
}
