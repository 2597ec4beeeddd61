use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use env_logger::{Env, Target};

use crate::{command::play::app::PlayApp, settings::SettingsArg, tui::Tui};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    settings: SettingsArg,
    /// Write logs to this file (filtered by `RUST_LOG`, default `info`)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { settings, log_file } = arg;

    if let Some(path) = log_file {
        init_logger(path)?;
    }

    let settings = settings.resolve()?;
    let game = settings.build_game()?;
    log::info!("starting with {settings:?}");

    let mut app = PlayApp::new(game);
    Tui::new().run(&mut app)?;

    let game = app.game();
    log::info!(
        "exiting: score {}, lines {}, level {}",
        game.score(),
        game.lines(),
        game.level()
    );
    Ok(())
}

/// Sends log output to `path`; the terminal belongs to the TUI.
fn init_logger(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logger")?;
    Ok(())
}
