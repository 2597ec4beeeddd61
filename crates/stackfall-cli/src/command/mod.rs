use clap::{Parser, Subcommand};

use self::{play::PlayArg, print_settings::PrintSettingsArg};

mod play;
mod print_settings;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the effective settings as JSON
    PrintSettings(#[clap(flatten)] PrintSettingsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::PrintSettings(arg) => print_settings::run(&arg)?,
    }
    Ok(())
}
