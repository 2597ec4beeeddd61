mod command;
mod settings;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
