use crate::settings::SettingsArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PrintSettingsArg {
    #[clap(flatten)]
    settings: SettingsArg,
}

pub(crate) fn run(arg: &PrintSettingsArg) -> anyhow::Result<()> {
    let settings = arg.settings.resolve()?;
    settings.build_game()?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
