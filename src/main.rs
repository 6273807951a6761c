mod app;
mod hud;
mod input;
mod logging;
mod term;

use anyhow::Result;
use clap::Parser;
use log::info;
use solarium::config::{load_settings, project_paths, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = project_paths()?;

    let log_path = cli.log_file.clone().unwrap_or(paths.log_path);
    logging::init(&log_path)?;

    let settings_path = cli.config.clone().unwrap_or(paths.settings_path);
    let mut settings = load_settings(&settings_path)?;
    settings.apply_cli(&cli);
    info!("settings from {}: {:?}", settings_path.display(), settings);

    app::run(settings)
}
