use anyhow::{Context, Result};
use blockhuman::config::Cli;
use blockhuman::terminal::{self, TerminalSession};
use blockhuman::texture::TextureSet;
use blockhuman::widget::HumanWidget;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level() {
        logger.filter_level(level);
    }
    logger.init();

    let textures = match &cli.texture_dir {
        Some(dir) => TextureSet::load_dir(dir)
            .with_context(|| format!("Failed to load textures from {}", dir.display()))?,
        None => TextureSet::fallback(),
    };

    let mut state = cli.initial_state();
    log::info!(
        "Starting in {} mode with the {} profile",
        state.mode.label(),
        state.profile.name
    );

    let mut session = TerminalSession::enter().context("Failed to set up the terminal")?;
    let mut widget = HumanWidget::new(textures, terminal::size(), Instant::now());
    let frames = widget.run(&mut session, &mut state, cli.frames);
    drop(session);

    let frames = frames.context("Frame loop failed")?;
    log::info!("Exiting after {frames} frames");
    Ok(())
}
