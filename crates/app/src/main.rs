use clap::Parser;

mod camera;
mod cli;
mod commands;
mod error;
mod settings;
mod terminal;

use crate::error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let mut settings = settings::Settings::new(cli.config.as_deref())?;
    if let Some(level) = cli.level {
        settings.app.level = level;
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "offlinepay={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?settings, "settings loaded");

    commands::run(cli.command, &settings).await
}
