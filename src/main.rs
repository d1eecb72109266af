use crate::commands::{Cli, Commands};
use crate::cue::inspect_cue;
use anyhow::Result;
use clap::Parser;

mod commands;
mod cue;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(cmd) => inspect_cue(cmd.input, cmd.json).await?,
    }

    Ok(())
}
