use crate::commands::cue::InspectCommand;
use clap::{Parser, Subcommand};

pub mod cue;

/// CLI for parsing and inspecting CUE sheets of optical-disc images.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inspect(InspectCommand),
}
