use clap::Parser;
use std::path::PathBuf;

/// Parses a CUE sheet and prints its file, track and metadata layout.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct InspectCommand {
    /// Input path of the .cue file
    #[arg(value_name = "INPUT_CUE")]
    pub input: PathBuf,

    /// Print the parsed sheet as pretty JSON instead of plain text
    #[arg(long, short = 'j', default_value_t = false)]
    pub json: bool,
}
