use std::path::PathBuf;

use clap::Parser;

/// Interactive playground for the in-memory FAT simulator
#[derive(Parser)]
pub struct Cli {
    /// Command script to run instead of the interactive prompt
    #[arg(long, short)]
    pub script: Option<PathBuf>,
}
