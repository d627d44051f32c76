use clap::{ArgAction, Parser};
use progcp_core::ChunkSize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "progcp")]
#[command(version)]
#[command(about = "Copy a file or directory into a folder with a byte progress bar")]
pub struct Cli {
    /// File or directory to copy
    pub source: PathBuf,
    /// Existing folder that receives the copy (as <DESTINATION>/<source name>)
    pub destination: PathBuf,
    /// Bytes moved per read/write call (e.g. 64K, 1M, 4MiB)
    #[arg(long, value_name = "SIZE", default_value_t = ChunkSize::default())]
    pub chunk_size: ChunkSize,
    /// Hide the progress bar and the final summary
    #[arg(long, short = 'q')]
    pub quiet: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}
