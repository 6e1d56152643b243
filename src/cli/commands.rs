use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "albumdetails")]
#[command(version = "1.0")]
#[command(about = "Summarize the tags of an album's audio files", long_about = None)]
pub struct Cli {
    /// Audio files or directories containing them
    #[arg(required = true, value_name = "AUDIOFILES")]
    pub paths: Vec<PathBuf>,

    /// Use SI units instead of IEC
    #[arg(short = 's', long)]
    pub si: bool,

    /// Use ISO-8859-1 instead of UTF-8
    #[arg(short = 'i', long)]
    pub latin1: bool,

    /// Number of threads used to read files
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Also write the track listing to a CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,
}
