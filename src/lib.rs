use std::path::PathBuf;
use serde::Serialize;

pub mod analyzers;
pub mod audio;
pub mod config;
pub mod utils;
pub mod cli;

/// Metadata and measured properties of one successfully read audio file.
///
/// Missing tags are stored as an empty string or zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Track {
    pub path: PathBuf,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub year: u32,
    pub bitrate: u32,
    pub sample_rate: u32,
    pub channels: u32,
    pub track_number: u32,
    pub title: String,
    pub duration_secs: u64,
    pub size_bytes: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum AlbumError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Metadata extraction error: {0}")]
    Metadata(String),
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Couldn't find any audio files")]
    NoAudioFiles,
    #[error("Cannot summarize an album without tracks")]
    NoTracks,
}

pub type Result<T> = std::result::Result<T, AlbumError>;

// Re-exports for convenience
pub use audio::metadata::{Ingested, MetadataExtractor};
pub use analyzers::album::{AlbumAnalyzer, AlbumSummary};
pub use analyzers::frequency::FrequencyTable;
pub use config::Config;
