use log::{debug, info};
use serde::Serialize;

use crate::analyzers::frequency::FrequencyTable;
use crate::{AlbumError, Result, Track};

/// Artist reported for albums recognised as compilations.
pub const VARIOUS_ARTISTS: &str = "VA";

/// More distinct artists than this marks the album as a compilation.
pub const COMPILATION_ARTIST_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlbumSummary {
    pub track_count: usize,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub year: u32,
    pub avg_bitrate: u32,
    pub sample_rate: u32,
    pub channels: u32,
    pub total_length_secs: u64,
    pub total_size_bytes: u64,
    pub is_compilation: bool,
}

/// Per-attribute counts collected during one pass over the tracks.
#[derive(Debug, Default)]
struct AttributeCounts {
    artists: FrequencyTable<String>,
    albums: FrequencyTable<String>,
    genres: FrequencyTable<String>,
    years: FrequencyTable<u32>,
    sample_rates: FrequencyTable<u32>,
    channels: FrequencyTable<u32>,
}

impl AttributeCounts {
    fn record(&mut self, track: &Track) {
        self.artists.record(track.artist.clone());
        self.albums.record(track.album.clone());
        self.genres.record(track.genre.clone());
        self.years.record(track.year);
        self.sample_rates.record(track.sample_rate);
        self.channels.record(track.channels);
    }
}

fn mode_or_default<T: Eq + std::hash::Hash + Clone + Default>(table: &FrequencyTable<T>) -> T {
    table.mode().cloned().unwrap_or_default()
}

/// Resolves the album artist, applying the compilation heuristic.
///
/// Returns the artist label and whether the album is a compilation.
pub fn album_artist(artists: &FrequencyTable<String>) -> (String, bool) {
    if artists.distinct_count() > COMPILATION_ARTIST_THRESHOLD {
        (VARIOUS_ARTISTS.to_string(), true)
    } else {
        (mode_or_default(artists), false)
    }
}

pub struct AlbumAnalyzer;

impl AlbumAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Summarizes the tracks in a single pass.
    ///
    /// Fails with [`AlbumError::NoTracks`] on an empty slice before any
    /// averaging takes place.
    pub fn summarize(&self, tracks: &[Track]) -> Result<AlbumSummary> {
        if tracks.is_empty() {
            return Err(AlbumError::NoTracks);
        }
        info!("Summarizing {} tracks", tracks.len());

        let mut counts = AttributeCounts::default();
        let mut total_length_secs = 0u64;
        let mut total_size_bytes = 0u64;
        let mut bitrate_sum = 0u64;

        for track in tracks {
            total_length_secs += track.duration_secs;
            total_size_bytes += track.size_bytes;
            bitrate_sum += u64::from(track.bitrate);
            counts.record(track);
        }

        let avg_bitrate = (bitrate_sum / tracks.len() as u64) as u32;
        let (artist, is_compilation) = album_artist(&counts.artists);
        if is_compilation {
            debug!(
                "{} distinct artists, reporting album as {}",
                counts.artists.distinct_count(),
                VARIOUS_ARTISTS
            );
        } else {
            debug!(
                "Album artist '{}' on {} of {} tracks",
                artist,
                counts.artists.count(&artist),
                tracks.len()
            );
        }

        Ok(AlbumSummary {
            track_count: tracks.len(),
            artist,
            album: mode_or_default(&counts.albums),
            genre: mode_or_default(&counts.genres),
            year: mode_or_default(&counts.years),
            avg_bitrate,
            sample_rate: mode_or_default(&counts.sample_rates),
            channels: mode_or_default(&counts.channels),
            total_length_secs,
            total_size_bytes,
            is_compilation,
        })
    }
}

impl Default for AlbumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
