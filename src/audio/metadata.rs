use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use log::{debug, info, warn};
use regex::Regex;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::{MetadataOptions, StandardTagKey, Tag};
use symphonia::core::probe::Hint;
use crate::config::Config;
use crate::utils::parallel::ParallelProcessor;
use crate::{AlbumError, Result, Track};

/// Extensions picked up when a directory is given instead of a file.
const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "flac", "wav", "ogg", "oga"];

/// Tracks read from the input paths, in input order.
#[derive(Debug, Default)]
pub struct Ingested {
    pub tracks: Vec<Track>,
    pub skipped: usize,
}

/// Text tags relevant to the album summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct TagFields {
    artist: Option<String>,
    album_artist: Option<String>,
    album: Option<String>,
    genre: Option<String>,
    year: Option<u32>,
    track_number: Option<u32>,
    title: Option<String>,
}

fn leading_number(value: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^\s*(\d+)").unwrap());
    re.captures(value)?.get(1)?.as_str().parse().ok()
}

fn year_of(value: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\b(\d{4})\b").unwrap());
    re.captures(value)?.get(1)?.as_str().parse().ok()
}

impl TagFields {
    /// Later tags only fill fields that are still unset.
    fn apply(&mut self, tags: &[Tag]) {
        for tag in tags {
            // RIFF INFO strings keep their NUL terminator and pad byte
            let value = tag.value.to_string().trim_end_matches('\0').to_owned();
            match tag.std_key {
                Some(StandardTagKey::Artist) => fill(&mut self.artist, Some(value)),
                Some(StandardTagKey::AlbumArtist) => fill(&mut self.album_artist, Some(value)),
                Some(StandardTagKey::Album) => fill(&mut self.album, Some(value)),
                Some(StandardTagKey::Genre) => fill(&mut self.genre, Some(value)),
                Some(StandardTagKey::Date) => fill(&mut self.year, year_of(&value)),
                Some(StandardTagKey::TrackNumber) => fill(&mut self.track_number, leading_number(&value)),
                Some(StandardTagKey::TrackTitle) => fill(&mut self.title, Some(value)),
                _ => {}
            }
        }
    }
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

pub struct MetadataExtractor;

impl ParallelProcessor for MetadataExtractor {}

impl MetadataExtractor {
    pub fn extract_metadata(path: impl AsRef<Path>) -> Result<Track> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let size_bytes = file.metadata()?.len();

        // Create media source stream
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create hint to help with format detection
        let mut hint = Hint::new();
        if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(extension);
        }

        let mut probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| AlbumError::UnsupportedFormat(format!("{}: {}", path.display(), e)))?;

        // Container tags take precedence over those found while probing (e.g. ID3v2)
        let mut tags = TagFields::default();
        let mut format = probed.format;
        if let Some(revision) = format.metadata().current() {
            tags.apply(revision.tags());
        }
        if let Some(metadata) = probed.metadata.get() {
            if let Some(revision) = metadata.current() {
                tags.apply(revision.tags());
            }
        }

        let params = format
            .default_track()
            .map(|track| track.codec_params.clone())
            .ok_or_else(|| AlbumError::Metadata(format!("{}: no audio track", path.display())))?;
        let sample_rate = params
            .sample_rate
            .ok_or_else(|| AlbumError::Metadata(format!("{}: unknown sample rate", path.display())))?;

        let mut duration = 0.0;
        if let (Some(time_base), Some(n_frames)) = (params.time_base, params.n_frames) {
            let time = time_base.calc_time(n_frames);
            duration = time.seconds as f64 + time.frac;
        }

        // Average bitrate over the whole file, in kbps
        let bitrate = if duration > 0.0 {
            ((size_bytes * 8) as f64 / duration / 1000.0) as u32
        } else {
            0
        };

        Ok(Track {
            path: path.to_path_buf(),
            artist: tags.artist.or(tags.album_artist).unwrap_or_default(),
            album: tags.album.unwrap_or_default(),
            genre: tags.genre.unwrap_or_default(),
            year: tags.year.unwrap_or_default(),
            bitrate,
            sample_rate,
            channels: params.channels.map_or(0, |c| c.count() as u32),
            track_number: tags.track_number.unwrap_or_default(),
            title: tags.title.unwrap_or_default(),
            duration_secs: duration as u64,
            size_bytes,
        })
    }

    fn has_audio_extension(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    fn is_hidden(entry: &walkdir::DirEntry) -> bool {
        entry.depth() > 0
            && entry
                .file_name()
                .to_str()
                .map(|name| name.starts_with('.'))
                .unwrap_or(false)
    }

    /// Audio files below `dir_path`, sorted by path.
    fn collect_audio_files(dir_path: &Path) -> Vec<PathBuf> {
        walkdir::WalkDir::new(dir_path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !Self::is_hidden(e))
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Error accessing entry: {}", err);
                    None
                }
            })
            .filter(|e| {
                let is_file = e.file_type().is_file();
                if is_file && !Self::has_audio_extension(e.path()) {
                    debug!("Skipping non-audio file: {}", e.path().display());
                    return false;
                }
                is_file
            })
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    /// Expands directories into their audio files. Files are kept as given.
    pub fn expand_paths(paths: &[impl AsRef<Path>]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                let found = Self::collect_audio_files(path);
                info!("Found {} audio files in {}", found.len(), path.display());
                files.extend(found);
            } else {
                files.push(path.to_path_buf());
            }
        }
        files
    }

    /// Reads every path, skipping unreadable ones.
    ///
    /// Fails with [`AlbumError::NoAudioFiles`] if nothing could be read.
    pub fn ingest(paths: &[impl AsRef<Path>], config: &Config) -> Result<Ingested> {
        let files = Self::expand_paths(paths);
        info!("Reading {} files using {} threads", files.len(), config.jobs);

        let results = Self::ordered_map(config.jobs, &files, |path| {
            let result = Self::extract_metadata(path);
            if let Ok(ref track) = result {
                debug!(
                    "Read {} ({} bytes, {}s, {} kbps)",
                    track.path.display(),
                    track.size_bytes,
                    track.duration_secs,
                    track.bitrate
                );
            }
            result
        });

        let mut ingested = Ingested::default();
        for (path, result) in files.iter().zip(results) {
            match result {
                Ok(track) => ingested.tracks.push(track),
                Err(AlbumError::UnsupportedFormat(_)) => {
                    warn!("non-audio file: {}", path.display());
                    ingested.skipped += 1;
                }
                Err(e) => {
                    warn!("Can't read meta-data for {}: {}", path.display(), e);
                    ingested.skipped += 1;
                }
            }
        }

        if ingested.tracks.is_empty() {
            return Err(AlbumError::NoAudioFiles);
        }
        info!("Read {} tracks, skipped {} files", ingested.tracks.len(), ingested.skipped);
        Ok(ingested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use symphonia::core::meta::Value;
    use tempfile::tempdir;

    fn tag(key: StandardTagKey, value: &str) -> Tag {
        Tag::new(Some(key), "", Value::String(value.to_string()))
    }

    #[test]
    fn parses_track_numbers_and_years() {
        assert_eq!(leading_number("3/12"), Some(3));
        assert_eq!(leading_number(" 07"), Some(7));
        assert_eq!(leading_number("A1"), None);
        assert_eq!(year_of("2001-05-12"), Some(2001));
        assert_eq!(year_of("1987"), Some(1987));
        assert_eq!(year_of("unknown"), None);
    }

    #[test]
    fn first_tag_wins_and_album_artist_is_kept_apart() {
        let mut fields = TagFields::default();
        fields.apply(&[
            tag(StandardTagKey::AlbumArtist, "Various"),
            tag(StandardTagKey::Artist, "Nina"),
            tag(StandardTagKey::Date, "1994-03-01"),
            tag(StandardTagKey::TrackNumber, "2/10"),
        ]);
        fields.apply(&[
            tag(StandardTagKey::Artist, "Other"),
            tag(StandardTagKey::TrackTitle, "Intro"),
        ]);

        assert_eq!(
            fields,
            TagFields {
                artist: Some("Nina".to_string()),
                album_artist: Some("Various".to_string()),
                year: Some(1994),
                track_number: Some(2),
                title: Some("Intro".to_string()),
                ..TagFields::default()
            }
        );
    }

    #[test]
    fn nul_padding_is_stripped_from_values() {
        let mut fields = TagFields::default();
        fields.apply(&[
            tag(StandardTagKey::Artist, "A\0"),
            tag(StandardTagKey::TrackTitle, "Song\0\0"),
            tag(StandardTagKey::Date, "1999\0\0"),
            tag(StandardTagKey::Genre, "Rock "),
        ]);
        assert_eq!(fields.artist.as_deref(), Some("A"));
        assert_eq!(fields.title.as_deref(), Some("Song"));
        assert_eq!(fields.year, Some(1999));
        assert_eq!(fields.genre.as_deref(), Some("Rock "));
    }

    #[test]
    fn has_audio_extension_is_case_insensitive() {
        assert!(MetadataExtractor::has_audio_extension(Path::new("/tmp/a.MP3")));
        assert!(MetadataExtractor::has_audio_extension(Path::new("/tmp/a.flac")));
        assert!(!MetadataExtractor::has_audio_extension(Path::new("/tmp/a.txt")));
        assert!(!MetadataExtractor::has_audio_extension(Path::new("/tmp/a")));
    }

    #[test]
    fn expand_paths_walks_directories_in_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("02.mp3"), b"x").unwrap();
        fs::write(dir.path().join("01.flac"), b"x").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"x").unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
        let loose = dir.path().join("notes.txt");
        fs::write(&loose, b"x").unwrap();

        let files = MetadataExtractor::expand_paths(&[dir.path().to_path_buf(), loose.clone()]);
        assert_eq!(
            files,
            vec![dir.path().join("01.flac"), dir.path().join("02.mp3"), loose]
        );
    }

    #[test]
    fn non_audio_file_is_unsupported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.mp3");
        fs::write(&path, b"this is not audio at all").unwrap();
        let result = MetadataExtractor::extract_metadata(&path);
        assert!(matches!(result, Err(AlbumError::UnsupportedFormat(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = MetadataExtractor::extract_metadata("/nonexistent/track.flac");
        assert!(matches!(result, Err(AlbumError::Io(_))));
    }

    #[test]
    fn ingest_without_audio_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"not audio").unwrap();
        fs::write(dir.path().join("b.txt"), b"not audio").unwrap();
        let config = Config { jobs: 2, ..Config::default() };

        let result = MetadataExtractor::ingest(&[dir.path().join("a.mp3"), dir.path().join("b.txt")], &config);
        assert!(matches!(result, Err(AlbumError::NoAudioFiles)));
    }
}
