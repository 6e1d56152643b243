use std::io::Write;
use std::path::Path;
use csv::WriterBuilder;
use log::info;
use crate::analyzers::album::AlbumSummary;
use crate::utils::format::{format_bytes, format_duration, ByteUnits};
use crate::{Result, Track};

/// Character encoding of the text report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1; characters outside it are written as `?`.
    Latin1,
}

impl TextEncoding {
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        }
    }
}

pub struct Reporter {
    units: ByteUnits,
    encoding: TextEncoding,
}

impl Reporter {
    pub fn new(units: ByteUnits, encoding: TextEncoding) -> Self {
        Self { units, encoding }
    }

    /// One listing line; compilations also name each track's artist.
    pub fn track_line(summary: &AlbumSummary, track: &Track) -> String {
        let length = format_duration(track.duration_secs);
        if summary.is_compilation {
            format!("{:2}. {} - {} ({})", track.track_number, track.artist, track.title, length)
        } else {
            format!("{:2}. {} ({})", track.track_number, track.title, length)
        }
    }

    pub fn render(&self, summary: &AlbumSummary, tracks: &[Track]) -> String {
        let mut text = String::new();
        text.push_str(&format!("Artist: {}\n", summary.artist));
        text.push_str(&format!("Album: {}\n", summary.album));
        text.push_str(&format!("Genre: {}\n", summary.genre));
        text.push_str(&format!("Year: {}\n", summary.year));
        text.push_str(&format!(
            "Quality: {}kbps / {:.1}kHz / {} channels\n\n",
            summary.avg_bitrate,
            f64::from(summary.sample_rate) / 1000.0,
            summary.channels
        ));

        for track in tracks {
            text.push_str(&Self::track_line(summary, track));
            text.push('\n');
        }

        text.push('\n');
        text.push_str(&format!("Playing time: {}\n", format_duration(summary.total_length_secs)));
        text.push_str(&format!("Total size: {}\n", format_bytes(summary.total_size_bytes, self.units)));
        text
    }

    pub fn write_summary(&self, out: &mut impl Write, summary: &AlbumSummary, tracks: &[Track]) -> Result<()> {
        let text = self.render(summary, tracks);
        out.write_all(&self.encoding.encode(&text))?;
        out.flush()?;
        Ok(())
    }

    pub fn generate_csv_report(&self, summary: &AlbumSummary, tracks: &[Track], output_path: impl AsRef<Path>) -> Result<()> {
        let output_path_ref = output_path.as_ref();
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_path(output_path_ref)?;

        for track in tracks {
            writer.serialize(track)?;
        }

        // Summary rows follow the track listing
        writer.write_record(["Summary", ""])?;
        writer.write_record(["Artist", summary.artist.as_str()])?;
        writer.write_record(["Album", summary.album.as_str()])?;
        writer.write_record(["Genre", summary.genre.as_str()])?;
        writer.write_record(["Year", summary.year.to_string().as_str()])?;
        writer.write_record(["Average Bitrate", format!("{} kbps", summary.avg_bitrate).as_str()])?;
        writer.write_record(["Sample Rate", format!("{} Hz", summary.sample_rate).as_str()])?;
        writer.write_record(["Channels", summary.channels.to_string().as_str()])?;
        writer.write_record(["Tracks", summary.track_count.to_string().as_str()])?;
        writer.write_record(["Playing Time", format_duration(summary.total_length_secs).as_str()])?;
        writer.write_record(["Total Size", format_bytes(summary.total_size_bytes, self.units).as_str()])?;
        writer.write_record(["Compilation", if summary.is_compilation { "yes" } else { "no" }])?;

        writer.flush()?;
        info!("CSV report generated: {}", output_path_ref.display());
        Ok(())
    }
}
