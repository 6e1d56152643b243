use std::path::PathBuf;

use crate::cli::commands::Cli;
use crate::utils::format::ByteUnits;
use crate::utils::reporting::TextEncoding;

/// Run-time options threaded through ingestion and presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub units: ByteUnits,
    pub encoding: TextEncoding,
    /// Threads used to read files.
    pub jobs: usize,
    pub csv_report: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            units: ByteUnits::Iec,
            encoding: TextEncoding::Utf8,
            jobs: num_cpus::get(),
            csv_report: None,
        }
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            units: if cli.si { ByteUnits::Si } else { ByteUnits::Iec },
            encoding: if cli.latin1 { TextEncoding::Latin1 } else { TextEncoding::Utf8 },
            jobs: cli.jobs.filter(|&n| n > 0).unwrap_or_else(num_cpus::get),
            csv_report: cli.csv.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_to_iec_and_utf8() {
        let cli = Cli::parse_from(["albumdetails", "a.mp3"]);
        let config = Config::from(&cli);
        assert_eq!(config.units, ByteUnits::Iec);
        assert_eq!(config.encoding, TextEncoding::Utf8);
        assert_eq!(config.jobs, num_cpus::get());
        assert_eq!(config.csv_report, None);
    }

    #[test]
    fn flags_select_si_and_latin1() {
        let cli = Cli::parse_from(["albumdetails", "-s", "-i", "-j", "2", "--csv", "out.csv", "a.mp3"]);
        let config = Config::from(&cli);
        assert_eq!(config.units, ByteUnits::Si);
        assert_eq!(config.encoding, TextEncoding::Latin1);
        assert_eq!(config.jobs, 2);
        assert_eq!(config.csv_report, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn zero_jobs_falls_back_to_cpu_count() {
        let cli = Cli::parse_from(["albumdetails", "-j", "0", "a.mp3"]);
        assert_eq!(Config::from(&cli).jobs, num_cpus::get());
    }
}
