use std::io;
use std::process::ExitCode;
use clap::Parser;
use albumdetails::{
    AlbumAnalyzer,
    Config,
    MetadataExtractor,
    Result,
    cli::commands::Cli,
    utils::reporting::Reporter,
};

fn run(cli: &Cli) -> Result<()> {
    let config = Config::from(cli);

    let ingested = MetadataExtractor::ingest(&cli.paths, &config)?;
    let summary = AlbumAnalyzer::new().summarize(&ingested.tracks)?;

    let reporter = Reporter::new(config.units, config.encoding);
    reporter.write_summary(&mut io::stdout().lock(), &summary, &ingested.tracks)?;

    if let Some(csv_path) = &config.csv_report {
        reporter.generate_csv_report(&summary, &ingested.tracks, csv_path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
