use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use petition_pdf::{DocumentConfig, PageSize, petition};

/// Compose a legal petition into a paginated PDF.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON document description; the built-in sample petition when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Font file for the sample petition
    #[arg(long, default_value = petition::DEFAULT_FONT_PATH, conflicts_with = "config")]
    font: PathBuf,

    /// Name the sample font is registered under
    #[arg(long, default_value = petition::SAMPLE_FONT_NAME, conflicts_with = "config")]
    font_name: String,

    /// Output PDF path (overrides the config's `output`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// a4, letter, legal or WIDTHxHEIGHT in points (overrides the config)
    #[arg(long)]
    page_size: Option<PageSize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut config = match &cli.config {
        Some(path) => match DocumentConfig::from_path(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => DocumentConfig::sample(&cli.font_name, &cli.font, petition::DEFAULT_OUTPUT),
    };
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }

    match config.compose() {
        Ok(composition) => {
            println!(
                "Wrote {} ({} pages, {} bytes)",
                config.output.display(),
                composition.page_count(),
                composition.byte_len
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
