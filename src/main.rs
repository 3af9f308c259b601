use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_transcript_scraper::cli::{Cli, Commands};
use yt_transcript_scraper::config::Config;
use yt_transcript_scraper::export::{self, ExportFormat};
use yt_transcript_scraper::extractors::YoutubeTranscriptFetcher;
use yt_transcript_scraper::scrape::{self, TranscriptScraper};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "yt_transcript_scraper=debug"
    } else {
        "yt_transcript_scraper=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().await?;

    match cli.command {
        Commands::Scrape {
            urls_file,
            output,
            format,
            language,
        } => {
            let format = match format {
                Some(format) => format,
                None => config.default_format()?,
            };
            let language = language.or_else(|| config.fetch.language_code.clone());

            tracing::info!("Reading URLs from {}", urls_file.display());
            let urls = scrape::read_urls_file(&urls_file)?;

            let fetcher = YoutubeTranscriptFetcher::new(config.request_timeout())?;
            let scraper = TranscriptScraper::new(fetcher, language);

            tracing::info!("Fetching transcripts for {} URL(s)...", urls.len());
            let records = scraper.scrape(&urls).await;

            if records.is_empty() {
                tracing::warn!("No transcripts were successfully fetched.");
            } else {
                tracing::info!("Successfully fetched {} transcript(s).", records.len());
            }

            let output = output.unwrap_or_else(|| config.output.output_dir.join("transcripts"));
            let written = export::export_records(&records, &output, format)?;

            println!(
                "Export complete: wrote {} record(s) to {} ({} format)",
                records.len(),
                written.display(),
                format
            );
        }
        Commands::Config => {
            config.display();
        }
        Commands::Formats => {
            println!("Supported export formats:");
            for format in [
                ExportFormat::Json,
                ExportFormat::Csv,
                ExportFormat::Excel,
                ExportFormat::Html,
                ExportFormat::Xml,
            ] {
                println!("  • {} (.{})", format, format.extension());
            }
        }
    }

    Ok(())
}
