mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputFormat};
use learnview::config::{self, Settings};
use learnview::discovery::discover_or_fallback;
use learnview::sources::{source_for, DocumentLoader};
use learnview::ui::RecordingPanel;
use learnview::{server, ContentViewer};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("learnview=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = resolve_settings(&cli).await?;

    match cli.command {
        Commands::Files { json } => {
            let loader = loader_for(&settings)?;
            let filter = settings.filter();
            let report =
                discover_or_fallback(&loader, &filter, settings.discovery_concurrency).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.status_message(&filter));
                for file in report.display_files() {
                    println!("  {}", file);
                }
                for failed in &report.failed {
                    eprintln!("  skipped {}: {}", failed.file, failed.error);
                }
            }
        }

        Commands::Show {
            file,
            category,
            format,
        } => {
            let loader = loader_for(&settings)?;
            let panel = Arc::new(RecordingPanel::new());
            let viewer = ContentViewer::new(loader, settings.filter(), panel.clone())
                .with_file_suffix(&settings.file_suffix);

            viewer
                .select_file(&file)
                .await
                .with_context(|| format!("failed to load {}", file))?;
            if let Some(category) = category {
                viewer.select_category(&category).await?;
            }

            let snapshot = panel.snapshot();
            match format {
                OutputFormat::Html => println!("{}", snapshot.content),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
            }
        }

        Commands::Serve { host, port } => {
            server::serve(&settings, &host, port).await?;
        }
    }

    Ok(())
}

/// Config file first, then command line flags.
async fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = config::load_settings().await;
    if let Some(ref data) = cli.data {
        settings.data_location = config::expand_location(data);
    }
    if let Some(ref filter) = cli.filter {
        settings.content_filter = filter.clone();
    }
    if let Some(ref type_filter) = cli.type_filter {
        settings.type_filter = type_filter.clone();
    }
    if let Some(timeout) = cli.timeout {
        settings.load_timeout_secs = timeout;
    }
    settings.validate()?;
    Ok(settings)
}

fn loader_for(settings: &Settings) -> Result<DocumentLoader> {
    let source = source_for(settings)?;
    Ok(DocumentLoader::new(source, settings.load_timeout()))
}
