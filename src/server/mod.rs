//! Web server for browsing learnings documents.
//!
//! Provides the interactive viewer page:
//! - File selector populated by discovery
//! - Category buttons for the loaded document
//! - Rendered content with the filter text highlighted

mod handlers;
mod routes;
mod templates;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Settings;
use crate::discovery::DiscoveryReport;
use crate::model::FilterConfig;
use crate::sources::{source_for, DocumentLoader};
use crate::ui::RecordingPanel;
use crate::viewer::ContentViewer;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub viewer: Arc<ContentViewer>,
    pub panel: Arc<RecordingPanel>,
    pub report: Arc<DiscoveryReport>,
    pub filter: FilterConfig,
    /// Serializes page requests so each response reflects its own selection.
    pub interaction: Arc<Mutex<()>>,
}

impl AppState {
    /// Build the viewer and run discovery.
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let source = source_for(settings)?;
        let loader = DocumentLoader::new(source, settings.load_timeout());
        let filter = settings.filter();
        let panel = Arc::new(RecordingPanel::new());
        let viewer = ContentViewer::new(loader, filter.clone(), panel.clone())
            .with_concurrency(settings.discovery_concurrency)
            .with_file_suffix(&settings.file_suffix);
        Ok(Self::start(viewer, panel, filter).await)
    }

    /// Build the viewer from an existing loader and run discovery.
    pub async fn with_loader(
        loader: DocumentLoader,
        filter: FilterConfig,
        concurrency: usize,
    ) -> Self {
        let panel = Arc::new(RecordingPanel::new());
        let viewer = ContentViewer::new(loader, filter.clone(), panel.clone())
            .with_concurrency(concurrency);
        Self::start(viewer, panel, filter).await
    }

    async fn start(viewer: ContentViewer, panel: Arc<RecordingPanel>, filter: FilterConfig) -> Self {
        let report = viewer.start().await;

        Self {
            viewer: Arc::new(viewer),
            panel,
            report: Arc::new(report),
            filter,
            interaction: Arc::new(Mutex::new(())),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings).await?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
