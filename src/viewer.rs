//! Selection state machine.
//!
//! A viewer starts with no document. Selecting a file loads it, picks the
//! category to show and pushes the result to the panel; selecting a
//! category re-renders the current document. When file selections
//! overlap, the most recent one wins and older loads are discarded when
//! they finish.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::discovery::{discover_or_fallback, DiscoveryReport};
use crate::error::ViewerError;
use crate::model::{Document, FilterConfig};
use crate::render::{categories, default_category, CategoryRenderer};
use crate::sources::DocumentLoader;
use crate::ui::{CategoryButton, Status, ViewerPanel};

/// Default number of candidates loaded at once during discovery.
pub const DEFAULT_DISCOVERY_CONCURRENCY: usize = 4;

/// What the viewer currently holds.
#[derive(Debug, Clone, Default)]
pub enum ViewerState {
    #[default]
    NoDocumentLoaded,
    DocumentLoaded {
        document: Arc<Document>,
        categories: Vec<String>,
        active_category: Option<String>,
    },
}

impl ViewerState {
    pub fn document(&self) -> Option<&Arc<Document>> {
        match self {
            ViewerState::NoDocumentLoaded => None,
            ViewerState::DocumentLoaded { document, .. } => Some(document),
        }
    }

    pub fn active_category(&self) -> Option<&str> {
        match self {
            ViewerState::NoDocumentLoaded => None,
            ViewerState::DocumentLoaded {
                active_category, ..
            } => active_category.as_deref(),
        }
    }
}

/// Result of a file selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Selection {
    /// The document was loaded and displayed.
    Shown {
        file: String,
        active_category: Option<String>,
    },
    /// A newer selection started while this one was loading; its result was dropped.
    Superseded,
}

struct Inner {
    state: ViewerState,
    files: Vec<String>,
    discovery_status: Option<String>,
}

/// Content browser core: discovery, selection and rendering behind a [`ViewerPanel`].
pub struct ContentViewer {
    loader: DocumentLoader,
    filter: FilterConfig,
    panel: Arc<dyn ViewerPanel>,
    renderer: CategoryRenderer,
    concurrency: usize,
    generation: AtomicU64,
    inner: Mutex<Inner>,
}

impl ContentViewer {
    pub fn new(loader: DocumentLoader, filter: FilterConfig, panel: Arc<dyn ViewerPanel>) -> Self {
        Self {
            loader,
            filter,
            panel,
            renderer: CategoryRenderer::new(),
            concurrency: DEFAULT_DISCOVERY_CONCURRENCY,
            generation: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                state: ViewerState::NoDocumentLoaded,
                files: Vec::new(),
                discovery_status: None,
            }),
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Data file suffix, stripped from document names in headings.
    pub fn with_file_suffix(mut self, suffix: &str) -> Self {
        self.renderer = self.renderer.with_suffix(suffix);
        self
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Copy of the current state.
    pub async fn state(&self) -> ViewerState {
        self.inner.lock().await.state.clone()
    }

    /// Files currently offered for selection.
    pub async fn files(&self) -> Vec<String> {
        self.inner.lock().await.files.clone()
    }

    /// Discover files, publish them, and select the first one.
    pub async fn start(&self) -> DiscoveryReport {
        self.panel.set_loading(true);
        let report = discover_or_fallback(&self.loader, &self.filter, self.concurrency).await;
        let files = report.display_files().to_vec();
        let message = report.status_message(&self.filter);
        info!("{}", message);

        {
            let mut inner = self.inner.lock().await;
            inner.files = files.clone();
            inner.discovery_status = Some(message.clone());
        }
        self.panel.show_files(&files, files.first().map(String::as_str));
        self.panel.show_status(Status::info(message));
        self.panel.set_loading(false);

        if let Some(first) = files.first() {
            // Failures are already on the panel; discovery itself succeeded.
            let _ = self.select_file(first).await;
        }
        report
    }

    /// Load a file and show its default category.
    ///
    /// On failure the previous document stays loaded and an error status is shown.
    pub async fn select_file(&self, file: &str) -> Result<Selection, ViewerError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.panel.set_loading(true);
        debug!("Selecting {} (ticket {})", file, ticket);

        let result = self.loader.load(file).await;

        let mut inner = self.inner.lock().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!("Discarding stale load of {} (ticket {})", file, ticket);
            return Ok(Selection::Superseded);
        }
        self.panel.set_loading(false);

        let document = match result {
            Ok(doc) => Arc::new(doc),
            Err(e) => {
                error!("Failed to load {}: {}", file, e);
                self.panel
                    .show_status(Status::error(format!("Error loading {}: {}", file, e)));
                return Err(e.into());
            }
        };

        let kinds = categories(&document);
        let active = default_category(&document, &self.filter);
        let html = match &active {
            Some(kind) => self.renderer.render(&document, kind, &self.filter),
            None => self.renderer.render_empty_document(),
        };
        info!(
            "Loaded {} ({} entries, {} categories, showing {})",
            file,
            document.entries.len(),
            kinds.len(),
            active.as_deref().unwrap_or("nothing")
        );

        self.panel.show_files(&inner.files, Some(file));
        self.panel
            .show_categories(&buttons(&kinds, active.as_deref()));
        self.panel.show_content(&html);
        if let Some(message) = &inner.discovery_status {
            self.panel.show_status(Status::info(message.clone()));
        }

        inner.state = ViewerState::DocumentLoaded {
            document,
            categories: kinds,
            active_category: active.clone(),
        };

        Ok(Selection::Shown {
            file: file.to_string(),
            active_category: active,
        })
    }

    /// Re-render the current document for another category.
    pub async fn select_category(&self, kind: &str) -> Result<(), ViewerError> {
        let mut inner = self.inner.lock().await;
        let status = inner.discovery_status.clone();
        let ViewerState::DocumentLoaded {
            document,
            categories,
            active_category,
        } = &mut inner.state
        else {
            self.panel
                .show_status(Status::error("Select a file before choosing a category"));
            return Err(ViewerError::NoDocument);
        };

        debug!("Showing category {} of {}", kind, document.name);
        let html = self.renderer.render(document, kind, &self.filter);
        *active_category = Some(kind.to_string());

        self.panel.show_categories(&buttons(categories, Some(kind)));
        self.panel.show_content(&html);
        if let Some(message) = status {
            self.panel.show_status(Status::info(message));
        }
        Ok(())
    }
}

fn buttons(kinds: &[String], active: Option<&str>) -> Vec<CategoryButton> {
    kinds
        .iter()
        .map(|k| CategoryButton::new(k, Some(k.as_str()) == active))
        .collect()
}
