//! Request handlers for the web interface.

use axum::extract::{Query, State};
use axum::response::{Html, Json};
use serde::{Deserialize, Serialize};

use super::templates;
use super::AppState;
use crate::discovery::DiscoveryReport;
use crate::ui::{CategoryButton, PanelSnapshot, Status};

/// Selection carried in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub file: Option<String>,
    pub category: Option<String>,
}

/// Apply a selection to the shared viewer and return what the panel shows.
///
/// A file without a category is a file selection and always reloads. A
/// category for the file already loaded only re-renders.
async fn apply_selection(state: &AppState, query: &SelectionQuery) -> PanelSnapshot {
    let _guard = state.interaction.lock().await;

    let file = query.file.as_deref().filter(|f| !f.is_empty());
    let category = query.category.as_deref().filter(|c| !c.is_empty());

    if let Some(file) = file {
        let current = state.viewer.state().await;
        let loaded = current.document().map(|d| d.name.as_str()) == Some(file);
        if !loaded || category.is_none() {
            // Errors are reported on the panel.
            let _ = state.viewer.select_file(file).await;
        }
    }

    if let Some(category) = category {
        let _ = state.viewer.select_category(category).await;
    }

    state.panel.snapshot()
}

/// Viewer page.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Html<String> {
    let snapshot = apply_selection(&state, &query).await;
    Html(templates::viewer_page(&snapshot, &state.filter))
}

#[derive(Serialize)]
pub struct FilesResponse {
    pub files: Vec<String>,
    pub status: String,
    pub report: DiscoveryReport,
}

/// Discovery outcome.
pub async fn api_files(State(state): State<AppState>) -> Json<FilesResponse> {
    Json(FilesResponse {
        files: state.report.display_files().to_vec(),
        status: state.report.status_message(&state.filter),
        report: state.report.as_ref().clone(),
    })
}

#[derive(Serialize)]
pub struct ContentResponse {
    pub file: Option<String>,
    pub categories: Vec<CategoryButton>,
    pub active_category: Option<String>,
    pub html: String,
    pub status: Option<Status>,
}

/// Rendered content for a selection.
pub async fn api_content(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Json<ContentResponse> {
    let snapshot = apply_selection(&state, &query).await;
    Json(ContentResponse {
        file: snapshot.selected_file.clone(),
        active_category: snapshot.active_category().map(str::to_string),
        categories: snapshot.categories,
        html: snapshot.content,
        status: snapshot.status,
    })
}
